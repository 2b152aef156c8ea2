//! 提取器错误处理
//!
//! 将 JSON / 查询参数 / 路径参数的解析失败统一转换为 `ApiResponse` 格式的 400 响应。

use actix_web::{
    Error, HttpRequest,
    error::{JsonPayloadError, PathError, QueryPayloadError},
};
use tracing::debug;

use crate::errors::RecordsError;

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    debug!("Failed to parse JSON body on {}: {}", req.path(), err);
    let message = match &err {
        JsonPayloadError::ContentType => "Content-Type must be application/json".to_string(),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "Request body too large".to_string()
        }
        other => format!("Invalid JSON body: {other}"),
    };
    RecordsError::bad_request(message).into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    debug!("Failed to parse query on {}: {}", req.path(), err);
    RecordsError::bad_request(format!("Invalid query parameters: {err}")).into()
}

pub fn path_error_handler(err: PathError, req: &HttpRequest) -> Error {
    debug!("Failed to parse path on {}: {}", req.path(), err);
    RecordsError::bad_request(format!("Invalid path parameters: {err}")).into()
}
