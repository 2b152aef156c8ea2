//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 每个变体归入一个 [`ErrorKind`]，边界层（HTTP）只依据 kind 决定响应状态。

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::models::{ApiResponse, ErrorCode};

/// 错误分类
///
/// 领域操作只返回这六类错误之一，存储或序列化等底层错误统一视为 `Internal`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Forbidden,
    BadRequest,
    Unauthorized,
    Internal,
}

impl ErrorKind {
    /// 错误未携带信息时使用的通用提示
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "Resource not found",
            ErrorKind::Conflict => "Resource already exists",
            ErrorKind::Forbidden => "Access denied",
            ErrorKind::BadRequest => "Invalid request",
            ErrorKind::Unauthorized => "Authentication required",
            ErrorKind::Internal => "Internal server error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            ErrorKind::NotFound => ErrorCode::NotFound,
            ErrorKind::Conflict => ErrorCode::Conflict,
            ErrorKind::Forbidden => ErrorCode::Forbidden,
            ErrorKind::BadRequest => ErrorCode::BadRequest,
            ErrorKind::Unauthorized => ErrorCode::Unauthorized,
            ErrorKind::Internal => ErrorCode::InternalServerError,
        }
    }
}

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - kind() 方法 - 返回错误分类
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_records_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $kind:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum RecordsError {
            $($variant(String),)*
        }

        impl RecordsError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(RecordsError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(RecordsError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误分类
            pub fn kind(&self) -> ErrorKind {
                match self {
                    $(RecordsError::$variant(_) => ErrorKind::$kind,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(RecordsError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl RecordsError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        RecordsError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_records_errors! {
    DatabaseConfig("E001", "Database Configuration Error", Internal),
    DatabaseConnection("E002", "Database Connection Error", Internal),
    DatabaseOperation("E003", "Database Operation Error", Internal),
    Serialization("E004", "Serialization Error", Internal),
    DateParse("E005", "Date Parse Error", BadRequest),
    BadRequest("E006", "Bad Request", BadRequest),
    NotFound("E007", "Resource Not Found", NotFound),
    Conflict("E008", "Resource Conflict", Conflict),
    Unauthorized("E009", "Authentication Error", Unauthorized),
    Forbidden("E010", "Authorization Error", Forbidden),
    Internal("E011", "Internal Error", Internal),
}

impl RecordsError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 面向调用方的提示信息
    ///
    /// Internal 类错误从不暴露内部细节；其余类型在信息为空时回退到通用提示。
    pub fn public_message(&self) -> &str {
        let kind = self.kind();
        if kind == ErrorKind::Internal || self.message().trim().is_empty() {
            kind.default_message()
        } else {
            self.message()
        }
    }
}

impl fmt::Display for RecordsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for RecordsError {}

impl ResponseError for RecordsError {
    fn status_code(&self) -> StatusCode {
        self.kind().status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let kind = self.kind();
        if kind == ErrorKind::Internal {
            tracing::error!("{} [{}]", self.format_simple(), self.code());
        }

        HttpResponse::build(kind.status_code()).json(ApiResponse::error_empty(
            kind.error_code(),
            self.public_message(),
        ))
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for RecordsError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                RecordsError::Conflict(format!("Unique constraint violated: {detail}"))
            }
            _ => RecordsError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for RecordsError {
    fn from(err: serde_json::Error) -> Self {
        RecordsError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for RecordsError {
    fn from(err: chrono::ParseError) -> Self {
        RecordsError::DateParse(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for RecordsError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
        match err.kind() {
            JwtErrorKind::ExpiredSignature => RecordsError::Unauthorized("Token expired".into()),
            _ => RecordsError::Unauthorized("Invalid token".into()),
        }
    }
}

pub type Result<T> = std::result::Result<T, RecordsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::MessageBody;

    #[test]
    fn test_error_codes() {
        assert_eq!(RecordsError::database_config("test").code(), "E001");
        assert_eq!(RecordsError::bad_request("test").code(), "E006");
        assert_eq!(RecordsError::conflict("test").code(), "E008");
        assert_eq!(RecordsError::forbidden("test").code(), "E010");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(RecordsError::date_parse("x").kind(), ErrorKind::BadRequest);
        assert_eq!(RecordsError::database_operation("x").kind(), ErrorKind::Internal);
        assert_eq!(RecordsError::not_found("x").kind(), ErrorKind::NotFound);
        assert_eq!(RecordsError::unauthorized("x").kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn test_format_simple() {
        let err = RecordsError::bad_request("Invalid date");
        let formatted = err.format_simple();
        assert!(formatted.contains("Bad Request"));
        assert!(formatted.contains("Invalid date"));
    }

    #[test]
    fn test_public_message_hides_internal_details() {
        let err = RecordsError::database_operation("near \"SELEC\": syntax error");
        assert_eq!(err.public_message(), "Internal server error");

        let err = RecordsError::not_found("");
        assert_eq!(err.public_message(), "Resource not found");

        let err = RecordsError::conflict("Username already exists");
        assert_eq!(err.public_message(), "Username already exists");
    }

    #[test]
    fn test_error_response_status_and_body() {
        let resp = RecordsError::forbidden("You are not assigned to this class").error_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = RecordsError::serialization("secret detail").error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = resp.into_body().try_into_bytes().unwrap_or_default();
        let body = String::from_utf8_lossy(&body);
        assert!(!body.contains("secret detail"));
        assert!(body.contains("Internal server error"));
    }
}
