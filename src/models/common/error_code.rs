/// 响应中的业务错误码
///
/// 与 HTTP 状态码分开，方便前端统一处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,

    AuthFailed = 2000,

    InternalServerError = 5000,
}
