use crate::models::users::entities::{User, UserRole};
use serde::Serialize;

// 登录/注册成功后的令牌响应
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
    pub role: UserRole,
    /// 有效期（秒）
    pub expires_in: i64,
}

#[derive(Debug, Serialize)]
pub struct UserInfoResponse {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct TokenVerificationResponse {
    pub is_valid: bool,
}
