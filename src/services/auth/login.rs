use tracing::{debug, info};

use super::AuthService;
use crate::errors::{RecordsError, Result};
use crate::models::auth::{requests::LoginRequest, responses::AuthResponse};

pub async fn handle_login(service: &AuthService, request: LoginRequest) -> Result<AuthResponse> {
    // 用户不存在与密码错误返回相同信息
    let invalid = || RecordsError::unauthorized("Username or password is incorrect");

    // 1. 根据用户名获取用户信息
    let Some(user) = service
        .storage
        .get_user_by_username(&request.username)
        .await?
    else {
        service.passwords.verify_absent(&request.password);
        debug!("Login attempt for unknown user {}", request.username);
        return Err(invalid());
    };

    // 2. 验证密码
    if !service
        .passwords
        .verify(&request.password, &user.password_hash)
    {
        debug!("Password mismatch for user {}", request.username);
        return Err(invalid());
    }

    if !user.enabled {
        return Err(RecordsError::unauthorized("Account is disabled"));
    }

    // 3. 签发令牌
    let token = service.tokens.issue(&user)?;
    info!("User {} logged in successfully", user.username);

    Ok(AuthResponse {
        token,
        username: user.username,
        role: user.role,
        expires_in: service.tokens.expires_in(),
    })
}
