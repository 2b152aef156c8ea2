pub mod login;
pub mod profile;
pub mod register;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::{
    auth::{requests::LoginRequest, responses::AuthResponse},
    users::{
        entities::User,
        requests::{ChangePasswordRequest, RegisterRequest, UpdateProfileRequest},
    },
};
use crate::storage::Storage;
use crate::utils::{PasswordService, TokenService};

/// 认证服务：注册、登录与本人资料维护
pub struct AuthService {
    storage: Arc<dyn Storage>,
    passwords: PasswordService,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(storage: Arc<dyn Storage>, passwords: PasswordService, tokens: TokenService) -> Self {
        Self {
            storage,
            passwords,
            tokens,
        }
    }

    // 用户注册
    pub async fn register(&self, request: RegisterRequest) -> Result<User> {
        register::handle_register(self, request).await
    }

    // 登录验证
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse> {
        login::handle_login(self, request).await
    }

    // 更新本人资料
    pub async fn update_profile(
        &self,
        principal: &User,
        request: UpdateProfileRequest,
    ) -> Result<User> {
        profile::handle_update_profile(self, principal, request).await
    }

    // 修改本人密码
    pub async fn change_password(
        &self,
        principal: &User,
        request: ChangePasswordRequest,
    ) -> Result<()> {
        profile::handle_change_password(self, principal, request).await
    }
}
