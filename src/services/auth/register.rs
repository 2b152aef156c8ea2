use tracing::info;

use super::AuthService;
use crate::errors::{RecordsError, Result};
use crate::models::users::{
    entities::{User, UserRole},
    requests::{NewUser, RegisterRequest},
};
use crate::utils::validate::{validate_email, validate_password, validate_username};

pub async fn handle_register(service: &AuthService, request: RegisterRequest) -> Result<User> {
    // 1. 字段校验
    validate_username(&request.username).map_err(RecordsError::bad_request)?;
    validate_email(&request.email).map_err(RecordsError::bad_request)?;
    validate_password(&request.password).map_err(RecordsError::bad_request)?;

    // 管理员账号不开放自助注册
    if request.role == UserRole::Admin {
        return Err(RecordsError::bad_request(
            "Only student and teacher accounts can be self-registered",
        ));
    }

    // 2. 检查用户名/邮箱是否已存在
    if service
        .storage
        .get_user_by_username(&request.username)
        .await?
        .is_some()
    {
        return Err(RecordsError::conflict("Username already exists"));
    }
    if service
        .storage
        .get_user_by_email(&request.email)
        .await?
        .is_some()
    {
        return Err(RecordsError::conflict("Email already exists"));
    }

    // 3. 哈希密码并创建用户（并发注册由唯一索引兜底）
    let password_hash = service.passwords.hash(&request.password)?;
    let user = service
        .storage
        .create_user(NewUser {
            username: request.username,
            email: request.email,
            password_hash,
            role: request.role,
            profile: request.profile,
            academic: request.academic,
            class_id: None,
        })
        .await?;

    info!("User {} registered as {}", user.username, user.role);
    Ok(user)
}

#[cfg(test)]
mod tests {
    use crate::errors::ErrorKind;
    use crate::models::users::{entities::UserRole, requests::RegisterRequest};
    use crate::test_support::TestContext;

    fn request(username: &str, email: &str, role: UserRole) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: "secret123".to_string(),
            role,
            profile: Default::default(),
            academic: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_register_student() {
        let ctx = TestContext::new().await;
        let user = ctx
            .auth_service()
            .register(request("alice", "alice@example.com", UserRole::Student))
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::Student);
        assert!(user.enabled);
        assert!(ctx.passwords.verify("secret123", &user.password_hash));
    }

    #[tokio::test]
    async fn test_register_duplicate_username_and_email() {
        let ctx = TestContext::new().await;
        let auth = ctx.auth_service();
        auth.register(request("alice", "alice@example.com", UserRole::Student))
            .await
            .unwrap();

        let err = auth
            .register(request("alice", "other@example.com", UserRole::Student))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let err = auth
            .register(request("alice2", "alice@example.com", UserRole::Teacher))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_register_rejects_admin_and_bad_fields() {
        let ctx = TestContext::new().await;
        let auth = ctx.auth_service();

        let err = auth
            .register(request("root", "root@example.com", UserRole::Admin))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);

        let err = auth
            .register(request("a b", "ab@example.com", UserRole::Student))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);

        let err = auth
            .register(request("carol", "not-an-email", UserRole::Student))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }
}
