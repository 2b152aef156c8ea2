use tracing::info;

use super::AuthService;
use crate::errors::{RecordsError, Result};
use crate::models::users::{
    entities::User,
    requests::{ChangePasswordRequest, UpdateProfileRequest, UserUpdate},
};
use crate::policy::{self, Action, Resource};
use crate::utils::validate::{validate_email, validate_password};

/// 本人更新资料：仅限名、姓、邮箱、电话、地址、性别
pub async fn handle_update_profile(
    service: &AuthService,
    principal: &User,
    request: UpdateProfileRequest,
) -> Result<User> {
    policy::authorize(
        principal,
        Action::Write,
        Resource::Account {
            owner_id: principal.id,
        },
    )?;

    if let Some(ref email) = request.email {
        validate_email(email).map_err(RecordsError::bad_request)?;
        if let Some(existing) = service.storage.get_user_by_email(email).await?
            && existing.id != principal.id
        {
            return Err(RecordsError::conflict("Email already exists"));
        }
    }

    let update = UserUpdate {
        first_name: request.first_name,
        last_name: request.last_name,
        email: request.email,
        phone: request.phone,
        address: request.address,
        gender: request.gender,
        ..Default::default()
    };

    let user = service
        .storage
        .update_user(principal.id, update)
        .await?
        .ok_or_else(|| RecordsError::not_found("User not found"))?;

    info!("User {} updated profile", user.username);
    Ok(user)
}

pub async fn handle_change_password(
    service: &AuthService,
    principal: &User,
    request: ChangePasswordRequest,
) -> Result<()> {
    if !service
        .passwords
        .verify(&request.current_password, &principal.password_hash)
    {
        return Err(RecordsError::bad_request("Current password is incorrect"));
    }
    validate_password(&request.new_password).map_err(RecordsError::bad_request)?;

    let password_hash = service.passwords.hash(&request.new_password)?;
    service
        .storage
        .update_user(
            principal.id,
            UserUpdate {
                password_hash: Some(password_hash),
                ..Default::default()
            },
        )
        .await?
        .ok_or_else(|| RecordsError::not_found("User not found"))?;

    info!("User {} changed password", principal.username);
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::errors::ErrorKind;
    use crate::models::auth::requests::LoginRequest;
    use crate::models::users::{
        entities::UserRole,
        requests::{ChangePasswordRequest, UpdateProfileRequest},
    };
    use crate::test_support::{TEST_PASSWORD, TestContext};

    #[tokio::test]
    async fn test_update_profile_only_touches_profile_fields() {
        let ctx = TestContext::new().await;
        let class = ctx.create_class("CS101", None).await;
        let alice = ctx.create_user("alice", UserRole::Student).await;
        let alice = ctx
            .storage
            .update_user(
                alice.id,
                crate::models::users::requests::UserUpdate {
                    class_id: Some(Some(class.id)),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        let updated = ctx
            .auth_service()
            .update_profile(
                &alice,
                UpdateProfileRequest {
                    first_name: Some("Alice".into()),
                    last_name: Some("Liddell".into()),
                    email: Some("alice@wonderland.org".into()),
                    phone: Some("555-0100".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.profile.first_name.as_deref(), Some("Alice"));
        assert_eq!(updated.profile.last_name.as_deref(), Some("Liddell"));
        assert_eq!(updated.email, "alice@wonderland.org");
        assert_eq!(updated.username, "alice");
        assert_eq!(updated.role, UserRole::Student);
        assert_eq!(updated.class_id, Some(class.id));
    }

    #[tokio::test]
    async fn test_update_profile_email_conflict() {
        let ctx = TestContext::new().await;
        let alice = ctx.create_user("alice", UserRole::Student).await;
        ctx.create_user("bob", UserRole::Teacher).await;

        let err = ctx
            .auth_service()
            .update_profile(
                &alice,
                UpdateProfileRequest {
                    email: Some("bob@example.com".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_change_password() {
        let ctx = TestContext::new().await;
        let alice = ctx.create_user("alice", UserRole::Student).await;
        let auth = ctx.auth_service();

        let err = auth
            .change_password(
                &alice,
                ChangePasswordRequest {
                    current_password: "wrong".into(),
                    new_password: "newsecret".into(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);

        auth.change_password(
            &alice,
            ChangePasswordRequest {
                current_password: TEST_PASSWORD.into(),
                new_password: "newsecret".into(),
            },
        )
        .await
        .unwrap();

        assert!(
            auth.login(LoginRequest {
                username: "alice".into(),
                password: "newsecret".into(),
            })
            .await
            .is_ok()
        );
    }
}
