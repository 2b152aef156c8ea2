use tracing::{info, warn};

use super::UserService;
use super::get::{student_view, teacher_view};
use crate::errors::{RecordsError, Result};
use crate::models::users::{
    entities::{User, UserRole},
    requests::{CreateMemberRequest, NewUser},
    responses::{StudentResponse, TeacherResponse},
};
use crate::policy::{self, Action, Resource};
use crate::utils::validate::{validate_email, validate_username};

pub async fn add_student(
    service: &UserService,
    principal: &User,
    request: CreateMemberRequest,
) -> Result<StudentResponse> {
    let student = create_member(service, principal, UserRole::Student, request).await?;
    student_view(&service.storage, student).await
}

pub async fn add_teacher(
    service: &UserService,
    principal: &User,
    request: CreateMemberRequest,
) -> Result<TeacherResponse> {
    if request.class_id.is_some() {
        return Err(RecordsError::bad_request(
            "Teachers are assigned to classes, not enrolled in them",
        ));
    }
    let teacher = create_member(service, principal, UserRole::Teacher, request).await?;
    teacher_view(&service.storage, teacher).await
}

async fn create_member(
    service: &UserService,
    principal: &User,
    role: UserRole,
    request: CreateMemberRequest,
) -> Result<User> {
    policy::authorize(principal, Action::Write, Resource::Registry)?;

    validate_username(&request.username).map_err(RecordsError::bad_request)?;
    validate_email(&request.email).map_err(RecordsError::bad_request)?;

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

    if let Some(class_id) = request.class_id
        && service.storage.get_class_by_id(class_id).await?.is_none()
    {
        return Err(RecordsError::not_found("Class not found"));
    }

    let default_password = match role {
        UserRole::Teacher => &service.accounts.default_teacher_password,
        _ => &service.accounts.default_student_password,
    };
    let password_hash = service.passwords.hash(default_password)?;

    let user = service
        .storage
        .create_user(NewUser {
            username: request.username,
            email: request.email,
            password_hash,
            role,
            profile: request.profile,
            academic: request.academic,
            class_id: request.class_id,
        })
        .await?;

    warn!(
        "Account {} ({}) created with the default password, it must be changed on first login",
        user.username, role
    );
    info!("User {} created by {}", user.username, principal.username);
    Ok(user)
}

#[cfg(test)]
mod tests {
    use crate::errors::ErrorKind;
    use crate::models::auth::requests::LoginRequest;
    use crate::models::users::{entities::UserRole, requests::CreateMemberRequest};
    use crate::test_support::TestContext;

    fn member(username: &str, class_id: Option<i64>) -> CreateMemberRequest {
        CreateMemberRequest {
            username: username.to_string(),
            email: format!("{username}@school.edu"),
            profile: Default::default(),
            academic: Default::default(),
            class_id,
        }
    }

    #[tokio::test]
    async fn test_add_student_uses_default_password() {
        let ctx = TestContext::new().await;
        let admin = ctx.create_admin().await;
        let class = ctx.create_class("CS101", None).await;

        let created = ctx
            .user_service()
            .add_student(&admin, member("alice", Some(class.id)))
            .await
            .unwrap();
        assert_eq!(created.user.role, UserRole::Student);
        assert_eq!(created.class.map(|c| c.id), Some(class.id));

        let login = ctx
            .auth_service()
            .login(LoginRequest {
                username: "alice".into(),
                password: ctx.accounts.default_student_password.clone(),
            })
            .await;
        assert!(login.is_ok());
    }

    #[tokio::test]
    async fn test_add_teacher_uses_default_password() {
        let ctx = TestContext::new().await;
        let admin = ctx.create_admin().await;

        let created = ctx
            .user_service()
            .add_teacher(&admin, member("bob", None))
            .await
            .unwrap();
        assert_eq!(created.user.role, UserRole::Teacher);
        assert!(created.classes.is_empty());
        assert!(
            ctx.passwords
                .verify(&ctx.accounts.default_teacher_password, &created.user.password_hash)
        );
    }

    #[tokio::test]
    async fn test_add_member_errors() {
        let ctx = TestContext::new().await;
        let admin = ctx.create_admin().await;
        let teacher = ctx.create_user("bob", UserRole::Teacher).await;
        let users = ctx.user_service();

        let err = users
            .add_student(&admin, member("bob", None))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let err = users
            .add_student(&admin, member("alice", Some(999)))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = users
            .add_student(&teacher, member("carol", None))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }
}
