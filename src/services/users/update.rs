use tracing::info;

use super::UserService;
use super::get::{student_view, teacher_view};
use crate::errors::{RecordsError, Result};
use crate::models::users::{
    entities::{User, UserRole},
    requests::{UpdateMemberRequest, UserUpdate},
    responses::{StudentResponse, TeacherResponse},
};
use crate::policy::{self, Action, Resource};
use crate::utils::validate::{validate_email, validate_username};

pub async fn update_student(
    service: &UserService,
    principal: &User,
    id: i64,
    request: UpdateMemberRequest,
) -> Result<StudentResponse> {
    let student = update_member(service, principal, id, UserRole::Student, request).await?;
    student_view(&service.storage, student).await
}

pub async fn update_teacher(
    service: &UserService,
    principal: &User,
    id: i64,
    request: UpdateMemberRequest,
) -> Result<TeacherResponse> {
    if request.class_id.is_some() {
        return Err(RecordsError::bad_request(
            "Teachers are assigned to classes, not enrolled in them",
        ));
    }
    let teacher = update_member(service, principal, id, UserRole::Teacher, request).await?;
    teacher_view(&service.storage, teacher).await
}

/// 管理员更新账号：省略的字段保持原值，用户名/邮箱变更需保持唯一
async fn update_member(
    service: &UserService,
    principal: &User,
    id: i64,
    role: UserRole,
    request: UpdateMemberRequest,
) -> Result<User> {
    let existing = service.find_member(id, role).await?;
    policy::authorize(principal, Action::Write, Resource::Registry)?;

    if let Some(ref username) = request.username
        && username != &existing.username
    {
        validate_username(username).map_err(RecordsError::bad_request)?;
        if service.storage.get_user_by_username(username).await?.is_some() {
            return Err(RecordsError::conflict("Username already exists"));
        }
    }
    if let Some(ref email) = request.email
        && email != &existing.email
    {
        validate_email(email).map_err(RecordsError::bad_request)?;
        if service.storage.get_user_by_email(email).await?.is_some() {
            return Err(RecordsError::conflict("Email already exists"));
        }
    }
    if let Some(class_id) = request.class_id
        && service.storage.get_class_by_id(class_id).await?.is_none()
    {
        return Err(RecordsError::not_found("Class not found"));
    }

    let profile = request.profile.unwrap_or_default();
    let academic = request.academic.unwrap_or_default();
    let update = UserUpdate {
        username: request.username,
        email: request.email,
        enabled: request.enabled,
        first_name: profile.first_name,
        last_name: profile.last_name,
        phone: profile.phone,
        gender: profile.gender,
        address: profile.address,
        department: academic.department,
        semester: academic.semester,
        admission_number: academic.admission_number,
        class_id: request.class_id.map(Some),
        ..Default::default()
    };

    let user = service
        .storage
        .update_user(id, update)
        .await?
        .ok_or_else(|| RecordsError::not_found("User not found"))?;

    info!("User {} updated by {}", user.username, principal.username);
    Ok(user)
}
