use tracing::info;

use super::ClassService;
use crate::errors::{RecordsError, Result};
use crate::models::{
    classes::{entities::Class, requests::CreateClassRequest},
    users::entities::User,
};
use crate::policy::{self, Action, Resource};
use crate::utils::validate::validate_class_name;

pub async fn create_class(
    service: &ClassService,
    principal: &User,
    mut request: CreateClassRequest,
) -> Result<Class> {
    policy::authorize(principal, Action::Write, Resource::Registry)?;

    validate_class_name(&request.class_name).map_err(RecordsError::bad_request)?;
    request.class_name = request.class_name.trim().to_string();

    if service
        .storage
        .get_class_by_name(&request.class_name)
        .await?
        .is_some()
    {
        return Err(RecordsError::conflict("Class name already exists"));
    }

    // 指定的任课教师必须存在且为教师角色
    if let Some(teacher_id) = request.teacher_id {
        service.find_teacher(teacher_id).await?;
    }

    let class = service.storage.create_class(request).await?;
    info!(
        "Class {} created successfully by {}",
        class.class_name, principal.username
    );
    Ok(class)
}
