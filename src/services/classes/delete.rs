use tracing::info;

use super::ClassService;
use crate::errors::{RecordsError, Result};
use crate::models::users::entities::User;
use crate::policy::{self, Action, Resource};

/// 删除班级：学生的班级引用被清空，历史考勤保留但不再关联班级
pub async fn delete_class(service: &ClassService, principal: &User, class_id: i64) -> Result<()> {
    let class = service.find_class(class_id).await?;
    policy::authorize(principal, Action::Write, Resource::Registry)?;

    if !service.storage.delete_class(class.id).await? {
        return Err(RecordsError::not_found("Class not found"));
    }

    info!(
        "Class {} deleted successfully by {}",
        class.class_name, principal.username
    );
    Ok(())
}
