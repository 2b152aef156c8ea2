use super::ClassService;
use crate::errors::Result;
use crate::models::{
    classes::entities::Class,
    users::entities::{User, UserRole},
};

/// 管理员看到全部班级，教师看到自己任课的班级，学生看到自己所在的班级
pub async fn list_classes(service: &ClassService, principal: &User) -> Result<Vec<Class>> {
    match principal.role {
        UserRole::Admin => service.storage.list_classes(None).await,
        UserRole::Teacher => list_classes_of_teacher(service, principal.id).await,
        UserRole::Student => match principal.class_id {
            Some(class_id) => Ok(service
                .storage
                .get_class_by_id(class_id)
                .await?
                .into_iter()
                .collect()),
            None => Ok(Vec::new()),
        },
    }
}

pub async fn list_classes_of_teacher(
    service: &ClassService,
    teacher_id: i64,
) -> Result<Vec<Class>> {
    service.storage.list_classes(Some(teacher_id)).await
}
