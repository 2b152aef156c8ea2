use std::sync::Arc;

use super::UserService;
use crate::errors::Result;
use crate::models::users::{
    entities::{User, UserRole},
    responses::{StudentResponse, TeacherResponse},
};
use crate::policy::{self, Action, Resource};
use crate::storage::Storage;

pub async fn get_student(
    service: &UserService,
    principal: &User,
    id: i64,
) -> Result<StudentResponse> {
    let student = service.find_member(id, UserRole::Student).await?;
    policy::authorize(principal, Action::Read, Resource::Registry)?;
    student_view(&service.storage, student).await
}

pub async fn get_teacher(
    service: &UserService,
    principal: &User,
    id: i64,
) -> Result<TeacherResponse> {
    let teacher = service.find_member(id, UserRole::Teacher).await?;
    policy::authorize(principal, Action::Read, Resource::Registry)?;
    teacher_view(&service.storage, teacher).await
}

/// 学生视图：附带当前班级（班级已不存在时为空）
pub(crate) async fn student_view(
    storage: &Arc<dyn Storage>,
    student: User,
) -> Result<StudentResponse> {
    let class = match student.class_id {
        Some(class_id) => storage.get_class_by_id(class_id).await?,
        None => None,
    };
    Ok(StudentResponse {
        user: student,
        class,
    })
}

/// 教师视图：所教班级由班级的 teacher_id 反查得到
pub(crate) async fn teacher_view(
    storage: &Arc<dyn Storage>,
    teacher: User,
) -> Result<TeacherResponse> {
    let classes = storage.list_classes(Some(teacher.id)).await?;
    Ok(TeacherResponse {
        user: teacher,
        classes,
    })
}
