use tracing::info;

use super::ClassService;
use crate::errors::{RecordsError, Result};
use crate::models::{
    classes::{entities::Class, requests::ClassUpdate},
    users::{
        entities::{User, UserRole},
        requests::UserUpdate,
        responses::StudentResponse,
    },
};
use crate::policy::{self, Action, Resource};

/// 学生至多属于一个班级，新分配直接覆盖，不保留历史
pub async fn assign_student_to_class(
    service: &ClassService,
    principal: &User,
    student_id: i64,
    class_id: i64,
) -> Result<StudentResponse> {
    let student = match service.storage.get_user_by_id(student_id).await? {
        Some(user) if user.role == UserRole::Student => user,
        _ => return Err(RecordsError::not_found("Student not found")),
    };
    let class = service.find_class(class_id).await?;
    policy::authorize(principal, Action::Write, Resource::Registry)?;

    let student = service
        .storage
        .update_user(
            student.id,
            UserUpdate {
                class_id: Some(Some(class.id)),
                ..Default::default()
            },
        )
        .await?
        .ok_or_else(|| RecordsError::not_found("Student not found"))?;

    info!(
        "Student {} assigned to class {}",
        student.username, class.class_name
    );
    Ok(StudentResponse {
        user: student,
        class: Some(class),
    })
}

/// 班级同一时间只有一位任课教师，重新分配直接替换
pub async fn assign_teacher_to_class(
    service: &ClassService,
    principal: &User,
    teacher_id: i64,
    class_id: i64,
) -> Result<Class> {
    let teacher = service.find_teacher(teacher_id).await?;
    service.find_class(class_id).await?;
    policy::authorize(principal, Action::Write, Resource::Registry)?;

    let class = service
        .storage
        .update_class(
            class_id,
            ClassUpdate {
                teacher_id: Some(Some(teacher.id)),
                ..Default::default()
            },
        )
        .await?
        .ok_or_else(|| RecordsError::not_found("Class not found"))?;

    info!(
        "Teacher {} assigned to class {}",
        teacher.username, class.class_name
    );
    Ok(class)
}
