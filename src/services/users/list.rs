use std::collections::HashMap;

use super::UserService;
use crate::errors::Result;
use crate::models::users::{
    entities::{User, UserRole},
    responses::{StudentResponse, TeacherResponse},
};
use crate::policy::{self, Action, Resource};

pub async fn list_students(
    service: &UserService,
    principal: &User,
) -> Result<Vec<StudentResponse>> {
    policy::authorize(principal, Action::Read, Resource::Registry)?;

    let students = service.storage.list_users_by_role(UserRole::Student).await?;
    let classes: HashMap<i64, _> = service
        .storage
        .list_classes(None)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    Ok(students
        .into_iter()
        .map(|user| StudentResponse {
            class: user.class_id.and_then(|id| classes.get(&id).cloned()),
            user,
        })
        .collect())
}

pub async fn list_teachers(
    service: &UserService,
    principal: &User,
) -> Result<Vec<TeacherResponse>> {
    policy::authorize(principal, Action::Read, Resource::Registry)?;

    let teachers = service.storage.list_users_by_role(UserRole::Teacher).await?;
    let mut by_teacher: HashMap<i64, Vec<_>> = HashMap::new();
    for class in service.storage.list_classes(None).await? {
        if let Some(teacher_id) = class.teacher_id {
            by_teacher.entry(teacher_id).or_default().push(class);
        }
    }

    Ok(teachers
        .into_iter()
        .map(|user| TeacherResponse {
            classes: by_teacher.remove(&user.id).unwrap_or_default(),
            user,
        })
        .collect())
}

pub async fn search_users(
    service: &UserService,
    principal: &User,
    keyword: &str,
) -> Result<Vec<User>> {
    policy::authorize(principal, Action::Read, Resource::Registry)?;
    service.storage.search_users(keyword).await
}
