pub mod assign;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use std::sync::Arc;

use crate::errors::{RecordsError, Result};
use crate::models::{
    classes::{
        entities::Class,
        requests::{CreateClassRequest, UpdateClassRequest},
    },
    users::{
        entities::{User, UserRole},
        responses::StudentResponse,
    },
};
use crate::storage::Storage;

/// 班级管理与班级关系维护
pub struct ClassService {
    storage: Arc<dyn Storage>,
}

impl ClassService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) async fn find_class(&self, class_id: i64) -> Result<Class> {
        self.storage
            .get_class_by_id(class_id)
            .await?
            .ok_or_else(|| RecordsError::not_found("Class not found"))
    }

    /// 教师 ID 必须指向教师角色的用户
    pub(crate) async fn find_teacher(&self, teacher_id: i64) -> Result<User> {
        match self.storage.get_user_by_id(teacher_id).await? {
            Some(user) if user.role == UserRole::Teacher => Ok(user),
            _ => Err(RecordsError::not_found("Teacher not found")),
        }
    }

    // 按角色范围列出班级
    pub async fn list_classes(&self, principal: &User) -> Result<Vec<Class>> {
        list::list_classes(self, principal).await
    }

    // 教师所教班级（派生关系）
    pub async fn list_classes_of_teacher(&self, teacher_id: i64) -> Result<Vec<Class>> {
        list::list_classes_of_teacher(self, teacher_id).await
    }

    // 创建班级
    pub async fn create_class(
        &self,
        principal: &User,
        request: CreateClassRequest,
    ) -> Result<Class> {
        create::create_class(self, principal, request).await
    }

    // 获取班级详情
    pub async fn get_class(&self, principal: &User, class_id: i64) -> Result<Class> {
        get::get_class(self, principal, class_id).await
    }

    // 列出班级中的学生
    pub async fn list_students_in_class(
        &self,
        principal: &User,
        class_id: i64,
    ) -> Result<Vec<User>> {
        get::list_students_in_class(self, principal, class_id).await
    }

    // 更新班级
    pub async fn update_class(
        &self,
        principal: &User,
        class_id: i64,
        request: UpdateClassRequest,
    ) -> Result<Class> {
        update::update_class(self, principal, class_id, request).await
    }

    // 删除班级
    pub async fn delete_class(&self, principal: &User, class_id: i64) -> Result<()> {
        delete::delete_class(self, principal, class_id).await
    }

    // 分配学生到班级（覆盖原班级）
    pub async fn assign_student_to_class(
        &self,
        principal: &User,
        student_id: i64,
        class_id: i64,
    ) -> Result<StudentResponse> {
        assign::assign_student_to_class(self, principal, student_id, class_id).await
    }

    // 分配教师到班级（替换原教师）
    pub async fn assign_teacher_to_class(
        &self,
        principal: &User,
        teacher_id: i64,
        class_id: i64,
    ) -> Result<Class> {
        assign::assign_teacher_to_class(self, principal, teacher_id, class_id).await
    }
}
