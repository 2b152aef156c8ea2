pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use std::sync::Arc;

use crate::config::AccountsConfig;
use crate::errors::{RecordsError, Result};
use crate::models::users::{
    entities::{User, UserRole},
    requests::{CreateMemberRequest, UpdateMemberRequest},
    responses::{StudentResponse, TeacherResponse},
};
use crate::storage::Storage;
use crate::utils::PasswordService;

/// 学生与教师账号管理（仅管理员）
pub struct UserService {
    storage: Arc<dyn Storage>,
    passwords: PasswordService,
    accounts: AccountsConfig,
}

impl UserService {
    pub fn new(
        storage: Arc<dyn Storage>,
        passwords: PasswordService,
        accounts: AccountsConfig,
    ) -> Self {
        Self {
            storage,
            passwords,
            accounts,
        }
    }

    /// 按 ID 查找指定角色的用户，角色不符视为不存在
    pub(crate) async fn find_member(&self, id: i64, role: UserRole) -> Result<User> {
        match self.storage.get_user_by_id(id).await? {
            Some(user) if user.role == role => Ok(user),
            _ => Err(RecordsError::not_found(match role {
                UserRole::Student => "Student not found",
                UserRole::Teacher => "Teacher not found",
                UserRole::Admin => "User not found",
            })),
        }
    }

    // 列出全部学生
    pub async fn list_students(&self, principal: &User) -> Result<Vec<StudentResponse>> {
        list::list_students(self, principal).await
    }

    // 列出全部教师
    pub async fn list_teachers(&self, principal: &User) -> Result<Vec<TeacherResponse>> {
        list::list_teachers(self, principal).await
    }

    // 按姓名或班级名称搜索用户
    pub async fn search_users(&self, principal: &User, keyword: &str) -> Result<Vec<User>> {
        list::search_users(self, principal, keyword).await
    }

    // 获取学生详情
    pub async fn get_student(&self, principal: &User, id: i64) -> Result<StudentResponse> {
        get::get_student(self, principal, id).await
    }

    // 获取教师详情
    pub async fn get_teacher(&self, principal: &User, id: i64) -> Result<TeacherResponse> {
        get::get_teacher(self, principal, id).await
    }

    // 新增学生（初始密码来自配置）
    pub async fn add_student(
        &self,
        principal: &User,
        request: CreateMemberRequest,
    ) -> Result<StudentResponse> {
        create::add_student(self, principal, request).await
    }

    // 新增教师（初始密码来自配置）
    pub async fn add_teacher(
        &self,
        principal: &User,
        request: CreateMemberRequest,
    ) -> Result<TeacherResponse> {
        create::add_teacher(self, principal, request).await
    }

    // 更新学生
    pub async fn update_student(
        &self,
        principal: &User,
        id: i64,
        request: UpdateMemberRequest,
    ) -> Result<StudentResponse> {
        update::update_student(self, principal, id, request).await
    }

    // 更新教师
    pub async fn update_teacher(
        &self,
        principal: &User,
        id: i64,
        request: UpdateMemberRequest,
    ) -> Result<TeacherResponse> {
        update::update_teacher(self, principal, id, request).await
    }

    // 删除学生（级联删除考勤）
    pub async fn delete_student(&self, principal: &User, id: i64) -> Result<()> {
        delete::delete_student(self, principal, id).await
    }

    // 删除教师（先解除班级任课关系）
    pub async fn delete_teacher(&self, principal: &User, id: i64) -> Result<()> {
        delete::delete_teacher(self, principal, id).await
    }
}
