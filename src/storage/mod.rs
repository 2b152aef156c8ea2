use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;
use crate::models::{
    attendance::{
        entities::Attendance,
        requests::{AttendanceQuery, AttendanceUpdate, NewAttendance},
    },
    classes::{
        entities::Class,
        requests::{ClassUpdate, CreateClassRequest},
    },
    users::{
        entities::{User, UserRole},
        requests::{NewUser, UserUpdate},
    },
};

pub mod sea_orm_storage;

/// 持久化边界
///
/// 所有修改立即落库，不做缓存；同一记录的并发更新以最后一次写入为准。
/// 级联删除在单个事务内完成。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（用户名/邮箱重复返回 Conflict）
    async fn create_user(&self, user: NewUser) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 按角色列出用户
    async fn list_users_by_role(&self, role: UserRole) -> Result<Vec<User>>;
    // 列出班级中的学生
    async fn list_students_by_class(&self, class_id: i64) -> Result<Vec<User>>;
    // 按姓名或班级名称搜索（不区分大小写的子串匹配）
    async fn search_users(&self, keyword: &str) -> Result<Vec<User>>;
    // 部分更新用户信息
    async fn update_user(&self, id: i64, update: UserUpdate) -> Result<Option<User>>;
    // 删除学生及其全部考勤记录
    async fn delete_student(&self, id: i64) -> Result<bool>;
    // 解除教师与所有班级的关联后删除教师
    async fn delete_teacher(&self, id: i64) -> Result<bool>;
    // 用户总数
    async fn count_users(&self) -> Result<u64>;

    /// 班级管理方法
    // 创建班级
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 通过名称获取班级信息
    async fn get_class_by_name(&self, class_name: &str) -> Result<Option<Class>>;
    // 列出班级，可按任课教师筛选
    async fn list_classes(&self, teacher_id: Option<i64>) -> Result<Vec<Class>>;
    // 部分更新班级信息
    async fn update_class(&self, class_id: i64, update: ClassUpdate) -> Result<Option<Class>>;
    // 删除班级：清空学生的班级引用，考勤记录的班级置空
    async fn delete_class(&self, class_id: i64) -> Result<bool>;

    /// 考勤管理方法
    // 创建考勤（同一学生同一天重复返回 Conflict）
    async fn create_attendance(&self, attendance: NewAttendance) -> Result<Attendance>;
    // 通过ID获取考勤
    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<Attendance>>;
    // 获取学生某天的考勤
    async fn get_attendance_by_student_and_date(
        &self,
        student_id: i64,
        date: chrono::NaiveDate,
    ) -> Result<Option<Attendance>>;
    // 部分更新考勤
    async fn update_attendance(
        &self,
        id: i64,
        update: AttendanceUpdate,
    ) -> Result<Option<Attendance>>;
    // 删除考勤
    async fn delete_attendance(&self, id: i64) -> Result<bool>;
    // 条件查询考勤，按日期、ID 排序
    async fn list_attendance(&self, query: AttendanceQuery) -> Result<Vec<Attendance>>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::connect(config).await?;
    Ok(Arc::new(storage))
}
