use super::entities::{AcademicInfo, UserProfile, UserRole};
use serde::Deserialize;

// 自助注册请求
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    #[serde(default)]
    pub profile: UserProfile,
    #[serde(default)]
    pub academic: AcademicInfo,
}

// 管理员代建学生/教师账号请求（密码使用配置中的初始密码）
#[derive(Debug, Deserialize)]
pub struct CreateMemberRequest {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub profile: UserProfile,
    #[serde(default)]
    pub academic: AcademicInfo,
    /// 仅学生有效
    pub class_id: Option<i64>,
}

// 管理员更新学生/教师请求，省略的字段保持原值
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMemberRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub enabled: Option<bool>,
    pub profile: Option<UserProfile>,
    pub academic: Option<AcademicInfo>,
    /// 仅学生有效
    pub class_id: Option<i64>,
}

// 本人更新资料请求
//
// 只允许修改姓名、邮箱、电话、地址、性别；角色、用户名与班级不可经此修改。
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
}

// 用户搜索参数
#[derive(Debug, Deserialize)]
pub struct UserSearchParams {
    pub q: String,
}

/// 存储层使用的部分更新
///
/// 外层 `None` 表示不修改；`class_id` 的内层 `None` 表示清空班级。
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub enabled: Option<bool>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub department: Option<String>,
    pub semester: Option<String>,
    pub admission_number: Option<String>,
    pub class_id: Option<Option<i64>>,
}

/// 存储层使用的新用户数据
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub profile: UserProfile,
    pub academic: AcademicInfo,
    pub class_id: Option<i64>,
}

// 修改本人密码请求
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}
