use super::entities::User;
use crate::models::classes::entities::Class;
use serde::Serialize;

// 学生视图：附带所在班级
#[derive(Debug, Serialize)]
pub struct StudentResponse {
    #[serde(flatten)]
    pub user: User,
    pub class: Option<Class>,
}

// 教师视图：附带所教班级（派生查询结果）
#[derive(Debug, Serialize)]
pub struct TeacherResponse {
    #[serde(flatten)]
    pub user: User,
    pub classes: Vec<Class>,
}
