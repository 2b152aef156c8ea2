use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Class {
    // 班级ID
    pub id: i64,
    // 班级名称（唯一）
    pub class_name: String,
    // 所属院系
    pub department: Option<String>,
    // 任课教师ID，未分配时为空
    pub teacher_id: Option<i64>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
