use serde::{Deserialize, Serialize};

/// 考勤记录
///
/// 每个学生每天至多一条（与班级无关）。`class_id` 记录的是创建时的班级，
/// 学生换班后不会随之改变；班级被删除时置空。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attendance {
    pub id: i64,
    pub student_id: i64,
    pub class_id: Option<i64>,
    pub date: chrono::NaiveDate,
    pub present: bool,
    pub remarks: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
