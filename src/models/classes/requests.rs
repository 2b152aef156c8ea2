use serde::Deserialize;

// 创建班级请求
//
// teacher_id 可选；若填写，该用户必须是教师角色。
#[derive(Debug, Deserialize)]
pub struct CreateClassRequest {
    pub class_name: String,
    pub department: Option<String>,
    pub teacher_id: Option<i64>,
}

// 更新班级请求，省略的字段保持原值
#[derive(Debug, Default, Deserialize)]
pub struct UpdateClassRequest {
    pub class_name: Option<String>,
    pub department: Option<String>,
    pub teacher_id: Option<i64>,
}

/// 存储层使用的部分更新
#[derive(Debug, Clone, Default)]
pub struct ClassUpdate {
    pub class_name: Option<String>,
    pub department: Option<String>,
    pub teacher_id: Option<Option<i64>>,
}
