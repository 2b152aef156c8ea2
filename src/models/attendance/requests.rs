use serde::Deserialize;

// 登记考勤请求（班级由路径给出，日期格式 yyyy-MM-dd）
#[derive(Debug, Deserialize)]
pub struct RecordAttendanceRequest {
    pub student_id: i64,
    pub date: String,
    pub present: bool,
    pub remarks: Option<String>,
}

// 更新考勤请求，省略的字段保持原值
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAttendanceRequest {
    pub date: Option<String>,
    pub present: Option<bool>,
    pub remarks: Option<String>,
}

// 日期区间查询参数（闭区间）
#[derive(Debug, Default, Deserialize)]
pub struct DateRangeParams {
    pub from: Option<String>,
    pub to: Option<String>,
}

// 按日期查询参数
#[derive(Debug, Default, Deserialize)]
pub struct DateParams {
    pub date: Option<String>,
}

/// 存储层使用的新考勤数据
#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub student_id: i64,
    pub class_id: Option<i64>,
    pub date: chrono::NaiveDate,
    pub present: bool,
    pub remarks: Option<String>,
}

/// 存储层使用的部分更新
#[derive(Debug, Clone, Default)]
pub struct AttendanceUpdate {
    pub date: Option<chrono::NaiveDate>,
    pub present: Option<bool>,
    pub remarks: Option<String>,
}

/// 存储层考勤查询条件，所有条件取交集
#[derive(Debug, Clone, Default)]
pub struct AttendanceQuery {
    pub student_id: Option<i64>,
    pub class_id: Option<i64>,
    pub date: Option<chrono::NaiveDate>,
    pub from: Option<chrono::NaiveDate>,
    pub to: Option<chrono::NaiveDate>,
}
