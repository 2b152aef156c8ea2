use super::AttendanceService;
use crate::errors::Result;
use crate::models::{
    attendance::{entities::Attendance, requests::AttendanceQuery},
    users::entities::User,
};
use crate::policy::{self, Action, Resource};
use crate::utils::{parse_date, parse_optional_date};

pub async fn get_attendance(
    service: &AttendanceService,
    principal: &User,
    id: i64,
) -> Result<Attendance> {
    let record = service.find_attendance(id).await?;
    policy::authorize(principal, Action::Read, service.resource_of(&record).await?)?;
    Ok(record)
}

/// 班级考勤，可限定某一天
pub async fn query_by_class(
    service: &AttendanceService,
    principal: &User,
    class_id: i64,
    date: Option<&str>,
) -> Result<Vec<Attendance>> {
    let date = parse_optional_date(date)?;

    let class = service.find_class(class_id).await?;
    policy::authorize(
        principal,
        Action::Read,
        Resource::Attendance {
            teacher_id: class.teacher_id,
            student_id: None,
        },
    )?;

    service
        .storage
        .list_attendance(AttendanceQuery {
            class_id: Some(class.id),
            date,
            ..Default::default()
        })
        .await
}

/// 学生考勤历史，日期为闭区间且任一端可省略
pub async fn query_by_student_between(
    service: &AttendanceService,
    principal: &User,
    student_id: i64,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<Vec<Attendance>> {
    let from = parse_optional_date(from)?;
    let to = parse_optional_date(to)?;

    let student = service.find_student(student_id).await?;
    // 教师可查看自己任课班级中学生的历史
    let teacher_id = match student.class_id {
        Some(class_id) => service
            .storage
            .get_class_by_id(class_id)
            .await?
            .and_then(|c| c.teacher_id),
        None => None,
    };
    policy::authorize(
        principal,
        Action::Read,
        Resource::Attendance {
            teacher_id,
            student_id: Some(student.id),
        },
    )?;

    list_for_student(service, student.id, from, to).await
}

/// 调用者本人的考勤
pub async fn my_attendance(
    service: &AttendanceService,
    principal: &User,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<Vec<Attendance>> {
    let from = parse_optional_date(from)?;
    let to = parse_optional_date(to)?;

    policy::authorize(
        principal,
        Action::Read,
        Resource::Attendance {
            teacher_id: None,
            student_id: Some(principal.id),
        },
    )?;

    list_for_student(service, principal.id, from, to).await
}

/// 全部考勤（仅管理员），日期在访问存储前解析
pub async fn query_all_between(
    service: &AttendanceService,
    principal: &User,
    from: &str,
    to: &str,
) -> Result<Vec<Attendance>> {
    let from = parse_date(from)?;
    let to = parse_date(to)?;

    policy::authorize(principal, Action::Read, Resource::Registry)?;

    if from > to {
        return Ok(Vec::new());
    }

    service
        .storage
        .list_attendance(AttendanceQuery {
            from: Some(from),
            to: Some(to),
            ..Default::default()
        })
        .await
}

async fn list_for_student(
    service: &AttendanceService,
    student_id: i64,
    from: Option<chrono::NaiveDate>,
    to: Option<chrono::NaiveDate>,
) -> Result<Vec<Attendance>> {
    if let (Some(from), Some(to)) = (from, to)
        && from > to
    {
        return Ok(Vec::new());
    }

    service
        .storage
        .list_attendance(AttendanceQuery {
            student_id: Some(student_id),
            from,
            to,
            ..Default::default()
        })
        .await
}
