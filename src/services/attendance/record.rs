use tracing::info;

use super::AttendanceService;
use crate::errors::{RecordsError, Result};
use crate::models::{
    attendance::{
        entities::Attendance,
        requests::{NewAttendance, RecordAttendanceRequest},
    },
    users::entities::User,
};
use crate::policy::{self, Action, Resource};
use crate::utils::parse_date;

/// 登记考勤
///
/// 每个学生每天只能有一条记录，与班级无关。不校验学生当前是否在该班级，
/// 考勤一经写入即为历史。
pub async fn record_attendance(
    service: &AttendanceService,
    principal: &User,
    class_id: i64,
    request: RecordAttendanceRequest,
) -> Result<Attendance> {
    let date = parse_date(&request.date)?;

    // 1. 学生与班级必须存在
    let student = service.find_student(request.student_id).await?;
    let class = service.find_class(class_id).await?;

    policy::authorize(
        principal,
        Action::Write,
        Resource::Attendance {
            teacher_id: class.teacher_id,
            student_id: Some(student.id),
        },
    )?;

    // 2. (学生, 日期) 唯一
    if service
        .storage
        .get_attendance_by_student_and_date(student.id, date)
        .await?
        .is_some()
    {
        return Err(RecordsError::conflict(format!(
            "Attendance for student {} on {date} already exists",
            student.username
        )));
    }

    // 3. 写入；并发重复提交由唯一索引拒绝
    let attendance = service
        .storage
        .create_attendance(NewAttendance {
            student_id: student.id,
            class_id: Some(class.id),
            date,
            present: request.present,
            remarks: request.remarks,
        })
        .await?;

    info!(
        "Attendance recorded for {} in {} on {} by {}",
        student.username, class.class_name, date, principal.username
    );
    Ok(attendance)
}

#[cfg(test)]
mod tests {
    use crate::errors::ErrorKind;
    use crate::models::{
        attendance::requests::RecordAttendanceRequest,
        users::entities::UserRole,
    };
    use crate::test_support::TestContext;

    fn mark(student_id: i64, date: &str) -> RecordAttendanceRequest {
        RecordAttendanceRequest {
            student_id,
            date: date.to_string(),
            present: true,
            remarks: None,
        }
    }

    #[tokio::test]
    async fn test_alice_bob_cs101_scenario() {
        let ctx = TestContext::new().await;
        let admin = ctx.create_admin().await;
        let classes = ctx.class_service();
        let attendance = ctx.attendance_service();

        let alice = ctx
            .auth_service()
            .register(crate::models::users::requests::RegisterRequest {
                username: "alice".into(),
                email: "alice@example.com".into(),
                password: "secret123".into(),
                role: UserRole::Student,
                profile: Default::default(),
                academic: Default::default(),
            })
            .await
            .unwrap();
        let bob = ctx.create_user("bob", UserRole::Teacher).await;
        let cs101 = classes
            .create_class(
                &admin,
                crate::models::classes::requests::CreateClassRequest {
                    class_name: "CS101".into(),
                    department: None,
                    teacher_id: None,
                },
            )
            .await
            .unwrap();
        classes
            .assign_student_to_class(&admin, alice.id, cs101.id)
            .await
            .unwrap();
        classes
            .assign_teacher_to_class(&admin, bob.id, cs101.id)
            .await
            .unwrap();

        let record = attendance
            .record_attendance(&bob, cs101.id, mark(alice.id, "2024-01-10"))
            .await
            .unwrap();
        assert_eq!(record.student_id, alice.id);
        assert_eq!(record.class_id, Some(cs101.id));
        assert!(record.present);

        // 同一学生同一天，换一个班级也冲突
        let other = ctx.create_class("CS102", None).await;
        let err = attendance
            .record_attendance(&admin, other.id, mark(alice.id, "2024-01-10"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_unassigned_teacher_is_forbidden() {
        let ctx = TestContext::new().await;
        let bob = ctx.create_user("bob", UserRole::Teacher).await;
        let dave = ctx.create_user("dave", UserRole::Teacher).await;
        let alice = ctx.create_user("alice", UserRole::Student).await;
        let class = ctx.create_class("CS101", Some(dave.id)).await;
        let unassigned = ctx.create_class("CS102", None).await;
        let attendance = ctx.attendance_service();

        for class_id in [class.id, unassigned.id] {
            let err = attendance
                .record_attendance(&bob, class_id, mark(alice.id, "2024-01-10"))
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Forbidden);
        }
    }

    #[tokio::test]
    async fn test_students_cannot_record() {
        let ctx = TestContext::new().await;
        let alice = ctx.create_user("alice", UserRole::Student).await;
        let class = ctx.create_class("CS101", None).await;

        let err = ctx
            .attendance_service()
            .record_attendance(&alice, class.id, mark(alice.id, "2024-01-10"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_record_validation_order() {
        let ctx = TestContext::new().await;
        let admin = ctx.create_admin().await;
        let bob = ctx.create_user("bob", UserRole::Teacher).await;
        let alice = ctx.create_user("alice", UserRole::Student).await;
        let class = ctx.create_class("CS101", Some(bob.id)).await;
        let attendance = ctx.attendance_service();

        let err = attendance
            .record_attendance(&admin, class.id, mark(alice.id, "2024-13-40"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);

        let err = attendance
            .record_attendance(&admin, 999, mark(alice.id, "2024-01-10"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        // 教师不是学生
        let err = attendance
            .record_attendance(&admin, class.id, mark(bob.id, "2024-01-10"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
