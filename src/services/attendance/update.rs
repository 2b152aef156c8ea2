use tracing::info;

use super::AttendanceService;
use crate::errors::{RecordsError, Result};
use crate::models::{
    attendance::{
        entities::Attendance,
        requests::{AttendanceUpdate, UpdateAttendanceRequest},
    },
    users::entities::User,
};
use crate::policy::{self, Action};
use crate::utils::parse_optional_date;

/// 部分更新：只覆盖提供的字段（日期、出勤、备注）
pub async fn update_attendance(
    service: &AttendanceService,
    principal: &User,
    id: i64,
    request: UpdateAttendanceRequest,
) -> Result<Attendance> {
    let date = parse_optional_date(request.date.as_deref())?;

    let record = service.find_attendance(id).await?;
    policy::authorize(principal, Action::Write, service.resource_of(&record).await?)?;

    // 改日期时仍需保持 (学生, 日期) 唯一
    if let Some(date) = date
        && date != record.date
        && service
            .storage
            .get_attendance_by_student_and_date(record.student_id, date)
            .await?
            .is_some()
    {
        return Err(RecordsError::conflict(format!(
            "Attendance for this student on {date} already exists"
        )));
    }

    let updated = service
        .storage
        .update_attendance(
            id,
            AttendanceUpdate {
                date,
                present: request.present,
                remarks: request.remarks,
            },
        )
        .await?
        .ok_or_else(|| RecordsError::not_found("Attendance record not found"))?;

    info!("Attendance {} updated by {}", id, principal.username);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::errors::ErrorKind;
    use crate::models::{
        attendance::requests::{RecordAttendanceRequest, UpdateAttendanceRequest},
        users::entities::UserRole,
    };
    use crate::test_support::TestContext;

    #[tokio::test]
    async fn test_partial_update_keeps_omitted_fields() {
        let ctx = TestContext::new().await;
        let bob = ctx.create_user("bob", UserRole::Teacher).await;
        let alice = ctx.create_user("alice", UserRole::Student).await;
        let class = ctx.create_class("CS101", Some(bob.id)).await;
        let attendance = ctx.attendance_service();

        let record = attendance
            .record_attendance(
                &bob,
                class.id,
                RecordAttendanceRequest {
                    student_id: alice.id,
                    date: "2024-01-10".into(),
                    present: true,
                    remarks: Some("on time".into()),
                },
            )
            .await
            .unwrap();

        let updated = attendance
            .update_attendance(
                &bob,
                record.id,
                UpdateAttendanceRequest {
                    present: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(!updated.present);
        assert_eq!(updated.remarks.as_deref(), Some("on time"));
        assert_eq!(updated.date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());

        let moved = attendance
            .update_attendance(
                &bob,
                record.id,
                UpdateAttendanceRequest {
                    date: Some("2024-01-11".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(moved.date, NaiveDate::from_ymd_opt(2024, 1, 11).unwrap());
        assert!(!moved.present);
    }

    #[tokio::test]
    async fn test_update_errors() {
        let ctx = TestContext::new().await;
        let bob = ctx.create_user("bob", UserRole::Teacher).await;
        let dave = ctx.create_user("dave", UserRole::Teacher).await;
        let alice = ctx.create_user("alice", UserRole::Student).await;
        let class = ctx.create_class("CS101", Some(bob.id)).await;
        let attendance = ctx.attendance_service();

        let mut ids = Vec::new();
        for date in ["2024-01-10", "2024-01-11"] {
            let record = attendance
                .record_attendance(
                    &bob,
                    class.id,
                    RecordAttendanceRequest {
                        student_id: alice.id,
                        date: date.into(),
                        present: true,
                        remarks: None,
                    },
                )
                .await
                .unwrap();
            ids.push(record.id);
        }

        let collide = UpdateAttendanceRequest {
            date: Some("2024-01-11".into()),
            ..Default::default()
        };
        let err = attendance
            .update_attendance(&bob, ids[0], collide)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let err = attendance
            .update_attendance(&dave, ids[0], UpdateAttendanceRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);

        let err = attendance
            .update_attendance(&alice, ids[0], UpdateAttendanceRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);

        let err = attendance
            .update_attendance(&bob, 999, UpdateAttendanceRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
