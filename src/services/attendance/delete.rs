use tracing::info;

use super::AttendanceService;
use crate::errors::{RecordsError, Result};
use crate::models::users::entities::User;
use crate::policy::{self, Action};

pub async fn delete_attendance(
    service: &AttendanceService,
    principal: &User,
    id: i64,
) -> Result<()> {
    let record = service.find_attendance(id).await?;
    policy::authorize(principal, Action::Write, service.resource_of(&record).await?)?;

    if !service.storage.delete_attendance(id).await? {
        return Err(RecordsError::not_found("Attendance record not found"));
    }

    info!("Attendance {} deleted by {}", id, principal.username);
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::errors::ErrorKind;
    use crate::models::{
        attendance::requests::RecordAttendanceRequest, users::entities::UserRole,
    };
    use crate::test_support::TestContext;

    #[tokio::test]
    async fn test_delete_attendance() {
        let ctx = TestContext::new().await;
        let admin = ctx.create_admin().await;
        let bob = ctx.create_user("bob", UserRole::Teacher).await;
        let dave = ctx.create_user("dave", UserRole::Teacher).await;
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
                    present: false,
                    remarks: None,
                },
            )
            .await
            .unwrap();

        let err = attendance
            .delete_attendance(&dave, record.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        let err = attendance
            .delete_attendance(&alice, record.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);

        attendance.delete_attendance(&admin, record.id).await.unwrap();
        let err = attendance
            .delete_attendance(&admin, record.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
