use tracing::info;

use super::UserService;
use crate::errors::{RecordsError, Result};
use crate::models::users::entities::{User, UserRole};
use crate::policy::{self, Action, Resource};

pub async fn delete_student(service: &UserService, principal: &User, id: i64) -> Result<()> {
    let student = service.find_member(id, UserRole::Student).await?;
    policy::authorize(principal, Action::Write, Resource::Registry)?;

    if !service.storage.delete_student(student.id).await? {
        return Err(RecordsError::not_found("Student not found"));
    }

    info!(
        "Student {} and their attendance deleted by {}",
        student.username, principal.username
    );
    Ok(())
}

pub async fn delete_teacher(service: &UserService, principal: &User, id: i64) -> Result<()> {
    let teacher = service.find_member(id, UserRole::Teacher).await?;
    policy::authorize(principal, Action::Write, Resource::Registry)?;

    if !service.storage.delete_teacher(teacher.id).await? {
        return Err(RecordsError::not_found("Teacher not found"));
    }

    info!(
        "Teacher {} deleted and detached from classes by {}",
        teacher.username, principal.username
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::errors::ErrorKind;
    use crate::models::attendance::requests::{AttendanceQuery, NewAttendance};
    use crate::models::users::entities::UserRole;
    use crate::test_support::TestContext;

    #[tokio::test]
    async fn test_delete_student_removes_attendance() {
        let ctx = TestContext::new().await;
        let admin = ctx.create_admin().await;
        let alice = ctx.create_user("alice", UserRole::Student).await;
        let carol = ctx.create_user("carol", UserRole::Student).await;
        let class = ctx.create_class("CS101", None).await;

        for (student_id, day) in [(alice.id, 10), (alice.id, 11), (carol.id, 10)] {
            ctx.storage
                .create_attendance(NewAttendance {
                    student_id,
                    class_id: Some(class.id),
                    date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                    present: true,
                    remarks: None,
                })
                .await
                .unwrap();
        }

        ctx.user_service()
            .delete_student(&admin, alice.id)
            .await
            .unwrap();

        assert!(ctx.storage.get_user_by_id(alice.id).await.unwrap().is_none());
        let remaining = ctx
            .storage
            .list_attendance(AttendanceQuery::default())
            .await
            .unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(remaining.iter().all(|a| a.student_id != alice.id));
    }

    #[tokio::test]
    async fn test_delete_teacher_clears_class_references() {
        let ctx = TestContext::new().await;
        let admin = ctx.create_admin().await;
        let bob = ctx.create_user("bob", UserRole::Teacher).await;
        let dave = ctx.create_user("dave", UserRole::Teacher).await;
        ctx.create_class("CS101", Some(bob.id)).await;
        ctx.create_class("CS102", Some(bob.id)).await;
        let kept = ctx.create_class("CS103", Some(dave.id)).await;

        ctx.user_service()
            .delete_teacher(&admin, bob.id)
            .await
            .unwrap();

        let classes = ctx.storage.list_classes(None).await.unwrap();
        assert_eq!(classes.len(), 3);
        assert!(classes.iter().all(|c| c.teacher_id != Some(bob.id)));
        let kept = ctx.storage.get_class_by_id(kept.id).await.unwrap().unwrap();
        assert_eq!(kept.teacher_id, Some(dave.id));
    }

    #[tokio::test]
    async fn test_delete_requires_matching_role() {
        let ctx = TestContext::new().await;
        let admin = ctx.create_admin().await;
        let bob = ctx.create_user("bob", UserRole::Teacher).await;
        let users = ctx.user_service();

        let err = users.delete_student(&admin, bob.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = users.delete_teacher(&admin, 404).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(ctx.storage.get_user_by_id(bob.id).await.unwrap().is_some());
    }
}
