use super::ClassService;
use crate::errors::Result;
use crate::models::{classes::entities::Class, users::entities::User};
use crate::policy::{self, Action, Resource};

pub async fn get_class(service: &ClassService, principal: &User, class_id: i64) -> Result<Class> {
    let class = service.find_class(class_id).await?;
    policy::authorize(
        principal,
        Action::Read,
        Resource::Class {
            teacher_id: class.teacher_id,
        },
    )?;
    Ok(class)
}

pub async fn list_students_in_class(
    service: &ClassService,
    principal: &User,
    class_id: i64,
) -> Result<Vec<User>> {
    let class = get_class(service, principal, class_id).await?;
    service.storage.list_students_by_class(class.id).await
}

#[cfg(test)]
mod tests {
    use crate::errors::ErrorKind;
    use crate::models::users::entities::UserRole;
    use crate::test_support::TestContext;

    #[tokio::test]
    async fn test_get_class_not_found_before_forbidden() {
        let ctx = TestContext::new().await;
        let bob = ctx.create_user("bob", UserRole::Teacher).await;
        let dave = ctx.create_user("dave", UserRole::Teacher).await;
        let class = ctx.create_class("CS101", Some(dave.id)).await;
        let classes = ctx.class_service();

        let missing = classes.get_class(&bob, 999).await.unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::NotFound);

        let forbidden = classes.get_class(&bob, class.id).await.unwrap_err();
        assert_eq!(forbidden.kind(), ErrorKind::Forbidden);

        assert_eq!(classes.get_class(&dave, class.id).await.unwrap().id, class.id);
    }

    #[tokio::test]
    async fn test_list_students_in_class() {
        let ctx = TestContext::new().await;
        let admin = ctx.create_admin().await;
        let dave = ctx.create_user("dave", UserRole::Teacher).await;
        let alice = ctx.create_user("alice", UserRole::Student).await;
        ctx.create_user("carol", UserRole::Student).await;
        let class = ctx.create_class("CS101", Some(dave.id)).await;
        let classes = ctx.class_service();
        classes
            .assign_student_to_class(&admin, alice.id, class.id)
            .await
            .unwrap();

        let students = classes.list_students_in_class(&dave, class.id).await.unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].id, alice.id);

        let err = classes
            .list_students_in_class(&alice, class.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }
}
