use tracing::info;

use super::ClassService;
use crate::errors::{RecordsError, Result};
use crate::models::{
    classes::{
        entities::Class,
        requests::{ClassUpdate, UpdateClassRequest},
    },
    users::entities::User,
};
use crate::policy::{self, Action, Resource};
use crate::utils::validate::validate_class_name;

pub async fn update_class(
    service: &ClassService,
    principal: &User,
    class_id: i64,
    request: UpdateClassRequest,
) -> Result<Class> {
    let existing = service.find_class(class_id).await?;
    policy::authorize(principal, Action::Write, Resource::Registry)?;

    let class_name = match request.class_name {
        Some(name) => {
            validate_class_name(&name).map_err(RecordsError::bad_request)?;
            let name = name.trim().to_string();
            if name != existing.class_name
                && service.storage.get_class_by_name(&name).await?.is_some()
            {
                return Err(RecordsError::conflict("Class name already exists"));
            }
            Some(name)
        }
        None => None,
    };

    if let Some(teacher_id) = request.teacher_id {
        service.find_teacher(teacher_id).await?;
    }

    let update = ClassUpdate {
        class_name,
        department: request.department,
        teacher_id: request.teacher_id.map(Some),
    };

    let class = service
        .storage
        .update_class(class_id, update)
        .await?
        .ok_or_else(|| RecordsError::not_found("Class not found"))?;

    info!(
        "Class {} updated successfully by {}",
        class.class_name, principal.username
    );
    Ok(class)
}

#[cfg(test)]
mod tests {
    use crate::errors::ErrorKind;
    use crate::models::{classes::requests::UpdateClassRequest, users::entities::UserRole};
    use crate::test_support::TestContext;

    #[tokio::test]
    async fn test_update_class_partial() {
        let ctx = TestContext::new().await;
        let admin = ctx.create_admin().await;
        let bob = ctx.create_user("bob", UserRole::Teacher).await;
        let class = ctx.create_class("CS101", None).await;

        let updated = ctx
            .class_service()
            .update_class(
                &admin,
                class.id,
                UpdateClassRequest {
                    teacher_id: Some(bob.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.class_name, "CS101");
        assert_eq!(updated.department, class.department);
        assert_eq!(updated.teacher_id, Some(bob.id));
    }

    #[tokio::test]
    async fn test_update_class_errors() {
        let ctx = TestContext::new().await;
        let admin = ctx.create_admin().await;
        let bob = ctx.create_user("bob", UserRole::Teacher).await;
        let class = ctx.create_class("CS101", Some(bob.id)).await;
        ctx.create_class("CS102", None).await;
        let classes = ctx.class_service();

        let rename = UpdateClassRequest {
            class_name: Some("CS102".into()),
            ..Default::default()
        };
        let err = classes
            .update_class(&admin, class.id, rename)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        // 任课教师也不能修改班级本身
        let err = classes
            .update_class(&bob, class.id, UpdateClassRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);

        let err = classes
            .update_class(&admin, 999, UpdateClassRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
