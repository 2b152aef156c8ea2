use super::SeaOrmStorage;
use crate::entity::attendance::{Column as AttendanceColumn, Entity as Attendances};
use crate::entity::classes::{Column as ClassColumn, Entity as Classes};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{RecordsError, Result};
use crate::models::users::{
    entities::{User, UserRole},
    requests::{NewUser, UserUpdate},
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use std::collections::HashSet;

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: NewUser) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            password_hash: Set(req.password_hash),
            role: Set(req.role.to_string()),
            enabled: Set(true),
            first_name: Set(req.profile.first_name),
            last_name: Set(req.profile.last_name),
            phone: Set(req.profile.phone),
            gender: Set(req.profile.gender),
            address: Set(req.profile.address),
            department: Set(req.academic.department),
            semester: Set(req.academic.semester),
            admission_number: Set(req.academic.admission_number),
            class_id: Set(req.class_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        // 唯一约束冲突经 From<DbErr> 转换为 Conflict
        let result = model.insert(&self.db).await?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 按角色列出用户
    pub async fn list_users_by_role_impl(&self, role: UserRole) -> Result<Vec<User>> {
        let users = Users::find()
            .filter(Column::Role.eq(role.to_string()))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询用户列表失败: {e}")))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }

    /// 列出班级中的学生
    pub async fn list_students_by_class_impl(&self, class_id: i64) -> Result<Vec<User>> {
        let users = Users::find()
            .filter(Column::Role.eq(UserRole::STUDENT))
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询班级学生失败: {e}")))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }

    /// 按姓名或班级名称搜索
    ///
    /// 匹配名、姓，以及所在班级或所教班级的名称。各数据库 LIKE 的大小写规则不同，
    /// 因此在内存中统一做小写比较。空关键字与 `LIKE '%%'` 一样命中所有有姓名或班级的用户。
    pub async fn search_users_impl(&self, keyword: &str) -> Result<Vec<User>> {
        let keyword = keyword.trim().to_lowercase();
        let matches = |value: &Option<String>| {
            value
                .as_deref()
                .is_some_and(|v| v.to_lowercase().contains(&keyword))
        };

        let classes = Classes::find()
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询班级失败: {e}")))?;

        let mut matched_classes = HashSet::new();
        let mut matched_teachers = HashSet::new();
        for class in classes
            .iter()
            .filter(|c| c.class_name.to_lowercase().contains(&keyword))
        {
            matched_classes.insert(class.id);
            if let Some(teacher_id) = class.teacher_id {
                matched_teachers.insert(teacher_id);
            }
        }

        let users = Users::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询用户列表失败: {e}")))?;

        Ok(users
            .into_iter()
            .filter(|u| {
                matches(&u.first_name)
                    || matches(&u.last_name)
                    || u.class_id.is_some_and(|id| matched_classes.contains(&id))
                    || matched_teachers.contains(&u.id)
            })
            .map(|m| m.into_user())
            .collect())
    }

    /// 更新用户信息
    pub async fn update_user_impl(&self, id: i64, update: UserUpdate) -> Result<Option<User>> {
        // 先检查用户是否存在
        let existing = self.get_user_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(username) = update.username {
            model.username = Set(username);
        }
        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(password_hash) = update.password_hash {
            model.password_hash = Set(password_hash);
        }
        if let Some(enabled) = update.enabled {
            model.enabled = Set(enabled);
        }
        if let Some(first_name) = update.first_name {
            model.first_name = Set(Some(first_name));
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(Some(last_name));
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(gender) = update.gender {
            model.gender = Set(Some(gender));
        }
        if let Some(address) = update.address {
            model.address = Set(Some(address));
        }
        if let Some(department) = update.department {
            model.department = Set(Some(department));
        }
        if let Some(semester) = update.semester {
            model.semester = Set(Some(semester));
        }
        if let Some(admission_number) = update.admission_number {
            model.admission_number = Set(Some(admission_number));
        }
        if let Some(class_id) = update.class_id {
            model.class_id = Set(class_id);
        }

        let result = model.update(&self.db).await?;

        Ok(Some(result.into_user()))
    }

    /// 删除学生：先删除其全部考勤，再删除用户
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        Attendances::delete_many()
            .filter(AttendanceColumn::StudentId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| RecordsError::database_operation(format!("删除学生考勤失败: {e}")))?;

        let result = Users::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| RecordsError::database_operation(format!("删除学生失败: {e}")))?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }

    /// 删除教师：先解除其所有班级的任课关系，再删除用户
    pub async fn delete_teacher_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;
        let now = chrono::Utc::now().timestamp();

        Classes::update_many()
            .col_expr(ClassColumn::TeacherId, Expr::value(Option::<i64>::None))
            .col_expr(ClassColumn::UpdatedAt, Expr::value(now))
            .filter(ClassColumn::TeacherId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| RecordsError::database_operation(format!("解除教师班级失败: {e}")))?;

        let result = Users::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| RecordsError::database_operation(format!("删除教师失败: {e}")))?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }

    /// 用户总数
    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询用户总数失败: {e}")))
    }
}
