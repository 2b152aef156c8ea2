//! 班级存储操作

use super::SeaOrmStorage;
use crate::entity::attendance::{Column as AttendanceColumn, Entity as Attendances};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{RecordsError, Result};
use crate::models::classes::{
    entities::Class,
    requests::{ClassUpdate, CreateClassRequest},
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            class_name: Set(req.class_name),
            department: Set(req.department),
            teacher_id: Set(req.teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;

        Ok(result.into_class())
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 通过名称获取班级
    pub async fn get_class_by_name_impl(&self, class_name: &str) -> Result<Option<Class>> {
        let result = Classes::find()
            .filter(Column::ClassName.eq(class_name))
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 列出班级
    pub async fn list_classes_impl(&self, teacher_id: Option<i64>) -> Result<Vec<Class>> {
        let mut select = Classes::find();

        // 教师筛选
        if let Some(teacher_id) = teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        let classes = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(classes.into_iter().map(|m| m.into_class()).collect())
    }

    /// 更新班级信息
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: ClassUpdate,
    ) -> Result<Option<Class>> {
        // 先检查班级是否存在
        let existing = self.get_class_by_id_impl(class_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(class_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(class_name) = update.class_name {
            model.class_name = Set(class_name);
        }
        if let Some(department) = update.department {
            model.department = Set(Some(department));
        }
        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(teacher_id);
        }

        let result = model.update(&self.db).await?;

        Ok(Some(result.into_class()))
    }

    /// 删除班级
    ///
    /// 学生的班级引用被清空，考勤记录保留但班级置空。
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;
        let now = chrono::Utc::now().timestamp();

        Users::update_many()
            .col_expr(UserColumn::ClassId, Expr::value(Option::<i64>::None))
            .col_expr(UserColumn::UpdatedAt, Expr::value(now))
            .filter(UserColumn::ClassId.eq(class_id))
            .exec(&txn)
            .await
            .map_err(|e| RecordsError::database_operation(format!("清空学生班级失败: {e}")))?;

        Attendances::update_many()
            .col_expr(AttendanceColumn::ClassId, Expr::value(Option::<i64>::None))
            .filter(AttendanceColumn::ClassId.eq(class_id))
            .exec(&txn)
            .await
            .map_err(|e| RecordsError::database_operation(format!("解除考勤班级失败: {e}")))?;

        let result = Classes::delete_by_id(class_id)
            .exec(&txn)
            .await
            .map_err(|e| RecordsError::database_operation(format!("删除班级失败: {e}")))?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }
}
