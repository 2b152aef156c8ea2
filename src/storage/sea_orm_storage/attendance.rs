//! 考勤存储操作

use super::SeaOrmStorage;
use crate::entity::attendance::{ActiveModel, Column, Entity as Attendances};
use crate::errors::{RecordsError, Result};
use crate::models::attendance::{
    entities::Attendance,
    requests::{AttendanceQuery, AttendanceUpdate, NewAttendance},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建考勤记录
    ///
    /// (student_id, date) 上有唯一索引，并发重复提交由数据库拒绝并转换为 Conflict。
    pub async fn create_attendance_impl(&self, req: NewAttendance) -> Result<Attendance> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(req.student_id),
            class_id: Set(req.class_id),
            date: Set(req.date),
            present: Set(req.present),
            remarks: Set(req.remarks),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;

        Ok(result.into_attendance())
    }

    /// 通过 ID 获取考勤
    pub async fn get_attendance_by_id_impl(&self, id: i64) -> Result<Option<Attendance>> {
        let result = Attendances::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询考勤失败: {e}")))?;

        Ok(result.map(|m| m.into_attendance()))
    }

    /// 获取学生某天的考勤
    pub async fn get_attendance_by_student_and_date_impl(
        &self,
        student_id: i64,
        date: chrono::NaiveDate,
    ) -> Result<Option<Attendance>> {
        let result = Attendances::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Date.eq(date))
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询考勤失败: {e}")))?;

        Ok(result.map(|m| m.into_attendance()))
    }

    /// 更新考勤，省略的字段保持原值
    pub async fn update_attendance_impl(
        &self,
        id: i64,
        update: AttendanceUpdate,
    ) -> Result<Option<Attendance>> {
        let existing = self.get_attendance_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(date) = update.date {
            model.date = Set(date);
        }
        if let Some(present) = update.present {
            model.present = Set(present);
        }
        if let Some(remarks) = update.remarks {
            model.remarks = Set(Some(remarks));
        }

        let result = model.update(&self.db).await?;

        Ok(Some(result.into_attendance()))
    }

    /// 删除考勤
    pub async fn delete_attendance_impl(&self, id: i64) -> Result<bool> {
        let result = Attendances::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("删除考勤失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 条件查询考勤
    pub async fn list_attendance_impl(&self, query: AttendanceQuery) -> Result<Vec<Attendance>> {
        let mut select = Attendances::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(date) = query.date {
            select = select.filter(Column::Date.eq(date));
        }
        // 闭区间
        if let Some(from) = query.from {
            select = select.filter(Column::Date.gte(from));
        }
        if let Some(to) = query.to {
            select = select.filter(Column::Date.lte(to));
        }

        let records = select
            .order_by_asc(Column::Date)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询考勤列表失败: {e}")))?;

        Ok(records.into_iter().map(|m| m.into_attendance()).collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::errors::ErrorKind;
    use crate::models::attendance::requests::NewAttendance;
    use crate::models::users::entities::UserRole;
    use crate::test_support::TestContext;

    #[tokio::test]
    async fn test_unique_index_rejects_same_student_and_date() {
        let ctx = TestContext::new().await;
        let alice = ctx.create_user("alice", UserRole::Student).await;
        let cs101 = ctx.create_class("CS101", None).await;
        let cs102 = ctx.create_class("CS102", None).await;
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();

        let record = |class_id| NewAttendance {
            student_id: alice.id,
            class_id: Some(class_id),
            date,
            present: true,
            remarks: None,
        };

        ctx.storage.create_attendance(record(cs101.id)).await.unwrap();

        // 绕过服务层的预检查，直接由数据库唯一索引拒绝
        let err = ctx
            .storage
            .create_attendance(record(cs102.id))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let next_day = NewAttendance {
            date: date.succ_opt().unwrap(),
            ..record(cs102.id)
        };
        assert!(ctx.storage.create_attendance(next_day).await.is_ok());
    }
}
