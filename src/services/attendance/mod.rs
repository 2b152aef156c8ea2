pub mod delete;
pub mod query;
pub mod record;
pub mod update;

use std::sync::Arc;

use crate::errors::{RecordsError, Result};
use crate::models::{
    attendance::{
        entities::Attendance,
        requests::{RecordAttendanceRequest, UpdateAttendanceRequest},
    },
    classes::entities::Class,
    users::entities::{User, UserRole},
};
use crate::policy::Resource;
use crate::storage::Storage;

/// 考勤登记与查询
pub struct AttendanceService {
    storage: Arc<dyn Storage>,
}

impl AttendanceService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) async fn find_student(&self, student_id: i64) -> Result<User> {
        match self.storage.get_user_by_id(student_id).await? {
            Some(user) if user.role == UserRole::Student => Ok(user),
            _ => Err(RecordsError::not_found("Student not found")),
        }
    }

    pub(crate) async fn find_class(&self, class_id: i64) -> Result<Class> {
        self.storage
            .get_class_by_id(class_id)
            .await?
            .ok_or_else(|| RecordsError::not_found("Class not found"))
    }

    pub(crate) async fn find_attendance(&self, id: i64) -> Result<Attendance> {
        self.storage
            .get_attendance_by_id(id)
            .await?
            .ok_or_else(|| RecordsError::not_found("Attendance record not found"))
    }

    /// 单条考勤记录对应的授权资源：任课教师取自记录所属班级
    pub(crate) async fn resource_of(&self, record: &Attendance) -> Result<Resource> {
        let teacher_id = match record.class_id {
            Some(class_id) => self
                .storage
                .get_class_by_id(class_id)
                .await?
                .and_then(|c| c.teacher_id),
            None => None,
        };
        Ok(Resource::Attendance {
            teacher_id,
            student_id: Some(record.student_id),
        })
    }

    // 登记考勤
    pub async fn record_attendance(
        &self,
        principal: &User,
        class_id: i64,
        request: RecordAttendanceRequest,
    ) -> Result<Attendance> {
        record::record_attendance(self, principal, class_id, request).await
    }

    // 部分更新考勤
    pub async fn update_attendance(
        &self,
        principal: &User,
        id: i64,
        request: UpdateAttendanceRequest,
    ) -> Result<Attendance> {
        update::update_attendance(self, principal, id, request).await
    }

    // 删除考勤
    pub async fn delete_attendance(&self, principal: &User, id: i64) -> Result<()> {
        delete::delete_attendance(self, principal, id).await
    }

    // 获取单条考勤
    pub async fn get_attendance(&self, principal: &User, id: i64) -> Result<Attendance> {
        query::get_attendance(self, principal, id).await
    }

    // 班级全部考勤
    pub async fn query_by_class(&self, principal: &User, class_id: i64) -> Result<Vec<Attendance>> {
        query::query_by_class(self, principal, class_id, None).await
    }

    // 班级某天的考勤
    pub async fn query_by_class_and_date(
        &self,
        principal: &User,
        class_id: i64,
        date: &str,
    ) -> Result<Vec<Attendance>> {
        query::query_by_class(self, principal, class_id, Some(date)).await
    }

    // 学生全部考勤
    pub async fn query_by_student(
        &self,
        principal: &User,
        student_id: i64,
    ) -> Result<Vec<Attendance>> {
        query::query_by_student_between(self, principal, student_id, None, None).await
    }

    // 学生在日期区间内的考勤（闭区间，任一端可省略）
    pub async fn query_by_student_between(
        &self,
        principal: &User,
        student_id: i64,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Vec<Attendance>> {
        query::query_by_student_between(self, principal, student_id, from, to).await
    }

    // 全部学生在日期区间内的考勤
    pub async fn query_all_between(
        &self,
        principal: &User,
        from: &str,
        to: &str,
    ) -> Result<Vec<Attendance>> {
        query::query_all_between(self, principal, from, to).await
    }

    // 本人考勤
    pub async fn my_attendance(
        &self,
        principal: &User,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Vec<Attendance>> {
        query::my_attendance(self, principal, from, to).await
    }
}
