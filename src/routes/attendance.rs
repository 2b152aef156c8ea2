use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::errors::RecordsError;
use crate::middlewares::{self, RequireJWT};
use crate::models::ApiResponse;
use crate::models::attendance::requests::{DateRangeParams, UpdateAttendanceRequest};
use crate::services::AttendanceService;

pub async fn search_attendance(
    req: HttpRequest,
    attendance: web::Data<AttendanceService>,
    query: web::Query<DateRangeParams>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    let (Some(from), Some(to)) = (query.from.as_deref(), query.to.as_deref()) else {
        return Err(RecordsError::bad_request("Both 'from' and 'to' are required").into());
    };
    let records = attendance.query_all_between(&principal, from, to).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(records, "Attendance retrieved")))
}

pub async fn my_attendance(
    req: HttpRequest,
    attendance: web::Data<AttendanceService>,
    query: web::Query<DateRangeParams>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    let records = attendance
        .my_attendance(&principal, query.from.as_deref(), query.to.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(records, "Attendance retrieved")))
}

pub async fn student_attendance(
    req: HttpRequest,
    attendance: web::Data<AttendanceService>,
    path: web::Path<i64>,
    query: web::Query<DateRangeParams>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    let student_id = path.into_inner();
    let records = match (query.from.as_deref(), query.to.as_deref()) {
        (None, None) => attendance.query_by_student(&principal, student_id).await?,
        (from, to) => {
            attendance
                .query_by_student_between(&principal, student_id, from, to)
                .await?
        }
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(records, "Attendance retrieved")))
}

pub async fn get_attendance(
    req: HttpRequest,
    attendance: web::Data<AttendanceService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    let record = attendance
        .get_attendance(&principal, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(record, "Attendance retrieved")))
}

pub async fn update_attendance(
    req: HttpRequest,
    attendance: web::Data<AttendanceService>,
    path: web::Path<i64>,
    body: web::Json<UpdateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    let record = attendance
        .update_attendance(&principal, path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(record, "Attendance updated")))
}

pub async fn delete_attendance(
    req: HttpRequest,
    attendance: web::Data<AttendanceService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    attendance
        .delete_attendance(&principal, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Attendance deleted")))
}

// 配置路由（固定路径需注册在 /{id} 之前）
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/attendance")
            .wrap(middlewares::RequireJWT)
            .route("/search", web::get().to(search_attendance))
            .route("/me", web::get().to(my_attendance))
            .route("/students/{id}", web::get().to(student_attendance))
            .route("/{id}", web::get().to(get_attendance))
            .route("/{id}", web::put().to(update_attendance))
            .route("/{id}", web::delete().to(delete_attendance)),
    );
}
