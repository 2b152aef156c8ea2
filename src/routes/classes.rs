use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares::{self, RequireJWT};
use crate::models::ApiResponse;
use crate::models::attendance::requests::{DateParams, RecordAttendanceRequest};
use crate::models::classes::requests::{CreateClassRequest, UpdateClassRequest};
use crate::services::{AttendanceService, ClassService};

// 管理员需要的角色校验在服务层的授权策略中完成，这里只要求登录

pub async fn list_classes(
    req: HttpRequest,
    classes: web::Data<ClassService>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    let list = classes.list_classes(&principal).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(list, "Classes retrieved")))
}

pub async fn create_class(
    req: HttpRequest,
    classes: web::Data<ClassService>,
    body: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    let class = classes.create_class(&principal, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(class, "Class created")))
}

pub async fn get_class(
    req: HttpRequest,
    classes: web::Data<ClassService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    let class = classes.get_class(&principal, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Class retrieved")))
}

pub async fn update_class(
    req: HttpRequest,
    classes: web::Data<ClassService>,
    path: web::Path<i64>,
    body: web::Json<UpdateClassRequest>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    let class = classes
        .update_class(&principal, path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Class updated")))
}

pub async fn delete_class(
    req: HttpRequest,
    classes: web::Data<ClassService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    classes.delete_class(&principal, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Class deleted")))
}

pub async fn list_class_students(
    req: HttpRequest,
    classes: web::Data<ClassService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    let students = classes
        .list_students_in_class(&principal, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(students, "Students retrieved")))
}

pub async fn list_class_attendance(
    req: HttpRequest,
    attendance: web::Data<AttendanceService>,
    path: web::Path<i64>,
    query: web::Query<DateParams>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    let class_id = path.into_inner();
    let records = match query.date.as_deref() {
        Some(date) => {
            attendance
                .query_by_class_and_date(&principal, class_id, date)
                .await?
        }
        None => attendance.query_by_class(&principal, class_id).await?,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(records, "Attendance retrieved")))
}

pub async fn record_class_attendance(
    req: HttpRequest,
    attendance: web::Data<AttendanceService>,
    path: web::Path<i64>,
    body: web::Json<RecordAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    let record = attendance
        .record_attendance(&principal, path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(record, "Attendance recorded")))
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_classes))
            .route("", web::post().to(create_class))
            .route("/{id}", web::get().to(get_class))
            .route("/{id}", web::put().to(update_class))
            .route("/{id}", web::delete().to(delete_class))
            .route("/{id}/students", web::get().to(list_class_students))
            .route("/{id}/attendance", web::get().to(list_class_attendance))
            .route("/{id}/attendance", web::post().to(record_class_attendance)),
    );
}
