use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares::{self, RequireJWT};
use crate::models::ApiResponse;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{CreateMemberRequest, UpdateMemberRequest, UserSearchParams};
use crate::services::{ClassService, UserService};

// 学生

pub async fn list_students(
    req: HttpRequest,
    users: web::Data<UserService>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    let students = users.list_students(&principal).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(students, "Students retrieved")))
}

pub async fn create_student(
    req: HttpRequest,
    users: web::Data<UserService>,
    body: web::Json<CreateMemberRequest>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    let student = users.add_student(&principal, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(student, "Student created")))
}

pub async fn get_student(
    req: HttpRequest,
    users: web::Data<UserService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    let student = users.get_student(&principal, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(student, "Student retrieved")))
}

pub async fn update_student(
    req: HttpRequest,
    users: web::Data<UserService>,
    path: web::Path<i64>,
    body: web::Json<UpdateMemberRequest>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    let student = users
        .update_student(&principal, path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(student, "Student updated")))
}

pub async fn delete_student(
    req: HttpRequest,
    users: web::Data<UserService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    users.delete_student(&principal, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student deleted")))
}

pub async fn assign_student_class(
    req: HttpRequest,
    classes: web::Data<ClassService>,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    let (student_id, class_id) = path.into_inner();
    let student = classes
        .assign_student_to_class(&principal, student_id, class_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(student, "Student assigned to class")))
}

// 教师

pub async fn list_teachers(
    req: HttpRequest,
    users: web::Data<UserService>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    let teachers = users.list_teachers(&principal).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(teachers, "Teachers retrieved")))
}

pub async fn create_teacher(
    req: HttpRequest,
    users: web::Data<UserService>,
    body: web::Json<CreateMemberRequest>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    let teacher = users.add_teacher(&principal, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(teacher, "Teacher created")))
}

pub async fn get_teacher(
    req: HttpRequest,
    users: web::Data<UserService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    let teacher = users.get_teacher(&principal, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(teacher, "Teacher retrieved")))
}

pub async fn update_teacher(
    req: HttpRequest,
    users: web::Data<UserService>,
    path: web::Path<i64>,
    body: web::Json<UpdateMemberRequest>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    let teacher = users
        .update_teacher(&principal, path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(teacher, "Teacher updated")))
}

pub async fn delete_teacher(
    req: HttpRequest,
    users: web::Data<UserService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    users.delete_teacher(&principal, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Teacher deleted")))
}

pub async fn list_teacher_classes(
    req: HttpRequest,
    users: web::Data<UserService>,
    classes: web::Data<ClassService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    // 先确认教师存在且有权查看
    let teacher = users.get_teacher(&principal, path.into_inner()).await?;
    let list = classes.list_classes_of_teacher(teacher.user.id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(list, "Classes retrieved")))
}

pub async fn assign_teacher_class(
    req: HttpRequest,
    classes: web::Data<ClassService>,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    let (teacher_id, class_id) = path.into_inner();
    let class = classes
        .assign_teacher_to_class(&principal, teacher_id, class_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Teacher assigned to class")))
}

pub async fn search_users(
    req: HttpRequest,
    users: web::Data<UserService>,
    query: web::Query<UserSearchParams>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    let found = users.search_users(&principal, &query.q).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(found, "Search completed")))
}

// 配置路由
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_students))
            .route("", web::post().to(create_student))
            .route("/{id}", web::get().to(get_student))
            .route("/{id}", web::put().to(update_student))
            .route("/{id}", web::delete().to(delete_student))
            .route("/{id}/class/{class_id}", web::post().to(assign_student_class)),
    )
    .service(
        web::scope("/api/v1/teachers")
            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_teachers))
            .route("", web::post().to(create_teacher))
            .route("/{id}", web::get().to(get_teacher))
            .route("/{id}", web::put().to(update_teacher))
            .route("/{id}", web::delete().to(delete_teacher))
            .route("/{id}/classes", web::get().to(list_teacher_classes))
            .route("/{id}/classes/{class_id}", web::post().to(assign_teacher_class)),
    )
    .service(
        web::scope("/api/v1/users")
            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
            .wrap(middlewares::RequireJWT)
            .route("/search", web::get().to(search_users)),
    );
}
