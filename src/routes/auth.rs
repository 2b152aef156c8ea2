use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::info;

use crate::middlewares::{self, RequireJWT};
use crate::models::ApiResponse;
use crate::models::auth::{
    requests::LoginRequest,
    responses::{TokenVerificationResponse, UserInfoResponse},
};
use crate::models::users::requests::{
    ChangePasswordRequest, RegisterRequest, UpdateProfileRequest,
};
use crate::services::AuthService;

pub async fn login(
    auth: web::Data<AuthService>,
    user_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    let response = auth.login(user_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Login successful")))
}

pub async fn register(
    auth: web::Data<AuthService>,
    user_data: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    let user = auth.register(user_data.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(
        UserInfoResponse { user },
        "Registration successful",
    )))
}

// 令牌为无状态 JWT，登出只由客户端丢弃令牌
pub async fn logout(req: HttpRequest) -> ActixResult<HttpResponse> {
    let user = RequireJWT::require_user(&req)?;
    info!("User {} logged out", user.username);
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Logout successful")))
}

pub async fn verify_token(req: HttpRequest) -> ActixResult<HttpResponse> {
    // 能走到这里说明中间件已完成校验
    RequireJWT::require_user(&req)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TokenVerificationResponse { is_valid: true },
        "Token is valid",
    )))
}

pub async fn get_user(req: HttpRequest) -> ActixResult<HttpResponse> {
    let user = RequireJWT::require_user(&req)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserInfoResponse { user },
        "User information retrieved",
    )))
}

pub async fn update_profile(
    req: HttpRequest,
    auth: web::Data<AuthService>,
    profile: web::Json<UpdateProfileRequest>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    let user = auth.update_profile(&principal, profile.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserInfoResponse { user },
        "Profile updated",
    )))
}

pub async fn change_password(
    req: HttpRequest,
    auth: web::Data<AuthService>,
    body: web::Json<ChangePasswordRequest>,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::require_user(&req)?;
    auth.change_password(&principal, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Password changed")))
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .route("/login", web::post().to(login))
            .route("/register", web::post().to(register))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .route("/logout", web::post().to(logout))
                    .route("/verify-token", web::get().to(verify_token))
                    .route("/me", web::get().to(get_user))
                    .route("/profile", web::put().to(update_profile))
                    .route("/password", web::put().to(change_password)),
            ),
    );
}
