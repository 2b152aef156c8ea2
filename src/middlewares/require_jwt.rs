/*!
 * JWT 认证中间件
 *
 * 验证 `Authorization: Bearer <token>`，并把令牌解析为当前用户（principal）。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::RequireJWT;
 *
 * App::new().service(
 *     web::scope("/api")
 *         .wrap(RequireJWT)
 *         .route("/protected", web::get().to(protected_handler)),
 * );
 *
 * async fn protected_handler(req: HttpRequest) -> ActixResult<HttpResponse> {
 *     let user = RequireJWT::require_user(&req)?;
 *     Ok(HttpResponse::Ok().json(format!("Hello, {}!", user.username)))
 * }
 * ```
 *
 * ## 认证流程
 *
 * 1. 提取并校验令牌（签名、过期）
 * 2. 按令牌中的用户 ID 从存储加载用户，每次请求都重新读取，不做缓存
 * 3. 用户不存在、已停用，或用户名/角色与令牌不一致，均返回 401
 * 4. 校验通过后将用户放入请求扩展，供后续处理程序使用
 *
 * 依赖 `web::Data<TokenService>` 与 `web::Data<Arc<dyn Storage>>`。
 */

use crate::errors::{RecordsError, Result};
use crate::models::ErrorCode;
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;
use crate::utils::TokenService;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

// 辅助函数：提取令牌并解析出当前用户
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<User> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| RecordsError::unauthorized("Missing or invalid Authorization header"))?;

    let tokens = req
        .app_data::<web::Data<TokenService>>()
        .ok_or_else(|| RecordsError::internal("TokenService not found in app data"))?;
    let claims = tokens.verify(token)?;

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .ok_or_else(|| RecordsError::internal("Storage not found in app data"))?
        .get_ref()
        .clone();

    let user = storage
        .get_user_by_id(claims.uid)
        .await?
        .ok_or_else(|| RecordsError::unauthorized("User not found"))?;

    // 签发后改名或改角色的令牌作废
    if user.username != claims.sub || user.role != claims.role {
        return Err(RecordsError::unauthorized("Token no longer matches the user"));
    }

    if !user.enabled {
        return Err(RecordsError::unauthorized("User is disabled"));
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::result::Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match extract_and_validate_jwt(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for {}", user.username);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    let kind = err.kind();
                    if kind == crate::errors::ErrorKind::Internal {
                        error!("JWT authentication error on {}: {}", req.path(), err);
                    } else {
                        info!(
                            "JWT authentication failed for request to {}: {}",
                            req.path(),
                            err.message()
                        );
                    }
                    Ok(req.into_response(
                        create_error_response(
                            kind.status_code(),
                            kind.error_code(),
                            err.public_message(),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl RequireJWT {
    /// 从请求扩展中提取当前用户
    /// 此函数应该在应用了RequireJWT中间件的路由处理程序中使用
    pub fn extract_user_claims(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    /// 从请求扩展中提取用户角色
    pub fn extract_user_role(req: &actix_web::HttpRequest) -> Option<UserRole> {
        req.extensions().get::<User>().map(|user| user.role)
    }

    /// 提取当前用户，缺失时返回 Unauthorized
    pub fn require_user(req: &actix_web::HttpRequest) -> Result<User> {
        Self::extract_user_claims(req)
            .ok_or_else(|| RecordsError::unauthorized("Authentication required"))
    }
}
