//! 管理端角色闸门
//!
//! 只用于学生、教师与用户搜索这三个管理员路由组，必须包在 `RequireJWT` 里面：
//!
//! ```rust,ignore
//! web::scope("/api/v1/students")
//!     .wrap(RequireRole::new_any(UserRole::admin_roles()))
//!     .wrap(RequireJWT)
//! ```
//!
//! 细粒度的归属判断（教师是否任课、学生是否本人）由 `policy` 在服务层完成，
//! 这里只挡掉角色明显不符的请求。

use std::rc::Rc;

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::info;

use super::create_error_response;
use crate::models::{
    ErrorCode,
    users::entities::{User, UserRole},
};

#[derive(Clone)]
pub struct RequireRole {
    allowed: Rc<[UserRole]>,
}

impl RequireRole {
    /// 当前用户具有其中任一角色即放行
    pub fn new_any(roles: &[&UserRole]) -> Self {
        Self {
            allowed: roles.iter().map(|r| **r).collect(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RoleGate<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RoleGate {
            inner: Rc::new(service),
            allowed: self.allowed.clone(),
        }))
    }
}

pub struct RoleGate<S> {
    inner: Rc<S>,
    allowed: Rc<[UserRole]>,
}

impl<S, B> Service<ServiceRequest> for RoleGate<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_service::forward_ready!(inner);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let inner = self.inner.clone();
        let allowed = self.allowed.clone();

        Box::pin(async move {
            let principal = req
                .extensions()
                .get::<User>()
                .map(|u| (u.username.clone(), u.role));

            let rejection = match principal {
                Some((_, role)) if allowed.contains(&role) => None,
                Some((username, role)) => {
                    info!(
                        "Role {} of user {} is not permitted on {}",
                        role,
                        username,
                        req.path()
                    );
                    Some((StatusCode::FORBIDDEN, ErrorCode::Forbidden, "Access denied"))
                }
                None => {
                    info!("No principal on {}, RequireJWT must wrap RequireRole", req.path());
                    Some((
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Authentication required",
                    ))
                }
            };

            match rejection {
                None => Ok(inner.call(req).await?.map_into_left_body()),
                Some((status, code, message)) => Ok(req.into_response(
                    create_error_response(status, code, message).map_into_right_body(),
                )),
            }
        })
    }
}
