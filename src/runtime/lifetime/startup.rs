use std::sync::Arc;

use actix_web::web;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::users::entities::{AcademicInfo, UserProfile, UserRole};
use crate::models::users::requests::NewUser;
use crate::services::{AttendanceService, AuthService, ClassService, UserService};
use crate::storage::{Storage, create_storage};
use crate::utils::{PasswordService, TokenService};

/// 启动阶段构建的共享对象，由每个 worker 克隆 `web::Data` 句柄
#[derive(Clone)]
pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub tokens: TokenService,
    pub auth_service: web::Data<AuthService>,
    pub user_service: web::Data<UserService>,
    pub class_service: web::Data<ClassService>,
    pub attendance_service: web::Data<AttendanceService>,
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// 初始化默认管理员账号
/// 数据库中没有任何用户时创建 admin，否则没有办法登录去创建其他账号
async fn seed_admin(storage: &Arc<dyn Storage>, passwords: &PasswordService) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!("Database already has {} user(s), skipping admin seed", count);
            return;
        }
        Ok(_) => info!("No users found in database, creating default admin account..."),
        Err(e) => {
            warn!("Failed to count users: {}, skipping admin seed", e);
            return;
        }
    }

    // 优先使用环境变量，否则生成随机密码
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let password_hash = match passwords.hash(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let admin = NewUser {
        username: "admin".to_string(),
        email: "admin@localhost.localdomain".to_string(),
        password_hash,
        role: UserRole::Admin,
        profile: UserProfile {
            first_name: Some("Administrator".to_string()),
            ..Default::default()
        },
        academic: AcademicInfo::default(),
        class_id: None,
    };

    match storage.create_user(admin).await {
        Ok(user) => info!(
            "Default admin account created successfully (ID: {}, username: {})",
            user.id, user.username
        ),
        Err(e) => warn!("Failed to create admin account: {}", e),
    }
}

/// 准备服务器启动的上下文
/// 连接存储并迁移、初始化管理员账号、构建各业务服务
pub async fn prepare_server_startup(config: &AppConfig) -> Result<StartupContext> {
    let storage = create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    let passwords = PasswordService::new(&config.argon2)?;
    let tokens = TokenService::new(&config.jwt);

    seed_admin(&storage, &passwords).await;

    Ok(StartupContext {
        auth_service: web::Data::new(AuthService::new(
            storage.clone(),
            passwords.clone(),
            tokens.clone(),
        )),
        user_service: web::Data::new(UserService::new(
            storage.clone(),
            passwords,
            config.accounts.clone(),
        )),
        class_service: web::Data::new(ClassService::new(storage.clone())),
        attendance_service: web::Data::new(AttendanceService::new(storage.clone())),
        storage,
        tokens,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Argon2Config;
    use crate::test_support::TestContext;

    #[test]
    fn test_generate_random_password() {
        let pwd = generate_random_password(16);
        assert_eq!(pwd.chars().count(), 16);
        assert_ne!(pwd, generate_random_password(16));
    }

    #[tokio::test]
    async fn test_seed_admin_only_when_empty() {
        let ctx = TestContext::new().await;
        let passwords = PasswordService::new(&Argon2Config {
            memory_cost: 8,
            time_cost: 1,
            parallelism: 1,
        })
        .unwrap();

        seed_admin(&ctx.storage, &passwords).await;
        let admin = ctx.storage.get_user_by_username("admin").await.unwrap().unwrap();
        assert_eq!(admin.role, UserRole::Admin);
        assert_eq!(ctx.storage.count_users().await.unwrap(), 1);

        seed_admin(&ctx.storage, &passwords).await;
        assert_eq!(ctx.storage.count_users().await.unwrap(), 1);
    }
}
