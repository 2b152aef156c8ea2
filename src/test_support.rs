//! 测试辅助：内存 SQLite 存储与常用数据构造

use std::sync::Arc;

use crate::config::{AccountsConfig, Argon2Config, DatabaseConfig, JwtConfig};
use crate::models::{
    classes::{entities::Class, requests::CreateClassRequest},
    users::{
        entities::{AcademicInfo, User, UserProfile, UserRole},
        requests::NewUser,
    },
};
use crate::services::{AttendanceService, AuthService, ClassService, UserService};
use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};
use crate::utils::{PasswordService, TokenService};

pub const TEST_PASSWORD: &str = "password123";

pub struct TestContext {
    pub storage: Arc<dyn Storage>,
    pub passwords: PasswordService,
    pub tokens: TokenService,
    pub accounts: AccountsConfig,
}

impl TestContext {
    pub async fn new() -> Self {
        let storage = SeaOrmStorage::connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            pool_size: 1,
            timeout: 5,
        })
        .await
        .expect("in-memory database should open");

        // 最低成本参数，只用于测试
        let passwords = PasswordService::new(&Argon2Config {
            memory_cost: 8,
            time_cost: 1,
            parallelism: 1,
        })
        .expect("argon2 params");

        let tokens = TokenService::new(&JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry: 60,
        });

        Self {
            storage: Arc::new(storage),
            passwords,
            tokens,
            accounts: AccountsConfig::default(),
        }
    }

    pub fn auth_service(&self) -> AuthService {
        AuthService::new(
            self.storage.clone(),
            self.passwords.clone(),
            self.tokens.clone(),
        )
    }

    pub fn user_service(&self) -> UserService {
        UserService::new(
            self.storage.clone(),
            self.passwords.clone(),
            self.accounts.clone(),
        )
    }

    pub fn class_service(&self) -> ClassService {
        ClassService::new(self.storage.clone())
    }

    pub fn attendance_service(&self) -> AttendanceService {
        AttendanceService::new(self.storage.clone())
    }

    /// 直接写入一个用户，密码为 `TEST_PASSWORD`
    pub async fn create_user(&self, username: &str, role: UserRole) -> User {
        self.storage
            .create_user(NewUser {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password_hash: self.passwords.hash(TEST_PASSWORD).expect("hash"),
                role,
                profile: UserProfile {
                    first_name: Some(username.to_string()),
                    ..Default::default()
                },
                academic: AcademicInfo::default(),
                class_id: None,
            })
            .await
            .expect("create user")
    }

    pub async fn create_admin(&self) -> User {
        self.create_user("admin", UserRole::Admin).await
    }

    pub async fn create_class(&self, name: &str, teacher_id: Option<i64>) -> Class {
        self.storage
            .create_class(CreateClassRequest {
                class_name: name.to_string(),
                department: Some("Computer Science".to_string()),
                teacher_id,
            })
            .await
            .expect("create class")
    }
}
