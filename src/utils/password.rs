use crate::config::Argon2Config;
use crate::errors::{RecordsError, Result};
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

/// 密码哈希服务（Argon2id）
#[derive(Clone)]
pub struct PasswordService {
    params: Params,
    // 用户不存在时也走一次完整校验，登录耗时不暴露用户名是否存在
    dummy_hash: String,
}

impl PasswordService {
    pub fn new(config: &Argon2Config) -> Result<Self> {
        let params = Params::new(
            config.memory_cost,
            config.time_cost,
            config.parallelism,
            None,
        )
        .map_err(|e| RecordsError::internal(format!("Argon2 参数错误: {e}")))?;
        let mut service = Self {
            params,
            dummy_hash: String::new(),
        };
        service.dummy_hash = service.hash("dummy-password-for-timing")?;
        Ok(service)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// 哈希密码
    pub fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| RecordsError::internal(format!("密码哈希失败: {e}")))?;
        Ok(hash.to_string())
    }

    /// 验证密码（参数从哈希串中读取）
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed_hash) => self
                .argon2()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// 对不存在的用户执行一次等价的校验，结果恒为 false
    pub fn verify_absent(&self, password: &str) -> bool {
        let _ = self.verify(password, &self.dummy_hash);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> PasswordService {
        PasswordService::new(&Argon2Config {
            memory_cost: 8,
            time_cost: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let passwords = service();
        let hash = passwords.hash("secret123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(passwords.verify("secret123", &hash));
        assert!(!passwords.verify("secret124", &hash));
    }

    #[test]
    fn test_verify_absent_never_matches() {
        let passwords = service();
        assert!(!passwords.verify_absent("dummy-password-for-timing"));
        assert!(!passwords.verify_absent("anything"));
    }

    #[test]
    fn test_verify_garbage_hash() {
        assert!(!service().verify("secret123", "not-a-hash"));
    }

    #[test]
    fn test_invalid_params() {
        let result = PasswordService::new(&Argon2Config {
            memory_cost: 0,
            time_cost: 0,
            parallelism: 0,
        });
        assert!(result.is_err());
    }
}
