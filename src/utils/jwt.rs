use crate::config::JwtConfig;
use crate::errors::{RecordsError, Result};
use crate::models::users::entities::{User, UserRole};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,    // Subject (username)
    pub uid: i64,       // 用户 ID，改名后旧令牌不会落到同名新账号上
    pub role: UserRole, // 用户角色
    pub exp: usize,     // Expiration time (时间戳)
    pub iat: usize,     // Issued at (签发时间)
}

/// 令牌签发与校验
///
/// 不维护吊销列表，过期是唯一的失效方式；注销只需客户端丢弃令牌。
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry: chrono::Duration,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            expiry: chrono::Duration::minutes(config.access_token_expiry),
        }
    }

    /// 令牌有效期（秒）
    pub fn expires_in(&self) -> i64 {
        self.expiry.num_seconds()
    }

    // 为用户签发令牌
    pub fn issue(&self, user: &User) -> Result<String> {
        self.issue_with_expiry(user.id, &user.username, user.role, self.expiry)
    }

    // 生成带自定义过期时间的 Token
    pub fn issue_with_expiry(
        &self,
        user_id: i64,
        username: &str,
        role: UserRole,
        expiry_duration: chrono::Duration,
    ) -> Result<String> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: username.to_string(),
            uid: user_id,
            role,
            exp: expiration.timestamp().max(0) as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| RecordsError::internal(format!("签发令牌失败: {e}")))
    }

    // 验证 JWT token：格式错误、过期或签名不符均返回 Unauthorized
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let validation = Validation::default();
        let data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn service(secret: &str) -> TokenService {
        TokenService::new(&JwtConfig {
            secret: secret.to_string(),
            access_token_expiry: 60,
        })
    }

    #[test]
    fn test_issue_and_verify() {
        let tokens = service("unit-test-secret");
        let token = tokens
            .issue_with_expiry(7, "alice", UserRole::Student, chrono::Duration::minutes(5))
            .unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.uid, 7);
        assert_eq!(claims.role, UserRole::Student);
        assert!(claims.exp > claims.iat);
        assert_eq!(tokens.expires_in(), 3600);
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = service("unit-test-secret");
        // 超出默认 60 秒的时钟容差
        let token = tokens
            .issue_with_expiry(7, "alice", UserRole::Student, chrono::Duration::hours(-2))
            .unwrap();
        let err = tokens.verify(&token).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(err.message(), "Token expired");
    }

    #[test]
    fn test_wrong_signature_rejected() {
        let token = service("secret-a")
            .issue_with_expiry(8, "bob", UserRole::Teacher, chrono::Duration::minutes(5))
            .unwrap();
        let err = service("secret-b").verify(&token).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn test_malformed_token_rejected() {
        let err = service("secret").verify("not-a-token").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }
}
