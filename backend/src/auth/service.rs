//! Core business logic for the authentication system.

use crate::auth::models::{LoginRequest, RegisterRequest};
use crate::database::models::{CreateUser, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserRepository;
use crate::utils::jwt::TokenService;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Adaptive hash cost factor for stored passwords.
const HASH_COST: u32 = 8;

/// Authentication service orchestrating the credential store and the token
/// service.
pub struct AuthService<'a> {
    pool: &'a SqlitePool,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    pub fn new(pool: &'a SqlitePool, tokens: &'a TokenService) -> Self {
        AuthService { pool, tokens }
    }

    /// Registers a new user and issues a token bound to the new identity.
    ///
    /// Only the *absence* of a field is rejected here; empty strings pass.
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<(User, String)> {
        let RegisterRequest {
            username: Some(username),
            email: Some(email),
            password: Some(password),
            name: Some(name),
        } = request
        else {
            return Err(ServiceError::validation("All fields are required."));
        };

        let repo = UserRepository::new(self.pool);

        if repo.get_user_by_email(&email).await?.is_some() {
            return Err(ServiceError::DuplicateEmail);
        }

        let password_hash = Self::hash_password(&password)?;

        let user = repo
            .create_user(CreateUser {
                id: Uuid::now_v7().to_string(),
                username,
                email,
                password_hash,
                name,
            })
            .await?;

        let token = self.tokens.issue(&user.id)?;
        tracing::info!(user_id = %user.id, "user registered");

        Ok((user, token))
    }

    /// Authenticates a user by email and password and issues a token.
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<(User, String)> {
        let repo = UserRepository::new(self.pool);

        let user = repo
            .get_user_by_email(&request.email)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))?;

        if !user.is_active {
            return Err(ServiceError::forbidden("Account is inactive"));
        }

        if !Self::verify_password(&request.password, &user.password_hash)? {
            return Err(ServiceError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user.id)?;
        tracing::info!(user_id = %user.id, "user logged in");

        Ok((user, token))
    }

    /// Hashes a password before it is stored. Plaintext is never persisted.
    fn hash_password(password: &str) -> ServiceResult<String> {
        bcrypt::hash(password, HASH_COST)
            .map_err(|e| ServiceError::internal(format!("Password hashing failed: {}", e)))
    }

    /// Verifies a password against the stored hash.
    fn verify_password(password: &str, hash: &str) -> ServiceResult<bool> {
        bcrypt::verify(password, hash)
            .map_err(|e| ServiceError::internal(format!("Password verification failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::memory_pool;

    fn tokens() -> TokenService {
        TokenService::with_secret("test-secret", 86400)
    }

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            username: Some("a".to_string()),
            email: Some("a@x.com".to_string()),
            password: Some("p".to_string()),
            name: Some("A".to_string()),
        }
    }

    #[tokio::test]
    async fn register_rejects_missing_fields_without_persisting() {
        let pool = memory_pool().await;
        let tokens = tokens();
        let service = AuthService::new(&pool, &tokens);

        let request = RegisterRequest {
            password: None,
            ..register_request()
        };

        let err = service.register(request).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));

        let repo = UserRepository::new(&pool);
        assert!(repo.get_user_by_email("a@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn register_accepts_empty_string_fields() {
        let pool = memory_pool().await;
        let tokens = tokens();
        let service = AuthService::new(&pool, &tokens);

        let request = RegisterRequest {
            username: Some(String::new()),
            ..register_request()
        };

        let (user, _) = service.register(request).await.unwrap();
        assert_eq!(user.username, "");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_second_time_only() {
        let pool = memory_pool().await;
        let tokens = tokens();
        let service = AuthService::new(&pool, &tokens);

        let (first, _) = service.register(register_request()).await.unwrap();

        let err = service.register(register_request()).await.unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateEmail));

        // First registration unaffected.
        let repo = UserRepository::new(&pool);
        let stored = repo.get_user_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(stored.id, first.id);
    }

    #[tokio::test]
    async fn registered_user_can_log_in_and_token_verifies() {
        let pool = memory_pool().await;
        let tokens = tokens();
        let service = AuthService::new(&pool, &tokens);

        let (registered, _) = service.register(register_request()).await.unwrap();
        assert_ne!(registered.password_hash, "p");

        let (user, token) = service
            .login(LoginRequest {
                email: "a@x.com".to_string(),
                password: "p".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.id, registered.id);
        assert_eq!(tokens.verify(&token).unwrap().user_id(), registered.id);
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let pool = memory_pool().await;
        let tokens = tokens();
        let service = AuthService::new(&pool, &tokens);

        service.register(register_request()).await.unwrap();

        let err = service
            .login(LoginRequest {
                email: "a@x.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidCredentials));
    }

    #[tokio::test]
    async fn unknown_email_is_not_found() {
        let pool = memory_pool().await;
        let tokens = tokens();
        let service = AuthService::new(&pool, &tokens);

        let err = service
            .login(LoginRequest {
                email: "nobody@x.com".to_string(),
                password: "p".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn email_lookup_is_case_sensitive() {
        let pool = memory_pool().await;
        let tokens = tokens();
        let service = AuthService::new(&pool, &tokens);

        service.register(register_request()).await.unwrap();

        let err = service
            .login(LoginRequest {
                email: "A@X.COM".to_string(),
                password: "p".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn inactive_account_is_forbidden() {
        let pool = memory_pool().await;
        let tokens = tokens();
        let service = AuthService::new(&pool, &tokens);

        let (user, _) = service.register(register_request()).await.unwrap();

        sqlx::query("UPDATE users SET is_active = 0 WHERE id = ?")
            .bind(&user.id)
            .execute(&pool)
            .await
            .unwrap();

        let err = service
            .login(LoginRequest {
                email: "a@x.com".to_string(),
                password: "p".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Forbidden { .. }));
    }
}
