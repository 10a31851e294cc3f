//! Registration and login flows
//!
//! `RegistrationService` validates a sign-up request, checks uniqueness,
//! hashes the password, persists the account, and issues an access token.
//! `AuthenticationService` rate-limits, verifies credentials, and issues an
//! access + refresh token pair. Both own their collaborators explicitly;
//! nothing here is process-global.

use std::sync::Arc;

use crate::core::auth::jwt::{JwtError, JwtService, TokenPair};
use crate::core::auth::rate_limiter::LoginRateLimiter;
use crate::core::db::models::{Address, CreateAccount, Role};
use crate::core::db::repositories::{AccountRepository, AccountRepositoryError};
use crate::core::validation::{self, FieldError};
use chrono::NaiveDate;

/// Authentication error taxonomy
///
/// Display strings are the caller-visible messages; anything internal stays
/// in the variant payload and is logged, never returned.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("User with this email or mobile already exists")]
    DuplicateAccount,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Too many login attempts, please try again later.")]
    RateLimited,

    #[error("Server error")]
    Internal(String),
}

impl From<AccountRepositoryError> for AuthError {
    fn from(err: AccountRepositoryError) -> Self {
        match err {
            AccountRepositoryError::Duplicate => AuthError::DuplicateAccount,
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

/// Registration request data
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub country_code: String,
    pub mobile: String,
    pub address: Address,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
}

/// Login request data
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful registration response
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub access_token: String,
}

/// Registration flow
#[derive(Clone)]
pub struct RegistrationService {
    accounts: AccountRepository,
    tokens: JwtService,
}

impl RegistrationService {
    /// Create a new registration service
    pub fn new(accounts: AccountRepository, tokens: JwtService) -> Self {
        Self { accounts, tokens }
    }

    /// Register a new account and issue its first access token.
    ///
    /// Validation runs before any store access. The duplicate lookup is
    /// advisory; a unique-index violation at insert time is mapped to the
    /// same [`AuthError::DuplicateAccount`] without revealing which field
    /// collided.
    pub async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse, AuthError> {
        validation::validate_registration(&request).map_err(AuthError::Validation)?;

        // Email syntax is re-checked independently of the rule list
        if !validation::is_valid_email(&request.email) {
            return Err(AuthError::InvalidEmailFormat);
        }

        if self
            .accounts
            .find_duplicate(&request.email, &request.country_code, &request.mobile)
            .await?
            .is_some()
        {
            return Err(AuthError::DuplicateAccount);
        }

        // Hash exactly once, immediately before persistence
        let password_hash = AccountRepository::hash_password(&request.password)?;

        let account = self
            .accounts
            .create(&CreateAccount {
                name: request.name,
                email: request.email,
                password_hash,
                country_code: request.country_code,
                mobile: request.mobile,
                address: request.address,
                role: request.role.unwrap_or_default(),
                date_of_birth: request.date_of_birth,
            })
            .await?;

        let access_token = self.tokens.issue_access_token(account.id, account.role)?;

        Ok(RegisterResponse { access_token })
    }
}

/// Login flow
#[derive(Clone)]
pub struct AuthenticationService {
    accounts: AccountRepository,
    tokens: JwtService,
    limiter: Arc<LoginRateLimiter>,
}

impl AuthenticationService {
    /// Create a new authentication service
    pub fn new(
        accounts: AccountRepository,
        tokens: JwtService,
        limiter: Arc<LoginRateLimiter>,
    ) -> Self {
        Self {
            accounts,
            tokens,
            limiter,
        }
    }

    /// Authenticate an account and issue an access + refresh token pair.
    ///
    /// The rate limit gates everything else, so a flooding client never
    /// reaches validation or the store. A missing account and a wrong
    /// password produce the same error, so callers cannot probe for
    /// registered emails.
    pub async fn login(
        &self,
        request: LoginRequest,
        client_key: &str,
    ) -> Result<TokenPair, AuthError> {
        if !self.limiter.check_and_count(client_key) {
            return Err(AuthError::RateLimited);
        }

        validation::validate_login(&request).map_err(AuthError::Validation)?;

        if !validation::is_valid_email(&request.email) {
            return Err(AuthError::InvalidEmailFormat);
        }

        let Some(account) = self.accounts.find_by_email(&request.email).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        if !AccountRepository::verify_password(&request.password, &account.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(self.tokens.issue_token_pair(account.id, account.role)?)
    }
}
