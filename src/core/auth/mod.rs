//! Authentication module
//!
//! This module provides the credential-handling core:
//! - Field validation driven registration and credential login
//! - bcrypt password hashing and verification via the account repository
//! - JWT access/refresh token issuance
//! - Per-client login rate limiting
//! - REST API endpoints for auth operations

pub mod api;
pub mod jwt;
pub mod rate_limiter;
pub mod service;

pub use api::{ApiState, auth_router};
pub use jwt::{Claims, JwtConfig, JwtError, JwtService, TokenPair};
pub use rate_limiter::LoginRateLimiter;
pub use service::{
    AuthError, AuthenticationService, LoginRequest, RegisterRequest, RegisterResponse,
    RegistrationService,
};
