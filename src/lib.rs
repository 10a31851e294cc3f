//! Tradepost - marketplace account registration and login service
//!
//! Validates sign-up input, persists accounts with bcrypt-hashed
//! credentials, and issues signed access/refresh tokens over a small REST
//! surface. Login attempts are rate limited per client.

pub mod core;
