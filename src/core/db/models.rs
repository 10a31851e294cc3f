//! Database models for account storage
//!
//! Entity structs that map to the PostgreSQL `accounts` table. Wire casing
//! is camelCase to match the JSON contract; columns are snake_case.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================================================
// Role
// ============================================================================

/// Role assigned to an account.
///
/// Unspecified roles default to [`Role::Buyer`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "account_role", rename_all = "lowercase")]
pub enum Role {
    Admin,
    Seller,
    #[default]
    Buyer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Seller => write!(f, "seller"),
            Role::Buyer => write!(f, "buyer"),
        }
    }
}

// ============================================================================
// Address
// ============================================================================

/// Postal address attached to every account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: String,
}

// ============================================================================
// Account
// ============================================================================

/// Account entity representing a registered user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub country_code: String,
    pub mobile: String,
    #[sqlx(flatten)]
    pub address: Address,
    pub role: Role,
    pub date_of_birth: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account data for creation (without id and store-maintained timestamps).
///
/// `password_hash` must already be hashed; the repository never sees the
/// plaintext at insert time.
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub country_code: String,
    pub mobile: String,
    pub address: Address,
    pub role: Role,
    pub date_of_birth: Option<NaiveDate>,
}
