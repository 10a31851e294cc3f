//! Account repository for database operations
//!
//! Lookup, duplicate detection, and insertion for account records, with
//! bcrypt password hashing.

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::db::models::{Account, CreateAccount};

/// Cost factor for bcrypt hashing
const BCRYPT_COST: u32 = 10;

/// Account repository error types
#[derive(Debug, thiserror::Error)]
pub enum AccountRepositoryError {
    #[error("Account with this email or mobile already exists")]
    Duplicate,

    #[error("Password hashing failed: {0}")]
    HashingError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Account repository for database operations
#[derive(Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new account repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Hash a password using bcrypt with automatic salt generation
    pub fn hash_password(password: &str) -> Result<String, AccountRepositoryError> {
        bcrypt::hash(password, BCRYPT_COST)
            .map_err(|e| AccountRepositoryError::HashingError(e.to_string()))
    }

    /// Verify a password against a bcrypt hash
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, AccountRepositoryError> {
        bcrypt::verify(password, hash)
            .map_err(|e| AccountRepositoryError::HashingError(e.to_string()))
    }

    /// Find an account by exact email match
    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, name, email, password_hash, country_code, mobile,
                   street, city, state, country, zip_code,
                   role, date_of_birth, created_at, updated_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Find an account colliding with the given email or (country_code, mobile)
    /// pair.
    ///
    /// Advisory pre-insert check; the unique indexes are the actual guarantee
    /// under concurrent registration.
    pub async fn find_duplicate(
        &self,
        email: &str,
        country_code: &str,
        mobile: &str,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, name, email, password_hash, country_code, mobile,
                   street, city, state, country, zip_code,
                   role, date_of_birth, created_at, updated_at
            FROM accounts
            WHERE email = $1 OR (country_code = $2 AND mobile = $3)
            "#,
        )
        .bind(email)
        .bind(country_code)
        .bind(mobile)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Insert a new account.
    ///
    /// A unique-index violation (email or country_code+mobile raced past the
    /// advisory check) is reported as [`AccountRepositoryError::Duplicate`].
    pub async fn create(&self, dto: &CreateAccount) -> Result<Account, AccountRepositoryError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts
                (name, email, password_hash, country_code, mobile,
                 street, city, state, country, zip_code, role, date_of_birth)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id, name, email, password_hash, country_code, mobile,
                      street, city, state, country, zip_code,
                      role, date_of_birth, created_at, updated_at
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&dto.password_hash)
        .bind(&dto.country_code)
        .bind(&dto.mobile)
        .bind(&dto.address.street)
        .bind(&dto.address.city)
        .bind(&dto.address.state)
        .bind(&dto.address.country)
        .bind(&dto.address.zip_code)
        .bind(dto.role)
        .bind(dto.date_of_birth)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AccountRepositoryError::Duplicate
            }
            _ => AccountRepositoryError::DatabaseError(err),
        })?;

        Ok(account)
    }

    /// Delete an account by ID
    pub async fn delete(&self, id: Uuid) -> Result<bool, AccountRepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::db::models::{Address, Role};

    // ========================================================================
    // Password Hashing Tests (don't require database)
    // ========================================================================

    #[test]
    fn test_hash_password_produces_valid_bcrypt_hash() {
        let password = "Abc123!";
        let hash = AccountRepository::hash_password(password).unwrap();

        // Bcrypt hashes start with $2b$ (or $2a$, $2y$)
        assert!(hash.starts_with("$2b$") || hash.starts_with("$2a$") || hash.starts_with("$2y$"));

        // Bcrypt hash should be 60 characters
        assert_eq!(hash.len(), 60);
    }

    #[test]
    fn test_hash_password_never_equals_plaintext() {
        let password = "Abc123!";
        let hash = AccountRepository::hash_password(password).unwrap();

        assert_ne!(hash, password);
        assert!(AccountRepository::verify_password(password, &hash).unwrap());
    }

    #[test]
    fn test_hash_password_produces_different_hashes_for_same_password() {
        let password = "Same$Password1";
        let hash1 = AccountRepository::hash_password(password).unwrap();
        let hash2 = AccountRepository::hash_password(password).unwrap();

        // Due to random salt, hashes should be different
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = AccountRepository::hash_password("Correct#1a").unwrap();

        let is_valid = AccountRepository::verify_password("Wrong#1a", &hash).unwrap();
        assert!(!is_valid);
    }

    #[test]
    fn test_verify_password_invalid_hash_format() {
        let result = AccountRepository::verify_password("password", "not_a_valid_hash");
        assert!(result.is_err());
    }

    #[test]
    fn test_hash_password_symbol_set() {
        let password = "Aa1@$!%*?&#";
        let hash = AccountRepository::hash_password(password).unwrap();

        assert!(AccountRepository::verify_password(password, &hash).unwrap());
    }

    // ========================================================================
    // Error Type Tests
    // ========================================================================

    #[test]
    fn test_account_repository_error_display() {
        let err = AccountRepositoryError::Duplicate;
        assert_eq!(
            format!("{}", err),
            "Account with this email or mobile already exists"
        );

        let err = AccountRepositoryError::HashingError("test error".to_string());
        assert!(format!("{}", err).contains("test error"));
    }

    // ========================================================================
    // Integration Tests (require database)
    // ========================================================================

    fn test_create_dto(email: &str, mobile: &str) -> CreateAccount {
        CreateAccount {
            name: "Test Account".to_string(),
            email: email.to_string(),
            password_hash: AccountRepository::hash_password("Abc123!").unwrap(),
            country_code: "+91".to_string(),
            mobile: mobile.to_string(),
            address: Address {
                street: "12 Harbour Lane".to_string(),
                city: "Porttown".to_string(),
                state: "Coastal".to_string(),
                country: "Atlantis".to_string(),
                zip_code: "400001".to_string(),
            },
            role: Role::default(),
            date_of_birth: None,
        }
    }

    fn unique_suffix() -> String {
        Uuid::new_v4().simple().to_string()[..8].to_string()
    }

    fn unique_mobile() -> String {
        format!("{:010}", Uuid::new_v4().as_u128() % 10_000_000_000)
    }

    async fn create_test_pool() -> PgPool {
        use crate::core::db::pool::{DbConfig, create_pool};

        let config = DbConfig::from_env().expect("DATABASE_URL must be set for tests");
        create_pool(&config)
            .await
            .expect("Failed to create test pool")
    }

    #[tokio::test]
    #[ignore = "requires running PostgreSQL database"]
    async fn test_create_account() {
        let pool = create_test_pool().await;
        let repo = AccountRepository::new(pool);

        let email = format!("create_{}@example.com", unique_suffix());
        let account = repo
            .create(&test_create_dto(&email, &unique_mobile()))
            .await
            .unwrap();

        assert_eq!(account.email, email);
        assert_eq!(account.role, Role::Buyer);
        // Stored hash, never plaintext
        assert_ne!(account.password_hash, "Abc123!");
        assert!(account.password_hash.starts_with("$2"));

        // Cleanup
        repo.delete(account.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires running PostgreSQL database"]
    async fn test_create_account_duplicate_email_hits_unique_index() {
        let pool = create_test_pool().await;
        let repo = AccountRepository::new(pool);

        let email = format!("dup_{}@example.com", unique_suffix());
        let account = repo
            .create(&test_create_dto(&email, &unique_mobile()))
            .await
            .unwrap();

        // Same email, different mobile: insert bypasses the advisory check
        // and must still fail on the unique index.
        let result = repo.create(&test_create_dto(&email, &unique_mobile())).await;
        assert!(matches!(result, Err(AccountRepositoryError::Duplicate)));

        // Cleanup
        repo.delete(account.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires running PostgreSQL database"]
    async fn test_create_account_duplicate_mobile_hits_unique_index() {
        let pool = create_test_pool().await;
        let repo = AccountRepository::new(pool);

        let mobile = unique_mobile();
        let account = repo
            .create(&test_create_dto(
                &format!("mob1_{}@example.com", unique_suffix()),
                &mobile,
            ))
            .await
            .unwrap();

        let result = repo
            .create(&test_create_dto(
                &format!("mob2_{}@example.com", unique_suffix()),
                &mobile,
            ))
            .await;
        assert!(matches!(result, Err(AccountRepositoryError::Duplicate)));

        // Cleanup
        repo.delete(account.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires running PostgreSQL database"]
    async fn test_find_by_email() {
        let pool = create_test_pool().await;
        let repo = AccountRepository::new(pool);

        let email = format!("find_{}@example.com", unique_suffix());
        let created = repo
            .create(&test_create_dto(&email, &unique_mobile()))
            .await
            .unwrap();

        let found = repo.find_by_email(&email).await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().id, created.id);

        let missing = repo
            .find_by_email("nonexistent@example.com")
            .await
            .unwrap();
        assert!(missing.is_none());

        // Cleanup
        repo.delete(created.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires running PostgreSQL database"]
    async fn test_find_duplicate_matches_either_key() {
        let pool = create_test_pool().await;
        let repo = AccountRepository::new(pool);

        let email = format!("either_{}@example.com", unique_suffix());
        let mobile = unique_mobile();
        let created = repo.create(&test_create_dto(&email, &mobile)).await.unwrap();

        // Match on email alone
        let by_email = repo
            .find_duplicate(&email, "+00", &unique_mobile())
            .await
            .unwrap();
        assert!(by_email.is_some());

        // Match on (country_code, mobile) alone
        let by_mobile = repo
            .find_duplicate("other@example.com", "+91", &mobile)
            .await
            .unwrap();
        assert!(by_mobile.is_some());

        // No match
        let neither = repo
            .find_duplicate("other@example.com", "+00", &unique_mobile())
            .await
            .unwrap();
        assert!(neither.is_none());

        // Cleanup
        repo.delete(created.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires running PostgreSQL database"]
    async fn test_delete_nonexistent_account() {
        let pool = create_test_pool().await;
        let repo = AccountRepository::new(pool);

        let deleted = repo.delete(Uuid::new_v4()).await.unwrap();
        assert!(!deleted);
    }
}
