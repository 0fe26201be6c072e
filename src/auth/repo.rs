use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database. Contact fields never reach clients; the
/// public projection lives in `dto::PublicUser`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: String,
    pub created_at: OffsetDateTime,
}

/// User joined with its password credential, for login.
#[derive(Debug, Clone, FromRow)]
pub struct UserWithHash {
    #[sqlx(flatten)]
    pub user: User,
    pub hash: Option<String>,
}

pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: Option<&'a str>,
    pub phone_number: Option<&'a str>,
    pub full_name: Option<&'a str>,
    pub avatar_url: &'a str,
}

impl User {
    /// Create a user together with its password credential in one transaction.
    pub async fn create_with_password(
        db: &PgPool,
        new: NewUser<'_>,
        password_hash: &str,
    ) -> anyhow::Result<User> {
        let mut tx = db.begin().await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, phone_number, full_name, avatar_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, phone_number, full_name, avatar_url, created_at
            "#,
        )
        .bind(new.username)
        .bind(new.email)
        .bind(new.phone_number)
        .bind(new.full_name)
        .bind(new.avatar_url)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO passwords (user_id, hash)
            VALUES ($1, $2)
            "#,
        )
        .bind(user.id)
        .bind(password_hash)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(user)
    }

    /// Find a user by username, including the stored password hash if any.
    pub async fn find_by_username_with_hash(
        db: &PgPool,
        username: &str,
    ) -> anyhow::Result<Option<UserWithHash>> {
        let row = sqlx::query_as::<_, UserWithHash>(
            r#"
            SELECT u.id, u.username, u.email, u.phone_number, u.full_name,
                   u.avatar_url, u.created_at, p.hash
            FROM users u
            LEFT JOIN passwords p ON p.user_id = u.id
            WHERE u.username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    /// Find a user by id.
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, phone_number, full_name, avatar_url, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }
}
