use sqlx::PgConnection;

use crate::auth::{hash_password, verify_password, Identity, TokenService, UNMATCHABLE_DIGEST};
use crate::database::models::{User, UserProfile};
use crate::database::{Database, DatabaseError};
use crate::error::ApiError;
use crate::validation::{LoginRequest, RegisterRequest};

const USERNAME_TAKEN: &str = "Username already taken";

/// Registration, login and identity lookup
#[derive(Clone)]
pub struct UserService {
    db: Database,
    tokens: TokenService,
}

impl UserService {
    pub fn new(db: Database, tokens: TokenService) -> Self {
        Self { db, tokens }
    }

    pub async fn register(&self, req: RegisterRequest) -> Result<UserProfile, ApiError> {
        let mut conn = self.db.acquire().await?;
        if find_by_username(&mut conn, &req.username).await?.is_some() {
            return Err(ApiError::conflict(USERNAME_TAKEN));
        }
        drop(conn);

        let digest = hash_password(req.password).await?;
        let mut conn = self.db.acquire().await?;
        // A concurrent registration can still win the race to the unique index.
        let user = match insert_user(&mut conn, &req.username, &digest).await {
            Ok(user) => user,
            Err(DatabaseError::UniqueViolation(_)) => return Err(ApiError::conflict(USERNAME_TAKEN)),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(user_id = %user.id, "User registered: {}", user.username);
        Ok(user.into())
    }

    /// Verify credentials and issue a bearer token.
    pub async fn login(&self, req: LoginRequest) -> Result<String, ApiError> {
        let mut conn = self.db.acquire().await?;
        let found = find_by_username(&mut conn, &req.username).await?;
        drop(conn);

        // Unknown usernames still pay for one full verification
        let Some(user) = found else {
            verify_password(req.password, UNMATCHABLE_DIGEST.to_string()).await?;
            tracing::debug!("Login failed: unknown user {}", req.username);
            return Err(ApiError::invalid_credentials());
        };

        if !verify_password(req.password, user.password_hash.clone()).await? {
            tracing::debug!(user_id = %user.id, "Login failed: wrong password");
            return Err(ApiError::invalid_credentials());
        }

        let identity = Identity {
            user_id: user.id,
            username: user.username,
        };
        self.tokens.issue(&identity).map_err(|e| {
            tracing::error!("{}", e);
            ApiError::internal_error("Something went wrong")
        })
    }

    /// Current profile of the token's subject. A token outliving its user
    /// counts as unauthenticated.
    pub async fn profile(&self, identity: &Identity) -> Result<UserProfile, ApiError> {
        let mut conn = self.db.acquire().await?;
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(identity.user_id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(DatabaseError::from)?;

        user.map(UserProfile::from).ok_or_else(ApiError::unauthenticated)
    }
}

/// Replace any user named `username` with a fresh account. Used to bootstrap
/// an admin login; the old account's data is removed with it.
pub async fn seed_user(db: &Database, username: &str, password: &str) -> Result<UserProfile, ApiError> {
    let digest = hash_password(password.to_string()).await?;
    let username = username.to_string();

    let user = db
        .unit_of_work(move |conn| {
            Box::pin(async move {
                sqlx::query("DELETE FROM users WHERE username = $1")
                    .bind(&username)
                    .execute(&mut *conn)
                    .await
                    .map_err(DatabaseError::from)?;
                let user = insert_user(conn, &username, &digest).await?;
                Ok::<_, DatabaseError>(user)
            })
        })
        .await?;

    tracing::info!(user_id = %user.id, "Seeded user {}", user.username);
    Ok(user.into())
}

async fn find_by_username(conn: &mut PgConnection, username: &str) -> Result<Option<User>, DatabaseError> {
    Ok(sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(conn)
        .await?)
}

async fn insert_user(conn: &mut PgConnection, username: &str, digest: &str) -> Result<User, DatabaseError> {
    Ok(sqlx::query_as::<_, User>(
        "INSERT INTO users (username, password_hash) VALUES ($1, $2) RETURNING *",
    )
    .bind(username)
    .bind(digest)
    .fetch_one(conn)
    .await?)
}

