use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Well-formed Argon2id digest, using the default cost parameters, that no
/// password matches. Verifying against it costs the same as a real check.
pub const UNMATCHABLE_DIGEST: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Produce a salted Argon2id digest in PHC string form.
///
/// Runs on the blocking pool; hashing is deliberately slow.
pub async fn hash_password(password: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_blocking(&password)).await?
}

/// Check a password against a stored digest. A malformed digest never matches.
pub async fn verify_password(password: String, digest: String) -> Result<bool, PasswordError> {
    let matches = tokio::task::spawn_blocking(move || verify_blocking(&password, &digest)).await?;
    Ok(matches)
}

fn hash_blocking(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

fn verify_blocking(password: &str, digest: &str) -> bool {
    match PasswordHash::new(digest) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Stored password digest is malformed: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify() {
        let digest = hash_password("secret1".to_string()).await.unwrap();
        assert!(digest.starts_with("$argon2"));
        assert!(verify_password("secret1".to_string(), digest.clone()).await.unwrap());
        assert!(!verify_password("secret2".to_string(), digest).await.unwrap());
    }

    #[tokio::test]
    async fn digests_are_salted() {
        let a = hash_password("same".to_string()).await.unwrap();
        let b = hash_password("same".to_string()).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn unmatchable_digest_costs_a_full_verification() {
        let parsed = PasswordHash::new(UNMATCHABLE_DIGEST).unwrap();
        let params = argon2::Params::try_from(&parsed).unwrap();
        let defaults = argon2::Params::default();
        assert_eq!(parsed.algorithm, argon2::Algorithm::Argon2id.ident());
        assert_eq!(params.m_cost(), defaults.m_cost());
        assert_eq!(params.t_cost(), defaults.t_cost());
        assert_eq!(params.p_cost(), defaults.p_cost());

        for guess in ["", "admin", "secret1"] {
            assert!(!verify_password(guess.to_string(), UNMATCHABLE_DIGEST.to_string()).await.unwrap());
        }
    }

    #[tokio::test]
    async fn malformed_digest_never_matches() {
        assert!(!verify_password("secret1".to_string(), "plaintext".to_string()).await.unwrap());
    }
}
