use std::collections::HashMap;
use std::sync::Mutex;

use tracing::{debug, warn};
use uuid::Uuid;

use super::password::{hash_password, verify_password, MIN_PASSWORD_LENGTH};
use super::session::{Session, SignupRequest, UserId, UserProfile};
use super::token::TokenSigner;

/// Account registry and credential authority consulted on every protected call.
pub trait IdentityProvider: Send + Sync {
    fn signup(&self, request: SignupRequest) -> Result<UserProfile, IdentityError>;
    fn login(&self, email: &str, password: &str) -> Result<Session, IdentityError>;
    fn verify(&self, access_token: &str) -> Result<Session, IdentityError>;
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Email, password, and name are required")]
    MissingFields,
    #[error("password must be at least {0} characters long")]
    WeakPassword(usize),
    #[error("an account with this email already exists")]
    DuplicateEmail,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("no token provided")]
    MissingToken,
    #[error("invalid token")]
    InvalidToken,
    #[error("identity backend unavailable: {0}")]
    Unavailable(String),
}

struct StoredAccount {
    profile: UserProfile,
    password_hash: String,
}

/// In-process identity provider: Argon2id credentials and signed bearer tokens.
pub struct LocalIdentityProvider {
    accounts: Mutex<HashMap<String, StoredAccount>>,
    signer: TokenSigner,
}

impl LocalIdentityProvider {
    pub fn new(signer: TokenSigner) -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            signer,
        }
    }

    fn accounts(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, StoredAccount>>, IdentityError> {
        self.accounts
            .lock()
            .map_err(|_| IdentityError::Unavailable("account registry lock poisoned".to_string()))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

impl IdentityProvider for LocalIdentityProvider {
    fn signup(&self, request: SignupRequest) -> Result<UserProfile, IdentityError> {
        let email = normalize_email(&request.email);
        let name = request.name.trim();
        if email.is_empty() || request.password.is_empty() || name.is_empty() {
            return Err(IdentityError::MissingFields);
        }
        if request.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(IdentityError::WeakPassword(MIN_PASSWORD_LENGTH));
        }

        let password_hash = hash_password(&request.password)
            .map_err(|err| IdentityError::Unavailable(err.to_string()))?;

        let mut accounts = self.accounts()?;
        if accounts.contains_key(&email) {
            return Err(IdentityError::DuplicateEmail);
        }

        let profile = UserProfile {
            id: UserId(Uuid::new_v4().to_string()),
            email: email.clone(),
            name: name.to_string(),
        };
        accounts.insert(
            email,
            StoredAccount {
                profile: profile.clone(),
                password_hash,
            },
        );
        debug!(user_id = %profile.id, "account registered");
        Ok(profile)
    }

    fn login(&self, email: &str, password: &str) -> Result<Session, IdentityError> {
        let email = normalize_email(email);
        let (profile, password_hash) = {
            let accounts = self.accounts()?;
            let account = accounts
                .get(&email)
                .ok_or(IdentityError::InvalidCredentials)?;
            (account.profile.clone(), account.password_hash.clone())
        };

        match verify_password(password, &password_hash) {
            Ok(true) => {}
            Ok(false) => return Err(IdentityError::InvalidCredentials),
            Err(err) => {
                warn!(user_id = %profile.id, error = %err, "stored password hash unreadable");
                return Err(IdentityError::InvalidCredentials);
            }
        }

        let access_token = self
            .signer
            .issue(&profile)
            .map_err(|err| IdentityError::Unavailable(err.to_string()))?;

        Ok(Session {
            user: profile,
            access_token,
        })
    }

    fn verify(&self, access_token: &str) -> Result<Session, IdentityError> {
        let access_token = access_token.trim();
        if access_token.is_empty() {
            return Err(IdentityError::MissingToken);
        }

        let claims = self.signer.verify(access_token).map_err(|err| {
            debug!(error = %err, "token verification failed");
            IdentityError::InvalidToken
        })?;

        let mut user = claims.profile();
        if user.name.trim().is_empty() {
            user.name = "User".to_string();
        }

        Ok(Session {
            user,
            access_token: access_token.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> LocalIdentityProvider {
        LocalIdentityProvider::new(TokenSigner::new("identity-test-secret", 15))
    }

    fn signup(email: &str, password: &str, name: &str) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn signup_requires_every_field() {
        let provider = provider();
        match provider.signup(signup("ana@example.com", "", "Ana")) {
            Err(IdentityError::MissingFields) => {}
            other => panic!("expected missing fields, got {other:?}"),
        }
        match provider.signup(signup("ana@example.com", "secret1", "  ")) {
            Err(IdentityError::MissingFields) => {}
            other => panic!("expected missing fields, got {other:?}"),
        }
    }

    #[test]
    fn signup_rejects_short_passwords_and_duplicates() {
        let provider = provider();
        assert!(matches!(
            provider.signup(signup("ana@example.com", "abc", "Ana")),
            Err(IdentityError::WeakPassword(6))
        ));

        provider
            .signup(signup("ana@example.com", "secret1", "Ana"))
            .expect("first signup succeeds");
        assert!(matches!(
            provider.signup(signup("ANA@example.com ", "secret2", "Ana B")),
            Err(IdentityError::DuplicateEmail)
        ));
    }

    #[test]
    fn login_issues_verifiable_sessions() {
        let provider = provider();
        let profile = provider
            .signup(signup("Ana@Example.com", "secret1", "Ana"))
            .expect("signup succeeds");

        let session = provider
            .login("ana@example.com", "secret1")
            .expect("login succeeds");
        assert_eq!(session.user, profile);

        let verified = provider
            .verify(&session.access_token)
            .expect("token verifies");
        assert_eq!(verified.user_id(), &profile.id);
        assert_eq!(verified.display_name(), "Ana");
    }

    #[test]
    fn login_failures_are_indistinguishable() {
        let provider = provider();
        provider
            .signup(signup("ana@example.com", "secret1", "Ana"))
            .expect("signup succeeds");

        assert!(matches!(
            provider.login("ana@example.com", "wrong-password"),
            Err(IdentityError::InvalidCredentials)
        ));
        assert!(matches!(
            provider.login("nobody@example.com", "secret1"),
            Err(IdentityError::InvalidCredentials)
        ));
    }

    #[test]
    fn verify_rejects_missing_and_forged_tokens() {
        let provider = provider();
        assert!(matches!(
            provider.verify("  "),
            Err(IdentityError::MissingToken)
        ));
        assert!(matches!(
            provider.verify("not.a.token"),
            Err(IdentityError::InvalidToken)
        ));
    }
}
