//! Authentication service — signup, signin, and session resolution.

use helpdesk_core::error::{HelpdeskError, HelpdeskResult};
use helpdesk_core::models::user::{CreateUser, PublicUser, Role};
use helpdesk_core::repository::UserRepository;
use tracing::info;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;

/// Input for the signup flow.
#[derive(Debug)]
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Successful signin result.
#[derive(Debug)]
pub struct SignInOutput {
    /// Signed session token.
    pub token: String,
    /// Public record of the signed-in user (no password hash).
    pub user: PublicUser,
    /// Token lifetime in seconds.
    pub expires_in: u64,
}

/// Verified identity extracted from a session token.
#[derive(Debug, Clone)]
pub struct SessionIdentity {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl SessionIdentity {
    pub fn is_support(&self) -> bool {
        self.role == Role::Support
    }
}

/// Authentication service.
///
/// Generic over the user repository so that the auth layer has no
/// dependency on the database crate.
pub struct AuthService<U: UserRepository> {
    users: U,
    config: AuthConfig,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(users: U, config: AuthConfig) -> Self {
        Self { users, config }
    }

    /// Register a new user. The role is fixed here and immutable
    /// afterwards.
    pub async fn sign_up(&self, input: SignUpInput) -> HelpdeskResult<PublicUser> {
        if input.name.trim().is_empty() {
            return Err(HelpdeskError::validation("Name is required"));
        }
        if input.email.trim().is_empty() {
            return Err(HelpdeskError::validation("Email is required"));
        }
        if input.password.len() < self.config.min_password_length {
            return Err(HelpdeskError::validation(format!(
                "Password must be at least {} characters",
                self.config.min_password_length
            )));
        }

        // Hashing happens here so the store only ever sees the PHC
        // string. Duplicate emails are rejected by the repository
        // without touching the existing record.
        let password_hash =
            password::hash_password(&input.password, self.config.pepper.as_deref())?;

        let user = self
            .users
            .create(CreateUser {
                name: input.name,
                email: input.email,
                password_hash,
                role: input.role,
            })
            .await?;

        info!(user_id = %user.id, role = user.role.as_str(), "User registered");

        Ok(user.to_public())
    }

    /// Authenticate with email + password and issue a session token.
    pub async fn sign_in(&self, email: &str, password: &str) -> HelpdeskResult<SignInOutput> {
        let user = self.users.get_by_email(email).await?;

        let valid = password::verify_password(
            password,
            &user.password_hash,
            self.config.pepper.as_deref(),
        )?;

        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = token::issue_session_token(user.id, &user.email, user.role, &self.config)?;

        info!(user_id = %user.id, "User signed in");

        Ok(SignInOutput {
            token,
            user: user.to_public(),
            expires_in: self.config.token_lifetime_secs,
        })
    }

    /// Verify a session token (signature, expiry, issuer) and return
    /// the identity it carries. Stateless — no store lookup.
    pub fn resolve_session(&self, token: &str) -> HelpdeskResult<SessionIdentity> {
        resolve_session(token, &self.config)
    }
}

/// Standalone session resolution for request middleware that has the
/// config but not the full service.
pub fn resolve_session(token: &str, config: &AuthConfig) -> HelpdeskResult<SessionIdentity> {
    let claims = token::decode_session_token(token, config)?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|e| AuthError::TokenInvalid(format!("bad subject: {e}")))?;
    let role = Role::parse(&claims.role)
        .map_err(|e| AuthError::TokenInvalid(format!("bad role claim: {e}")))?;

    Ok(SessionIdentity {
        user_id,
        email: claims.email,
        role,
    })
}
