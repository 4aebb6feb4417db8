//! Accounts, credentials, and the explicit [`Session`] threaded through every store call.

mod extract;
pub mod password;
pub mod provider;
pub mod router;
pub mod session;
pub mod token;

pub use extract::{AuthSession, IdentityHandle};
pub use provider::{IdentityError, IdentityProvider, LocalIdentityProvider};
pub use router::identity_router;
pub use session::{LoginRequest, Session, SignupRequest, UserId, UserProfile};
pub use token::{AccessClaims, TokenSigner};
