//! # campushub-auth
//!
//! Authentication for CampusHub.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and password-change policy
//! - `jwt`: signed session tokens
//! - `provider`: in-process [`AuthProvider`](campushub_core::traits::AuthProvider)
//! - `session`: the owned session store views read from
//! - `guard`: route gate predicates

pub mod guard;
pub mod jwt;
pub mod password;
pub mod provider;
pub mod session;

pub use guard::{Access, Route};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use provider::{MemoryAuthProvider, ResetEmail};
pub use session::{SessionSnapshot, SessionStore};
