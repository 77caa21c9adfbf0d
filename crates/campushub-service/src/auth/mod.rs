//! Sign-in, sign-up, password, and sign-out flows.

pub mod requests;
pub mod service;

pub use requests::{ChangePasswordRequest, SignInRequest, SignUpRequest};
pub use service::AuthService;
