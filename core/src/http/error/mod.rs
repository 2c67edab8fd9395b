//! Error types shared by the authentication and authorization layers.

mod auth_error;

pub use auth_error::AuthFailure;
