//! Authentication and password hashing.
//!
//! Passwords are stored as Argon2id PHC strings; the token endpoint verifies
//! them before issuing a JWT.

mod password;

pub use password::{PasswordError, hash_password, verify_password};
