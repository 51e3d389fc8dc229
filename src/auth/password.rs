use crate::error::AppError;
use bcrypt::{hash, verify};

/// bcrypt work factor used for new password hashes.
#[derive(Debug, Clone, Copy)]
pub struct HashCost(pub u32);

pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
}
