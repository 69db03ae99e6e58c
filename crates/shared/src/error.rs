//! Error types for SalonSuite

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SalonError {
    #[error("Invalid slug: {0}")]
    InvalidSlug(String),
}
