//! Error types for access control

/// Errors raised by role parsing, permission resolution and staff validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// Role id is not in the role table
    ///
    /// Surfaced to the admin instead of falling back to an empty or viewer
    /// permission set.
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// Staff status id is not recognised
    #[error("unknown staff status: {0}")]
    UnknownStatus(String),

    /// Staff record is missing required fields
    #[error("invalid staff member: {0}")]
    InvalidStaff(String),
}

impl AccessError {
    /// Whether retrying the same call could succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Whether the error points at a misconfigured role assignment
    #[inline]
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::UnknownRole(_))
    }
}
