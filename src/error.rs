//! Errors raised by the interface model.
//!
//! Only the incident angle is validated. Trigonometric results that have no
//! real value (e.g. a transmitted angle past the critical angle) are reported
//! as `None` by the accessors that produce them, not as errors.

use thiserror::Error;

/// Inputs outside the domain of the model.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DomainError {
    #[error("The incident angle must be between 0 and 90 degrees (got {degrees})")]
    AngleOutOfRange { degrees: f32 },

    #[error("Invalid angle range: start {start}, end {end}, step {step} (need 0 <= start <= end <= 90 and step >= 1)")]
    InvalidRange { start: f32, end: f32, step: f32 },
}

/// Failure to look up a medium in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediumError {
    #[error("Unknown medium: '{0}'")]
    Unknown(String),
}
