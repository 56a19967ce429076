//! Reflection, refraction and Fresnel reflectance of a light ray at a planar
//! interface between two optical media.

pub mod error;
pub mod fresnel;
pub mod medium;
pub mod optics;
pub mod output;
pub mod powers;
pub mod settings;
pub mod snell;
pub mod sweep;

pub use error::{DomainError, MediumError};
pub use fresnel::Polarization;
pub use medium::Medium;
pub use optics::{OpticsModel, Ray, Rays};
pub use powers::Powers;
