//! Catalog of optical media and their refractive indices.
//!
//! The values are the nominal refractive indices in the visible range and are
//! used to populate the incident and transmitted sides of an interface.

use std::fmt;
use std::str::FromStr;

use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::MediumError;

/// A named optical medium with a fixed refractive index.
#[pyclass(eq, eq_int)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Medium {
    Vacuum,
    Air,
    Ice,
    Water,
    Glass,
    Sapphire,
    Diamond,
}

impl Medium {
    /// Every medium in the catalog, in order of increasing refractive index.
    pub const ALL: [Medium; 7] = [
        Medium::Vacuum,
        Medium::Air,
        Medium::Ice,
        Medium::Water,
        Medium::Glass,
        Medium::Sapphire,
        Medium::Diamond,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Medium::Vacuum => "Vacuum",
            Medium::Air => "Air",
            Medium::Ice => "Ice",
            Medium::Water => "Water",
            Medium::Glass => "Glass",
            Medium::Sapphire => "Sapphire",
            Medium::Diamond => "Diamond",
        }
    }

    /// Refractive index (speed of light in vacuum / speed of light in the medium).
    pub fn index(&self) -> f32 {
        match self {
            Medium::Vacuum => 1.00,
            Medium::Air => 1.00,
            Medium::Ice => 1.31,
            Medium::Water => 1.33,
            Medium::Glass => 1.52,
            Medium::Sapphire => 1.77,
            Medium::Diamond => 2.42,
        }
    }
}

#[pymethods]
impl Medium {
    #[getter(name)]
    fn py_name(&self) -> &'static str {
        self.name()
    }

    #[getter(index)]
    fn py_index(&self) -> f32 {
        self.index()
    }
}

impl FromStr for Medium {
    type Err = MediumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Medium::ALL
            .iter()
            .find(|medium| medium.name().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| MediumError::Unknown(s.to_string()))
    }
}

impl fmt::Display for Medium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
