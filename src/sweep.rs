//! Sweeping the incident angle through a range, as an animation would.
//!
//! The angle advances by `step` degrees from the nearest whole degree while it
//! is below `end`, and wraps back to `start` once `end` has been reached.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::optics::{OpticsModel, MAX_INCIDENT_ANGLE};

/// Start, end and step of an incident angle sweep, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleRange {
    pub start: f32,
    pub end: f32,
    pub step: f32,
}

impl Default for AngleRange {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 90.0,
            step: 10.0,
        }
    }
}

impl AngleRange {
    pub fn new(start: f32, end: f32, step: f32) -> Result<Self, DomainError> {
        let range = Self { start, end, step };
        range.validate()?;
        Ok(range)
    }

    /// Checks that every angle of the sweep is a valid incident angle and that
    /// the sweep makes progress.
    pub fn validate(&self) -> Result<(), DomainError> {
        let bounded = 0.0 <= self.start && self.start <= self.end && self.end <= MAX_INCIDENT_ANGLE;
        if bounded && self.step >= 1.0 {
            Ok(())
        } else {
            Err(DomainError::InvalidRange {
                start: self.start,
                end: self.end,
                step: self.step,
            })
        }
    }

    /// The angle following `current` in the sweep.
    ///
    /// The last step is shortened so that `end` is never overshot.
    pub fn next_angle(&self, current: f32) -> f32 {
        if current < self.end {
            (current.round() + self.step).min(self.end)
        } else {
            self.start
        }
    }

    /// One cycle of the sweep, from `start` up to and including `end`.
    pub fn iter(&self) -> Sweep {
        Sweep {
            range: *self,
            current: Some(self.start),
        }
    }
}

impl IntoIterator for AngleRange {
    type Item = f32;
    type IntoIter = Sweep;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the angles of one sweep cycle.
#[derive(Debug, Clone)]
pub struct Sweep {
    range: AngleRange,
    current: Option<f32>,
}

impl Iterator for Sweep {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let current = self.current?;
        self.current = if current < self.range.end {
            Some(self.range.next_angle(current))
        } else {
            None
        };
        Some(current)
    }
}

/// Model outputs at a single incident angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub incident_angle_deg: f32,
    /// `None` under total internal reflection.
    pub transmitted_angle_deg: Option<f32>,
    pub reflectance: f32,
    pub transmittance: f32,
}

impl Sample {
    pub fn from_model(model: &OpticsModel) -> Self {
        let powers = model.powers();
        Self {
            incident_angle_deg: model.incident_angle_degrees(),
            transmitted_angle_deg: model.transmitted_angle().map(f32::to_degrees),
            reflectance: powers.reflectance,
            transmittance: powers.transmittance,
        }
    }
}

impl OpticsModel {
    /// Evaluates the model at every angle of one sweep cycle.
    ///
    /// The model itself is left untouched.
    pub fn sweep(&self, range: &AngleRange) -> Result<Vec<Sample>, DomainError> {
        range.validate()?;
        let mut model = self.clone();
        range
            .iter()
            .map(|angle| {
                model.set_incident_angle(angle)?;
                let sample = Sample::from_model(&model);
                debug!("{:?}", sample);
                Ok(sample)
            })
            .collect()
    }
}
