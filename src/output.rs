use std::{fs::File, io::BufWriter, path::Path};

use anyhow::{Context, Result};
use std::io::Write;

use crate::optics::OpticsModel;
use crate::settings::Settings;
use crate::sweep::Sample;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fresnel::Polarization;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(50.04, 1), 50.0);
        assert_eq!(round_to(0.117396, 2), 0.12);
        assert_eq!(round_to(41.138, 1), 41.1);
    }

    #[test]
    fn test_labels_air_glass() {
        let model = OpticsModel::new(50.0, 1.0, 1.52, Polarization::Perpendicular).unwrap();
        let labels = Labels::new(&model, "Air", "Glass", true);
        assert_eq!(labels.incident, "Air\nn\u{2081} = 1.00\n\u{03B8}\u{1d62} ~ 50.0 \u{00b0}\nR ~ 0.12");
        assert_eq!(
            labels.transmitted,
            "Glass\nn\u{2082} = 1.52\n\u{03B8}\u{209c} ~ 30.3 \u{00b0}\nT ~ 0.88"
        );
    }

    #[test]
    fn test_labels_tir_without_irradiance() {
        let model = OpticsModel::new(50.0, 1.52, 1.0, Polarization::Perpendicular).unwrap();
        let labels = Labels::new(&model, "", "", false);
        assert_eq!(labels.transmitted, "\nn\u{2082} = 1.00\n\u{03B8}\u{209c} = NaN");
        assert!(!labels.incident.contains('R'));
    }

    #[test]
    fn test_samples_txt() {
        let samples = vec![
            Sample {
                incident_angle_deg: 30.0,
                transmitted_angle_deg: Some(41.68),
                reflectance: 0.0455,
                transmittance: 0.9545,
            },
            Sample {
                incident_angle_deg: 60.0,
                transmitted_angle_deg: None,
                reflectance: 1.0,
                transmittance: 0.0,
            },
        ];
        let mut buf = Vec::new();
        write_samples(&mut buf, &samples).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "30.0000 41.6800 0.045500 0.954500");
        assert_eq!(lines[1], "60.0000 NaN 1.000000 0.000000");
    }
}

/// Rounds `value` to `places` decimal places.
fn round_to(value: f32, places: i32) -> f32 {
    let factor = 10f32.powi(places);
    (value * factor).round() / factor
}

/// Text shown beside the incident and transmitted media.
#[derive(Debug, Clone, PartialEq)]
pub struct Labels {
    pub incident: String,
    pub transmitted: String,
}

impl Labels {
    /// Builds the labels for the current state of `model`.
    ///
    /// Reflectance and transmittance are only included if `irradiance` is set.
    pub fn new(
        model: &OpticsModel,
        incident_medium: &str,
        transmitted_medium: &str,
        irradiance: bool,
    ) -> Self {
        let incident_angle = format!(
            "\u{03B8}\u{1d62} ~ {:.1} \u{00b0}",
            round_to(model.incident_angle_degrees(), 1)
        );
        let transmitted_angle = match model.transmitted_angle() {
            Some(theta_t) => format!(
                "\u{03B8}\u{209c} ~ {:.1} \u{00b0}",
                round_to(theta_t.to_degrees(), 1)
            ),
            None => "\u{03B8}\u{209c} = NaN".to_string(),
        };

        let (reflectance, transmittance) = if irradiance {
            let powers = model.powers();
            (
                format!("\nR ~ {:.2}", round_to(powers.reflectance, 2)),
                format!("\nT ~ {:.2}", round_to(powers.transmittance, 2)),
            )
        } else {
            (String::new(), String::new())
        };

        Self {
            incident: format!(
                "{}\nn\u{2081} = {:.2}\n{}{}",
                incident_medium,
                model.incident_index(),
                incident_angle,
                reflectance
            ),
            transmitted: format!(
                "{}\nn\u{2082} = {:.2}\n{}{}",
                transmitted_medium,
                model.transmitted_index(),
                transmitted_angle,
                transmittance
            ),
        }
    }
}

/// Writes one line per sample: incident angle, transmitted angle, reflectance
/// and transmittance.
fn write_samples<W: Write>(writer: &mut W, samples: &[Sample]) -> Result<()> {
    for sample in samples {
        let theta_t = match sample.transmitted_angle_deg {
            Some(theta_t) => format!("{:.4}", theta_t),
            None => "NaN".to_string(),
        };
        writeln!(
            writer,
            "{:.4} {} {:.6} {:.6}",
            sample.incident_angle_deg, theta_t, sample.reflectance, sample.transmittance
        )?;
    }
    Ok(())
}

/// Writes the sweep samples to a plain text file.
pub fn write_samples_txt(path: &Path, samples: &[Sample]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);
    write_samples(&mut writer, samples)?;
    writer.flush()?;
    Ok(())
}

/// Writes the sweep samples to a JSON file.
pub fn write_samples_json(path: &Path, samples: &[Sample]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, samples)?;
    Ok(())
}

/// Writes the settings used for a run, so the output can be reproduced.
pub fn write_settings(path: &Path, settings: &Settings) -> Result<()> {
    let text = toml::to_string_pretty(settings)?;
    std::fs::write(path, text).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}
