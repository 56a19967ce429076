use anyhow::{anyhow, ensure, Context, Result};
use clap::Parser;
use config::{Config, Environment, File};
use log::debug;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::error::DomainError;
use crate::fresnel::Polarization;
use crate::medium::Medium;
use crate::optics::OpticsModel;
use crate::sweep::AngleRange;

/// Runtime configuration for the application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Incident angle in degrees.
    pub incident_angle: f32,
    pub incident_index: f32,
    pub transmitted_index: f32,
    /// If set, overrides `incident_index` with the catalog value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_medium: Option<Medium>,
    /// If set, overrides `transmitted_index` with the catalog value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmitted_medium: Option<Medium>,
    #[serde(default)]
    pub polarization: Polarization,
    #[serde(default = "default_true")]
    pub labels: bool,
    #[serde(default = "default_true")]
    pub irradiance: bool,
    #[serde(default)]
    pub animate: bool,
    /// Directory for sweep output files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub angle_range: AngleRange,
}

fn default_true() -> bool {
    true
}

impl Settings {
    pub fn incident_index(&self) -> f32 {
        self.incident_medium
            .map_or(self.incident_index, |medium| medium.index())
    }

    pub fn transmitted_index(&self) -> f32 {
        self.transmitted_medium
            .map_or(self.transmitted_index, |medium| medium.index())
    }

    /// Label for the incident medium, empty if none was named.
    pub fn incident_label(&self) -> &'static str {
        self.incident_medium.map_or("", |medium| medium.name())
    }

    /// Label for the transmitted medium, empty if none was named.
    pub fn transmitted_label(&self) -> &'static str {
        self.transmitted_medium.map_or("", |medium| medium.name())
    }

    /// Builds the model described by these settings. When animating, the model
    /// starts at the beginning of the angle range.
    pub fn model(&self) -> Result<OpticsModel, DomainError> {
        let angle = if self.animate {
            self.angle_range.start
        } else {
            self.incident_angle
        };
        OpticsModel::new(
            angle,
            self.incident_index(),
            self.transmitted_index(),
            self.polarization,
        )
    }
}

/// Loads `config/default.toml` without environment or command line overrides.
pub fn load_default_config() -> Result<Settings> {
    let optics_dir = retrieve_project_root()?;
    let default_config_file = optics_dir.join("config/default.toml");

    let settings = Config::builder()
        .add_source(File::from(default_config_file).required(true))
        .build()
        .context("Error loading configuration")?;

    let config: Settings = settings
        .try_deserialize()
        .context("Error deserializing configuration")?;

    validate_config(&config)?;

    Ok(config)
}

/// Loads the configuration file, then applies environment variables prefixed
/// with `OPTICS_` and finally any command line arguments.
pub fn load_config() -> Result<Settings> {
    let optics_dir = retrieve_project_root()?;

    let default_config_file = optics_dir.join("config/default.toml");
    let local_config = optics_dir.join("config/local.toml");

    // Check if local config exists, if not use default
    let config_file = if local_config.exists() {
        println!("Using local configuration: {:?}", local_config);
        local_config
    } else {
        println!("Using default configuration: {:?}", default_config_file);
        default_config_file
    };

    let settings = Config::builder()
        .add_source(File::from(config_file).required(true))
        .add_source(Environment::with_prefix("optics"))
        .build()
        .context("Error loading configuration")?;

    let mut config: Settings = settings
        .try_deserialize()
        .context("Error deserializing configuration")?;

    apply_args(&mut config, CliArgs::parse());

    validate_config(&config)?;

    debug!("{:#?}", config);

    Ok(config)
}

/// Overrides values in `config` with those given on the command line.
pub fn apply_args(config: &mut Settings, args: CliArgs) {
    if let Some(theta) = args.theta {
        config.incident_angle = theta;
    }
    if let Some(n1) = args.n1 {
        config.incident_index = n1;
        config.incident_medium = None;
    }
    if let Some(n2) = args.n2 {
        config.transmitted_index = n2;
        config.transmitted_medium = None;
    }
    if let Some(m1) = args.m1 {
        config.incident_medium = Some(m1);
    }
    if let Some(m2) = args.m2 {
        config.transmitted_medium = Some(m2);
    }
    if args.parallel {
        config.polarization = Polarization::Parallel;
    }
    if args.animate {
        config.animate = true;
    }
    if args.no_labels {
        config.labels = false;
    }
    if args.no_irradiance {
        config.irradiance = false;
    }
    if let Some(range) = args.range {
        // clap guarantees exactly three values
        config.angle_range = AngleRange {
            start: range[0],
            end: range[1],
            step: range[2],
        };
    }
    if let Some(output) = args.output {
        config.output_dir = Some(output);
    }
}

/// Retrieve the project root directory.
/// This function tries to find the project root directory in different ways:
/// 1. If the CARGO_MANIFEST_DIR environment variable is set, use it.
/// 2. If the OPTICS_ROOT_DIR environment variable is set, use it.
/// 3. If the "config" subdirectory is found in the executable directory or any of its parents, use it.
fn retrieve_project_root() -> Result<PathBuf> {
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        // When running through cargo (e.g. cargo run, cargo test)
        return Ok(PathBuf::from(manifest_dir));
    }
    if let Ok(path) = env::var("OPTICS_ROOT_DIR") {
        return Ok(PathBuf::from(path));
    }

    let exe_path = env::current_exe().context("Failed to get current executable path")?;
    exe_path
        .ancestors()
        .skip(1)
        .find(|dir| dir.join("config").is_dir())
        .map(|dir| dir.to_path_buf())
        .ok_or_else(|| anyhow!("Could not find project root directory"))
}

pub fn validate_config(config: &Settings) -> Result<()> {
    ensure!(
        config.incident_index() > 0.0,
        "Incident refractive index must be greater than 0"
    );
    ensure!(
        config.transmitted_index() > 0.0,
        "Transmitted refractive index must be greater than 0"
    );
    if config.animate {
        config.angle_range.validate()?;
    }
    config.model()?;
    Ok(())
}

#[derive(Parser, Debug, Default)]
#[command(version, about = "Reflection and refraction of light at a planar interface")]
pub struct CliArgs {
    /// Incident angle in degrees (0 <= angle <= 90).
    #[arg(short, long)]
    pub theta: Option<f32>,

    /// Refractive index of the incident medium.
    #[arg(long)]
    pub n1: Option<f32>,

    /// Refractive index of the transmitted medium.
    #[arg(long)]
    pub n2: Option<f32>,

    /// Name of the incident medium, eg. "air". Overrides --n1.
    #[arg(long)]
    pub m1: Option<Medium>,

    /// Name of the transmitted medium, eg. "glass". Overrides --n2.
    #[arg(long)]
    pub m2: Option<Medium>,

    /// Electric field parallel to the plane of incidence.
    #[arg(short, long)]
    pub parallel: bool,

    /// Sweep the incident angle through the angle range.
    #[arg(short, long)]
    pub animate: bool,

    /// Do not print the medium labels.
    #[arg(long)]
    pub no_labels: bool,

    /// Do not report reflectance and transmittance.
    #[arg(long)]
    pub no_irradiance: bool,

    /// Angle range for the sweep in degrees.
    /// Format: start end step
    #[arg(long, num_args = 3, value_delimiter = ' ')]
    pub range: Option<Vec<f32>>,

    /// Directory to write sweep results to.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Settings:
  - Incident Angle: {:.2}
  - Incident Index: {:.4} {}
  - Transmitted Index: {:.4} {}
  - Polarization: {:?}
  - Animate: {} ({} to {} step {})
  ",
            self.incident_angle,
            self.incident_index(),
            self.incident_label(),
            self.transmitted_index(),
            self.transmitted_label(),
            self.polarization,
            self.animate,
            self.angle_range.start,
            self.angle_range.end,
            self.angle_range.step,
        )
    }
}
