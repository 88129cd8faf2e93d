//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario:
//!
//! - [`ParametersConfig`] – precision, tick size, and tick count
//! - [`FieldConfig`]      – one force-law registration
//! - [`EnsembleConfig`]   – one particle species with its per-field forces
//! - [`ParticleConfig`]   – initial state for each particle
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! parameters:
//!   precision: 50           # significant decimal digits
//!   dt: 1.0                 # simulated time per tick
//!   steps: 3                # number of ticks to run
//!
//! fields:
//!   - name: gravity
//!     formula: gravity      # gravity | electrostatic | inverse_square | none
//!     units: kg
//!
//! ensembles:
//!   - name: proton
//!     rest_energy: 0.0
//!     forces:
//!       - field: gravity
//!         magnitude: 1.673e-27
//!
//! particles:
//!   - ensemble: proton
//!     position: [ 0.0, 3.0 ]
//!     velocity: [ 0.0, 0.0 ]
//! ```
//!
//! The engine then maps this configuration into its runtime registries;
//! field and ensemble names only exist at this layer and resolve to
//! store-assigned group ids during the build.

use serde::Deserialize;

/// Which built-in formula a field uses
/// `formula: "gravity"`, `"electrostatic"`, `"inverse_square"`, or `"none"`
#[derive(Deserialize, Debug, Clone)]
pub enum FormulaConfig {
    #[serde(rename = "gravity")] // inverse square scaled by G
    Gravity,

    #[serde(rename = "electrostatic")] // inverse square scaled by k_e
    Electrostatic,

    #[serde(rename = "inverse_square")] // unit coupling constant
    InverseSquare,

    #[serde(rename = "none")] // field registered without a formula
    None,
}

/// Global numerical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    #[serde(default = "default_precision")]
    pub precision: u64, // significant decimal digits for rounding operations
    pub dt: f64,    // simulated time per tick
    pub steps: u32, // number of ticks to run
}

fn default_precision() -> u64 {
    50
}

/// One force-law registration
#[derive(Deserialize, Debug)]
pub struct FieldConfig {
    pub name: String,               // registry name, referenced by forces below
    pub formula: FormulaConfig,     // built-in pairwise law
    pub units: Option<String>,      // unit label for magnitudes in this field
}

/// One force an ensemble carries, addressed by field name
#[derive(Deserialize, Debug)]
pub struct ForceConfig {
    pub field: String,           // name of a field declared above
    pub magnitude: f64,          // signed magnitude in the field's units
    pub center: Option<Vec<f64>>, // relative center; defaults to the midpoint scalar
}

/// One particle species
#[derive(Deserialize, Debug)]
pub struct EnsembleConfig {
    pub name: String,
    pub forces: Vec<ForceConfig>,
    #[serde(default)]
    pub rest_energy: f64,
}

/// Initial state for a single particle
#[derive(Deserialize, Debug)]
pub struct ParticleConfig {
    pub ensemble: String,   // name of an ensemble declared above
    pub position: Vec<f64>, // initial position vector
    #[serde(default)]
    pub velocity: Vec<f64>, // initial velocity, zero when omitted
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig, // precision and tick plan
    pub fields: Vec<FieldConfig>,     // force laws to register
    pub ensembles: Vec<EnsembleConfig>, // species to register
    pub particles: Vec<ParticleConfig>, // initial particles
}
