// ─────────────────────────────────────────────────────────────────────
// Swirl String Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::constants;

/// Process-wide physical configuration shared by both engines.
///
/// Immutable for the lifetime of an engine; engines receive a copy at
/// construction rather than reading ambient globals, so multiple
/// configurations (e.g. differing core radii) can coexist in one process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwirlConfig {
    /// Vortex core radius r_c [m].
    #[serde(default = "default_core_radius")]
    pub core_radius_m: f64,
    /// Tangential swirl speed at the core radius [m/s].
    #[serde(default = "default_swirl_speed")]
    pub swirl_speed_m_s: f64,
    /// Core string density [kg/m³].
    #[serde(default = "default_core_density")]
    pub core_density_kg_m3: f64,
    /// Ambient condensate density [kg/m³].
    #[serde(default = "default_fluid_density")]
    pub fluid_density_kg_m3: f64,
    /// Speed of light [m/s].
    #[serde(default = "default_light_speed")]
    pub light_speed_m_s: f64,
    /// Force parameters for the Hamiltonian relaxation engine.
    #[serde(default)]
    pub relaxation: RelaxationParams,
}

/// Force coefficients for the relaxation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelaxationParams {
    /// Neighbor spring (tension) coefficient (default: 25.0)
    #[serde(default = "default_k_spring")]
    pub k_spring: f64,
    /// Centroid pressure coefficient (default: 15.0)
    #[serde(default = "default_k_pressure")]
    pub k_pressure: f64,
    /// Short-range repulsion coefficient (default: 0.5)
    #[serde(default = "default_k_repulsion")]
    pub k_repulsion: f64,
    /// Repulsion cutoff radius (default: 0.2)
    #[serde(default = "default_repulsion_radius")]
    pub repulsion_radius: f64,
    /// Velocity dissipation factor per step (default: 0.70)
    #[serde(default = "default_damping")]
    pub damping: f64,
}

fn default_core_radius() -> f64 {
    constants::R_C
}
fn default_swirl_speed() -> f64 {
    constants::V_SWIRL
}
fn default_core_density() -> f64 {
    constants::RHO_CORE
}
fn default_fluid_density() -> f64 {
    constants::RHO_FLUID
}
fn default_light_speed() -> f64 {
    constants::C_LIGHT
}
fn default_k_spring() -> f64 {
    25.0
}
fn default_k_pressure() -> f64 {
    15.0
}
fn default_k_repulsion() -> f64 {
    0.5
}
fn default_repulsion_radius() -> f64 {
    0.2
}
fn default_damping() -> f64 {
    0.70
}

impl Default for SwirlConfig {
    fn default() -> Self {
        SwirlConfig {
            core_radius_m: default_core_radius(),
            swirl_speed_m_s: default_swirl_speed(),
            core_density_kg_m3: default_core_density(),
            fluid_density_kg_m3: default_fluid_density(),
            light_speed_m_s: default_light_speed(),
            relaxation: RelaxationParams::default(),
        }
    }
}

impl Default for RelaxationParams {
    fn default() -> Self {
        RelaxationParams {
            k_spring: default_k_spring(),
            k_pressure: default_k_pressure(),
            k_repulsion: default_k_repulsion(),
            repulsion_radius: default_repulsion_radius(),
            damping: default_damping(),
        }
    }
}

impl SwirlConfig {
    /// Load from a JSON file. Absent fields fall back to canonical values.
    pub fn from_file(path: &str) -> crate::error::SwirlResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}
