// ─────────────────────────────────────────────────────────────────────
// Swirl String Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Speed of light (m/s) - real SI value.
pub const C_LIGHT: f64 = 299_792_458.0;

/// Vortex core radius r_c (m)
pub const R_C: f64 = 1.408_970_17e-15;

/// Tangential swirl speed at the core radius (m/s)
pub const V_SWIRL: f64 = 1.093_845_63e6;

/// Core string density (kg/m^3)
pub const RHO_CORE: f64 = 3.893_435_826_691_868_7e18;

/// Ambient condensate density (kg/m^3)
pub const RHO_FLUID: f64 = 7.0e-7;

/// Mass of 1 MeV/c^2 in kilograms (for PDG-equivalent conversions)
pub const KG_PER_MEV: f64 = 1.782_661_92e-30;
