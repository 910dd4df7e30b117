// ─────────────────────────────────────────────────────────────────────
// Swirl String Core — Ideal Knots
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Ideal-knot geometry provider.
//!
//! Parses the Fourier coefficient database and synthesizes closed
//! filament centerlines at a requested resolution.

pub mod database;
pub mod fourier;

pub use database::KnotDatabase;
