//! Numerical engines for Swirl String Core.
//!
//! Self-interaction mass integrator, Hamiltonian relaxation engine,
//! and scalar filament diagnostics.

pub mod diagnostics;
pub mod mass;
pub mod relax;
