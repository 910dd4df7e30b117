// ─────────────────────────────────────────────────────────────────────
// Swirl String Core — Knot Database
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Ideal-knot Fourier coefficient database.
//!
//! The text format is a sequence of `<AB Id="c:i:v">` blocks, each
//! holding ordered `<Coeff A="ax,ay,az" B="bx,by,bz"/>` harmonics.
//! A compact table of canonical knots ships embedded in the library;
//! external tables load through [`KnotDatabase::parse`] or
//! [`KnotDatabase::from_file`].

use std::collections::BTreeMap;
use std::sync::OnceLock;

use sst_types::error::{SwirlError, SwirlResult};
use sst_types::filament::{Filament, Vec3};

use crate::fourier::{evaluate_series, FourierCoeff};

const EMBEDDED_TABLE: &str = include_str!("../data/ideal_database.txt");

/// Parsed coefficient table, keyed by the AB identifier (e.g. "3:1:1").
#[derive(Debug, Clone)]
pub struct KnotDatabase {
    entries: BTreeMap<String, Vec<FourierCoeff>>,
}

impl KnotDatabase {
    /// The embedded canonical table (unknot, trefoil, figure-eight,
    /// cinquefoil). Parsed once per process.
    pub fn embedded() -> &'static KnotDatabase {
        static DB: OnceLock<KnotDatabase> = OnceLock::new();
        DB.get_or_init(|| {
            KnotDatabase::parse(EMBEDDED_TABLE).expect("embedded ideal-knot table must parse")
        })
    }

    /// Parse a coefficient table from text.
    pub fn parse(text: &str) -> SwirlResult<Self> {
        let mut entries = BTreeMap::new();
        let mut cursor = 0usize;

        while let Some(offset) = text[cursor..].find("<AB ") {
            let start = cursor + offset;
            let length = text[start..].find("</AB>").ok_or_else(|| {
                SwirlError::DatabaseParse("Unterminated <AB> block".to_string())
            })?;
            let block = &text[start..start + length];

            let header_end = block.find('>').ok_or_else(|| {
                SwirlError::DatabaseParse("Malformed <AB> opening tag".to_string())
            })?;
            let id = attribute(&block[..header_end], "Id").ok_or_else(|| {
                SwirlError::DatabaseParse("<AB> block missing Id attribute".to_string())
            })?;

            let coeffs = parse_coeff_tags(block)?;
            if coeffs.is_empty() {
                return Err(SwirlError::DatabaseParse(format!(
                    "Knot {id} has no <Coeff> entries"
                )));
            }
            if entries.insert(id.to_string(), coeffs).is_some() {
                return Err(SwirlError::DatabaseParse(format!("Duplicate knot ID {id}")));
            }

            cursor = start + length + "</AB>".len();
        }

        if entries.is_empty() {
            return Err(SwirlError::DatabaseParse(
                "No <AB> blocks found".to_string(),
            ));
        }
        Ok(KnotDatabase { entries })
    }

    /// Load a coefficient table from a file path.
    pub fn from_file(path: &str) -> SwirlResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// All knot identifiers, sorted.
    pub fn ids(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Harmonics for one knot, if present.
    pub fn coefficients(&self, knot_ab_id: &str) -> Option<&[FourierCoeff]> {
        self.entries.get(knot_ab_id).map(Vec::as_slice)
    }

    /// Synthesize the closed centerline of a knot at the requested
    /// resolution. Unknown identifiers are fatal to the request.
    pub fn build_filament(&self, knot_ab_id: &str, resolution: usize) -> SwirlResult<Filament> {
        if resolution < 3 {
            return Err(SwirlError::ConfigError(format!(
                "Filament resolution must be >= 3, got {resolution}"
            )));
        }
        let coeffs = self
            .entries
            .get(knot_ab_id)
            .ok_or_else(|| SwirlError::KnotNotFound {
                id: knot_ab_id.to_string(),
            })?;
        Ok(Filament::new(evaluate_series(coeffs, resolution)))
    }
}

fn parse_coeff_tags(block: &str) -> SwirlResult<Vec<FourierCoeff>> {
    let mut out = Vec::new();
    let mut cursor = 0usize;

    while let Some(offset) = block[cursor..].find("<Coeff") {
        let start = cursor + offset;
        let length = block[start..].find("/>").ok_or_else(|| {
            SwirlError::DatabaseParse("Unterminated <Coeff> tag".to_string())
        })?;
        let tag = &block[start..start + length];

        let a = attribute(tag, "A").ok_or_else(|| {
            SwirlError::DatabaseParse("<Coeff> tag missing A attribute".to_string())
        })?;
        let b = attribute(tag, "B").ok_or_else(|| {
            SwirlError::DatabaseParse("<Coeff> tag missing B attribute".to_string())
        })?;
        out.push(FourierCoeff {
            a: parse_vec3(a)?,
            b: parse_vec3(b)?,
        });

        cursor = start + length + "/>".len();
    }

    Ok(out)
}

fn attribute<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let key = format!("{name}=\"");
    let start = tag.find(&key)? + key.len();
    let end = tag[start..].find('"')? + start;
    Some(&tag[start..end])
}

fn parse_vec3(raw: &str) -> SwirlResult<Vec3> {
    let mut parts = raw.split(',');
    let mut out = [0.0; 3];
    for slot in &mut out {
        let token = parts.next().ok_or_else(|| {
            SwirlError::DatabaseParse(format!(
                "Expected 3 comma-separated components, got \"{raw}\""
            ))
        })?;
        *slot = token.trim().parse::<f64>().map_err(|_| {
            SwirlError::DatabaseParse(format!("Invalid numeric component \"{token}\""))
        })?;
    }
    if parts.next().is_some() {
        return Err(SwirlError::DatabaseParse(format!(
            "Expected 3 comma-separated components, got \"{raw}\""
        )));
    }
    Ok(out)
}
