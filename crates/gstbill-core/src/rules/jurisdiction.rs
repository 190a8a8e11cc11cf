//! Jurisdiction (state) labels and tax regime selection.
//!
//! Labels follow the convention `"<Region Name> (<code>)"`, e.g. `"Haryana (06)"`.
//! Only the code decides the tax regime; the name is for display.

use serde::{Deserialize, Serialize};

use super::patterns::{STATE_CODE, STATE_NAME};

/// Indian states and union territories with their GST state codes.
pub static INDIAN_STATES: &[&str] = &[
    "Andhra Pradesh (37)",
    "Arunachal Pradesh (12)",
    "Assam (18)",
    "Bihar (10)",
    "Chhattisgarh (22)",
    "Goa (30)",
    "Gujarat (24)",
    "Haryana (06)",
    "Himachal Pradesh (02)",
    "Jharkhand (20)",
    "Karnataka (29)",
    "Kerala (32)",
    "Madhya Pradesh (23)",
    "Maharashtra (27)",
    "Manipur (14)",
    "Meghalaya (17)",
    "Mizoram (15)",
    "Nagaland (13)",
    "Odisha (21)",
    "Punjab (03)",
    "Rajasthan (08)",
    "Sikkim (11)",
    "Tamil Nadu (33)",
    "Telangana (36)",
    "Tripura (16)",
    "Uttar Pradesh (09)",
    "Uttarakhand (05)",
    "West Bengal (19)",
    "Andaman and Nicobar Islands (35)",
    "Chandigarh (04)",
    "Dadra and Nagar Haveli and Daman and Diu (26)",
    "Delhi (07)",
    "Jammu and Kashmir (01)",
    "Ladakh (38)",
    "Lakshadweep (31)",
    "Puducherry (34)",
];

/// Extract the jurisdiction code from a label.
///
/// Returns the first run of digits enclosed in parentheses, or `None`.
pub fn extract_code(label: &str) -> Option<&str> {
    STATE_CODE
        .captures(label)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Whether two labels name the same jurisdiction.
///
/// False when either label carries no code, so an unknown jurisdiction
/// never selects intra-state tax.
pub fn is_same_jurisdiction(a: &str, b: &str) -> bool {
    match (extract_code(a), extract_code(b)) {
        (Some(code_a), Some(code_b)) => code_a == code_b,
        _ => false,
    }
}

/// Canonical label for a state code ("07" -> "Delhi (07)").
pub fn lookup_by_code(code: &str) -> Option<&'static str> {
    INDIAN_STATES
        .iter()
        .copied()
        .find(|label| extract_code(label) == Some(code))
}

/// Which GST components apply to a supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxRegime {
    /// Supplier and recipient in the same state: CGST + SGST.
    IntraState,
    /// Different or unknown states: IGST.
    InterState,
}

impl TaxRegime {
    /// Select the regime for a business/customer label pair.
    pub fn between(business: &str, customer: &str) -> Self {
        if is_same_jurisdiction(business, customer) {
            TaxRegime::IntraState
        } else {
            TaxRegime::InterState
        }
    }

    pub fn is_intra_state(&self) -> bool {
        matches!(self, TaxRegime::IntraState)
    }
}

/// A jurisdiction label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Jurisdiction(String);

impl Jurisdiction {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Label as entered.
    pub fn label(&self) -> &str {
        &self.0
    }

    /// GST state code, if the label carries one.
    pub fn code(&self) -> Option<&str> {
        extract_code(&self.0)
    }

    /// Region name without the code. Falls back to the trimmed label.
    pub fn name(&self) -> &str {
        STATE_NAME
            .captures(&self.0)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .unwrap_or_else(|| self.0.trim())
    }

    pub fn is_same(&self, other: &Jurisdiction) -> bool {
        is_same_jurisdiction(&self.0, &other.0)
    }
}

impl From<&str> for Jurisdiction {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
