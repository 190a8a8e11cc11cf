//! Configuration structures for bill computation and numbering.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{BillingError, Result};
use crate::models::bill::Template;
use crate::rules::jurisdiction::TaxRegime;
use crate::rules::tax::TaxRates;

/// Main configuration for gstbill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    /// Bill number layout.
    pub numbering: NumberingConfig,

    /// Default tax rates for new items.
    pub tax: TaxDefaults,

    /// Issuing business defaults.
    pub business: BusinessDefaults,

    /// Output options.
    pub output: OutputConfig,
}

/// Bill number layout: `PREFIX[/MARKER]/YYYY-YY/SEQ`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberingConfig {
    /// Issuer prefix on every bill number.
    pub prefix: String,

    /// Marker segment for estimates.
    pub estimate_marker: String,

    /// Segment separator.
    pub separator: String,
}

impl Default for NumberingConfig {
    fn default() -> Self {
        Self {
            prefix: "SR".to_string(),
            estimate_marker: "ES".to_string(),
            separator: "/".to_string(),
        }
    }
}

/// Default rates offered when an item row is added.
///
/// These are editable per item; the engine only uses the item's own rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxDefaults {
    /// Rates for supplies within the business's state.
    pub same_state: TaxRates,

    /// Rates for supplies to another state.
    pub inter_state: TaxRates,
}

impl Default for TaxDefaults {
    fn default() -> Self {
        Self {
            same_state: TaxRates::new(Decimal::from(9), Decimal::from(9), Decimal::ZERO),
            inter_state: TaxRates::new(Decimal::ZERO, Decimal::ZERO, Decimal::from(18)),
        }
    }
}

impl TaxDefaults {
    /// Default rates for a business/customer pair.
    pub fn rates_for(&self, business_state: &str, customer_state: &str) -> TaxRates {
        match TaxRegime::between(business_state, customer_state) {
            TaxRegime::IntraState => self.same_state,
            TaxRegime::InterState => self.inter_state,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessDefaults {
    /// Jurisdiction label of the issuing business.
    pub state: String,
}

impl Default for BusinessDefaults {
    fn default() -> Self {
        Self {
            state: "Haryana (06)".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Template for new bills.
    pub template: Template,

    /// Currency symbol used in text output.
    pub currency_symbol: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            template: Template::Classic,
            currency_symbol: "₹".to_string(),
        }
    }
}

impl BillingConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> std::result::Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> std::result::Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Check that bill numbers built from this config can be parsed back.
    pub fn validate(&self) -> Result<()> {
        let numbering = &self.numbering;
        if numbering.separator.is_empty() {
            return Err(BillingError::Config("numbering.separator must not be empty".to_string()));
        }
        if numbering.prefix.trim().is_empty() {
            return Err(BillingError::Config("numbering.prefix must not be empty".to_string()));
        }
        for (key, value) in [
            ("numbering.prefix", &numbering.prefix),
            ("numbering.estimate_marker", &numbering.estimate_marker),
        ] {
            if value.contains(numbering.separator.as_str()) {
                return Err(BillingError::Config(format!(
                    "{} must not contain the separator {:?}",
                    key, numbering.separator
                )));
            }
        }
        Ok(())
    }
}
