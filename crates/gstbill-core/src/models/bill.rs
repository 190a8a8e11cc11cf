//! Bill (invoice/estimate) data models.
//!
//! Field names serialize in camelCase to match stored bill records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::rules::amounts::lenient_decimal;
use crate::rules::fiscal::today;
use crate::rules::tax::TaxRates;

/// A complete bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Invoice or estimate.
    #[serde(default)]
    pub bill_type: BillType,

    /// Bill number, e.g. "SR/2025-26/4".
    #[serde(default)]
    pub bill_number: String,

    /// Bill date as entered ("YYYY-MM-DD").
    #[serde(default)]
    pub bill_date: String,

    /// Place of supply label.
    #[serde(default)]
    pub place_of_supply: String,

    /// Issuing business.
    #[serde(default)]
    pub business_info: BusinessInfo,

    /// Billed customer.
    #[serde(default)]
    pub customer_info: CustomerInfo,

    /// Ship-to party, when different from the customer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_info: Option<ShippingInfo>,

    /// Bank details printed on the bill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_details: Option<BankDetails>,

    /// Line items, in display order.
    #[serde(default)]
    pub items: Vec<LineItem>,

    /// Bill-level totals.
    #[serde(flatten)]
    pub totals: BillTotals,

    /// Total in words for the legal amount line.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub amount_in_words: String,

    #[serde(default)]
    pub terms_conditions: String,

    /// Visual template used by renderers.
    #[serde(default)]
    pub template: Template,
}

/// Type of bill document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillType {
    /// Tax invoice.
    #[default]
    Invoice,
    /// Estimate / quotation.
    Estimate,
}

impl BillType {
    pub fn display(&self) -> &'static str {
        match self {
            BillType::Invoice => "Invoice",
            BillType::Estimate => "Estimate",
        }
    }
}

/// Visual template selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    #[default]
    Classic,
    Modern,
    Minimal,
    Professional,
}

/// The issuing business.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub gstin: String,
    pub pan: String,
    /// Jurisdiction label, e.g. "Haryana (06)".
    pub state: String,
}

/// The billed customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    /// Jurisdiction label, e.g. "Delhi (07)".
    pub state: String,
    pub pincode: String,
    pub gstin: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingInfo {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BankDetails {
    pub bank_name: String,
    pub account_holder_name: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub branch: String,
}

/// A single billable line.
///
/// Numeric inputs deserialize leniently: missing, blank or non-numeric
/// values become zero. The derived amounts are overwritten on every
/// recomputation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// HSN/SAC tariff code.
    #[serde(default)]
    pub hsn: String,

    #[serde(default)]
    pub unit: String,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub quantity: Decimal,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub rate: Decimal,

    /// Discount percentage.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub discount: Decimal,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub cgst: Decimal,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub sgst: Decimal,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub igst: Decimal,

    /// Taxable value after discount.
    #[serde(rename = "amount", alias = "taxableAmount", default, deserialize_with = "lenient_decimal")]
    pub taxable_amount: Decimal,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub cgst_amount: Decimal,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub sgst_amount: Decimal,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub igst_amount: Decimal,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub tax_amount: Decimal,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_amount: Decimal,
}

impl LineItem {
    /// New line with the given quantity, rate and tax rates.
    pub fn new(name: impl Into<String>, hsn: impl Into<String>, quantity: Decimal, rate: Decimal) -> Self {
        Self {
            name: name.into(),
            hsn: hsn.into(),
            unit: "pcs".to_string(),
            quantity,
            rate,
            ..Self::default()
        }
    }

    pub fn with_rates(mut self, rates: TaxRates) -> Self {
        self.set_rates(rates);
        self
    }

    pub fn with_discount(mut self, discount: Decimal) -> Self {
        self.discount = discount;
        self
    }

    pub fn rates(&self) -> TaxRates {
        TaxRates::new(self.cgst, self.sgst, self.igst)
    }

    pub fn set_rates(&mut self, rates: TaxRates) {
        self.cgst = rates.cgst;
        self.sgst = rates.sgst;
        self.igst = rates.igst;
    }

    pub fn has_hsn(&self) -> bool {
        !self.hsn.trim().is_empty()
    }
}

/// Bill-level totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillTotals {
    /// Sum of taxable amounts.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub subtotal: Decimal,

    /// Sum of tax amounts.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub tax_amount: Decimal,

    /// Signed round-off adjustment.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub rounding_amount: Decimal,

    /// Grand total in whole rupees.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total: Decimal,
}

impl Bill {
    /// Create an empty bill dated today.
    pub fn new(bill_type: BillType) -> Self {
        Self {
            bill_type,
            bill_number: String::new(),
            bill_date: today().format("%Y-%m-%d").to_string(),
            place_of_supply: String::new(),
            business_info: BusinessInfo::default(),
            customer_info: CustomerInfo::default(),
            shipping_info: None,
            bank_details: None,
            items: Vec::new(),
            totals: BillTotals::default(),
            amount_in_words: String::new(),
            terms_conditions: String::new(),
            template: Template::default(),
        }
    }

    /// Set the bill date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.bill_date = date.format("%Y-%m-%d").to_string();
        self
    }

    /// Validate the bill and return any issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.bill_number.trim().is_empty() {
            issues.push("Missing bill number".to_string());
        }

        if self.business_info.name.trim().is_empty() {
            issues.push("Missing business name".to_string());
        }

        if self.customer_info.name.trim().is_empty() {
            issues.push("Missing customer name".to_string());
        }

        if self.items.is_empty() {
            issues.push("No line items".to_string());
        }

        for (i, item) in self.items.iter().enumerate() {
            if !item.has_hsn() {
                issues.push(format!("Line {} has no HSN code", i + 1));
            }
        }

        issues
    }

    /// Reject the bill unless it can be submitted.
    ///
    /// Every item needs an HSN code and there must be at least one item.
    pub fn ensure_submittable(&self) -> Result<(), ValidationError> {
        if self.items.is_empty() {
            return Err(ValidationError::NoItems);
        }

        if let Some(pos) = self.items.iter().position(|item| !item.has_hsn()) {
            return Err(ValidationError::MissingHsn { line: pos + 1 });
        }

        if self.customer_info.name.trim().is_empty() {
            return Err(ValidationError::MissingField("customerInfo.name".to_string()));
        }

        Ok(())
    }
}

impl Default for Bill {
    fn default() -> Self {
        Self::new(BillType::Invoice)
    }
}
