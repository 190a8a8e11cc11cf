//! Bill-level computation: totals aggregation and bill numbering.

pub mod aggregator;
pub mod sequencer;

pub use aggregator::{recompute_all, recompute_bill, recompute_items, tax_summary, TaxSummary};
pub use sequencer::{
    bills_in_month, format_bill_number, next_sequence, sequence_of, sort_by_sequence, BillNumber,
    BillNumberSequencer,
};
