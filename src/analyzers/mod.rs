//! Fleet analytics: filtering, aggregation, and qualitative ratings.
//!
//! This module folds a trip-log snapshot into filtered totals, derived
//! rates, and threshold-classified ratings, plus the dropdown values the
//! filter panel offers for the current selection.

pub mod aggregate;
pub mod filters;
pub mod rating;
pub mod types;
