//! List filtering predicates.
//!
//! # Responsibility
//! - Reproduce the inventory screens' filter semantics as pure predicates.
//! - Keep filtering independent from storage so it is testable in isolation.
//!
//! # Invariants
//! - Unset or blank criteria match everything.
//! - Free-text matching is a case-insensitive substring test over the
//!   space-joined searchable fields (missing fields contribute "").
//! - Date bounds are inclusive and compare UTC calendar dates.

mod predicates;

pub use predicates::{
    parse_day, EquipmentFilter, MaintenanceFilter, PcFilter, SoftwareFilter,
};

/// Predicate over one record type.
pub trait RecordFilter<T> {
    fn matches(&self, item: &T) -> bool;

    /// Keeps the matching items, preserving order.
    fn apply(&self, items: Vec<T>) -> Vec<T> {
        items.into_iter().filter(|item| self.matches(item)).collect()
    }
}
