//! Screen controllers
//!
//! One controller per screen. Each one owns its form drafts and screen-local
//! state, holds injected store handles, and exposes render-ready row models.
//! No controller reaches into another's state; everything crosses through
//! the store.

pub mod allocation;
pub mod dashboard;
pub mod houses;
pub mod keys;
pub mod warehouse;

pub use allocation::AllocationView;
pub use dashboard::{DashboardStats, DashboardView, HouseProgress};
pub use houses::HousesView;
pub use keys::{KeyRow, KeysView};
pub use warehouse::WarehouseView;

/// Form validation failures surfaced to the user
///
/// Only the houses screen surfaces these; the other screens drop invalid
/// submissions silently.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in both name and address fields.")]
    MissingHouseFields,
}

/// Parse raw numeric form text; malformed input degrades to zero and then
/// fails the same gates any other zero would
pub(crate) fn parse_count(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

/// Parse raw progress text into the clamped percentage range
pub(crate) fn parse_progress(raw: &str) -> u8 {
    crate::store::entities::clamp_progress(raw.trim().parse().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_counts_degrade_to_zero() {
        assert_eq!(parse_count("12"), 12);
        assert_eq!(parse_count(" 7 "), 7);
        assert_eq!(parse_count("twelve"), 0);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("-3"), 0);
    }

    #[test]
    fn progress_text_is_clamped() {
        assert_eq!(parse_progress("150"), 100);
        assert_eq!(parse_progress("-5"), 0);
        assert_eq!(parse_progress("abc"), 0);
        assert_eq!(parse_progress("60"), 60);
    }
}
