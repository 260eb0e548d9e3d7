//! Name reconciliation between the boundary file and the case table.
//!
//! Both sides are reduced to [`RegionKey`]s and compared exactly. No
//! spelling correction is attempted, so a region spelled differently in
//! the two sources shows up here as one geometry-only key and one
//! table-only key.

use std::collections::BTreeSet;

use disease_map_geography_models::RegionKey;

/// Outcome of matching geometry region keys against case-table keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Keys present on both sides, in geometry order.
    pub matched: Vec<RegionKey>,
    /// Geometry regions with no case data. These still render, zero-filled.
    pub geometry_only: Vec<RegionKey>,
    /// Case-table regions with no geometry. These are dropped from maps.
    pub table_only: Vec<RegionKey>,
}

impl ReconcileReport {
    /// Whether every key on each side found a counterpart.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.geometry_only.is_empty() && self.table_only.is_empty()
    }

    /// Logs the mismatches at `warn` level and the summary at `debug`.
    pub fn log_summary(&self) {
        log::debug!(
            "Region reconciliation: {} matched, {} geometry-only, {} table-only",
            self.matched.len(),
            self.geometry_only.len(),
            self.table_only.len()
        );
        for key in &self.geometry_only {
            log::warn!("Region '{key}' has geometry but no case data; it will render as zero");
        }
        for key in &self.table_only {
            log::warn!("Region '{key}' has case data but no geometry; it will not be drawn");
        }
    }
}

/// Compares the two key sets. Each output list is deduplicated and keeps
/// the first-appearance order of its source side.
pub fn reconcile(
    geometry_keys: impl IntoIterator<Item = RegionKey>,
    table_keys: impl IntoIterator<Item = RegionKey>,
) -> ReconcileReport {
    let geometry = dedup_in_order(geometry_keys);
    let table = dedup_in_order(table_keys);

    let geometry_set: BTreeSet<&RegionKey> = geometry.iter().collect();
    let table_set: BTreeSet<&RegionKey> = table.iter().collect();

    let mut report = ReconcileReport::default();
    for key in &geometry {
        if table_set.contains(key) {
            report.matched.push(key.clone());
        } else {
            report.geometry_only.push(key.clone());
        }
    }
    report.table_only = table
        .iter()
        .filter(|key| !geometry_set.contains(key))
        .cloned()
        .collect();

    report
}

fn dedup_in_order(keys: impl IntoIterator<Item = RegionKey>) -> Vec<RegionKey> {
    let mut seen = BTreeSet::new();
    keys.into_iter()
        .filter(|key| seen.insert(key.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(names: &[&str]) -> Vec<RegionKey> {
        names.iter().map(|n| RegionKey::canonical(n)).collect()
    }

    #[test]
    fn splits_matched_and_one_sided_keys() {
        let report = reconcile(
            keys(&["Goa", "Ladakh", "Kerala"]),
            keys(&["Kerala", "Goa", "Orissa"]),
        );
        assert_eq!(report.matched, keys(&["Goa", "Kerala"]));
        assert_eq!(report.geometry_only, keys(&["Ladakh"]));
        assert_eq!(report.table_only, keys(&["Orissa"]));
        assert!(!report.is_complete());
    }

    #[test]
    fn whitespace_differences_still_match() {
        let report = reconcile(keys(&["Goa "]), keys(&["  Goa"]));
        assert!(report.is_complete());
        assert_eq!(report.matched, keys(&["Goa"]));
    }

    #[test]
    fn spelling_differences_do_not_match() {
        let report = reconcile(keys(&["Odisha"]), keys(&["Orissa"]));
        assert!(report.matched.is_empty());
        assert_eq!(report.geometry_only, keys(&["Odisha"]));
        assert_eq!(report.table_only, keys(&["Orissa"]));
    }

    #[test]
    fn repeated_keys_are_reported_once() {
        let report = reconcile(keys(&["Goa", "Goa"]), keys(&["Goa", "Goa", "Goa"]));
        assert_eq!(report.matched, keys(&["Goa"]));
    }
}
