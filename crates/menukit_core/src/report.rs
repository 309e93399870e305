//! Assembly report models.

use std::collections::BTreeMap;
use std::fmt;

/// Aggregate counters and diagnostics for one `assemble_menu_rows` run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SpecAssemblyReport {
    /// Top-level item rows emitted.
    pub cnt_items_top_level: u64,
    /// Modifier member item rows emitted (auto-numbered).
    pub cnt_items_modifier: u64,
    /// Modifier groups materialized.
    pub cnt_modifier_groups: u64,
    /// Modifier group member slots emitted, padding included.
    pub cnt_modifier_slots: u64,
    /// Submenu rows emitted.
    pub cnt_submenus: u64,
    /// Submenu member rows emitted.
    pub cnt_submenu_items: u64,
    /// Item modifier references dropped (unknown group) or truncated.
    pub cnt_refs_dropped: u64,
    /// Submenu item references passed through without validation.
    pub cnt_refs_degraded: u64,
    /// Non-fatal warnings collected during assembly.
    pub warnings: Vec<String>,
}

impl SpecAssemblyReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }

    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_items_top_level".to_string(), self.cnt_items_top_level);
        dict_counts.insert("cnt_items_modifier".to_string(), self.cnt_items_modifier);
        dict_counts.insert("cnt_modifier_groups".to_string(), self.cnt_modifier_groups);
        dict_counts.insert("cnt_modifier_slots".to_string(), self.cnt_modifier_slots);
        dict_counts.insert("cnt_submenus".to_string(), self.cnt_submenus);
        dict_counts.insert("cnt_submenu_items".to_string(), self.cnt_submenu_items);
        dict_counts.insert("cnt_refs_dropped".to_string(), self.cnt_refs_dropped);
        dict_counts.insert("cnt_refs_degraded".to_string(), self.cnt_refs_degraded);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} items={} modifier_items={} groups={} slots={} submenus={} \
             submenu_items={} refs_dropped={} refs_degraded={} warnings={}",
            self.cnt_items_top_level,
            self.cnt_items_modifier,
            self.cnt_modifier_groups,
            self.cnt_modifier_slots,
            self.cnt_submenus,
            self.cnt_submenu_items,
            self.cnt_refs_dropped,
            self.cnt_refs_degraded,
            self.warning_count()
        )
    }
}

impl fmt::Display for SpecAssemblyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[ASSEMBLE]"))
    }
}

#[cfg(test)]
mod tests {
    use super::SpecAssemblyReport;

    #[test]
    fn test_report_to_dict_and_format_agree() {
        let mut report = SpecAssemblyReport {
            cnt_items_top_level: 2,
            cnt_items_modifier: 3,
            cnt_modifier_groups: 1,
            cnt_modifier_slots: 6,
            cnt_submenus: 1,
            cnt_submenu_items: 2,
            cnt_refs_dropped: 1,
            cnt_refs_degraded: 0,
            warnings: vec![],
        };
        report.warn("w");

        let dict_counts = report.to_dict();
        assert_eq!(dict_counts["cnt_items_top_level"], 2);
        assert_eq!(dict_counts["cnt_items_modifier"], 3);
        assert_eq!(dict_counts["cnt_modifier_slots"], 6);
        assert_eq!(dict_counts["cnt_warnings"], 1);

        let txt = report.format("[ASSEMBLE]");
        assert_eq!(
            txt,
            "[ASSEMBLE] items=2 modifier_items=3 groups=1 slots=6 submenus=1 \
             submenu_items=2 refs_dropped=1 refs_degraded=0 warnings=1"
        );
        assert_eq!(report.to_string(), txt);
    }
}
