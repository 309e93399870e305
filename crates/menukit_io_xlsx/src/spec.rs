//! Renderer options, cell models and report.

use std::collections::BTreeMap;
use std::fmt;

////////////////////////////////////////////////////////////////////////////////
// #region RenderOptions

/// Options for one workbook render call.
#[derive(Debug, Clone, Default)]
pub struct SpecWorkbookRenderOptions {
    /// Emit guide-note rows instead of data (blank template mode).
    pub if_empty_template: bool,
    /// Override the template protection password.
    pub password_override: Option<String>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellModels

/// Normalized cell content during sheet emission.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumSheetCell {
    /// Blank cell.
    None,
    /// Text cell.
    Text(String),
    /// Numeric cell.
    Number(f64),
    /// Cross-sheet price lookup formula anchored at the emitting row;
    /// `col_item_ref` is the column letter of the item reference on the
    /// same row.
    PriceLookup {
        /// Column letter of the item reference cell.
        col_item_ref: &'static str,
    },
    /// Operator note; the renderer styles it distinctly.
    Note(String),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RenderReport

/// Per-render report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecRenderReport {
    /// Data rows written per sheet (header and guide rows excluded).
    pub dict_rows_by_sheet: BTreeMap<String, u64>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecRenderReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }

    /// Total data rows written across all sheets.
    pub fn row_count(&self) -> u64 {
        self.dict_rows_by_sheet.values().sum()
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} sheets={} rows={} warnings={}",
            self.dict_rows_by_sheet.len(),
            self.row_count(),
            self.warnings.len()
        )
    }
}

impl fmt::Display for SpecRenderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[RENDER]"))
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::SpecRenderReport;

    #[test]
    fn test_render_report_counts_and_formats() {
        let mut report = SpecRenderReport::default();
        report.dict_rows_by_sheet.insert("Item".to_string(), 4);
        report.dict_rows_by_sheet.insert("Submenu".to_string(), 1);
        report.warn("w");

        assert_eq!(report.row_count(), 5);
        assert_eq!(report.format("[RENDER]"), "[RENDER] sheets=2 rows=5 warnings=1");
        assert_eq!(report.to_string(), report.format("[RENDER]"));
    }
}
