//! Assembled record-set models shared with the workbook renderer.

////////////////////////////////////////////////////////////////////////////////
// #region PriceCells

/// Price cell content for member slots.
///
/// `LookupItemPrice` marks "price is the referenced item's price". The
/// renderer substitutes a cross-sheet lookup formula for it, so it must
/// stay distinguishable from a literal numeric price (a literal 0 would be
/// written as a number and silently lose the link).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnumPriceCell {
    /// Empty price cell.
    None,
    /// Literal price value.
    Literal(f64),
    /// Sentinel: substitute the referenced item's price at render time.
    LookupItemPrice,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RowModels

/// One `Item` sheet row.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecItemRow {
    /// Record number; blank when absent (destination auto-assigns).
    pub number: Option<i64>,
    /// Unique ShortName; empty when no name was available.
    pub short_name: String,
    /// Descriptive LongName.
    pub long_name: String,
    /// Item type; fixed default.
    pub item_type: String,
    /// Literal price.
    pub price: f64,
    /// Price method; fixed default.
    pub price_method: String,
    /// Tax group reference; left blank for manual entry.
    pub tax_group_name: Option<String>,
    /// Category reference; left blank for manual entry.
    pub category_name: Option<String>,
    /// Exactly ten modifier-group reference slots (group ShortName or
    /// empty).
    pub modifier_group_refs: Vec<Option<String>>,
}

/// One `ModifierGroup_Items` sheet row (columns A-M).
///
/// Only the first slot of a group carries the group's own number, ShortName
/// and LongName; subsequent slots leave columns A-G blank and carry only
/// the member reference. Every slot carries the column-H group reference.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecModifierGroupSlotRow {
    /// Column A: group number, header slot only.
    pub number: Option<i64>,
    /// Column A: operator note, first spacer slot only.
    pub note: Option<String>,
    /// Column B: group ShortName, header slot only.
    pub short_name: Option<String>,
    /// Column C: group LongName, header slot only.
    pub long_name: Option<String>,
    /// Column D: minimum selections; left blank for manual entry.
    pub min_selections: Option<i64>,
    /// Column E: maximum selections; left blank for manual entry.
    pub max_selections: Option<i64>,
    /// Column F: free selections; left blank for manual entry.
    pub free_selections: Option<i64>,
    /// Column G: flow flag; left blank for manual entry.
    pub flow: Option<i64>,
    /// Column H: owning group reference (ShortName), on every slot.
    pub group_ref: String,
    /// Column I: member item reference (ShortName) when the slot is bound.
    pub item_ref: Option<String>,
    /// Column J: price cell.
    pub price: EnumPriceCell,
    /// Column K: button grid row.
    pub row_grid: usize,
    /// Column L: button grid column.
    pub col_grid: usize,
    /// Column M: price method when the slot is bound.
    pub price_method: Option<String>,
}

/// One `Submenu` sheet row.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecSubmenuRow {
    /// Record number; blank when absent.
    pub number: Option<i64>,
    /// Unique ShortName.
    pub short_name: String,
    /// Descriptive LongName.
    pub long_name: String,
}

/// One `SubmenuItem` sheet row.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecSubmenuItemRow {
    /// Owning submenu reference (ShortName).
    pub submenu_ref: String,
    /// Button type; fixed default.
    pub button_type: String,
    /// Item reference (ShortName; degraded passthrough when unvalidated).
    pub item_ref: String,
    /// Price method; fixed default.
    pub price_method: String,
    /// Button grid row.
    pub row_grid: usize,
    /// Button grid column.
    pub col_grid: usize,
    /// Price cell (lookup sentinel).
    pub price: EnumPriceCell,
}

/// Assembled row sets keyed by destination sheet.
///
/// The renderer owns the always-empty compatibility sheets (`Menu`,
/// `Category`, `TaxGroup`, `MenuSubmenu`, `ModifierGroup`); no rows are
/// ever produced for them here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecMenuRowSets {
    /// `Item` sheet rows.
    pub items: Vec<SpecItemRow>,
    /// `ModifierGroup_Items` sheet rows.
    pub modifier_group_items: Vec<SpecModifierGroupSlotRow>,
    /// `Submenu` sheet rows.
    pub submenus: Vec<SpecSubmenuRow>,
    /// `SubmenuItem` sheet rows.
    pub submenu_items: Vec<SpecSubmenuItemRow>,
}

impl SpecMenuRowSets {
    /// Whether no rows were assembled at all.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
            && self.modifier_group_items.is_empty()
            && self.submenus.is_empty()
            && self.submenu_items.is_empty()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
