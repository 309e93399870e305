//! Pure row-to-cell conversion and formula helpers.
//!
//! Everything here is free of workbook state so the column contracts can be
//! asserted without serializing a file.

use menukit_core::{
    EnumPriceCell, SpecItemRow, SpecModifierGroupSlotRow, SpecSubmenuItemRow, SpecSubmenuRow,
};

use crate::spec::EnumSheetCell;

////////////////////////////////////////////////////////////////////////////////
// #region FormulaHelpers

/// Build the cross-sheet price lookup formula for a bound member slot.
///
/// Looks the item reference up in the `Item` sheet's ShortName column and
/// returns its price; resolves to 0.00 while the reference is unmatched.
pub fn derive_item_price_lookup_formula(cell_item_ref: &str) -> String {
    format!("=IFERROR(VLOOKUP({cell_item_ref}, Item!$B:$E, 4, FALSE), 0.00)")
}

/// Build a list-validation source range on another sheet.
pub fn derive_list_range_formula(sheet_name: &str, col_letter: &str, row_max: u32) -> String {
    format!("{sheet_name}!${col_letter}$2:${col_letter}${row_max}")
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RowConversion

fn _convert_optional_number(value: Option<i64>) -> EnumSheetCell {
    match value {
        Some(v) => EnumSheetCell::Number(v as f64),
        None => EnumSheetCell::None,
    }
}

fn _convert_optional_text(value: Option<&str>) -> EnumSheetCell {
    match value {
        Some(v) => EnumSheetCell::Text(v.to_string()),
        None => EnumSheetCell::None,
    }
}

fn _convert_price_cell(value: EnumPriceCell, col_item_ref: &'static str) -> EnumSheetCell {
    match value {
        EnumPriceCell::None => EnumSheetCell::None,
        EnumPriceCell::Literal(v) => EnumSheetCell::Number(v),
        EnumPriceCell::LookupItemPrice => EnumSheetCell::PriceLookup { col_item_ref },
    }
}

/// Convert one `Item` row into its 18 sheet cells.
pub fn convert_item_row(row: &SpecItemRow) -> Vec<EnumSheetCell> {
    let mut l_cells = vec![
        _convert_optional_number(row.number),
        EnumSheetCell::Text(row.short_name.clone()),
        EnumSheetCell::Text(row.long_name.clone()),
        EnumSheetCell::Text(row.item_type.clone()),
        EnumSheetCell::Number(row.price),
        EnumSheetCell::Text(row.price_method.clone()),
        _convert_optional_text(row.tax_group_name.as_deref()),
        _convert_optional_text(row.category_name.as_deref()),
    ];
    for ref_group in &row.modifier_group_refs {
        l_cells.push(_convert_optional_text(ref_group.as_deref()));
    }
    l_cells
}

/// Convert one `ModifierGroup_Items` row into its 13 sheet cells (A-M).
///
/// Column A carries the group number on the header slot and the operator
/// note on the first spacer slot; it stays blank everywhere else.
pub fn convert_modifier_group_slot_row(row: &SpecModifierGroupSlotRow) -> Vec<EnumSheetCell> {
    let cell_col_a = match (&row.number, &row.note) {
        (Some(number), _) => EnumSheetCell::Number(*number as f64),
        (None, Some(note)) => EnumSheetCell::Note(note.clone()),
        (None, None) => EnumSheetCell::None,
    };

    vec![
        cell_col_a,
        _convert_optional_text(row.short_name.as_deref()),
        _convert_optional_text(row.long_name.as_deref()),
        _convert_optional_number(row.min_selections),
        _convert_optional_number(row.max_selections),
        _convert_optional_number(row.free_selections),
        _convert_optional_number(row.flow),
        EnumSheetCell::Text(row.group_ref.clone()),
        _convert_optional_text(row.item_ref.as_deref()),
        _convert_price_cell(row.price, "I"),
        EnumSheetCell::Number(row.row_grid as f64),
        EnumSheetCell::Number(row.col_grid as f64),
        _convert_optional_text(row.price_method.as_deref()),
    ]
}

/// Convert one `Submenu` row into its 3 sheet cells.
pub fn convert_submenu_row(row: &SpecSubmenuRow) -> Vec<EnumSheetCell> {
    vec![
        _convert_optional_number(row.number),
        EnumSheetCell::Text(row.short_name.clone()),
        EnumSheetCell::Text(row.long_name.clone()),
    ]
}

/// Convert one `SubmenuItem` row into its 7 sheet cells.
pub fn convert_submenu_item_row(row: &SpecSubmenuItemRow) -> Vec<EnumSheetCell> {
    vec![
        EnumSheetCell::Text(row.submenu_ref.clone()),
        EnumSheetCell::Text(row.button_type.clone()),
        EnumSheetCell::Text(row.item_ref.clone()),
        EnumSheetCell::Text(row.price_method.clone()),
        EnumSheetCell::Number(row.row_grid as f64),
        EnumSheetCell::Number(row.col_grid as f64),
        _convert_price_cell(row.price, "C"),
    ]
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
