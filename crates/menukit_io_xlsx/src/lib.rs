//! `menukit_io_xlsx`:
//! Import-workbook rendering sink for assembled menu row sets.
//!
//! Consumes the row sets produced by `menukit_core` and renders them into
//! the destination template's sheet/column contract, including lookups,
//! protection and validation rules.
//!
//! - `conf`   : sheet set, column contracts and template defaults
//! - `spec`   : renderer options, cell models and report
//! - `util`   : pure row-to-cell conversion and formula helpers
//! - `writer` : workbook renderer
pub mod conf;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    C_PASSWORD_SHEET_DEFAULT, N_NCOLS_UNLOCKED, N_ROW_LOOKUP_ITEM_MAX, N_ROW_LOOKUP_SMALL_MAX,
    N_ROW_UNLOCKED_MAX, TUP_SHEET_NAMES, TUP_SHEET_NAMES_ALWAYS_EMPTY,
};
pub use spec::{EnumSheetCell, SpecRenderReport, SpecWorkbookRenderOptions};
pub use util::{
    convert_item_row, convert_modifier_group_slot_row, convert_submenu_item_row,
    convert_submenu_row, derive_item_price_lookup_formula, derive_list_range_formula,
};
pub use writer::WorkbookRenderer;
