//! `menukit_core`:
//! Name-uniqueness and cross-reference resolution engine for POS menu
//! imports.
//!
//! Takes the loosely-structured JSON document produced by an upstream
//! extraction step and deterministically assembles the inter-referencing
//! row sets the import workbook needs, with collision-free length-bounded
//! display names wired across them.
//!
//! Architecture:
//! - `conf`     : constants and fixed destination-format defaults
//! - `menu`     : raw input document schema and JSON boundary parsing
//! - `spec`     : assembled record-set models
//! - `util`     : pure helper functions
//! - `resolver` : collision-free display-name resolution
//! - `report`   : assembly report models
//! - `assemble` : multi-phase record assembly
pub mod assemble;
pub mod conf;
pub mod menu;
pub mod report;
pub mod resolver;
pub mod spec;
pub mod util;

pub use assemble::assemble_menu_rows;
pub use conf::{
    C_NOTE_INSERT_ROWS, C_PRICE_METHOD_DEFAULT, C_TYPE_ITEM_DEFAULT, C_TYPE_SUBMENU_BUTTON,
    N_LEN_LONG_NAME_MAX, N_LEN_SHORT_NAME_MAX, N_NCOLS_BUTTON_GRID, N_NUM_MODIFIER_GROUP_MAX,
    N_NUM_MODIFIER_GROUP_MIN, N_NUM_MODIFIER_ITEM_BASE, N_REFS_MODIFIER_MAX, N_SLOTS_GROUP_MIN,
};
pub use menu::{
    EnumRawScalar, MenuParseError, SpecRawMenuDocument, SpecRawMenuItem, SpecRawModifierGroup,
    SpecRawModifierGroupItem, SpecRawSubmenu, convert_scalar_to_number, convert_scalar_to_price,
    derive_json_payload, parse_menu_document,
};
pub use report::SpecAssemblyReport;
pub use resolver::{EnumEntityKind, NameResolver, SpecResolvedName};
pub use spec::{
    EnumPriceCell, SpecItemRow, SpecMenuRowSets, SpecModifierGroupSlotRow, SpecSubmenuItemRow,
    SpecSubmenuRow,
};
pub use util::{derive_button_position, sanitize_display_text, truncate_display_text};
