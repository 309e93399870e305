//! Import-workbook constants: sheet set, column contracts, template
//! defaults.

/// Destination sheet names in workbook order. The import template expects
/// every one of these to exist, even the ones this pipeline never fills.
pub const TUP_SHEET_NAMES: [&str; 9] = [
    "Item",
    "Submenu",
    "SubmenuItem",
    "ModifierGroup_Items",
    "Menu",
    "Category",
    "TaxGroup",
    "MenuSubmenu",
    "ModifierGroup",
];

/// Sheets that stay empty for destination-format compatibility.
pub const TUP_SHEET_NAMES_ALWAYS_EMPTY: [&str; 5] =
    ["Menu", "Category", "TaxGroup", "MenuSubmenu", "ModifierGroup"];

/// `Item` sheet header row.
pub const TUP_HEADER_ITEM: [&str; 18] = [
    "Number",
    "ShortName",
    "LongName",
    "Type",
    "Price",
    "PriceMethod",
    "TaxGroupName",
    "CategoryName",
    "ModifierGroup1",
    "ModifierGroup2",
    "ModifierGroup3",
    "ModifierGroup4",
    "ModifierGroup5",
    "ModifierGroup6",
    "ModifierGroup7",
    "ModifierGroup8",
    "ModifierGroup9",
    "ModifierGroup10",
];

/// `Submenu` sheet header row.
pub const TUP_HEADER_SUBMENU: [&str; 3] = ["Number", "ShortName", "LongName"];

/// `SubmenuItem` sheet header row.
pub const TUP_HEADER_SUBMENU_ITEM: [&str; 7] = [
    "SubmenuName",
    "Type",
    "ItemName",
    "PriceMethod",
    "Row",
    "Column",
    "Price",
];

/// `ModifierGroup_Items` sheet header row (columns A-M).
pub const TUP_HEADER_MODIFIER_GROUP_ITEMS: [&str; 13] = [
    "Number",
    "ShortName",
    "LongName",
    "Min",
    "Max",
    "Free",
    "Flow",
    "ModifierGroupName",
    "ItemName",
    "Price",
    "Row",
    "Column",
    "PriceMethod",
];

/// `Menu` sheet header row.
pub const TUP_HEADER_MENU: [&str; 3] = ["Number", "ShortName", "LongName"];

/// `Category` sheet header row.
pub const TUP_HEADER_CATEGORY: [&str; 3] = ["Number", "ShortName", "LongName"];

/// `TaxGroup` sheet header row.
pub const TUP_HEADER_TAX_GROUP: [&str; 3] = ["Number", "ShortName", "LongName"];

/// `MenuSubmenu` sheet header row.
pub const TUP_HEADER_MENU_SUBMENU: [&str; 3] =
    ["MenuName", "SubmenuName", "ButtonPositionIndex"];

/// `ModifierGroup` sheet header row (group headers, import-side).
pub const TUP_HEADER_MODIFIER_GROUP: [&str; 7] =
    ["Number", "ShortName", "LongName", "Min", "Max", "Free", "Flow"];

/// Guide notes written into the second row of the blank template.
pub const TUP_GUIDE_NOTES_ITEM: [&str; 8] = [
    "Auto-ID",
    "Max 15 chars",
    "Max 23 chars (Full Name)",
    "Standard",
    "0.00",
    "Item Price",
    "Look up Tax Group",
    "Look up Category",
];

/// Guide notes for the `SubmenuItem` sheet of the blank template.
pub const TUP_GUIDE_NOTES_SUBMENU_ITEM: [&str; 7] = [
    "Lookup Submenu",
    "Item Button",
    "Lookup Item",
    "Item Price",
    "0-6 (Row)",
    "0-2 (Col)",
    "=VLOOKUP_PRICE",
];

/// Guide notes for the `ModifierGroup_Items` sheet of the blank template.
pub const TUP_GUIDE_NOTES_MODIFIER_GROUP_ITEMS: [&str; 13] = [
    "Auto-ID",
    "Max 15",
    "Max 23",
    "Min",
    "Max",
    "Free",
    "Flow",
    "Copy Name",
    "Lookup Item",
    "=VLOOKUP_PRICE",
    "0-6",
    "0-2",
    "Item Price",
];

/// Sheet protection password carried over from the import template.
pub const C_PASSWORD_SHEET_DEFAULT: &str = "5dcr47!9";

/// Last 1-based row left unlocked for operator entry.
pub const N_ROW_UNLOCKED_MAX: u32 = 1_500;
/// Number of columns left unlocked for operator entry.
pub const N_NCOLS_UNLOCKED: u16 = 20;
/// Last 1-based row scanned by list validations on small sheets.
pub const N_ROW_LOOKUP_SMALL_MAX: u32 = 500;
/// Last 1-based row scanned by list validations on the `Item` sheet.
pub const N_ROW_LOOKUP_ITEM_MAX: u32 = 2_000;
