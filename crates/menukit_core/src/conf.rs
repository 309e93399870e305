//! Core constants and fixed destination-format defaults.

/// Maximum ShortName length in characters.
pub const N_LEN_SHORT_NAME_MAX: usize = 15;
/// Maximum LongName length in characters.
pub const N_LEN_LONG_NAME_MAX: usize = 23;

/// Lowest valid modifier group number.
pub const N_NUM_MODIFIER_GROUP_MIN: i64 = 10_000;
/// Highest valid modifier group number.
pub const N_NUM_MODIFIER_GROUP_MAX: i64 = 19_999;
/// Spacing between auto-assigned modifier group numbers; leaves room for
/// manual insertion between them without collision.
pub const N_STEP_MODIFIER_GROUP_NUM: i64 = 10;
/// First auto-assigned number for modifier member items.
pub const N_NUM_MODIFIER_ITEM_BASE: i64 = 20_000;

/// Minimum member slots emitted per modifier group; shorter groups are
/// padded with empty slots to reserve room for manual entry.
pub const N_SLOTS_GROUP_MIN: usize = 6;
/// Modifier-group reference slots per item row.
pub const N_REFS_MODIFIER_MAX: usize = 10;
/// Button grid column count.
pub const N_NCOLS_BUTTON_GRID: usize = 3;
/// Largest numeric collision suffix tried before the degenerate fallback.
pub const N_SUFFIX_COLLISION_MAX: u32 = 999;

/// Default item type.
pub const C_TYPE_ITEM_DEFAULT: &str = "Standard";
/// Default price method.
pub const C_PRICE_METHOD_DEFAULT: &str = "Item Price";
/// Button type for submenu member slots.
pub const C_TYPE_SUBMENU_BUTTON: &str = "Item Button";
/// Operator note carried by the first spacer slot of each modifier group.
pub const C_NOTE_INSERT_ROWS: &str = "<- Right Click Number to Insert Rows";

/// Characters outside the safe display set (stripped during sanitization).
pub const C_PATTERN_TEXT_UNSAFE: &str = r"[^a-zA-Z0-9\s.,'\-()&/<> À-ÿ]";
