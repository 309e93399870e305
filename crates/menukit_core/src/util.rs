//! Stateless helper utilities shared by the resolver and assembler.

use std::sync::LazyLock;

use regex::Regex;

use crate::conf::{C_PATTERN_TEXT_UNSAFE, N_NCOLS_BUTTON_GRID};

static RE_TEXT_UNSAFE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(C_PATTERN_TEXT_UNSAFE).expect("C_PATTERN_TEXT_UNSAFE must be a valid pattern")
});

/// Strip characters outside the safe display set and trim whitespace.
///
/// The safe set covers letters, digits, whitespace, basic punctuation and
/// accented Latin letters; everything else (hidden control characters,
/// emoji, currency symbols) is removed.
pub fn sanitize_display_text(text: &str) -> String {
    RE_TEXT_UNSAFE.replace_all(text, "").trim().to_string()
}

/// Truncate to at most `len_max` characters (code points, not bytes).
pub fn truncate_display_text(text: &str, len_max: usize) -> String {
    text.chars().take(len_max).collect()
}

/// Derive the button-grid cell for a member slot index.
///
/// Layout is row-major over a fixed 3-column grid: `(index / 3, index % 3)`.
/// Injective on the index domain, so members of one parent never share a
/// cell as long as indices are assigned without gaps or reuse.
pub fn derive_button_position(idx_slot: usize) -> (usize, usize) {
    (idx_slot / N_NCOLS_BUTTON_GRID, idx_slot % N_NCOLS_BUTTON_GRID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_display_text_strips_unsafe_and_trims() {
        assert_eq!(sanitize_display_text("  Caesar Salad  "), "Caesar Salad");
        assert_eq!(
            sanitize_display_text("Mom's Fries (large) & Dip"),
            "Mom's Fries (large) & Dip"
        );
        assert_eq!(sanitize_display_text("Tacos\u{200b}*!?"), "Tacos");
        assert_eq!(sanitize_display_text("Crème Brûlée"), "Crème Brûlée");
        assert_eq!(sanitize_display_text("12\" Pizza"), "12 Pizza");
        assert_eq!(sanitize_display_text("***"), "");
    }

    #[test]
    fn test_truncate_display_text_counts_code_points() {
        assert_eq!(truncate_display_text("Cheeseburger Deluxe", 15), "Cheeseburger De");
        assert_eq!(truncate_display_text("Crème", 3), "Crè");
        assert_eq!(truncate_display_text("abc", 15), "abc");
    }

    #[test]
    fn test_derive_button_position_is_row_major_over_three_columns() {
        assert_eq!(derive_button_position(0), (0, 0));
        assert_eq!(derive_button_position(1), (0, 1));
        assert_eq!(derive_button_position(2), (0, 2));
        assert_eq!(derive_button_position(3), (1, 0));
        assert_eq!(derive_button_position(7), (2, 1));
    }

    #[test]
    fn test_derive_button_position_is_injective_over_index_range() {
        let mut set_positions = std::collections::BTreeSet::new();
        for n_idx in 0..21 {
            set_positions.insert(derive_button_position(n_idx));
        }
        assert_eq!(set_positions.len(), 21);
    }
}
