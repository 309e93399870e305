//! Collision-free display-name resolution, scoped to one input document.
//!
//! The destination format keys every cross-sheet reference on a ShortName,
//! so ShortNames must be unique across items, modifier groups and submenus
//! alike. One [`NameResolver`] instance covers exactly one document; sharing
//! an instance across documents would leak collisions between unrelated
//! menus.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::conf::{N_LEN_LONG_NAME_MAX, N_LEN_SHORT_NAME_MAX, N_SUFFIX_COLLISION_MAX};
use crate::util::{sanitize_display_text, truncate_display_text};

////////////////////////////////////////////////////////////////////////////////
// #region ResolvedNameModels

/// Entity namespace tag; informational only.
///
/// Uniqueness is global across all kinds because the destination format
/// uses a single namespace for cross-sheet lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumEntityKind {
    /// Menu item (top-level or modifier group member).
    Item,
    /// Modifier group.
    ModifierGroup,
    /// Submenu.
    Submenu,
}

impl EnumEntityKind {
    /// Stable lowercase tag for diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::ModifierGroup => "modifier_group",
            Self::Submenu => "submenu",
        }
    }
}

/// Resolved display-name pair for one original string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecResolvedName {
    /// Unique lookup identifier, at most 15 characters. Empty when the
    /// original string sanitized to nothing.
    pub short_name: String,
    /// Descriptive label, at most 23 characters; not unique.
    pub long_name: String,
}

impl SpecResolvedName {
    /// Whether no usable name was available.
    pub fn is_empty(&self) -> bool {
        self.short_name.is_empty() && self.long_name.is_empty()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region NameResolver

/// Per-document name resolution table.
#[derive(Debug, Default)]
pub struct NameResolver {
    /// Memoized results keyed by the original (unsanitized) string.
    dict_resolved_by_raw: BTreeMap<String, SpecResolvedName>,
    /// Original string owning each assigned ShortName.
    dict_raw_by_short_name: BTreeMap<String, String>,
    /// First-registered ShortName per sanitized 15-character prefix, for
    /// the reverse-lookup fallback.
    dict_short_by_sanitized_prefix: BTreeMap<String, String>,
    /// Degenerate-case diagnostics accumulated during resolution.
    warnings: Vec<String>,
}

impl NameResolver {
    /// Create an empty resolution table for one document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve an original string into its ShortName/LongName pair.
    ///
    /// Resolving the identical original string again returns the previously
    /// assigned pair without consuming a new suffix slot. An input that
    /// sanitizes to nothing resolves to the empty pair; callers must treat
    /// that as "no name available".
    pub fn resolve(&mut self, raw_name: &str, kind: EnumEntityKind) -> SpecResolvedName {
        if let Some(resolved) = self.dict_resolved_by_raw.get(raw_name) {
            return resolved.clone();
        }

        let c_sanitized = sanitize_display_text(raw_name);
        let resolved = if c_sanitized.is_empty() {
            SpecResolvedName {
                short_name: String::new(),
                long_name: String::new(),
            }
        } else {
            SpecResolvedName {
                short_name: self.derive_unique_short_name(&c_sanitized, kind),
                long_name: truncate_display_text(&c_sanitized, N_LEN_LONG_NAME_MAX),
            }
        };

        if !resolved.short_name.is_empty() {
            self.dict_raw_by_short_name
                .insert(resolved.short_name.clone(), raw_name.to_string());
            let c_prefix = truncate_display_text(&c_sanitized, N_LEN_SHORT_NAME_MAX);
            self.dict_short_by_sanitized_prefix
                .entry(c_prefix)
                .or_insert_with(|| resolved.short_name.clone());
        }
        self.dict_resolved_by_raw
            .insert(raw_name.to_string(), resolved.clone());

        resolved
    }

    /// Reverse-lookup the ShortName for a referencing string.
    ///
    /// Tries an exact original-string match first, then a match on the
    /// first 15 characters of the sanitized forms (tolerates minor phrasing
    /// drift between the reference and the referenced entity's name). When
    /// nothing matches, returns the sanitized/truncated input as a
    /// best-effort degraded value; callers must treat that result as not
    /// validated, since it may dangle downstream.
    pub fn lookup_short_name(&self, raw_name: &str) -> String {
        if let Some(resolved) = self.dict_resolved_by_raw.get(raw_name) {
            return resolved.short_name.clone();
        }

        let c_probe =
            truncate_display_text(&sanitize_display_text(raw_name), N_LEN_SHORT_NAME_MAX);
        if let Some(c_short) = self.dict_short_by_sanitized_prefix.get(&c_probe) {
            return c_short.clone();
        }

        c_probe
    }

    /// Whether `short_name` was assigned to some resolved original string.
    pub fn is_registered_short_name(&self, short_name: &str) -> bool {
        self.dict_raw_by_short_name.contains_key(short_name)
    }

    /// Drain accumulated degenerate-case warnings.
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    fn derive_unique_short_name(&mut self, sanitized: &str, kind: EnumEntityKind) -> String {
        let c_base = truncate_display_text(sanitized, N_LEN_SHORT_NAME_MAX);
        if !self.dict_raw_by_short_name.contains_key(&c_base) {
            return c_base;
        }

        // Shrinking-prefix suffix ladder: 14-char prefix + 1..=9, then
        // 13-char prefix + 10..=99, then 12-char prefix + 100..=999.
        let mut n_suffix: u32 = 1;
        while n_suffix <= N_SUFFIX_COLLISION_MAX {
            let n_digits = n_suffix.to_string().len();
            let c_prefix = truncate_display_text(sanitized, N_LEN_SHORT_NAME_MAX - n_digits);
            let c_candidate = format!("{c_prefix}{n_suffix}");
            if !self.dict_raw_by_short_name.contains_key(&c_candidate) {
                return c_candidate;
            }
            n_suffix += 1;
        }

        let c_fallback = derive_degenerate_short_name(sanitized);
        let c_msg = format!(
            "ShortName suffix space exhausted for {} name {sanitized:?}; \
             using time-based fallback {c_fallback:?} (uniqueness not guaranteed).",
            kind.as_str()
        );
        log::warn!("{c_msg}");
        self.warnings.push(c_msg);
        c_fallback
    }
}

/// Time-based fallback name used after suffix exhaustion. Highly likely
/// unique, not guaranteed.
fn derive_degenerate_short_name(sanitized: &str) -> String {
    let n_secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let c_suffix = format!("{:05}", n_secs % 100_000);
    let c_prefix =
        truncate_display_text(sanitized, N_LEN_SHORT_NAME_MAX.saturating_sub(c_suffix.len()));
    format!("{c_prefix}{c_suffix}")
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_truncates_short_and_long_names() {
        let mut resolver = NameResolver::new();
        let resolved = resolver.resolve("Grilled Chicken Caesar Salad", EnumEntityKind::Item);
        assert_eq!(resolved.short_name, "Grilled Chicken");
        assert_eq!(resolved.long_name, "Grilled Chicken Caesar ");
        assert_eq!(resolved.short_name.chars().count(), 15);
        assert_eq!(resolved.long_name.chars().count(), 23);
    }

    #[test]
    fn test_resolve_is_memoized_per_original_string() {
        let mut resolver = NameResolver::new();
        let first = resolver.resolve("Cheeseburger", EnumEntityKind::Item);
        let second = resolver.resolve("Cheeseburger", EnumEntityKind::Item);
        assert_eq!(first, second);
        assert_eq!(first.short_name, "Cheeseburger");
    }

    #[test]
    fn test_resolve_distinct_originals_never_share_a_short_name() {
        let mut resolver = NameResolver::new();
        let first = resolver.resolve("Cheeseburger", EnumEntityKind::Item);
        let second = resolver.resolve("Cheeseburger Deluxe", EnumEntityKind::Item);
        assert_ne!(first.short_name, second.short_name);
    }

    #[test]
    fn test_resolve_breaks_collisions_with_numeric_suffixes() {
        let mut resolver = NameResolver::new();
        let first = resolver.resolve("Cheeseburger Deluxe", EnumEntityKind::Item);
        let second = resolver.resolve("Cheeseburger Deluxe XL", EnumEntityKind::Item);
        assert_eq!(first.short_name, "Cheeseburger De");
        assert_eq!(second.short_name, "Cheeseburger D1");

        let third = resolver.resolve("Cheeseburger Deluxe XXL", EnumEntityKind::Item);
        assert_eq!(third.short_name, "Cheeseburger D2");
    }

    #[test]
    fn test_resolve_widens_suffix_after_nine_collisions() {
        let mut resolver = NameResolver::new();
        for n_idx in 0..=10 {
            resolver.resolve(
                &format!("Classic Margherita Pizza variant {n_idx}"),
                EnumEntityKind::Item,
            );
        }
        // Base, then 1-digit suffixes 1..=9 over a 14-char prefix, then the
        // first 2-digit suffix over a 13-char prefix.
        let resolved = resolver.resolve("Classic Margherita Pizza variant 10", EnumEntityKind::Item);
        assert_eq!(resolved.short_name, "Classic Margh10");

        let mut resolver = NameResolver::new();
        resolver.resolve("Classic Margherita Pizza", EnumEntityKind::Item);
        let second = resolver.resolve("Classic Margherita Pizzas", EnumEntityKind::Item);
        assert_eq!(second.short_name, "Classic Marghe1");
    }

    #[test]
    fn test_resolve_uniqueness_holds_across_entity_kinds() {
        let mut resolver = NameResolver::new();
        let item = resolver.resolve("Toppings Supreme", EnumEntityKind::Item);
        let group = resolver.resolve("Toppings Supreme Deluxe", EnumEntityKind::ModifierGroup);
        assert_ne!(item.short_name, group.short_name);
    }

    #[test]
    fn test_resolve_empty_after_sanitization_yields_empty_pair() {
        let mut resolver = NameResolver::new();
        let resolved = resolver.resolve("***", EnumEntityKind::Submenu);
        assert!(resolved.is_empty());

        // Empty results never occupy a ShortName slot.
        let other = resolver.resolve("!!!", EnumEntityKind::Submenu);
        assert!(other.is_empty());
    }

    #[test]
    fn test_lookup_short_name_exact_match() {
        let mut resolver = NameResolver::new();
        resolver.resolve("Burger Toppings", EnumEntityKind::ModifierGroup);
        assert_eq!(resolver.lookup_short_name("Burger Toppings"), "Burger Toppings");
    }

    #[test]
    fn test_lookup_short_name_falls_back_to_sanitized_prefix() {
        let mut resolver = NameResolver::new();
        let resolved =
            resolver.resolve("Burger Toppings & Extras", EnumEntityKind::ModifierGroup);
        // Phrasing drift: same first 15 sanitized characters, different tail.
        assert_eq!(
            resolver.lookup_short_name("Burger Toppings and Extras"),
            resolved.short_name
        );
    }

    #[test]
    fn test_lookup_short_name_degrades_to_sanitized_truncation() {
        let resolver = NameResolver::new();
        assert_eq!(
            resolver.lookup_short_name("Unknown Seasonal Special"),
            "Unknown Seasona"
        );
        assert!(!resolver.is_registered_short_name("Unknown Seasona"));
    }

    #[test]
    fn test_exhausted_suffix_space_degrades_without_panicking() {
        let mut resolver = NameResolver::new();
        for n_idx in 0..=(N_SUFFIX_COLLISION_MAX + 1) {
            resolver.resolve(
                &format!("Identical Prefix Collision {n_idx}"),
                EnumEntityKind::Item,
            );
        }
        let resolved = resolver.resolve("Identical Prefix Collision FIN", EnumEntityKind::Item);
        assert!(!resolved.short_name.is_empty());
        assert!(resolved.short_name.chars().count() <= N_LEN_SHORT_NAME_MAX);
        assert!(!resolver.take_warnings().is_empty());
    }
}
