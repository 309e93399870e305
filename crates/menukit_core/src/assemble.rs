//! Multi-phase record assembly from a raw menu document.
//!
//! Phase order is load-bearing and must not be reordered: later phases
//! depend on name assignments and record indices created earlier.
//! 1. Pre-register names (groups, group members, items, submenus).
//! 2. Materialize item rows, modifier group members first (auto-numbered).
//! 3. Materialize modifier group slots (merged header + padded list).
//! 4. Back-fill item modifier references against materialized groups.
//! 5. Materialize submenus and their member slots via reverse lookup.
//!
//! Assembly is fail-open: malformed numerics recover with documented
//! defaults, missing names proceed as empty names, and no error escapes
//! for any input document.

use std::collections::BTreeSet;

use crate::conf::{
    C_NOTE_INSERT_ROWS, C_PRICE_METHOD_DEFAULT, C_TYPE_ITEM_DEFAULT, C_TYPE_SUBMENU_BUTTON,
    N_NUM_MODIFIER_GROUP_MAX, N_NUM_MODIFIER_GROUP_MIN, N_NUM_MODIFIER_ITEM_BASE,
    N_REFS_MODIFIER_MAX, N_SLOTS_GROUP_MIN, N_STEP_MODIFIER_GROUP_NUM,
};
use crate::menu::{SpecRawMenuDocument, convert_scalar_to_number, convert_scalar_to_price};
use crate::report::SpecAssemblyReport;
use crate::resolver::{EnumEntityKind, NameResolver};
use crate::spec::{
    EnumPriceCell, SpecItemRow, SpecMenuRowSets, SpecModifierGroupSlotRow, SpecSubmenuItemRow,
    SpecSubmenuRow,
};
use crate::util::derive_button_position;

/// Assemble destination row sets from one raw menu document.
///
/// Builds a fresh [`NameResolver`] scoped to this document, runs the fixed
/// phase sequence, and returns the row sets together with an assembly
/// report. Re-running on the same document produces the same entities.
pub fn assemble_menu_rows(doc: &SpecRawMenuDocument) -> (SpecMenuRowSets, SpecAssemblyReport) {
    let mut resolver = NameResolver::new();
    let mut rows = SpecMenuRowSets::default();
    let mut report = SpecAssemblyReport::default();

    _register_names(doc, &mut resolver);
    _materialize_items(doc, &mut resolver, &mut rows, &mut report);
    let set_group_refs = _materialize_modifier_groups(doc, &mut resolver, &mut rows, &mut report);
    _apply_item_modifier_refs(doc, &resolver, &set_group_refs, &mut rows, &mut report);
    _materialize_submenus(doc, &mut resolver, &mut rows, &mut report);

    for c_warning in resolver.take_warnings() {
        report.warn(c_warning);
    }

    (rows, report)
}

/// Phase 1: assign ShortNames before any cross-referencing happens.
///
/// Produces no records, only the resolver's internal table. Order: modifier
/// groups, their member items, top-level items, submenus.
fn _register_names(doc: &SpecRawMenuDocument, resolver: &mut NameResolver) {
    for group in &doc.modifier_groups {
        resolver.resolve(
            group.name.as_deref().unwrap_or(""),
            EnumEntityKind::ModifierGroup,
        );
    }
    for group in &doc.modifier_groups {
        for member in &group.items {
            resolver.resolve(member.name.as_deref().unwrap_or(""), EnumEntityKind::Item);
        }
    }
    for item in &doc.items {
        resolver.resolve(item.name.as_deref().unwrap_or(""), EnumEntityKind::Item);
    }
    for submenu in &doc.submenus {
        resolver.resolve(submenu.name.as_deref().unwrap_or(""), EnumEntityKind::Submenu);
    }
}

/// Phase 2: emit item rows.
///
/// Modifier group member items first, auto-numbered from the reserved base
/// in encounter order; then top-level items with passthrough numbers.
/// Modifier reference slots stay empty until phase 4.
fn _materialize_items(
    doc: &SpecRawMenuDocument,
    resolver: &mut NameResolver,
    rows: &mut SpecMenuRowSets,
    report: &mut SpecAssemblyReport,
) {
    let mut n_number_modifier_item = N_NUM_MODIFIER_ITEM_BASE;
    for group in &doc.modifier_groups {
        for member in &group.items {
            let resolved =
                resolver.resolve(member.name.as_deref().unwrap_or(""), EnumEntityKind::Item);
            rows.items.push(SpecItemRow {
                number: Some(n_number_modifier_item),
                short_name: resolved.short_name,
                long_name: resolved.long_name,
                item_type: C_TYPE_ITEM_DEFAULT.to_string(),
                price: convert_scalar_to_price(member.price.as_ref()),
                price_method: C_PRICE_METHOD_DEFAULT.to_string(),
                tax_group_name: None,
                category_name: None,
                modifier_group_refs: vec![None; N_REFS_MODIFIER_MAX],
            });
            n_number_modifier_item += 1;
            report.cnt_items_modifier += 1;
        }
    }

    for item in &doc.items {
        let resolved = resolver.resolve(item.name.as_deref().unwrap_or(""), EnumEntityKind::Item);
        rows.items.push(SpecItemRow {
            number: convert_scalar_to_number(item.number.as_ref()),
            short_name: resolved.short_name,
            long_name: resolved.long_name,
            item_type: C_TYPE_ITEM_DEFAULT.to_string(),
            price: convert_scalar_to_price(item.price.as_ref()),
            price_method: C_PRICE_METHOD_DEFAULT.to_string(),
            tax_group_name: None,
            category_name: None,
            modifier_group_refs: vec![None; N_REFS_MODIFIER_MAX],
        });
        report.cnt_items_top_level += 1;
    }
}

/// Phase 3: emit modifier group slots, merged-header layout.
///
/// Returns the set of materialized group ShortNames for phase 4.
fn _materialize_modifier_groups(
    doc: &SpecRawMenuDocument,
    resolver: &mut NameResolver,
    rows: &mut SpecMenuRowSets,
    report: &mut SpecAssemblyReport,
) -> BTreeSet<String> {
    let mut set_group_refs = BTreeSet::new();

    for (n_idx_group, group) in doc.modifier_groups.iter().enumerate() {
        let resolved_group = resolver.resolve(
            group.name.as_deref().unwrap_or(""),
            EnumEntityKind::ModifierGroup,
        );
        let n_number_group = derive_modifier_group_number(
            convert_scalar_to_number(group.number.as_ref()),
            n_idx_group,
        );

        let n_slots = usize::max(group.items.len(), N_SLOTS_GROUP_MIN);
        for n_idx_slot in 0..n_slots {
            let (n_row_grid, n_col_grid) = derive_button_position(n_idx_slot);

            let (item_ref, price, price_method) = match group.items.get(n_idx_slot) {
                Some(member) => {
                    let resolved_member =
                        resolver.resolve(member.name.as_deref().unwrap_or(""), EnumEntityKind::Item);
                    (
                        Some(resolved_member.short_name),
                        EnumPriceCell::LookupItemPrice,
                        Some(C_PRICE_METHOD_DEFAULT.to_string()),
                    )
                }
                None => (None, EnumPriceCell::None, None),
            };

            if n_idx_slot == 0 {
                // Merged header: group identity plus the first member.
                rows.modifier_group_items.push(SpecModifierGroupSlotRow {
                    number: Some(n_number_group),
                    note: None,
                    short_name: Some(resolved_group.short_name.clone()),
                    long_name: Some(resolved_group.long_name.clone()),
                    min_selections: None,
                    max_selections: None,
                    free_selections: None,
                    flow: None,
                    group_ref: resolved_group.short_name.clone(),
                    item_ref,
                    price,
                    row_grid: n_row_grid,
                    col_grid: n_col_grid,
                    price_method,
                });
            } else {
                rows.modifier_group_items.push(SpecModifierGroupSlotRow {
                    number: None,
                    note: if n_idx_slot == 1 {
                        Some(C_NOTE_INSERT_ROWS.to_string())
                    } else {
                        None
                    },
                    short_name: None,
                    long_name: None,
                    min_selections: None,
                    max_selections: None,
                    free_selections: None,
                    flow: None,
                    group_ref: resolved_group.short_name.clone(),
                    item_ref,
                    price,
                    row_grid: n_row_grid,
                    col_grid: n_col_grid,
                    price_method,
                });
            }
            report.cnt_modifier_slots += 1;
        }

        set_group_refs.insert(resolved_group.short_name);
        report.cnt_modifier_groups += 1;
    }

    set_group_refs
}

/// Validate a caller-supplied group number into the reserved range, else
/// auto-assign with spacing for manual insertion between neighbors.
fn derive_modifier_group_number(number_supplied: Option<i64>, idx_group: usize) -> i64 {
    match number_supplied {
        Some(n) if (N_NUM_MODIFIER_GROUP_MIN..=N_NUM_MODIFIER_GROUP_MAX).contains(&n) => n,
        _ => N_NUM_MODIFIER_GROUP_MIN + (idx_group as i64) * N_STEP_MODIFIER_GROUP_NUM,
    }
}

/// Phase 4: back-fill item modifier references.
///
/// A declared modifier name is included only when its resolved ShortName
/// belongs to a group materialized in phase 3; anything else is dropped.
/// At most ten references per item; the rest are truncated.
fn _apply_item_modifier_refs(
    doc: &SpecRawMenuDocument,
    resolver: &NameResolver,
    set_group_refs: &BTreeSet<String>,
    rows: &mut SpecMenuRowSets,
    report: &mut SpecAssemblyReport,
) {
    let n_offset: usize = doc.modifier_groups.iter().map(|group| group.items.len()).sum();

    for (n_idx_item, item) in doc.items.iter().enumerate() {
        let mut l_refs = Vec::new();
        for c_modifier_name in &item.modifiers {
            let c_short = resolver.lookup_short_name(c_modifier_name);
            if !set_group_refs.contains(&c_short) {
                report.cnt_refs_dropped += 1;
                log::warn!(
                    "Dropping modifier reference {c_modifier_name:?}: no materialized group."
                );
                report.warn(format!(
                    "Dropped modifier reference {c_modifier_name:?}: no materialized group."
                ));
                continue;
            }
            if l_refs.len() >= N_REFS_MODIFIER_MAX {
                report.cnt_refs_dropped += 1;
                report.warn(format!(
                    "Truncated modifier reference {c_modifier_name:?}: reference slots are full."
                ));
                continue;
            }
            l_refs.push(c_short);
        }

        let row = &mut rows.items[n_offset + n_idx_item];
        for (n_idx_ref, c_ref) in l_refs.into_iter().enumerate() {
            row.modifier_group_refs[n_idx_ref] = Some(c_ref);
        }
    }
}

/// Phase 5: emit submenu rows and their member slots.
///
/// Member names resolve through the reverse lookup; a name that never
/// resolves to a materialized record passes through degraded (sanitized and
/// truncated) rather than being dropped, and is counted in the report.
fn _materialize_submenus(
    doc: &SpecRawMenuDocument,
    resolver: &mut NameResolver,
    rows: &mut SpecMenuRowSets,
    report: &mut SpecAssemblyReport,
) {
    for submenu in &doc.submenus {
        let resolved = resolver.resolve(
            submenu.name.as_deref().unwrap_or(""),
            EnumEntityKind::Submenu,
        );
        rows.submenus.push(SpecSubmenuRow {
            number: convert_scalar_to_number(submenu.number.as_ref()),
            short_name: resolved.short_name.clone(),
            long_name: resolved.long_name.clone(),
        });
        report.cnt_submenus += 1;

        for (n_idx_member, c_item_name) in submenu.items.iter().enumerate() {
            let c_item_ref = resolver.lookup_short_name(c_item_name);
            if !resolver.is_registered_short_name(&c_item_ref) {
                report.cnt_refs_degraded += 1;
                log::warn!(
                    "Submenu {:?} references unknown item {c_item_name:?}; passing through.",
                    resolved.long_name
                );
                report.warn(format!(
                    "Submenu {:?} references unknown item {c_item_name:?}; \
                     passed through unvalidated.",
                    resolved.long_name
                ));
            }

            let (n_row_grid, n_col_grid) = derive_button_position(n_idx_member);
            rows.submenu_items.push(SpecSubmenuItemRow {
                submenu_ref: resolved.short_name.clone(),
                button_type: C_TYPE_SUBMENU_BUTTON.to_string(),
                item_ref: c_item_ref,
                price_method: C_PRICE_METHOD_DEFAULT.to_string(),
                row_grid: n_row_grid,
                col_grid: n_col_grid,
                price: EnumPriceCell::LookupItemPrice,
            });
            report.cnt_submenu_items += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::parse_menu_document;

    fn assemble(text: &str) -> (SpecMenuRowSets, SpecAssemblyReport) {
        assemble_menu_rows(&parse_menu_document(text).unwrap())
    }

    #[test]
    fn test_empty_document_produces_empty_row_sets() {
        let (rows, report) = assemble("{}");
        assert!(rows.is_empty());
        assert_eq!(report.cnt_items_top_level, 0);
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn test_colliding_item_names_get_distinct_short_names() {
        let (rows, _) = assemble(
            "{\"items\":[{\"name\":\"Cheeseburger\",\"price\":9.5},\
             {\"name\":\"Cheeseburger Deluxe\",\"price\":11.0}]}",
        );
        assert_eq!(rows.items.len(), 2);
        assert_ne!(rows.items[0].short_name, rows.items[1].short_name);
        assert_eq!(rows.items[0].price, 9.5);
        assert_eq!(rows.items[1].price, 11.0);
    }

    #[test]
    fn test_unknown_modifier_reference_is_silently_dropped() {
        let (rows, report) = assemble(
            "{\"items\":[{\"name\":\"Burger\",\"modifiers\":[\"Toppings\"]}]}",
        );
        let row = &rows.items[0];
        assert!(row.modifier_group_refs.iter().all(Option::is_none));
        assert_eq!(report.cnt_refs_dropped, 1);
    }

    #[test]
    fn test_known_modifier_reference_is_back_filled() {
        let (rows, report) = assemble(
            "{\"items\":[{\"name\":\"Burger\",\"modifiers\":[\"Sides\",\"Toppings\"]}],\
             \"modifier_groups\":[{\"name\":\"Sides\",\"items\":[{\"name\":\"Fries\",\"price\":0}]}]}",
        );
        // Modifier member item first, then the top-level item.
        assert_eq!(rows.items.len(), 2);
        assert_eq!(rows.items[0].short_name, "Fries");
        assert_eq!(rows.items[0].number, Some(20_000));
        let row_burger = &rows.items[1];
        assert_eq!(row_burger.modifier_group_refs[0].as_deref(), Some("Sides"));
        assert!(row_burger.modifier_group_refs[1].is_none());
        assert_eq!(report.cnt_refs_dropped, 1);
    }

    #[test]
    fn test_modifier_references_cap_at_ten() {
        let l_group_names: Vec<String> = (0..12).map(|n| format!("Group {n:02}")).collect();
        let c_groups = l_group_names
            .iter()
            .map(|name| format!("{{\"name\":\"{name}\"}}"))
            .collect::<Vec<_>>()
            .join(",");
        let c_refs = l_group_names
            .iter()
            .map(|name| format!("\"{name}\""))
            .collect::<Vec<_>>()
            .join(",");
        let (rows, report) = assemble(&format!(
            "{{\"items\":[{{\"name\":\"Combo\",\"modifiers\":[{c_refs}]}}],\
             \"modifier_groups\":[{c_groups}]}}"
        ));

        let row = &rows.items[0];
        assert_eq!(row.modifier_group_refs.len(), N_REFS_MODIFIER_MAX);
        assert!(row.modifier_group_refs.iter().all(Option::is_some));
        assert_eq!(report.cnt_refs_dropped, 2);
    }

    #[test]
    fn test_group_with_two_members_pads_to_six_slots() {
        let (rows, report) = assemble(
            "{\"modifier_groups\":[{\"name\":\"Sides\",\"number\":10500,\"items\":\
             [{\"name\":\"Fries\",\"price\":2.5},{\"name\":\"Salad\",\"price\":3.0}]}]}",
        );

        assert_eq!(rows.modifier_group_items.len(), 6);
        assert_eq!(report.cnt_modifier_slots, 6);

        let header = &rows.modifier_group_items[0];
        assert_eq!(header.number, Some(10_500));
        assert_eq!(header.short_name.as_deref(), Some("Sides"));
        assert_eq!(header.long_name.as_deref(), Some("Sides"));
        assert_eq!(header.item_ref.as_deref(), Some("Fries"));
        assert_eq!(header.price, EnumPriceCell::LookupItemPrice);

        let second = &rows.modifier_group_items[1];
        assert_eq!(second.number, None);
        assert_eq!(second.short_name, None);
        assert_eq!(second.note.as_deref(), Some(C_NOTE_INSERT_ROWS));
        assert_eq!(second.item_ref.as_deref(), Some("Salad"));

        for slot in &rows.modifier_group_items[2..] {
            assert_eq!(slot.item_ref, None);
            assert_eq!(slot.price, EnumPriceCell::None);
            assert_eq!(slot.price_method, None);
            assert_eq!(slot.group_ref, "Sides");
        }
    }

    #[test]
    fn test_group_slots_receive_distinct_grid_positions() {
        let c_members = (0..7)
            .map(|n| format!("{{\"name\":\"Topping {n}\",\"price\":0}}"))
            .collect::<Vec<_>>()
            .join(",");
        let (rows, _) = assemble(&format!(
            "{{\"modifier_groups\":[{{\"name\":\"Toppings\",\"items\":[{c_members}]}}]}}"
        ));

        assert_eq!(rows.modifier_group_items.len(), 7);
        let set_positions: BTreeSet<(usize, usize)> = rows
            .modifier_group_items
            .iter()
            .map(|slot| (slot.row_grid, slot.col_grid))
            .collect();
        assert_eq!(set_positions.len(), 7);
        assert_eq!(rows.modifier_group_items[3].row_grid, 1);
        assert_eq!(rows.modifier_group_items[3].col_grid, 0);
    }

    #[test]
    fn test_group_numbers_validate_or_auto_assign_with_spacing() {
        let (rows, _) = assemble(
            "{\"modifier_groups\":[\
             {\"name\":\"A\",\"number\":12000},\
             {\"name\":\"B\",\"number\":99},\
             {\"name\":\"C\"},\
             {\"name\":\"D\",\"number\":\"10500\"}]}",
        );

        let l_numbers: Vec<i64> = rows
            .modifier_group_items
            .iter()
            .filter_map(|slot| slot.number)
            .collect();
        assert_eq!(l_numbers, vec![12_000, 10_010, 10_020, 10_500]);
    }

    #[test]
    fn test_modifier_member_items_auto_number_in_encounter_order() {
        let (rows, report) = assemble(
            "{\"modifier_groups\":[\
             {\"name\":\"Sides\",\"items\":[{\"name\":\"Fries\"},{\"name\":\"Slaw\"}]},\
             {\"name\":\"Drinks\",\"items\":[{\"name\":\"Cola\"}]}]}",
        );

        let l_numbers: Vec<Option<i64>> =
            rows.items.iter().map(|row| row.number).collect();
        assert_eq!(
            l_numbers,
            vec![Some(20_000), Some(20_001), Some(20_002)]
        );
        assert_eq!(report.cnt_items_modifier, 3);
    }

    #[test]
    fn test_submenu_members_resolve_to_item_short_names() {
        let (rows, report) = assemble(
            "{\"items\":[{\"name\":\"Classic Burger\",\"price\":12.5},\
             {\"name\":\"Fries\",\"price\":4.0}],\
             \"submenus\":[{\"name\":\"Lunch\",\"number\":200,\
             \"items\":[\"Classic Burger\",\"Fries\"]}]}",
        );

        assert_eq!(rows.submenus.len(), 1);
        assert_eq!(rows.submenus[0].number, Some(200));
        assert_eq!(rows.submenus[0].short_name, "Lunch");

        assert_eq!(rows.submenu_items.len(), 2);
        assert_eq!(rows.submenu_items[0].submenu_ref, "Lunch");
        assert_eq!(rows.submenu_items[0].item_ref, "Classic Burger");
        assert_eq!(rows.submenu_items[0].price, EnumPriceCell::LookupItemPrice);
        assert_eq!((rows.submenu_items[1].row_grid, rows.submenu_items[1].col_grid), (0, 1));
        assert_eq!(report.cnt_refs_degraded, 0);
    }

    #[test]
    fn test_dangling_submenu_member_passes_through_degraded() {
        let (rows, report) = assemble(
            "{\"submenus\":[{\"name\":\"Dinner\",\"items\":[\"Phantom Dish Supreme\"]}]}",
        );

        assert_eq!(rows.submenu_items.len(), 1);
        assert_eq!(rows.submenu_items[0].item_ref, "Phantom Dish Su");
        assert_eq!(report.cnt_refs_degraded, 1);
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn test_missing_name_still_emits_a_record() {
        let (rows, _) = assemble("{\"items\":[{\"price\":5.0}]}");
        assert_eq!(rows.items.len(), 1);
        assert_eq!(rows.items[0].short_name, "");
        assert_eq!(rows.items[0].long_name, "");
        assert_eq!(rows.items[0].price, 5.0);
    }

    #[test]
    fn test_malformed_price_recovers_to_zero() {
        let (rows, _) = assemble(
            "{\"items\":[{\"name\":\"Oysters\",\"price\":\"market\"}]}",
        );
        assert_eq!(rows.items[0].price, 0.0);
    }

    #[test]
    fn test_assembly_is_idempotent_for_a_fixed_document() {
        let doc = parse_menu_document(
            "{\"items\":[{\"name\":\"Burger\",\"modifiers\":[\"Sides\"]}],\
             \"modifier_groups\":[{\"name\":\"Sides\",\"items\":[{\"name\":\"Fries\"}]}],\
             \"submenus\":[{\"name\":\"Lunch\",\"items\":[\"Burger\"]}]}",
        )
        .unwrap();

        let (rows_first, report_first) = assemble_menu_rows(&doc);
        let (rows_second, report_second) = assemble_menu_rows(&doc);
        assert_eq!(rows_first, rows_second);
        assert_eq!(report_first, report_second);
    }
}
