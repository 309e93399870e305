//! Workbook renderer that converts assembled row sets into the import file.
//!
//! The workbook is buffered in memory; sheet layout, protection and
//! validation rules mirror the import template the destination pipeline
//! expects.

use std::path::Path;

use menukit_core::SpecMenuRowSets;
use rust_xlsxwriter::{
    DataValidation, Format, Formula, ProtectionOptions, Workbook, Worksheet, XlsxError,
};

use crate::conf::{
    C_PASSWORD_SHEET_DEFAULT, N_NCOLS_UNLOCKED, N_ROW_LOOKUP_ITEM_MAX, N_ROW_LOOKUP_SMALL_MAX,
    N_ROW_UNLOCKED_MAX, TUP_GUIDE_NOTES_ITEM, TUP_GUIDE_NOTES_MODIFIER_GROUP_ITEMS,
    TUP_GUIDE_NOTES_SUBMENU_ITEM, TUP_HEADER_CATEGORY, TUP_HEADER_ITEM, TUP_HEADER_MENU,
    TUP_HEADER_MENU_SUBMENU, TUP_HEADER_MODIFIER_GROUP, TUP_HEADER_MODIFIER_GROUP_ITEMS,
    TUP_HEADER_SUBMENU, TUP_HEADER_SUBMENU_ITEM, TUP_HEADER_TAX_GROUP,
};
use crate::spec::{EnumSheetCell, SpecRenderReport, SpecWorkbookRenderOptions};
use crate::util::{
    convert_item_row, convert_modifier_group_slot_row, convert_submenu_item_row,
    convert_submenu_row, derive_item_price_lookup_formula, derive_list_range_formula,
};

/// One data-validation rule bound to a column span.
struct SpecSheetValidation {
    validation: DataValidation,
    col_first: u16,
    col_last: u16,
}

/// Stateful import-workbook renderer.
pub struct WorkbookRenderer {
    workbook: Workbook,
    fmt_header: Format,
    fmt_data: Format,
    fmt_note: Format,
    fmt_guide: Format,
    options: SpecWorkbookRenderOptions,
    l_reports: Vec<SpecRenderReport>,
    if_saved: bool,
}

impl WorkbookRenderer {
    /// Create a renderer with the template's format presets.
    ///
    /// The workbook is buffered in memory until one of the save calls.
    pub fn new(options: SpecWorkbookRenderOptions) -> Self {
        Self {
            workbook: Workbook::new(),
            fmt_header: Format::new().set_bold(),
            fmt_data: Format::new().set_unlocked(),
            fmt_note: Format::new()
                .set_unlocked()
                .set_italic()
                .set_font_size(9.0)
                .set_font_color("#FF0000"),
            fmt_guide: Format::new()
                .set_unlocked()
                .set_italic()
                .set_font_color("#808080"),
            options,
            l_reports: Vec::new(),
            if_saved: false,
        }
    }

    /// Return immutable snapshot of per-render reports.
    pub fn report(&self) -> Vec<SpecRenderReport> {
        self.l_reports.clone()
    }

    /// Render the full sheet set from assembled row sets.
    ///
    /// In blank-template mode the row sets are ignored and guide-note rows
    /// are written instead. The always-empty compatibility sheets are
    /// emitted regardless.
    pub fn render(&mut self, rows: &SpecMenuRowSets) -> Result<(), String> {
        if self.if_saved {
            return Err("Cannot render after save().".to_string());
        }

        let if_empty_template = self.options.if_empty_template;
        let mut report = SpecRenderReport::default();
        if if_empty_template && !rows.is_empty() {
            report.warn("Row sets ignored: blank template mode.");
        }

        let l_cells_items: Vec<Vec<EnumSheetCell>> = if if_empty_template {
            vec![]
        } else {
            rows.items.iter().map(convert_item_row).collect()
        };
        let l_cells_submenus: Vec<Vec<EnumSheetCell>> = if if_empty_template {
            vec![]
        } else {
            rows.submenus.iter().map(convert_submenu_row).collect()
        };
        let l_cells_submenu_items: Vec<Vec<EnumSheetCell>> = if if_empty_template {
            vec![]
        } else {
            rows.submenu_items.iter().map(convert_submenu_item_row).collect()
        };
        let l_cells_group_slots: Vec<Vec<EnumSheetCell>> = if if_empty_template {
            vec![]
        } else {
            rows.modifier_group_items
                .iter()
                .map(convert_modifier_group_slot_row)
                .collect()
        };

        self._render_sheet(
            "Item",
            &TUP_HEADER_ITEM,
            &l_cells_items,
            if if_empty_template {
                Some(&TUP_GUIDE_NOTES_ITEM)
            } else {
                None
            },
            _derive_item_validations().map_err(derive_xlsx_error_text)?,
            &mut report,
        )?;
        self._render_sheet(
            "Submenu",
            &TUP_HEADER_SUBMENU,
            &l_cells_submenus,
            None,
            vec![],
            &mut report,
        )?;
        self._render_sheet(
            "SubmenuItem",
            &TUP_HEADER_SUBMENU_ITEM,
            &l_cells_submenu_items,
            if if_empty_template {
                Some(&TUP_GUIDE_NOTES_SUBMENU_ITEM)
            } else {
                None
            },
            _derive_submenu_item_validations().map_err(derive_xlsx_error_text)?,
            &mut report,
        )?;
        self._render_sheet(
            "ModifierGroup_Items",
            &TUP_HEADER_MODIFIER_GROUP_ITEMS,
            &l_cells_group_slots,
            if if_empty_template {
                Some(&TUP_GUIDE_NOTES_MODIFIER_GROUP_ITEMS)
            } else {
                None
            },
            _derive_modifier_group_validations().map_err(derive_xlsx_error_text)?,
            &mut report,
        )?;

        // Always-empty compatibility sheets.
        self._render_sheet("Menu", &TUP_HEADER_MENU, &[], None, vec![], &mut report)?;
        self._render_sheet("Category", &TUP_HEADER_CATEGORY, &[], None, vec![], &mut report)?;
        self._render_sheet("TaxGroup", &TUP_HEADER_TAX_GROUP, &[], None, vec![], &mut report)?;
        self._render_sheet(
            "MenuSubmenu",
            &TUP_HEADER_MENU_SUBMENU,
            &[],
            None,
            vec![],
            &mut report,
        )?;
        self._render_sheet(
            "ModifierGroup",
            &TUP_HEADER_MODIFIER_GROUP,
            &[],
            None,
            vec![],
            &mut report,
        )?;

        self.l_reports.push(report);
        Ok(())
    }

    /// Write workbook to disk.
    pub fn save_to_path(&mut self, path: &Path) -> Result<(), String> {
        self.workbook.save(path).map_err(derive_xlsx_error_text)?;
        self.if_saved = true;
        Ok(())
    }

    /// Serialize workbook into an in-memory buffer.
    pub fn save_to_buffer(&mut self) -> Result<Vec<u8>, String> {
        let v_bytes = self
            .workbook
            .save_to_buffer()
            .map_err(derive_xlsx_error_text)?;
        self.if_saved = true;
        Ok(v_bytes)
    }

    fn _render_sheet(
        &mut self,
        sheet_name: &str,
        headers: &[&str],
        l_rows_cells: &[Vec<EnumSheetCell>],
        guide_notes: Option<&[&str]>,
        l_validations: Vec<SpecSheetValidation>,
        report: &mut SpecRenderReport,
    ) -> Result<(), String> {
        let c_password = self
            .options
            .password_override
            .clone()
            .unwrap_or_else(|| C_PASSWORD_SHEET_DEFAULT.to_string());

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(sheet_name).map_err(derive_xlsx_error_text)?;

        for (n_idx_col, c_header) in headers.iter().enumerate() {
            worksheet
                .write_string_with_format(0, cast_col_num(n_idx_col)?, *c_header, &self.fmt_header)
                .map_err(derive_xlsx_error_text)?;
        }

        let mut n_idx_row_cursor: usize = 1;
        if let Some(l_notes) = guide_notes {
            _write_data_row(
                worksheet,
                n_idx_row_cursor,
                &l_notes
                    .iter()
                    .map(|c_note| EnumSheetCell::Text((*c_note).to_string()))
                    .collect::<Vec<_>>(),
                &self.fmt_guide,
                &self.fmt_guide,
            )?;
            n_idx_row_cursor += 1;
        }

        for l_cells in l_rows_cells {
            _write_data_row(
                worksheet,
                n_idx_row_cursor,
                l_cells,
                &self.fmt_data,
                &self.fmt_note,
            )?;
            n_idx_row_cursor += 1;
        }

        // Keep the remaining operator-entry range editable under protection.
        for n_idx_row in n_idx_row_cursor..(N_ROW_UNLOCKED_MAX as usize) {
            for n_idx_col in 0..(N_NCOLS_UNLOCKED as usize) {
                worksheet
                    .write_blank(cast_row_num(n_idx_row)?, cast_col_num(n_idx_col)?, &self.fmt_data)
                    .map_err(derive_xlsx_error_text)?;
            }
        }

        for item_validation in l_validations {
            worksheet
                .add_data_validation(
                    1,
                    item_validation.col_first,
                    N_ROW_UNLOCKED_MAX - 1,
                    item_validation.col_last,
                    &item_validation.validation,
                )
                .map_err(derive_xlsx_error_text)?;
        }

        worksheet.protect_with_password(&c_password);
        worksheet.protect_with_options(&ProtectionOptions {
            insert_rows: true,
            delete_rows: true,
            select_locked_cells: true,
            select_unlocked_cells: true,
            ..ProtectionOptions::default()
        });

        report
            .dict_rows_by_sheet
            .insert(sheet_name.to_string(), l_rows_cells.len() as u64);
        Ok(())
    }
}

fn _write_data_row(
    worksheet: &mut Worksheet,
    n_idx_row: usize,
    l_cells: &[EnumSheetCell],
    fmt_data: &Format,
    fmt_note: &Format,
) -> Result<(), String> {
    let n_row = cast_row_num(n_idx_row)?;
    for (n_idx_col, cell) in l_cells.iter().enumerate() {
        let n_col = cast_col_num(n_idx_col)?;
        match cell {
            EnumSheetCell::None => {
                worksheet
                    .write_blank(n_row, n_col, fmt_data)
                    .map_err(derive_xlsx_error_text)?;
            }
            EnumSheetCell::Text(val) => {
                worksheet
                    .write_string_with_format(n_row, n_col, val, fmt_data)
                    .map_err(derive_xlsx_error_text)?;
            }
            EnumSheetCell::Number(val) => {
                worksheet
                    .write_number_with_format(n_row, n_col, *val, fmt_data)
                    .map_err(derive_xlsx_error_text)?;
            }
            EnumSheetCell::PriceLookup { col_item_ref } => {
                let c_formula = derive_item_price_lookup_formula(&format!(
                    "{col_item_ref}{}",
                    n_idx_row + 1
                ));
                worksheet
                    .write_formula_with_format(n_row, n_col, Formula::new(c_formula), fmt_data)
                    .map_err(derive_xlsx_error_text)?;
            }
            EnumSheetCell::Note(val) => {
                worksheet
                    .write_string_with_format(n_row, n_col, val, fmt_note)
                    .map_err(derive_xlsx_error_text)?;
            }
        }
    }

    // Unlock the rest of the operator-entry width on this row too.
    for n_idx_col in l_cells.len()..(N_NCOLS_UNLOCKED as usize) {
        worksheet
            .write_blank(n_row, cast_col_num(n_idx_col)?, fmt_data)
            .map_err(derive_xlsx_error_text)?;
    }

    Ok(())
}

fn _derive_item_validations() -> Result<Vec<SpecSheetValidation>, XlsxError> {
    Ok(vec![
        SpecSheetValidation {
            validation: DataValidation::new()
                .allow_list_formula(Formula::new(derive_list_range_formula(
                    "TaxGroup",
                    "B",
                    N_ROW_LOOKUP_SMALL_MAX,
                )))
                .ignore_blank(true),
            col_first: 6,
            col_last: 6,
        },
        SpecSheetValidation {
            validation: DataValidation::new()
                .allow_list_formula(Formula::new(derive_list_range_formula(
                    "Category",
                    "B",
                    N_ROW_LOOKUP_SMALL_MAX,
                )))
                .ignore_blank(true),
            col_first: 7,
            col_last: 7,
        },
    ])
}

fn _derive_modifier_group_validations() -> Result<Vec<SpecSheetValidation>, XlsxError> {
    let validation_lock = DataValidation::new()
        .allow_custom(Formula::new("=ISBLANK($I2)"))
        .set_error_title("Locked")?
        .set_error_message("This row is linked to an Item. Group columns (A-G) must be blank.")?;

    Ok(vec![
        SpecSheetValidation {
            validation: DataValidation::new()
                .allow_list_formula(Formula::new(derive_list_range_formula(
                    "Item",
                    "B",
                    N_ROW_LOOKUP_ITEM_MAX,
                )))
                .ignore_blank(true),
            col_first: 8,
            col_last: 8,
        },
        SpecSheetValidation {
            validation: validation_lock,
            col_first: 0,
            col_last: 6,
        },
    ])
}

fn _derive_submenu_item_validations() -> Result<Vec<SpecSheetValidation>, XlsxError> {
    let validation_price = DataValidation::new()
        .allow_custom(Formula::new("=D2<>\"Item Price\""))
        .set_error_title("Restricted")?
        .set_error_message(
            "Price is automatic when 'Item Price' is selected. Change PriceMethod to edit.",
        )?;

    Ok(vec![
        SpecSheetValidation {
            validation: DataValidation::new()
                .allow_list_formula(Formula::new(derive_list_range_formula(
                    "Submenu",
                    "B",
                    N_ROW_LOOKUP_SMALL_MAX,
                )))
                .ignore_blank(true),
            col_first: 0,
            col_last: 0,
        },
        SpecSheetValidation {
            validation: DataValidation::new()
                .allow_list_formula(Formula::new(derive_list_range_formula(
                    "Item",
                    "B",
                    N_ROW_LOOKUP_ITEM_MAX,
                )))
                .ignore_blank(true),
            col_first: 2,
            col_last: 2,
        },
        SpecSheetValidation {
            validation: validation_price,
            col_first: 6,
            col_last: 6,
        },
    ])
}

fn cast_row_num(value: usize) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("row index overflow: {value}"))
}

fn cast_col_num(value: usize) -> Result<u16, String> {
    u16::try_from(value).map_err(|_| format!("column index overflow: {value}"))
}

fn derive_xlsx_error_text(err: XlsxError) -> String {
    format!("xlsx write error: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use menukit_core::{assemble_menu_rows, parse_menu_document};

    fn derive_sample_rows() -> SpecMenuRowSets {
        let doc = parse_menu_document(
            "{\"items\":[{\"name\":\"Classic Burger\",\"price\":12.5,\
             \"modifiers\":[\"Sides\"]}],\
             \"modifier_groups\":[{\"name\":\"Sides\",\
             \"items\":[{\"name\":\"Fries\",\"price\":2.5}]}],\
             \"submenus\":[{\"name\":\"Lunch\",\"items\":[\"Classic Burger\"]}]}",
        )
        .unwrap();
        assemble_menu_rows(&doc).0
    }

    #[test]
    fn test_render_produces_a_workbook_buffer_with_all_sheets() {
        let rows = derive_sample_rows();
        let mut renderer = WorkbookRenderer::new(SpecWorkbookRenderOptions::default());
        renderer.render(&rows).unwrap();

        let l_reports = renderer.report();
        assert_eq!(l_reports.len(), 1);
        assert_eq!(l_reports[0].dict_rows_by_sheet.len(), 9);
        assert_eq!(l_reports[0].dict_rows_by_sheet["Item"], 2);
        assert_eq!(l_reports[0].dict_rows_by_sheet["ModifierGroup_Items"], 6);
        assert_eq!(l_reports[0].dict_rows_by_sheet["Submenu"], 1);
        assert_eq!(l_reports[0].dict_rows_by_sheet["SubmenuItem"], 1);
        assert_eq!(l_reports[0].dict_rows_by_sheet["Category"], 0);

        let v_bytes = renderer.save_to_buffer().unwrap();
        assert!(v_bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_render_blank_template_writes_guide_rows_only() {
        let mut renderer = WorkbookRenderer::new(SpecWorkbookRenderOptions {
            if_empty_template: true,
            password_override: None,
        });
        renderer.render(&derive_sample_rows()).unwrap();

        let l_reports = renderer.report();
        assert_eq!(l_reports[0].dict_rows_by_sheet["Item"], 0);
        assert_eq!(l_reports[0].warnings.len(), 1);

        let v_bytes = renderer.save_to_buffer().unwrap();
        assert!(v_bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_render_after_save_is_rejected() {
        let mut renderer = WorkbookRenderer::new(SpecWorkbookRenderOptions::default());
        renderer.render(&SpecMenuRowSets::default()).unwrap();
        renderer.save_to_buffer().unwrap();
        assert!(renderer.render(&SpecMenuRowSets::default()).is_err());
    }
}
