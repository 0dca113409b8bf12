//! Spreadsheet rendering for the fleet registry.
//!
//! One header row with the seven field labels, one data row per ship, cell
//! values formatted identically to the document variant.

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::error::{ExportError, Result};
use crate::ship::{SHIP_FIELD_LABELS, ShipRecord};

/// Attachment filename for the whole-fleet spreadsheet export.
pub const FLEET_SPREADSHEET_FILENAME: &str = "fleet.xlsx";

/// Attachment filename for a single-ship spreadsheet export.
pub fn ship_spreadsheet_filename(id: i32) -> String {
    format!("ship_{id}.xlsx")
}

fn spreadsheet_error(err: XlsxError) -> ExportError {
    ExportError::Spreadsheet(err.to_string())
}

fn write_rows(worksheet: &mut Worksheet, ships: &[ShipRecord]) -> Result<()> {
    let header = Format::new().set_bold();
    for (col, label) in SHIP_FIELD_LABELS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *label, &header)
            .map_err(spreadsheet_error)?;
    }
    for (row, ship) in ships.iter().enumerate() {
        for (col, value) in ship.field_values().iter().enumerate() {
            worksheet
                .write_string(row as u32 + 1, col as u16, value)
                .map_err(spreadsheet_error)?;
        }
    }
    Ok(())
}

fn render(ships: &[ShipRecord]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Fleet").map_err(spreadsheet_error)?;
    write_rows(worksheet, ships)?;
    workbook.save_to_buffer().map_err(spreadsheet_error)
}

/// Render the whole fleet: header row plus one data row per ship.
pub fn render_fleet_spreadsheet(ships: &[ShipRecord]) -> Result<Vec<u8>> {
    render(ships)
}

/// Render a single ship: header row plus one data row.
pub fn render_ship_spreadsheet(ship: &ShipRecord) -> Result<Vec<u8>> {
    render(std::slice::from_ref(ship))
}
