use rust_xlsxwriter::Workbook;

use crate::export::{ExportError, ExportRow};

pub const SHEET_NAME: &str = "Scores";

/// Single-sheet workbook; numeric columns are written as numbers.
pub fn to_xlsx(header: &[String], rows: &[ExportRow]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, title) in (0u16..).zip(header) {
        sheet.write_string(0, col, title)?;
    }

    for (line, row) in (1u32..).zip(rows) {
        sheet.write_string(line, 0, &row.game_id)?;
        sheet.write_string(line, 1, &row.date)?;
        sheet.write_number(line, 2, row.round)?;
        sheet.write_string(line, 3, &row.player_id)?;
        sheet.write_string(line, 4, &row.player_name)?;
        sheet.write_number(line, 5, row.bid)?;
        sheet.write_number(line, 6, row.adjusted_bid)?;
        sheet.write_number(line, 7, row.tricks)?;
        sheet.write_number(line, 8, row.bonus)?;
        let mut col = 9u16;
        for count in &row.specials {
            sheet.write_number(line, col, count.positive)?;
            sheet.write_number(line, col + 1, count.negative)?;
            col += 2;
        }
        sheet.write_number(line, col, row.score)?;
    }

    Ok(workbook.save_to_buffer()?)
}
