// Writing and reading back the winners list.

use std::fs::File;
use std::io::{BufReader, Read, Write};

use calamine::{open_workbook_auto, DataType, Reader};
use log::{debug, info};
use prize_draw::WinnerRecord;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use snafu::{OptionExt, ResultExt};

use crate::draw::{io_common::infer_output_type, *};

pub const PRIZE_HEADER: &str = "獎項";
pub const WINNER_HEADER: &str = "獲獎者";
/// The worksheet holding the winners in an exported workbook.
pub const WINNERS_SHEET: &str = "得獎名單";
pub const DEFAULT_EXPORT_FILE: &str = "得獎名單.xlsx";

/// Writes one row per winner, in the order in which they were drawn.
pub fn write_winners<W: Write>(out: W, winners: &[WinnerRecord]) -> DrawToolResult<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record([PRIZE_HEADER, WINNER_HEADER])
        .context(WritingCsvSnafu {})?;
    for w in winners {
        wtr.write_record([w.prize.as_str(), w.winner.as_str()])
            .context(WritingCsvSnafu {})?;
    }
    wtr.flush().context(WritingFileSnafu {})?;
    Ok(())
}

/// Writes the winners to a file. The format follows the extension: an Excel
/// workbook for ".xlsx", CSV for anything else.
pub fn write_winners_file(path: &str, winners: &[WinnerRecord]) -> DrawToolResult<()> {
    match infer_output_type(path).as_str() {
        "xlsx" => write_winners_xlsx(path, winners),
        _ => {
            let file = File::create(path).context(OpeningFileSnafu { path })?;
            write_winners(file, winners)
        }
    }
}

pub fn write_winners_xlsx(path: &str, winners: &[WinnerRecord]) -> DrawToolResult<()> {
    let mut workbook = winners_workbook(winners).context(WritingExcelSnafu { path })?;
    workbook.save(path).context(WritingExcelSnafu { path })?;
    info!("write_winners_xlsx: {} winners in {:?}", winners.len(), path);
    Ok(())
}

fn winners_workbook(winners: &[WinnerRecord]) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(WINNERS_SHEET)?;
    sheet.set_column_width(0, 36)?;
    sheet.set_column_width(1, 24)?;
    sheet.write_string_with_format(0, 0, PRIZE_HEADER, &bold)?;
    sheet.write_string_with_format(0, 1, WINNER_HEADER, &bold)?;
    for (idx, w) in winners.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_string(row, 0, w.prize.as_str())?;
        sheet.write_string(row, 1, w.winner.as_str())?;
    }
    Ok(workbook)
}

pub fn winners_to_string(winners: &[WinnerRecord]) -> DrawToolResult<String> {
    let mut buffer: Vec<u8> = Vec::new();
    write_winners(&mut buffer, winners)?;
    Ok(String::from_utf8_lossy(&buffer).to_string())
}

/// Reads a list written by [write_winners].
pub fn read_winners<R: Read>(source: R) -> DrawToolResult<Vec<WinnerRecord>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(source);
    let mut res: Vec<WinnerRecord> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_winners: {:?} {:?}", lineno, line);
        match (line.get(0), line.get(1)) {
            (Some(prize), Some(winner)) => res.push(WinnerRecord {
                prize: prize.to_string(),
                winner: winner.to_string(),
            }),
            _ => whatever!("Line {} of the winners list has less than two columns", lineno),
        }
    }
    Ok(res)
}

/// Reads a list written by [write_winners_file], in either format.
pub fn read_winners_file(path: &str) -> DrawToolResult<Vec<WinnerRecord>> {
    match infer_output_type(path).as_str() {
        "xlsx" => read_winners_xlsx(path),
        _ => {
            let file = File::open(path).context(OpeningFileSnafu { path })?;
            read_winners(BufReader::new(file))
        }
    }
}

fn read_winners_xlsx(path: &str) -> DrawToolResult<Vec<WinnerRecord>> {
    let mut workbook = open_workbook_auto(path).context(OpeningExcelSnafu { path })?;
    let range = workbook
        .worksheet_range(WINNERS_SHEET)
        .context(MissingWorksheetSnafu {
            path,
            worksheet: WINNERS_SHEET,
        })?
        .context(OpeningExcelSnafu { path })?;
    let mut res: Vec<WinnerRecord> = Vec::new();
    // The first row is the header.
    for (idx, row) in range.rows().enumerate().skip(1) {
        match (row.get(0), row.get(1)) {
            (Some(DataType::String(prize)), Some(DataType::String(winner))) => {
                res.push(WinnerRecord {
                    prize: prize.clone(),
                    winner: winner.clone(),
                })
            }
            _ => whatever!("Row {} of the winners workbook has less than two columns", idx + 1),
        }
    }
    debug!("read_winners_xlsx: {} winners in {:?}", res.len(), path);
    Ok(res)
}
