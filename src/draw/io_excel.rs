use calamine::{open_workbook_auto, DataType, Reader};
use log::{debug, warn};
use snafu::{OptionExt, ResultExt};

use crate::draw::{
    io_common::{clean_name, get_name_col_index},
    *,
};

pub fn read_excel_participants(
    path: &str,
    column: &str,
    worksheet_name: Option<&str>,
) -> DrawToolResult<Vec<String>> {
    let wrange = get_range(path, worksheet_name)?;
    let rows: Vec<&[DataType]> = wrange.rows().collect();
    read_names(&rows, column)
}

fn get_range(path: &str, worksheet_name: Option<&str>) -> DrawToolResult<calamine::Range<DataType>> {
    debug!(
        "read_excel_participants: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    let mut workbook = open_workbook_auto(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet) = worksheet_name {
        workbook
            .worksheet_range(worksheet)
            .context(MissingWorksheetSnafu { path, worksheet })?
            .context(OpeningExcelSnafu { path })
    } else {
        workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })
    }
}

fn read_names(rows: &[&[DataType]], column: &str) -> DrawToolResult<Vec<String>> {
    let (header_row, data_rows) = rows.split_first().context(MissingHeaderSnafu {})?;
    let header: Vec<Option<String>> = header_row.iter().map(cell_text).collect();
    debug!("read_excel_participants: header: {:?}", header);
    let name_idx = get_name_col_index(column, &header)?;

    let mut res: Vec<String> = Vec::new();
    for (idx, row) in data_rows.iter().enumerate() {
        match row.get(name_idx).and_then(cell_text) {
            Some(name) => res.push(name),
            None => debug!("read_excel_participants: row {}: no name, skipping", idx + 2),
        }
    }
    Ok(res)
}

/// The text of a cell. Numbers are written without a trailing ".0" so that
/// numeric ids read the same way as in the spreadsheet.
fn cell_text(cell: &DataType) -> Option<String> {
    match cell {
        DataType::String(s) => clean_name(s),
        DataType::Int(i) => Some(i.to_string()),
        DataType::Float(f) if f.fract() == 0.0 => Some(format!("{:.0}", f)),
        DataType::Float(f) => Some(f.to_string()),
        DataType::Bool(b) => Some(b.to_string()),
        DataType::Empty => None,
        _ => {
            warn!("read_excel_participants: could not understand cell {:?}", cell);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    // A front sheet without participants, then the guest list.
    fn write_guest_workbook(name: &str) -> String {
        let path = std::env::temp_dir()
            .join(format!("luckydraw_{}_{}", std::process::id(), name))
            .to_string_lossy()
            .to_string();
        let mut workbook = Workbook::new();
        let summary = workbook.add_worksheet();
        summary.set_name("Summary").unwrap();
        summary.write_string(0, 0, "Name").unwrap();
        summary.write_string(1, 0, "Not a guest").unwrap();
        let guests = workbook.add_worksheet();
        guests.set_name("Guests").unwrap();
        guests.write_string(0, 0, "Id").unwrap();
        guests.write_string(0, 1, "Name").unwrap();
        guests.write_number(1, 0, 1).unwrap();
        guests.write_string(1, 1, "Anna").unwrap();
        guests.write_number(2, 0, 2).unwrap();
        guests.write_number(2, 1, 1234).unwrap();
        guests.write_number(3, 0, 3).unwrap();
        guests.write_string(3, 1, "  Bob ").unwrap();
        workbook.save(&path).unwrap();
        path
    }

    #[test]
    fn worksheet_by_name() {
        let path = write_guest_workbook("by_name.xlsx");
        let names = read_excel_participants(&path, "Name", Some("Guests")).unwrap();
        assert_eq!(names, vec!["Anna", "1234", "Bob"]);

        let settings = InputSettings {
            excel_worksheet_name: Some("Guests".to_string()),
            ..InputSettings::default()
        };
        assert_eq!(read_participants(&path, &settings).unwrap(), names);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn first_worksheet_by_default() {
        let path = write_guest_workbook("first.xlsx");
        let names = read_excel_participants(&path, "Name", None).unwrap();
        assert_eq!(names, vec!["Not a guest"]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_worksheet() {
        let path = write_guest_workbook("missing_sheet.xlsx");
        let res = read_excel_participants(&path, "Name", Some("Staff"));
        assert!(matches!(
            res,
            Err(DrawToolError::MissingWorksheet { worksheet, .. }) if worksheet == "Staff"
        ));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_workbook() {
        let res = read_excel_participants("/nonexistent/luckydraw/list.xlsx", "Name", None);
        assert!(matches!(res, Err(DrawToolError::OpeningExcel { .. })));
    }

    fn s(x: &str) -> DataType {
        DataType::String(x.to_string())
    }

    #[test]
    fn reads_the_name_column() {
        let header = vec![s("Id"), s("Name")];
        let r1 = vec![DataType::Int(1), s("Anna")];
        let r2 = vec![DataType::Int(2), DataType::Empty];
        let r3 = vec![DataType::Int(3), DataType::Float(1234.0)];
        let r4 = vec![DataType::Int(4)];
        let rows: Vec<&[DataType]> = vec![
            header.as_slice(),
            r1.as_slice(),
            r2.as_slice(),
            r3.as_slice(),
            r4.as_slice(),
        ];
        let names = read_names(&rows, "Name").unwrap();
        assert_eq!(names, vec!["Anna", "1234"]);
    }

    #[test]
    fn missing_column() {
        let header = vec![s("Id"), s("名字")];
        let rows: Vec<&[DataType]> = vec![header.as_slice()];
        assert!(matches!(
            read_names(&rows, "Name"),
            Err(DrawToolError::MissingNameColumn { .. })
        ));
    }

    #[test]
    fn empty_sheet() {
        let rows: Vec<&[DataType]> = vec![];
        assert!(matches!(
            read_names(&rows, "Name"),
            Err(DrawToolError::MissingHeader {})
        ));
    }
}
