use std::collections::HashMap;
use std::path::Path;

use log::debug;
use snafu::OptionExt;

use crate::draw::{DrawToolResult, MissingNameColumnSnafu};

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

fn extension(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
}

/// Guesses the input type from the file extension. Anything that is not a
/// spreadsheet is read as CSV.
pub fn infer_input_type(path: &str) -> String {
    match extension(path).as_deref() {
        Some("xlsx" | "xlsm" | "xls" | "xlsb" | "ods") => "excel".to_string(),
        _ => "csv".to_string(),
    }
}

/// The format of an exported winners list: an Excel workbook for ".xlsx",
/// CSV otherwise.
pub fn infer_output_type(path: &str) -> String {
    match extension(path).as_deref() {
        Some("xlsx") => "xlsx".to_string(),
        _ => "csv".to_string(),
    }
}

/// Finds the column holding the names in a header row.
pub fn get_name_col_index(column: &str, header: &[Option<String>]) -> DrawToolResult<usize> {
    let col_names: HashMap<&str, usize> = header
        .iter()
        .enumerate()
        .rev()
        .filter_map(|(idx, x)| x.as_ref().map(|s| (s.trim(), idx)))
        .collect();

    debug!("get_name_col_index: col_names: {:?}", col_names);

    col_names
        .get(column)
        .cloned()
        .context(MissingNameColumnSnafu { column })
}

/// Participant names are trimmed. Blank cells are not participants.
pub fn clean_name(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_type_from_extension() {
        assert_eq!(infer_input_type("list.xlsx"), "excel");
        assert_eq!(infer_input_type("/tmp/LIST.XLSX"), "excel");
        assert_eq!(infer_input_type("list.csv"), "csv");
        assert_eq!(infer_input_type("list"), "csv");
        assert_eq!(infer_input_type("old list.xls"), "excel");
        assert_eq!(infer_input_type("list.ods"), "excel");
    }

    #[test]
    fn output_type_from_extension() {
        assert_eq!(infer_output_type("得獎名單.xlsx"), "xlsx");
        assert_eq!(infer_output_type("/tmp/Winners.XLSX"), "xlsx");
        assert_eq!(infer_output_type("winners.csv"), "csv");
        assert_eq!(infer_output_type("winners"), "csv");
    }

    #[test]
    fn name_column_lookup() {
        let header = vec![Some("Id".to_string()), None, Some(" Name ".to_string())];
        assert_eq!(get_name_col_index("Name", &header).unwrap(), 2);
        assert!(get_name_col_index("名字", &header).is_err());
    }

    #[test]
    fn first_matching_column_wins() {
        let header = vec![Some("Name".to_string()), Some("Name".to_string())];
        assert_eq!(get_name_col_index("Name", &header).unwrap(), 0);
    }

    #[test]
    fn names_are_cleaned() {
        assert_eq!(clean_name("  Anna "), Some("Anna".to_string()));
        assert_eq!(clean_name("   "), None);
    }

    #[test]
    fn file_name() {
        assert_eq!(simplify_file_name("/data/participants.csv"), "participants.csv");
    }
}
