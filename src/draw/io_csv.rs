// Primitives for reading participant lists in CSV format.

use std::fs::File;
use std::io::Read;

use log::debug;
use snafu::{OptionExt, ResultExt};

use crate::draw::{
    io_common::{clean_name, get_name_col_index},
    *,
};

pub fn read_csv_participants(path: &str, column: &str) -> DrawToolResult<Vec<String>> {
    let file = File::open(path).context(OpeningFileSnafu { path })?;
    read_csv_names(file, column)
}

/// Reads a list from any source, for example an uploaded buffer.
pub fn read_csv_names<R: Read>(source: R, column: &str) -> DrawToolResult<Vec<String>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);
    let mut records = rdr.into_records();
    let header_line = records
        .next()
        .context(MissingHeaderSnafu {})?
        .context(CsvLineParseSnafu { lineno: 1_usize })?;
    let header: Vec<Option<String>> = header_line
        .iter()
        .map(|s| Some(s.trim_start_matches('\u{feff}').to_string()))
        .collect();
    let name_idx = get_name_col_index(column, &header)?;
    debug!("read_csv_names: name column index: {}", name_idx);

    let mut res: Vec<String> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        match line.get(name_idx).and_then(clean_name) {
            Some(name) => res.push(name),
            None => debug!("read_csv_names: line {}: no name, skipping", lineno),
        }
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_the_name_column() {
        let data = "Id,Name,Team\n1,Anna,A\n2, Bob ,B\n3,,C\n4,Anna,D\n";
        let names = read_csv_names(data.as_bytes(), "Name").unwrap();
        assert_eq!(names, vec!["Anna", "Bob", "Anna"]);
    }

    #[test]
    fn short_lines_are_skipped() {
        let data = "Id,Team,Name\n1,A,Clara\n2\n";
        let names = read_csv_names(data.as_bytes(), "Name").unwrap();
        assert_eq!(names, vec!["Clara"]);
    }

    #[test]
    fn byte_order_mark_in_header() {
        let data = "\u{feff}Name\n王小明\n";
        let names = read_csv_names(data.as_bytes(), "Name").unwrap();
        assert_eq!(names, vec!["王小明"]);
    }

    #[test]
    fn missing_column() {
        let data = "Id,名字\n1,Anna\n";
        let res = read_csv_names(data.as_bytes(), "Name");
        assert!(matches!(
            res,
            Err(DrawToolError::MissingNameColumn { column }) if column == "Name"
        ));
    }

    #[test]
    fn empty_file() {
        let res = read_csv_names("".as_bytes(), "Name");
        assert!(matches!(res, Err(DrawToolError::MissingHeader {})));
    }
}
