use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use flate2::read::GzDecoder;
use mlpipe::dataset::{is_missing_marker, Table};

use crate::error::{Error, Result};

/// Convert Gzipped CSV bytes into a table
pub fn table_from_gz_csv<R: Read>(gz: R, separator: u8) -> Result<Table> {
    // unzip file
    let file = GzDecoder::new(gz);
    table_from_csv(file, separator)
}

/// Convert CSV bytes with a header row into a table
///
/// Every cell is kept as text; cells matching a missing marker become `None`.
pub fn table_from_csv<R: Read>(csv: R, separator: u8) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(separator)
        .from_reader(csv);

    let names = reader
        .headers()?
        .iter()
        .map(|name| name.trim().to_string())
        .collect::<Vec<_>>();
    if names.is_empty() {
        return Err(Error::MissingHeader);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = record
            .iter()
            .map(|cell| {
                if is_missing_marker(cell) {
                    None
                } else {
                    Some(cell.to_string())
                }
            })
            .collect();
        rows.push(row);
    }

    Ok(Table::from_rows(names, rows)?)
}

/// Read a comma separated file with a header row
///
/// Files ending in `.gz` are decompressed on the fly.
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("gz") => table_from_gz_csv(file, b','),
        _ => table_from_csv(file, b','),
    }
}

#[cfg(feature = "students")]
/// Read in the bundled sample of the student performance dataset.
///
/// Columns: `gender`, `race_ethnicity`, `parental_level_of_education`, `lunch`,
/// `test_preparation_course`, `math_score`, `reading_score`, `writing_score`.
pub fn students() -> Table {
    let data = include_bytes!("../data/students.csv");
    table_from_csv(&data[..], b',').unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{write::GzEncoder, Compression};
    use std::io::Write;

    const CSV: &str = "a,b,target\n1,x,10\n,y,20\nNA,,30\n";

    #[test]
    fn reads_header_and_rows_in_order() {
        let table = table_from_csv(CSV.as_bytes(), b',').unwrap();
        assert_eq!(table.column_names(), &["a", "b", "target"]);
        assert_eq!(table.nrows(), 3);
        assert_eq!(
            table.column("target").unwrap(),
            &[Some("10".to_string()), Some("20".to_string()), Some("30".to_string())]
        );
    }

    #[test]
    fn missing_markers_become_none() {
        let table = table_from_csv(CSV.as_bytes(), b',').unwrap();
        assert_eq!(table.column("a").unwrap(), &[Some("1".to_string()), None, None]);
        assert_eq!(table.column("b").unwrap()[2], None);
    }

    #[test]
    fn custom_separator() {
        let table = table_from_csv("a;b\n1;2\n".as_bytes(), b';').unwrap();
        assert_eq!(table.column_names(), &["a", "b"]);
    }

    #[test]
    fn ragged_rows_fail() {
        let err = table_from_csv("a,b\n1,2\n3\n".as_bytes(), b',').unwrap_err();
        assert!(matches!(err, Error::Csv(_)));
    }

    #[test]
    fn empty_input_has_no_header() {
        let err = table_from_csv("".as_bytes(), b',').unwrap_err();
        assert!(matches!(err, Error::MissingHeader));
    }

    #[test]
    fn read_plain_and_gzipped_files() {
        let dir = tempfile::tempdir().unwrap();

        let plain = dir.path().join("train.csv");
        std::fs::write(&plain, CSV).unwrap();
        assert_eq!(read_table(&plain).unwrap().nrows(), 3);

        let gz = dir.path().join("train.csv.gz");
        let mut encoder = GzEncoder::new(File::create(&gz).unwrap(), Compression::default());
        encoder.write_all(CSV.as_bytes()).unwrap();
        encoder.finish().unwrap();
        assert_eq!(read_table(&gz).unwrap(), read_table(&plain).unwrap());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_table("does/not/exist.csv").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.csv"));
    }

    #[cfg(feature = "students")]
    #[test]
    fn students_sample() {
        let table = students();
        assert_eq!(table.nrows(), 40);
        assert!(table.has_column("math_score"));
    }
}
