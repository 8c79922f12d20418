use anyhow::{Context, Result};
use std::io::{self, Read};

#[derive(Debug, Clone, PartialEq)]
pub struct CsvData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn read_csv_from_stdin() -> Result<CsvData> {
    read_csv(io::stdin().lock())
}

/// Read a headed CSV table. Cells are trimmed; ragged rows are allowed.
pub fn read_csv<R: Read>(reader: R) -> Result<CsvData> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("Failed to read CSV header row")?
        .iter()
        .map(String::from)
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        anyhow::bail!("CSV input has no header row");
    }

    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read CSV row {}", i + 1))?;
        rows.push(record.iter().map(String::from).collect());
    }

    Ok(CsvData { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv() {
        let data = read_csv("month, Low ,High\nMay,12,22\nJune, 15 ,25\n".as_bytes()).unwrap();
        assert_eq!(data.headers, vec!["month", "Low", "High"]);
        assert_eq!(data.rows[1], vec!["June", "15", "25"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(read_csv("".as_bytes()).is_err());
    }
}
