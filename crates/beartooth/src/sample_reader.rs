use crate::aggregate::Sample;
use crate::constants::{EXPECTED_BITS_HEADER, EXPECTED_COUNT_HEADER};
use crate::error::{BeartoothError, Result};

use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use std::path::Path;

/// Reads solver samples from a CSV file
///
/// # Arguments
/// * `path` - Path to the CSV file
///
/// # Errors
/// Returns error if file cannot be read or CSV format is invalid
pub fn read_samples_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Sample>> {
    let file = std::fs::File::open(path)?;
    read_samples_from_reader(file)
}

/// Read CSV with `Bits,Count` format.
/// - `Bits` is a string of `0`/`1`, one character per logical variable
/// - whitespace and `_` inside `Bits` are ignored
/// - rows are kept as-is, duplicate bit strings are summed by the aggregator
pub fn read_samples_from_reader<R: Read>(reader: R) -> Result<Vec<Sample>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true) // allow additional columns
        .from_reader(reader);

    validate_csv_headers(&mut rdr)?;

    let mut samples = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = i + 2; // CSV rows are 1-indexed, +1 for header

        if let Some(sample) = parse_record(&rec, row)? {
            samples.push(sample);
        }
    }

    Ok(samples)
}

/// Validates CSV headers match expected format
fn validate_csv_headers<R: Read>(csv_reader: &mut csv::Reader<R>) -> Result<()> {
    let headers = csv_reader
        .headers()
        .map_err(|e| BeartoothError::CsvHeader(format!("Failed to read headers: {}", e)))?;

    let bits_header = headers
        .get(0)
        .ok_or_else(|| BeartoothError::CsvHeader("Missing bits column at index 0".to_string()))?;

    let count_header = headers
        .get(1)
        .ok_or_else(|| BeartoothError::CsvHeader("Missing count column at index 1".to_string()))?;

    if !bits_header.eq_ignore_ascii_case(EXPECTED_BITS_HEADER) {
        return Err(BeartoothError::CsvHeader(format!(
            "Expected '{}' in column 0, found '{}'",
            EXPECTED_BITS_HEADER, bits_header
        )));
    }

    if !count_header.eq_ignore_ascii_case(EXPECTED_COUNT_HEADER) {
        return Err(BeartoothError::CsvHeader(format!(
            "Expected '{}' in column 1, found '{}'",
            EXPECTED_COUNT_HEADER, count_header
        )));
    }

    Ok(())
}

fn parse_record(rec: &StringRecord, row: usize) -> Result<Option<Sample>> {
    if rec.iter().all(|f| f.trim().is_empty()) {
        return Ok(None);
    }

    let bits_str = rec.get(0).unwrap_or_default();
    let count_str = rec.get(1).ok_or_else(|| BeartoothError::SampleRow {
        row,
        message: format!("expected at least 2 columns, got {}", rec.len()),
    })?;

    let bits = parse_bits(bits_str, row)?;
    let occurrences = parse_count_value(count_str, row)?;
    if occurrences == 0 {
        return Err(BeartoothError::SampleRow {
            row,
            message: "occurrence count must be positive".to_string(),
        });
    }

    Ok(Some(Sample::new(bits, occurrences)))
}

fn parse_bits(bits_str: &str, row: usize) -> Result<Vec<bool>> {
    bits_str
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => Err(BeartoothError::SampleRow {
                row,
                message: format!("invalid bit '{}'", other),
            }),
        })
        .collect()
}

/// Parses a count string into u64
fn parse_count_value(count_str: &str, row_number: usize) -> Result<u64> {
    count_str
        .parse()
        .map_err(|parse_error| BeartoothError::CountParse {
            row: row_number,
            value: count_str.to_string(),
            source: parse_error,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_samples() {
        let data = "Bits,Count\n100000,10\n010000,5\n";
        let samples = read_samples_from_reader(data.as_bytes()).unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(
            samples[0].bits,
            vec![true, false, false, false, false, false]
        );
        assert_eq!(samples[0].occurrences, 10);
        assert_eq!(samples[1].occurrences, 5);
    }

    #[test]
    fn test_header_case_and_separators() {
        let data = "bits,COUNT,Energy\n100_000,3,-1\n\n 1 1 0 1 0 0 ,2,0\n";
        let samples = read_samples_from_reader(data.as_bytes()).unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].bits, vec![true, true, false, true, false, false]);
    }

    #[test]
    fn test_wrong_header() {
        let data = "Key,Count\n10,1\n";
        let result = read_samples_from_reader(data.as_bytes());
        assert!(matches!(result, Err(BeartoothError::CsvHeader(_))));
    }

    #[test]
    fn test_invalid_bit() {
        let data = "Bits,Count\n1020,1\n";
        match read_samples_from_reader(data.as_bytes()) {
            Err(BeartoothError::SampleRow { row, message }) => {
                assert_eq!(row, 2);
                assert!(message.contains("'2'"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_count() {
        let data = "Bits,Count\n1000,many\n";
        let result = read_samples_from_reader(data.as_bytes());
        assert!(matches!(
            result,
            Err(BeartoothError::CountParse { row: 2, .. })
        ));
    }

    #[test]
    fn test_zero_count_rejected() {
        let data = "Bits,Count\n1000,0\n";
        assert!(read_samples_from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_missing_count_column() {
        let data = "Bits,Count\n1000\n";
        let result = read_samples_from_reader(data.as_bytes());
        assert!(matches!(
            result,
            Err(BeartoothError::SampleRow { row: 2, .. })
        ));
    }

    #[test]
    fn test_read_samples_csv_nonexistent() {
        assert!(read_samples_csv("nonexistent_samples.csv").is_err());
    }
}
