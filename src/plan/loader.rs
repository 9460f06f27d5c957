//! Load scenario segments from CSV

use csv::Reader;
use std::io::Read;
use std::path::Path;

use super::segment::Segment;
use crate::error::LoadError;

/// Load segments from a CSV with columns
/// `id,startYear,endYear,annualWorkIncome,annualExpenses`
pub fn load_segments<P: AsRef<Path>>(path: P) -> Result<Vec<Segment>, LoadError> {
    let mut reader = Reader::from_path(path)?;
    collect_segments(&mut reader)
}

/// Load segments from any reader (e.g., string buffer)
pub fn load_segments_from_reader<R: Read>(reader: R) -> Result<Vec<Segment>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    collect_segments(&mut csv_reader)
}

fn collect_segments<R: Read>(reader: &mut Reader<R>) -> Result<Vec<Segment>, LoadError> {
    let mut segments = Vec::new();
    for result in reader.deserialize() {
        let segment: Segment = result?;
        segment.validate_shape()?;
        segments.push(segment);
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_segments_from_reader() {
        let csv = "id,startYear,endYear,annualWorkIncome,annualExpenses\n\
                   work,1,10,120000,60000\n\
                   retire,11,30,0,55000\n";
        let segments = load_segments_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], Segment::new("work", 1, 10, 120_000.0, 60_000.0));
        assert_eq!(segments[1].start_year, 11);
    }

    #[test]
    fn test_load_segments_rejects_year_zero() {
        let csv = "id,startYear,endYear,annualWorkIncome,annualExpenses\nbad,0,3,0,0\n";
        let err = load_segments_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Invalid(_)));
    }

    #[test]
    fn test_load_segments_rejects_non_numeric() {
        let csv = "id,startYear,endYear,annualWorkIncome,annualExpenses\nbad,one,3,0,0\n";
        let err = load_segments_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }
}
