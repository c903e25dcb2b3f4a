use tracing::{event, Level};

use crate::error::DecodeError;
use crate::scanline::ScanLine;

/// Count the readings that can be identified by their number of lit
/// segments alone.
pub fn count_uniquely_identifiable_readings(lines: &[ScanLine]) -> usize {
    lines.iter().map(ScanLine::count_uniquely_identifiable).sum()
}

/// Decode every scan line and add up the results.  Each line is
/// resolved independently.
pub fn sum_decoded_readings(lines: &[ScanLine]) -> Result<u64, DecodeError> {
    let mut total: u64 = 0;
    for (n, line) in lines.iter().enumerate() {
        let value = line.output_value()?;
        event!(Level::DEBUG, "scan line {}: {} -> {}", n + 1, line, value);
        total += u64::from(value);
    }
    Ok(total)
}

#[cfg(test)]
fn sample_lines() -> Vec<ScanLine> {
    crate::scanline::SAMPLE
        .iter()
        .map(|s| ScanLine::try_from(*s).expect("sample should parse"))
        .collect()
}

#[test]
fn test_count_uniquely_identifiable_readings() {
    assert_eq!(count_uniquely_identifiable_readings(&sample_lines()), 26);
    assert_eq!(count_uniquely_identifiable_readings(&[]), 0);
}

#[test]
fn test_count_matches_lengths() {
    let lines = sample_lines();
    let by_length = lines
        .iter()
        .flat_map(|line| line.readings().iter())
        .filter(|r| matches!(r.segment_count(), 2 | 3 | 4 | 7))
        .count();
    assert_eq!(count_uniquely_identifiable_readings(&lines), by_length);
}

#[test]
fn test_sum_decoded_readings() {
    assert_eq!(sum_decoded_readings(&sample_lines()), Ok(61229));
    assert_eq!(sum_decoded_readings(&[]), Ok(0));
}

#[test]
fn test_sum_stops_at_first_error() {
    let mut lines = sample_lines();
    lines.push(ScanLine::try_from("a a a a a a a a a a | a a a a").expect("tokens are valid"));
    assert!(matches!(
        sum_decoded_readings(&lines),
        Err(DecodeError::MalformedTrainingSet(_))
    ));
}
