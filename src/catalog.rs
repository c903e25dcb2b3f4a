use crate::error::DecodeError;
use crate::pattern::{CanonicalPosition, SignalPattern, SEGMENTS};

use crate::pattern::CanonicalPosition::*;

const DIGITS: usize = 10;

/// The true segments of each digit, plus some tables derived from
/// them.
///
/// | digit | segments  | count |
/// | ----- | --------- | ----- |
/// | 0     | `abcefg`  | 6     |
/// | 1     | `cf`      | 2     |
/// | 2     | `acdeg`   | 5     |
/// | 3     | `acdfg`   | 5     |
/// | 4     | `bcdf`    | 4     |
/// | 5     | `abdfg`   | 5     |
/// | 6     | `abdefg`  | 6     |
/// | 7     | `acf`     | 3     |
/// | 8     | `abcdefg` | 7     |
/// | 9     | `abcdfg`  | 6     |
#[derive(Debug)]
pub struct DigitCatalog {
    patterns: [SignalPattern; DIGITS],
    /// How many of the ten digits light each position.
    frequencies: [usize; SEGMENTS],
    /// Element n is the number of digits having n lit segments.
    count_histogram: [usize; SEGMENTS + 1],
}

pub static CATALOG: DigitCatalog = DigitCatalog::standard();

impl DigitCatalog {
    const fn standard() -> DigitCatalog {
        let patterns: [SignalPattern; DIGITS] = [
            SignalPattern::from_positions(&[
                Top,
                TopLeft,
                TopRight,
                BottomLeft,
                BottomRight,
                Bottom,
            ]),
            SignalPattern::from_positions(&[TopRight, BottomRight]),
            SignalPattern::from_positions(&[Top, TopRight, Middle, BottomLeft, Bottom]),
            SignalPattern::from_positions(&[Top, TopRight, Middle, BottomRight, Bottom]),
            SignalPattern::from_positions(&[TopLeft, TopRight, Middle, BottomRight]),
            SignalPattern::from_positions(&[Top, TopLeft, Middle, BottomRight, Bottom]),
            SignalPattern::from_positions(&[Top, TopLeft, Middle, BottomLeft, BottomRight, Bottom]),
            SignalPattern::from_positions(&[Top, TopRight, BottomRight]),
            SignalPattern::from_positions(&[
                Top,
                TopLeft,
                TopRight,
                Middle,
                BottomLeft,
                BottomRight,
                Bottom,
            ]),
            SignalPattern::from_positions(&[Top, TopLeft, TopRight, Middle, BottomRight, Bottom]),
        ];
        let mut frequencies = [0; SEGMENTS];
        let mut count_histogram = [0; SEGMENTS + 1];
        let mut digit = 0;
        while digit < DIGITS {
            let pattern = &patterns[digit];
            count_histogram[pattern.segment_count()] += 1;
            let mut pos = 0;
            while pos < SEGMENTS {
                if pattern.contains_position(CanonicalPosition::ALL[pos]) {
                    frequencies[pos] += 1;
                }
                pos += 1;
            }
            digit += 1;
        }
        DigitCatalog {
            patterns,
            frequencies,
            count_histogram,
        }
    }

    pub fn pattern(&self, digit: u8) -> Option<SignalPattern> {
        self.patterns.get(digit as usize).copied()
    }

    pub fn digits(&self) -> impl Iterator<Item = (u8, SignalPattern)> + '_ {
        self.patterns
            .iter()
            .enumerate()
            .map(|(digit, pattern)| (digit as u8, *pattern))
    }

    /// Find the digit whose segments are exactly `canonical`.
    pub fn lookup(&self, canonical: SignalPattern) -> Result<u8, DecodeError> {
        self.digits()
            .find(|(_, pattern)| *pattern == canonical)
            .map(|(digit, _)| digit)
            .ok_or(DecodeError::UnknownPattern(canonical))
    }

    pub fn frequency(&self, position: CanonicalPosition) -> usize {
        self.frequencies[position.index()]
    }

    pub fn positions_with_frequency(
        &self,
        frequency: usize,
    ) -> impl Iterator<Item = CanonicalPosition> + '_ {
        CanonicalPosition::ALL
            .into_iter()
            .filter(move |pos| self.frequency(*pos) == frequency)
    }

    pub fn count_histogram(&self) -> &[usize; SEGMENTS + 1] {
        &self.count_histogram
    }

    /// True if only one digit has `count` segments lit, so that a
    /// pattern of that size can be read without any mapping.
    pub fn is_unique_segment_count(&self, count: usize) -> bool {
        self.count_histogram.get(count) == Some(&1)
    }

    pub fn digit_for_segment_count(&self, count: usize) -> Option<u8> {
        if self.is_unique_segment_count(count) {
            self.digits()
                .find(|(_, pattern)| pattern.segment_count() == count)
                .map(|(digit, _)| digit)
        } else {
            None
        }
    }
}

#[test]
fn test_patterns() {
    let expected = [
        "abcefg", "cf", "acdeg", "acdfg", "bcdf", "abdfg", "abdefg", "acf", "abcdefg", "abcdfg",
    ];
    for (digit, s) in expected.iter().enumerate() {
        assert_eq!(
            CATALOG.pattern(digit as u8).map(|p| p.to_string()),
            Some(s.to_string())
        );
    }
    assert_eq!(CATALOG.pattern(10), None);
}

#[test]
fn test_lookup() {
    for (digit, pattern) in CATALOG.digits() {
        assert_eq!(CATALOG.lookup(pattern), Ok(digit));
    }
    let bogus = SignalPattern::from_positions(&[Top, Bottom]);
    assert_eq!(CATALOG.lookup(bogus), Err(DecodeError::UnknownPattern(bogus)));
}

#[test]
fn test_frequencies() {
    assert_eq!(CATALOG.frequency(BottomLeft), 4);
    assert_eq!(CATALOG.frequency(TopLeft), 6);
    assert_eq!(CATALOG.frequency(Middle), 7);
    assert_eq!(CATALOG.frequency(Bottom), 7);
    assert_eq!(CATALOG.frequency(Top), 8);
    assert_eq!(CATALOG.frequency(TopRight), 8);
    assert_eq!(CATALOG.frequency(BottomRight), 9);
    assert_eq!(
        CATALOG.positions_with_frequency(7).collect::<Vec<_>>(),
        vec![Middle, Bottom]
    );
    assert_eq!(CATALOG.positions_with_frequency(5).count(), 0);
}

#[test]
fn test_segment_counts() {
    assert_eq!(CATALOG.count_histogram(), &[0, 0, 1, 1, 1, 3, 3, 1]);
    let unique: Vec<usize> = (0..=SEGMENTS)
        .filter(|n| CATALOG.is_unique_segment_count(*n))
        .collect();
    assert_eq!(unique, vec![2, 3, 4, 7]);
    assert_eq!(CATALOG.digit_for_segment_count(2), Some(1));
    assert_eq!(CATALOG.digit_for_segment_count(3), Some(7));
    assert_eq!(CATALOG.digit_for_segment_count(4), Some(4));
    assert_eq!(CATALOG.digit_for_segment_count(7), Some(8));
    assert_eq!(CATALOG.digit_for_segment_count(5), None);
    assert_eq!(CATALOG.digit_for_segment_count(9), None);
}
