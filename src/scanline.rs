use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use nom::{
    bytes::complete::{tag, take_till1},
    character::complete::char,
    combinator::all_consuming,
    multi::separated_list1,
    sequence::separated_pair,
    IResult,
};

use crate::catalog::CATALOG;
use crate::error::DecodeError;
use crate::mapping::Mapping;
use crate::pattern::SignalPattern;
use crate::resolver::resolve_mapping;

pub const TRAINING_COUNT: usize = 10;
pub const READING_COUNT: usize = 4;

/// One record: the ten digits in some order, then the four digits
/// being displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanLine {
    training: [SignalPattern; TRAINING_COUNT],
    readings: [SignalPattern; READING_COUNT],
}

fn parse_token(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c == ' ' || c == '|')(input)
}

fn parse_tokens(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(char(' '), parse_token)(input)
}

fn parse_record(input: &str) -> IResult<&str, (Vec<&str>, Vec<&str>)> {
    all_consuming(separated_pair(parse_tokens, tag(" | "), parse_tokens))(input)
}

fn parse_patterns(tokens: &[&str]) -> Result<Vec<SignalPattern>, DecodeError> {
    tokens.iter().map(|token| SignalPattern::try_from(*token)).collect()
}

impl TryFrom<&str> for ScanLine {
    type Error = DecodeError;
    fn try_from(s: &str) -> Result<ScanLine, DecodeError> {
        let (training, readings) = match parse_record(s.trim()) {
            Ok((_, fields)) => fields,
            Err(e) => {
                return Err(DecodeError::MalformedTrainingSet(format!(
                    "expected two fields separated by ' | ' in '{}': {}",
                    s, e
                )));
            }
        };
        if training.len() != TRAINING_COUNT {
            return Err(DecodeError::MalformedTrainingSet(format!(
                "expected {} training patterns, got {}: {:?}",
                TRAINING_COUNT,
                training.len(),
                &training,
            )));
        }
        if readings.len() != READING_COUNT {
            return Err(DecodeError::MalformedTrainingSet(format!(
                "expected {} readings, got {}: {:?}",
                READING_COUNT,
                readings.len(),
                &readings,
            )));
        }
        let training: [SignalPattern; TRAINING_COUNT] = parse_patterns(&training)?
            .try_into()
            .map_err(|_| DecodeError::MalformedTrainingSet(s.to_string()))?;
        let readings: [SignalPattern; READING_COUNT] = parse_patterns(&readings)?
            .try_into()
            .map_err(|_| DecodeError::MalformedTrainingSet(s.to_string()))?;
        Ok(ScanLine { training, readings })
    }
}

impl FromStr for ScanLine {
    type Err = DecodeError;
    fn from_str(s: &str) -> Result<ScanLine, DecodeError> {
        ScanLine::try_from(s)
    }
}

impl Display for ScanLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, pattern) in self.training.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", pattern)?;
        }
        f.write_str(" |")?;
        for pattern in self.readings.iter() {
            write!(f, " {}", pattern)?;
        }
        Ok(())
    }
}

impl ScanLine {
    pub fn readings(&self) -> &[SignalPattern; READING_COUNT] {
        &self.readings
    }

    pub fn resolve_mapping(&self) -> Result<Mapping, DecodeError> {
        resolve_mapping(&self.training)
    }

    /// Readings with a segment count that only one digit has (1, 4,
    /// 7, 8).  No mapping is needed for this.
    pub fn count_uniquely_identifiable(&self) -> usize {
        self.readings
            .iter()
            .filter(|r| CATALOG.is_unique_segment_count(r.segment_count()))
            .count()
    }

    /// The readings translated into canonical positions, leftmost
    /// first.
    pub fn canonical_readings(
        &self,
        mapping: &Mapping,
    ) -> Result<[SignalPattern; READING_COUNT], DecodeError> {
        let mut result = [SignalPattern::empty(); READING_COUNT];
        for (slot, reading) in result.iter_mut().zip(self.readings.iter()) {
            *slot = reading.remap(mapping)?;
        }
        Ok(result)
    }

    pub fn decode(&self, mapping: &Mapping) -> Result<u32, DecodeError> {
        let mut number: u32 = 0;
        for (index, canonical) in self.canonical_readings(mapping)?.iter().enumerate() {
            match CATALOG.lookup(*canonical) {
                Ok(digit) => {
                    number = number * 10 + u32::from(digit);
                }
                Err(_) => {
                    return Err(DecodeError::UndecodableReading {
                        index,
                        pattern: *canonical,
                    });
                }
            }
        }
        Ok(number)
    }

    pub fn output_value(&self) -> Result<u32, DecodeError> {
        let mapping = self.resolve_mapping()?;
        self.decode(&mapping)
    }
}

#[cfg(test)]
pub(crate) const SAMPLE: [&str; 10] = [
    "be cfbegad cbdgef fgaecd cgeb fdcge agebfd fecdb fabcd edb | fdgacbe cefdb cefbgd gcbe",
    "edbfga begcd cbg gc gcadebf fbgde acbgfd abcde gfcbed gfec | fcgedb cgb dgebacf gc",
    "fgaebd cg bdaec gdafb agbcfd gdcbef bgcad gfac gcb cdgabef | cg cg fdcagb cbg",
    "fbegcd cbd adcefb dageb afcb bc aefdc ecdab fgdeca fcdbega | efabcd cedba gadfec cb",
    "aecbfdg fbg gf bafeg dbefa fcge gcbea fcaegb dgceab fcbdga | gecf egdcabf bgf bfgea",
    "fgeab ca afcebg bdacfeg cfaedg gcfdb baec bfadeg bafgc acf | gebdcfa ecba ca fadegcb",
    "dbcfg fgd bdegcaf fgec aegbdf ecdfab fbedc dacgb gdcebf gf | cefg dcbef fcge gbcadfe",
    "bdfegc cbegaf gecbf dfcage bdacg ed bedf ced adcbefg gebcd | ed bcgafe cdgba cbgef",
    "egadfb cdbfeg cegd fecab cgb gbdefca cg fgcdab egfdb bfceg | gbdfcae bgc cg cgb",
    "gcafb gcf dcaebfg ecagb gf abcdeg gaef cafbge fdbac fegbdc | fgae cfgab fg bagce",
];

#[cfg(test)]
fn scan_line(s: &str) -> ScanLine {
    ScanLine::try_from(s).expect("test record should be valid")
}

#[test]
fn test_example() {
    let line = scan_line(
        "acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab | cdfeb fcadb cdfeb cdbaf",
    );
    assert_eq!(line.output_value(), Ok(5353));
}

#[test]
fn test_sample_values() {
    let expected = [8394, 9781, 1197, 9361, 4873, 8418, 4548, 1625, 8717, 4315];
    for (s, value) in SAMPLE.iter().zip(expected) {
        assert_eq!(scan_line(s).output_value(), Ok(value), "decoding {}", s);
    }
}

#[test]
fn test_trailing_newline() {
    let line = scan_line(&format!("{}\n", SAMPLE[0]));
    assert_eq!(line, scan_line(SAMPLE[0]));
}

#[test]
fn test_malformed_records() {
    for bad in [
        "",
        "a a a a a a a a a a | a a a",
        "a a a a a a a a a | a a a a",
        "a a a a a a a a a a a | a a a a",
        "a a a a a a a a a a | a a a a a",
        "a a a a a a a a a a",
        "| a a a a",
        "a a a a a a a a a a | a a a a | a",
        "a a a a a a a a a a |a a a a",
        "a  a a a a a a a a a | a a a a",
    ] {
        assert!(
            matches!(
                ScanLine::try_from(bad),
                Err(DecodeError::MalformedTrainingSet(_))
            ),
            "'{}' should be rejected",
            bad
        );
    }
}

#[test]
fn test_bad_tokens() {
    assert!(matches!(
        ScanLine::try_from("a a a a a a a a a q | a a a a"),
        Err(DecodeError::InvalidLabel { label: 'q', .. })
    ));
    assert!(matches!(
        ScanLine::try_from("a a a a a a a a a a | q a a a"),
        Err(DecodeError::InvalidLabel { label: 'q', .. })
    ));
    assert!(matches!(
        ScanLine::try_from("1 2 3 4 5 6 7 8 9 0 | 1 2 3 4"),
        Err(DecodeError::InvalidLabel { label: '1', .. })
    ));
    assert!(matches!(
        ScanLine::try_from("ab a a a a a a a a a | a a a abca"),
        Err(DecodeError::DuplicateLabel { label: 'a', .. })
    ));
}

#[test]
fn test_degenerate_training_set_fails_at_resolution() {
    let line = scan_line("a a a a a a a a a a | a a a a");
    assert_eq!(line.count_uniquely_identifiable(), 0);
    assert!(matches!(
        line.output_value(),
        Err(DecodeError::MalformedTrainingSet(_))
    ));
}

#[test]
fn test_count_uniquely_identifiable() {
    let counts: Vec<usize> = SAMPLE
        .iter()
        .map(|s| scan_line(s).count_uniquely_identifiable())
        .collect();
    assert_eq!(counts, vec![2, 3, 3, 1, 3, 4, 3, 1, 4, 2]);
}

#[test]
fn test_reading_order_matters() {
    // All four digits of 8394 differ, so any rearrangement of the
    // readings changes the value.
    let line = scan_line(SAMPLE[0]);
    let (training, readings) = SAMPLE[0]
        .split_once(" | ")
        .expect("sample has a separator");
    let readings: Vec<&str> = readings.split(' ').collect();
    let mut seen = 0;
    for a in 0..4 {
        for b in 0..4 {
            for c in 0..4 {
                for d in 0..4 {
                    let order = [a, b, c, d];
                    if (0..4).any(|i| !order.contains(&i)) {
                        continue;
                    }
                    seen += 1;
                    let record = format!(
                        "{} | {} {} {} {}",
                        training, readings[a], readings[b], readings[c], readings[d]
                    );
                    let value = scan_line(&record).output_value();
                    if order == [0, 1, 2, 3] {
                        assert_eq!(value, Ok(8394));
                    } else {
                        assert!(value.is_ok());
                        assert_ne!(value, line.output_value(), "order {:?}", order);
                    }
                }
            }
        }
    }
    assert_eq!(seen, 24);
}

#[test]
fn test_wrong_mapping() {
    use crate::pattern::{CanonicalPosition, SegmentLabel};

    let line = scan_line(
        "acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab | cdfeb fcadb cdfeb cdbaf",
    );
    let mut identity = Mapping::new();
    for position in CanonicalPosition::ALL {
        identity
            .identify(position.canonical_label(), position)
            .expect("identity is a bijection");
    }
    let not_a_digit = SignalPattern::try_from("bcdef").expect("valid pattern");
    assert_eq!(
        line.decode(&identity),
        Err(DecodeError::UndecodableReading {
            index: 0,
            pattern: not_a_digit,
        })
    );

    let mut partial = Mapping::new();
    partial
        .identify(
            SegmentLabel::from_char('c').expect("valid label"),
            CanonicalPosition::Top,
        )
        .expect("first identification");
    assert_eq!(line.decode(&partial), Err(DecodeError::UnmappedLabel('b')));
}

#[test]
fn test_display() {
    let line = scan_line("ab cd ef ga bc de fg ab cd ef | ba dc fe ag");
    assert_eq!(
        line.to_string(),
        "ab cd ef ag bc de fg ab cd ef | ab cd ef ag"
    );
}
