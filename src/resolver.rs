//! Deduction of the wire relabelling from the ten training patterns.
//!
//! # Frequencies
//!
//! Over the ten digits, each position is lit this many times:
//!
//! | position     | frequency |
//! | ------------ | --------- |
//! | TOP          | 8         |
//! | TOP_LEFT     | 6         |
//! | TOP_RIGHT    | 8         |
//! | MIDDLE       | 7         |
//! | BOTTOM_LEFT  | 4         |
//! | BOTTOM_RIGHT | 9         |
//! | BOTTOM       | 7         |
//!
//! Scrambling doesn't change how often a wire is lit, so counting the
//! training patterns containing each scrambled label identifies
//! BOTTOM_LEFT, TOP_LEFT and BOTTOM_RIGHT directly.
//!
//! # Anchors
//!
//! The digits 1, 7 and 4 are the only ones with 2, 3 and 4 segments.
//! Removing BOTTOM_RIGHT from 1 leaves TOP_RIGHT.  Removing 1 from 7
//! leaves TOP.  Removing TOP_LEFT and 1 from 4 leaves MIDDLE.
//! Whatever is left over is BOTTOM.
use tracing::{event, Level};

use crate::catalog::CATALOG;
use crate::error::DecodeError;
use crate::mapping::Mapping;
use crate::pattern::{CanonicalPosition, SegmentLabel, SignalPattern, SEGMENTS};
use crate::scanline::TRAINING_COUNT;

fn check_training_set(training: &[SignalPattern]) -> Result<(), DecodeError> {
    if training.len() != TRAINING_COUNT {
        return Err(DecodeError::MalformedTrainingSet(format!(
            "expected {} training patterns, got {}",
            TRAINING_COUNT,
            training.len()
        )));
    }
    let all = training
        .iter()
        .fold(SignalPattern::empty(), |acc, p| acc.union(*p));
    if all.segment_count() != SEGMENTS {
        return Err(DecodeError::MalformedTrainingSet(format!(
            "training patterns use only {} distinct segments ({})",
            all.segment_count(),
            all
        )));
    }
    let mut histogram = [0; SEGMENTS + 1];
    for pattern in training {
        histogram[pattern.segment_count()] += 1;
    }
    if &histogram != CATALOG.count_histogram() {
        return Err(DecodeError::MalformedTrainingSet(format!(
            "segment counts {:?} do not match the digits 0-9",
            training
                .iter()
                .map(SignalPattern::segment_count)
                .collect::<Vec<_>>()
        )));
    }
    Ok(())
}

/// For each scrambled label, the number of training patterns
/// containing it.
fn tally(training: &[SignalPattern]) -> [usize; SEGMENTS] {
    let mut counts = [0; SEGMENTS];
    for label in SegmentLabel::all() {
        counts[label.index()] = training.iter().filter(|p| p.contains(label)).count();
    }
    counts
}

fn anchor(training: &[SignalPattern], segment_count: usize) -> Result<SignalPattern, DecodeError> {
    let mut candidates = training
        .iter()
        .filter(|p| p.segment_count() == segment_count);
    match (candidates.next(), candidates.count()) {
        (Some(pattern), 0) => Ok(*pattern),
        (None, _) => Err(DecodeError::AmbiguousAnchor {
            segment_count,
            found: 0,
        }),
        (Some(_), others) => Err(DecodeError::AmbiguousAnchor {
            segment_count,
            found: others + 1,
        }),
    }
}

fn known(mapping: &Mapping, positions: &[CanonicalPosition]) -> Result<SignalPattern, DecodeError> {
    let mut result = SignalPattern::empty();
    for position in positions {
        match mapping.scramble(*position) {
            Some(label) => {
                result = result.with(label);
            }
            None => {
                return Err(DecodeError::IncompleteMapping(format!(
                    "{:?} is needed but has not been identified",
                    position
                )));
            }
        }
    }
    Ok(result)
}

fn isolate(
    mapping: &mut Mapping,
    remaining: SignalPattern,
    position: CanonicalPosition,
) -> Result<(), DecodeError> {
    match remaining.single_label() {
        Some(label) => {
            event!(
                Level::TRACE,
                "scrambled segment {} is {:?}",
                label,
                position
            );
            mapping.identify(label, position)
        }
        None => Err(DecodeError::IncompleteMapping(format!(
            "expected one candidate for {:?}, found '{}'",
            position, remaining
        ))),
    }
}

/// Deduce the mapping from scrambled labels to true positions.
///
/// `training` must hold the ten digits exactly once each, in any
/// order.
pub fn resolve_mapping(training: &[SignalPattern]) -> Result<Mapping, DecodeError> {
    use crate::pattern::CanonicalPosition::*;

    check_training_set(training)?;
    let mut mapping = Mapping::new();

    // Positions whose frequency is unique among the digits.
    let counts = tally(training);
    for position in CanonicalPosition::ALL {
        let frequency = CATALOG.frequency(position);
        if CATALOG.positions_with_frequency(frequency).count() != 1 {
            continue;
        }
        let candidates = SignalPattern::from_labels(
            SegmentLabel::all().filter(|l| counts[l.index()] == frequency),
        );
        if candidates.segment_count() != 1 {
            return Err(DecodeError::MalformedTrainingSet(format!(
                "segments '{}' appear in {} training patterns, but exactly one should",
                candidates, frequency
            )));
        }
        isolate(&mut mapping, candidates, position)?;
    }

    let one = anchor(training, 2)?;
    let seven = anchor(training, 3)?;
    let four = anchor(training, 4)?;

    let top_right = one.difference(known(&mapping, &[BottomRight])?);
    isolate(&mut mapping, top_right, TopRight)?;
    let top = seven.difference(known(&mapping, &[TopRight, BottomRight])?);
    isolate(&mut mapping, top, Top)?;
    let middle = four.difference(known(&mapping, &[TopLeft, TopRight, BottomRight])?);
    isolate(&mut mapping, middle, Middle)?;
    let bottom = SignalPattern::from_labels(SegmentLabel::all()).difference(mapping.identified());
    isolate(&mut mapping, bottom, Bottom)?;

    if !mapping.is_complete() {
        return Err(DecodeError::IncompleteMapping(format!(
            "only segments '{}' were identified",
            mapping.identified()
        )));
    }
    event!(Level::TRACE, "resolved mapping {:?}", mapping);
    Ok(mapping)
}

#[cfg(test)]
fn parse_patterns(s: &str) -> Vec<SignalPattern> {
    s.split(' ')
        .map(|token| SignalPattern::try_from(token).expect("test pattern should be valid"))
        .collect()
}

#[cfg(test)]
fn permutations(items: Vec<usize>) -> Vec<Vec<usize>> {
    if items.len() <= 1 {
        return vec![items];
    }
    let mut result = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.clone();
        let first = rest.remove(i);
        for mut tail in permutations(rest) {
            tail.insert(0, first);
            result.push(tail);
        }
    }
    result
}

#[cfg(test)]
const EXAMPLE_TRAINING: &str = "acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab";

#[test]
fn test_tally() {
    // a b c d e f g
    assert_eq!(tally(&parse_patterns(EXAMPLE_TRAINING)), [8, 9, 7, 8, 6, 7, 4]);
}

#[test]
fn test_anchor() {
    let training = parse_patterns("ab cd abc");
    assert_eq!(
        anchor(&training, 2),
        Err(DecodeError::AmbiguousAnchor {
            segment_count: 2,
            found: 2
        })
    );
    assert_eq!(
        anchor(&training, 4),
        Err(DecodeError::AmbiguousAnchor {
            segment_count: 4,
            found: 0
        })
    );
    assert_eq!(anchor(&training, 3).map(|p| p.to_string()), Ok("abc".to_string()));
}

#[test]
fn test_resolve_example() {
    let mapping =
        resolve_mapping(&parse_patterns(EXAMPLE_TRAINING)).expect("example should resolve");
    let expected = [
        ('d', CanonicalPosition::Top),
        ('e', CanonicalPosition::TopLeft),
        ('a', CanonicalPosition::TopRight),
        ('f', CanonicalPosition::Middle),
        ('g', CanonicalPosition::BottomLeft),
        ('b', CanonicalPosition::BottomRight),
        ('c', CanonicalPosition::Bottom),
    ];
    for (ch, position) in expected {
        let label = SegmentLabel::from_char(ch).expect("valid label");
        assert_eq!(mapping.unscramble(label), Some(position));
    }
}

#[test]
fn test_training_order_does_not_matter() {
    let training = parse_patterns(EXAMPLE_TRAINING);
    let expected = resolve_mapping(&training).expect("example should resolve");
    for shift in 0..training.len() {
        let mut shuffled = training.clone();
        shuffled.rotate_left(shift);
        assert_eq!(resolve_mapping(&shuffled).as_ref(), Ok(&expected));
        shuffled.reverse();
        assert_eq!(resolve_mapping(&shuffled).as_ref(), Ok(&expected));
    }
}

/// Fisher-Yates with a fixed xorshift generator, so failures repeat.
#[cfg(test)]
fn shuffle<T>(items: &mut [T], state: &mut u64) {
    for i in (1..items.len()).rev() {
        *state ^= *state << 13;
        *state ^= *state >> 7;
        *state ^= *state << 17;
        let j = (*state % (i as u64 + 1)) as usize;
        items.swap(i, j);
    }
}

#[test]
fn test_shuffled_sample_training_sets() {
    let mut state: u64 = 0x2021_1208;
    for record in crate::scanline::SAMPLE {
        let (training, _) = record.split_once(" | ").expect("sample has a separator");
        let training = parse_patterns(training);
        let expected = resolve_mapping(&training).expect("sample should resolve");
        for _ in 0..200 {
            let mut shuffled = training.clone();
            shuffle(&mut shuffled, &mut state);
            assert_eq!(
                resolve_mapping(&shuffled).as_ref(),
                Ok(&expected),
                "shuffled {:?}",
                shuffled
            );
        }
    }
}

#[test]
fn test_round_trip_every_bijection() {
    let perms = permutations((0..SEGMENTS).collect());
    assert_eq!(perms.len(), 5040);
    for perm in perms {
        let mut scrambler = Mapping::new();
        for (position, label_index) in CanonicalPosition::ALL.iter().zip(perm.iter()) {
            let label = SegmentLabel::from_index(*label_index).expect("index is in range");
            scrambler
                .identify(label, *position)
                .expect("permutation is a bijection");
        }
        let training: Vec<SignalPattern> = CATALOG
            .digits()
            .map(|(_, canonical)| scrambler.scramble_pattern(canonical))
            .collect::<Result<_, _>>()
            .expect("scrambler is complete");
        let resolved = resolve_mapping(&training).expect("every bijection should resolve");
        assert_eq!(resolved, scrambler);
        for (digit, canonical) in CATALOG.digits() {
            let scrambled = scrambler
                .scramble_pattern(canonical)
                .expect("scrambler is complete");
            assert_eq!(scrambled.remap(&resolved), Ok(canonical));
            assert_eq!(CATALOG.lookup(canonical), Ok(digit));
        }
    }
}

#[test]
fn test_wrong_number_of_patterns() {
    let mut training = parse_patterns(EXAMPLE_TRAINING);
    training.pop();
    assert!(matches!(
        resolve_mapping(&training),
        Err(DecodeError::MalformedTrainingSet(_))
    ));
}

#[test]
fn test_too_few_segments() {
    assert!(matches!(
        resolve_mapping(&parse_patterns("a a a a a a a a a a")),
        Err(DecodeError::MalformedTrainingSet(_))
    ));
}

#[test]
fn test_wrong_segment_counts() {
    // The 2-segment pattern is replaced by a second 3-segment one.
    let training = parse_patterns("acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb abg");
    assert!(matches!(
        resolve_mapping(&training),
        Err(DecodeError::MalformedTrainingSet(_))
    ));
}

#[test]
fn test_not_the_ten_digits() {
    // Unscrambled digits, except that 2 is replaced by abcde.  The
    // segment counts and frequencies still look plausible, but 4
    // cannot be made to yield a single MIDDLE segment.
    let training = parse_patterns("abcefg cf abcde acdfg bcdf abdfg abdefg acf abcdefg abcdfg");
    assert!(matches!(
        resolve_mapping(&training),
        Err(DecodeError::IncompleteMapping(_))
    ));
}
