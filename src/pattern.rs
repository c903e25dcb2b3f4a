use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

use crate::error::DecodeError;
use crate::mapping::Mapping;

/// The number of segments in a display.
pub const SEGMENTS: usize = 7;

/// One of the seven wire labels `a`..`g`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentLabel(u8);

impl SegmentLabel {
    pub fn from_char(ch: char) -> Option<SegmentLabel> {
        match ch.to_ascii_lowercase() {
            lower @ 'a'..='g' => Some(SegmentLabel(lower as u8 - b'a')),
            _ => None,
        }
    }

    pub fn from_index(index: usize) -> Option<SegmentLabel> {
        if index < SEGMENTS {
            Some(SegmentLabel(index as u8))
        } else {
            None
        }
    }

    pub fn all() -> impl Iterator<Item = SegmentLabel> {
        (0..SEGMENTS as u8).map(SegmentLabel)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn as_char(&self) -> char {
        (b'a' + self.0) as char
    }

    const fn bit(&self) -> u8 {
        1 << self.0
    }
}

impl Display for SegmentLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The true physical positions of the segments.
///
/// ```text
///  aaaa        TOP
/// b    c       TOP_LEFT, TOP_RIGHT
/// b    c
///  dddd        MIDDLE
/// e    f       BOTTOM_LEFT, BOTTOM_RIGHT
/// e    f
///  gggg        BOTTOM
/// ```
///
/// Each position corresponds to the label shown beside it when the
/// wires are not scrambled, which is how canonical patterns are
/// written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalPosition {
    Top,
    TopLeft,
    TopRight,
    Middle,
    BottomLeft,
    BottomRight,
    Bottom,
}

impl CanonicalPosition {
    pub const ALL: [CanonicalPosition; SEGMENTS] = [
        CanonicalPosition::Top,
        CanonicalPosition::TopLeft,
        CanonicalPosition::TopRight,
        CanonicalPosition::Middle,
        CanonicalPosition::BottomLeft,
        CanonicalPosition::BottomRight,
        CanonicalPosition::Bottom,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// The label this position carries on an unscrambled display.
    pub fn canonical_label(self) -> SegmentLabel {
        SegmentLabel(self as u8)
    }
}

/// An unordered set of lit segments, held as a 7-bit mask.
///
/// The same type is used for scrambled patterns (bits are wire
/// labels) and for canonical ones (bits are `CanonicalPosition`s).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SignalPattern(u8);

impl SignalPattern {
    pub const fn empty() -> SignalPattern {
        SignalPattern(0)
    }

    pub const fn from_positions(positions: &[CanonicalPosition]) -> SignalPattern {
        let mut bits: u8 = 0;
        let mut i = 0;
        while i < positions.len() {
            bits |= 1 << positions[i].index();
            i += 1;
        }
        SignalPattern(bits)
    }

    pub fn from_labels<I: IntoIterator<Item = SegmentLabel>>(labels: I) -> SignalPattern {
        SignalPattern(labels.into_iter().fold(0, |bits, label| bits | label.bit()))
    }

    pub const fn segment_count(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, label: SegmentLabel) -> bool {
        self.0 & label.bit() != 0
    }

    pub const fn contains_position(&self, position: CanonicalPosition) -> bool {
        self.0 & (1 << position.index()) != 0
    }

    pub fn labels(&self) -> impl Iterator<Item = SegmentLabel> + '_ {
        SegmentLabel::all().filter(move |label| self.contains(*label))
    }

    pub fn union(&self, other: SignalPattern) -> SignalPattern {
        SignalPattern(self.0 | other.0)
    }

    pub fn difference(&self, other: SignalPattern) -> SignalPattern {
        SignalPattern(self.0 & !other.0)
    }

    pub fn with(&self, label: SegmentLabel) -> SignalPattern {
        SignalPattern(self.0 | label.bit())
    }

    /// The only member, if there is exactly one.
    pub fn single_label(&self) -> Option<SegmentLabel> {
        if self.segment_count() == 1 {
            SegmentLabel::from_index(self.0.trailing_zeros() as usize)
        } else {
            None
        }
    }

    /// Substitute each member through `mapping`, giving the pattern
    /// in terms of canonical positions.
    pub fn remap(&self, mapping: &Mapping) -> Result<SignalPattern, DecodeError> {
        let mut positions: Vec<CanonicalPosition> = Vec::with_capacity(SEGMENTS);
        for label in self.labels() {
            match mapping.unscramble(label) {
                Some(position) => positions.push(position),
                None => return Err(DecodeError::UnmappedLabel(label.as_char())),
            }
        }
        Ok(SignalPattern::from_positions(&positions))
    }
}

impl TryFrom<&str> for SignalPattern {
    type Error = DecodeError;
    fn try_from(token: &str) -> Result<SignalPattern, DecodeError> {
        let mut pattern = SignalPattern::empty();
        for ch in token.chars() {
            match SegmentLabel::from_char(ch) {
                None => {
                    return Err(DecodeError::InvalidLabel {
                        token: token.to_string(),
                        label: ch,
                    });
                }
                Some(label) if pattern.contains(label) => {
                    return Err(DecodeError::DuplicateLabel {
                        token: token.to_string(),
                        label: label.as_char(),
                    });
                }
                Some(label) => {
                    pattern = pattern.with(label);
                }
            }
        }
        if pattern.is_empty() {
            Err(DecodeError::EmptyPattern)
        } else {
            Ok(pattern)
        }
    }
}

impl FromStr for SignalPattern {
    type Err = DecodeError;
    fn from_str(s: &str) -> Result<SignalPattern, DecodeError> {
        SignalPattern::try_from(s)
    }
}

impl Display for SignalPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for label in self.labels() {
            write!(f, "{}", label)?;
        }
        Ok(())
    }
}

impl Debug for SignalPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "SignalPattern(\"{}\")", self)
    }
}

#[cfg(test)]
fn pat(s: &str) -> SignalPattern {
    SignalPattern::try_from(s).expect("test pattern should be valid")
}

#[test]
fn test_parse_valid() {
    for s in [
        "abcefg", "cf", "acdeg", "acdfg", "bcdf", "abdfg", "abdefg", "acf", "abcdefg", "abcdfg",
    ] {
        let p = pat(s);
        assert_eq!(p.segment_count(), s.len());
        assert_eq!(p.to_string(), s);
    }
}

#[test]
fn test_parse_invalid_label() {
    for s in ["h", ";", "!", "1"] {
        assert!(matches!(
            SignalPattern::try_from(s),
            Err(DecodeError::InvalidLabel { .. })
        ));
    }
    assert_eq!(
        SignalPattern::try_from("abx"),
        Err(DecodeError::InvalidLabel {
            token: "abx".to_string(),
            label: 'x'
        })
    );
}

#[test]
fn test_parse_duplicate_label() {
    assert_eq!(
        SignalPattern::try_from("aa"),
        Err(DecodeError::DuplicateLabel {
            token: "aa".to_string(),
            label: 'a'
        })
    );
    // The first offending character decides which error we get.
    assert!(matches!(
        SignalPattern::try_from("asdfaw3"),
        Err(DecodeError::InvalidLabel { label: 's', .. })
    ));
    assert!(matches!(
        SignalPattern::try_from("abcdefga"),
        Err(DecodeError::DuplicateLabel { label: 'a', .. })
    ));
}

#[test]
fn test_parse_empty() {
    assert_eq!(SignalPattern::try_from(""), Err(DecodeError::EmptyPattern));
}

#[test]
fn test_case_insensitive() {
    assert_eq!(pat("ACF"), pat("acf"));
    assert_eq!(pat("AcF").to_string(), "acf");
}

#[test]
fn test_order_independent_equality() {
    assert_eq!(pat("badfeg"), pat("abdefg"));
    assert_ne!(pat("fc"), pat("bcdf"));
    let mut seen = std::collections::HashSet::new();
    seen.insert(pat("cdfeb"));
    assert!(seen.contains(&pat("bcdef")));
}

#[test]
fn test_set_operations() {
    let seven = pat("dab");
    let one = pat("ab");
    assert_eq!(seven.difference(one), pat("d"));
    assert_eq!(seven.difference(one).single_label(), SegmentLabel::from_char('d'));
    assert_eq!(one.union(pat("ef")), pat("abef"));
    assert_eq!(one.single_label(), None);
    assert_eq!(
        seven.labels().map(|l| l.as_char()).collect::<String>(),
        "abd"
    );
}

#[test]
fn test_positions_match_canonical_labels() {
    let one = SignalPattern::from_positions(&[
        CanonicalPosition::TopRight,
        CanonicalPosition::BottomRight,
    ]);
    assert_eq!(one, pat("cf"));
    for position in CanonicalPosition::ALL {
        assert_eq!(
            SignalPattern::from_positions(&[position]).single_label(),
            Some(position.canonical_label())
        );
    }
}
