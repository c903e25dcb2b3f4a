use std::fmt::{self, Display, Formatter};

use crate::pattern::SignalPattern;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A token contained something other than `a`..`g`.
    InvalidLabel { token: String, label: char },
    /// A token named the same segment twice.
    DuplicateLabel { token: String, label: char },
    EmptyPattern,
    /// The record or its training patterns cannot be the ten digits.
    MalformedTrainingSet(String),
    /// The number of training patterns having `segment_count`
    /// segments was `found` rather than exactly one.
    AmbiguousAnchor { segment_count: usize, found: usize },
    IncompleteMapping(String),
    UnmappedLabel(char),
    UnknownPattern(SignalPattern),
    /// The reading at `index` (0 is leftmost) decoded to no digit.
    UndecodableReading { index: usize, pattern: SignalPattern },
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InvalidLabel { token, label } => {
                write!(f, "'{}' is not a segment label (in '{}')", label, token)
            }
            DecodeError::DuplicateLabel { token, label } => {
                write!(f, "segment '{}' appears more than once in '{}'", label, token)
            }
            DecodeError::EmptyPattern => f.write_str("a signal pattern needs at least one segment"),
            DecodeError::MalformedTrainingSet(why) => {
                write!(f, "malformed training set: {}", why)
            }
            DecodeError::AmbiguousAnchor {
                segment_count,
                found,
            } => write!(
                f,
                "expected exactly one training pattern with {} segments, found {}",
                segment_count, found
            ),
            DecodeError::IncompleteMapping(why) => {
                write!(f, "could not complete the segment mapping: {}", why)
            }
            DecodeError::UnmappedLabel(label) => {
                write!(f, "segment '{}' has no entry in the mapping", label)
            }
            DecodeError::UnknownPattern(pattern) => {
                write!(f, "segments {} do not form a digit", pattern)
            }
            DecodeError::UndecodableReading { index, pattern } => write!(
                f,
                "reading {} decodes to segments {}, which is not a digit",
                index, pattern
            ),
        }
    }
}

impl std::error::Error for DecodeError {}

#[test]
fn test_display() {
    assert_eq!(
        DecodeError::InvalidLabel {
            token: "abq".to_string(),
            label: 'q'
        }
        .to_string(),
        "'q' is not a segment label (in 'abq')"
    );
    assert_eq!(
        DecodeError::AmbiguousAnchor {
            segment_count: 2,
            found: 0
        }
        .to_string(),
        "expected exactly one training pattern with 2 segments, found 0"
    );
}
