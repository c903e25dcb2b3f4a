use crate::error::DecodeError;
use crate::pattern::{CanonicalPosition, SegmentLabel, SignalPattern, SEGMENTS};

/// The relabelling of the wires for one scan line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mapping {
    /// Mapping from scrambled segment to true position.
    forward: [Option<CanonicalPosition>; SEGMENTS],
    /// Mapping from true position to scrambled segment.
    reverse: [Option<SegmentLabel>; SEGMENTS],
}

impl Mapping {
    pub fn new() -> Mapping {
        Mapping::default()
    }

    // True if we know the mapping for all 7 segments.
    pub fn is_complete(&self) -> bool {
        self.forward.iter().all(Option::is_some) && self.reverse.iter().all(Option::is_some)
    }

    pub fn identify(
        &mut self,
        scrambled: SegmentLabel,
        correct: CanonicalPosition,
    ) -> Result<(), DecodeError> {
        if let Some(existing) = self.unscramble(scrambled) {
            return Err(DecodeError::IncompleteMapping(format!(
                "{} has been mapped to more than one position ({:?} and {:?})",
                scrambled, existing, correct,
            )));
        }
        if let Some(existing) = self.scramble(correct) {
            return Err(DecodeError::IncompleteMapping(format!(
                "more than one scrambled segment ({} and {}) maps to {:?}",
                scrambled, existing, correct,
            )));
        }
        self.forward[scrambled.index()] = Some(correct);
        self.reverse[correct.index()] = Some(scrambled);
        Ok(())
    }

    pub fn is_identified(&self, scrambled: SegmentLabel) -> bool {
        self.forward[scrambled.index()].is_some()
    }

    pub fn identified(&self) -> SignalPattern {
        SignalPattern::from_labels(SegmentLabel::all().filter(|label| self.is_identified(*label)))
    }

    pub fn scramble(&self, unscrambled: CanonicalPosition) -> Option<SegmentLabel> {
        self.reverse[unscrambled.index()]
    }

    pub fn unscramble(&self, scrambled: SegmentLabel) -> Option<CanonicalPosition> {
        self.forward[scrambled.index()]
    }

    /// The scrambled form of a canonical pattern; the inverse of
    /// `SignalPattern::remap`.
    pub fn scramble_pattern(&self, canonical: SignalPattern) -> Result<SignalPattern, DecodeError> {
        let mut scrambled = SignalPattern::empty();
        for position in CanonicalPosition::ALL {
            if canonical.contains_position(position) {
                match self.scramble(position) {
                    Some(label) => {
                        scrambled = scrambled.with(label);
                    }
                    None => {
                        return Err(DecodeError::UnmappedLabel(
                            position.canonical_label().as_char(),
                        ));
                    }
                }
            }
        }
        Ok(scrambled)
    }
}

#[cfg(test)]
fn label(ch: char) -> SegmentLabel {
    SegmentLabel::from_char(ch).expect("test label should be valid")
}

#[test]
fn test_identify() {
    let mut m = Mapping::new();
    assert!(!m.is_complete());
    assert_eq!(m.identify(label('d'), CanonicalPosition::Top), Ok(()));
    assert!(m.is_identified(label('d')));
    assert!(!m.is_identified(label('a')));
    assert_eq!(m.unscramble(label('d')), Some(CanonicalPosition::Top));
    assert_eq!(m.scramble(CanonicalPosition::Top), Some(label('d')));
    assert_eq!(m.identified().to_string(), "d");
}

#[test]
fn test_identify_conflicts() {
    let mut m = Mapping::new();
    m.identify(label('d'), CanonicalPosition::Top)
        .expect("first identification should succeed");
    assert!(matches!(
        m.identify(label('d'), CanonicalPosition::Bottom),
        Err(DecodeError::IncompleteMapping(_))
    ));
    assert!(matches!(
        m.identify(label('a'), CanonicalPosition::Top),
        Err(DecodeError::IncompleteMapping(_))
    ));
    assert_eq!(m.unscramble(label('a')), None);
}

#[test]
fn test_scramble_pattern() {
    let mut m = Mapping::new();
    for (ch, position) in "gfedcba".chars().zip(CanonicalPosition::ALL) {
        m.identify(label(ch), position)
            .expect("identification should succeed");
    }
    assert!(m.is_complete());
    let one = SignalPattern::from_positions(&[
        CanonicalPosition::TopRight,
        CanonicalPosition::BottomRight,
    ]);
    let scrambled = m.scramble_pattern(one).expect("mapping is complete");
    assert_eq!(scrambled.to_string(), "be");
    assert_eq!(scrambled.remap(&m), Ok(one));
}

#[test]
fn test_remap_unmapped() {
    let mut m = Mapping::new();
    m.identify(label('a'), CanonicalPosition::Top)
        .expect("identification should succeed");
    let p = SignalPattern::from_labels([label('a'), label('b')]);
    assert_eq!(p.remap(&m), Err(DecodeError::UnmappedLabel('b')));
}
