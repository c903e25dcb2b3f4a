use std::fmt::{self, Display, Formatter};
use std::ops::Range;

use ndarray::prelude::*;
use ndarray::s;

use crate::pattern::{CanonicalPosition, SignalPattern};

const ROWS: usize = 7;
const COLS: usize = 6;
const UNLIT: char = '.';

/// A seven-segment picture of a pattern.  Lit segments are drawn with
/// their label, unlit ones with `.`:
///
/// ```text
///  aaaa
/// b    c
/// b    c
///  dddd
/// e    f
/// e    f
///  gggg
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendering {
    grid: Array2<char>,
}

/// Which cells of the grid each segment occupies.
fn cells(position: CanonicalPosition) -> (Range<usize>, Range<usize>) {
    match position {
        CanonicalPosition::Top => (0..1, 1..5),
        CanonicalPosition::TopLeft => (1..3, 0..1),
        CanonicalPosition::TopRight => (1..3, 5..6),
        CanonicalPosition::Middle => (3..4, 1..5),
        CanonicalPosition::BottomLeft => (4..6, 0..1),
        CanonicalPosition::BottomRight => (4..6, 5..6),
        CanonicalPosition::Bottom => (6..7, 1..5),
    }
}

pub fn render(pattern: SignalPattern) -> Rendering {
    let mut grid = Array2::from_elem((ROWS, COLS), ' ');
    for position in CanonicalPosition::ALL {
        let (rows, cols) = cells(position);
        let ch = if pattern.contains_position(position) {
            position.canonical_label().as_char()
        } else {
            UNLIT
        };
        grid.slice_mut(s![rows, cols]).fill(ch);
    }
    Rendering { grid }
}

impl Rendering {
    pub fn rows(&self) -> Vec<String> {
        self.grid
            .rows()
            .into_iter()
            .map(|row| row.iter().collect())
            .collect()
    }
}

impl Display for Rendering {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rows().join("\n"))
    }
}

/// Draw several patterns next to each other, separated by
/// `interstitial`.
pub fn side_by_side(patterns: &[SignalPattern], interstitial: &str) -> Vec<String> {
    let renderings: Vec<Vec<String>> = patterns.iter().map(|p| render(*p).rows()).collect();
    (0..ROWS)
        .map(|row| {
            renderings
                .iter()
                .map(|rows| rows[row].as_str())
                .collect::<Vec<&str>>()
                .join(interstitial)
        })
        .collect()
}

#[cfg(test)]
fn pat(s: &str) -> SignalPattern {
    SignalPattern::try_from(s).expect("test pattern should be valid")
}

#[test]
fn test_render_digits() {
    let cases = [
        ("abcefg", " aaaa \nb    c\nb    c\n .... \ne    f\ne    f\n gggg "),
        ("cf", " .... \n.    c\n.    c\n .... \n.    f\n.    f\n .... "),
        ("acdeg", " aaaa \n.    c\n.    c\n dddd \ne    .\ne    .\n gggg "),
        ("acdfg", " aaaa \n.    c\n.    c\n dddd \n.    f\n.    f\n gggg "),
        ("bcdf", " .... \nb    c\nb    c\n dddd \n.    f\n.    f\n .... "),
        ("abdfg", " aaaa \nb    .\nb    .\n dddd \n.    f\n.    f\n gggg "),
        ("abdefg", " aaaa \nb    .\nb    .\n dddd \ne    f\ne    f\n gggg "),
        ("acf", " aaaa \n.    c\n.    c\n .... \n.    f\n.    f\n .... "),
        ("abcdefg", " aaaa \nb    c\nb    c\n dddd \ne    f\ne    f\n gggg "),
        ("abcdfg", " aaaa \nb    c\nb    c\n dddd \n.    f\n.    f\n gggg "),
    ];
    for (segments, expected) in cases {
        assert_eq!(render(pat(segments)).to_string(), expected);
    }
}

#[test]
fn test_rows() {
    let rows = render(pat("cf")).rows();
    assert_eq!(rows.len(), 7);
    assert!(rows.iter().all(|r| r.len() == 6));
    let mut reversed = rows.clone();
    reversed.reverse();
    assert_ne!(rows, reversed);
    assert_eq!(render(pat("fc")), render(pat("cf")));
    assert_eq!(rows[1].chars().nth(5), Some('c'));
}

#[test]
fn test_side_by_side() {
    for interstitial in [" ", "\t", "qqq"] {
        let four = render(pat("cbfd")).rows();
        let two = render(pat("egcad")).rows();
        let expected: Vec<String> = four
            .iter()
            .zip(two.iter())
            .map(|(l, r)| format!("{}{}{}", l, interstitial, r))
            .collect();
        assert_eq!(side_by_side(&[pat("bcdf"), pat("acdeg")], interstitial), expected);
    }
    assert_eq!(
        side_by_side(&[pat("a"), pat("g")], "|")[0],
        " aaaa | .... "
    );
    assert_eq!(side_by_side(&[], " "), vec![String::new(); 7]);
}
