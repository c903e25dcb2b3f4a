//! Decoding of scrambled seven-segment displays.
//!
//! Each scan line carries ten training patterns (one per digit, in
//! arbitrary order, with the segment wires randomly relabelled) and
//! four reading patterns.  We deduce the relabelling from the training
//! patterns and use it to read the four-digit number.

pub mod batch;
pub mod catalog;
pub mod error;
pub mod mapping;
pub mod pattern;
pub mod render;
pub mod resolver;
pub mod scanline;

pub use batch::{count_uniquely_identifiable_readings, sum_decoded_readings};
pub use catalog::{DigitCatalog, CATALOG};
pub use error::DecodeError;
pub use mapping::Mapping;
pub use pattern::{CanonicalPosition, SegmentLabel, SignalPattern};
pub use resolver::resolve_mapping;
pub use scanline::ScanLine;
