use std::io;
use std::io::prelude::*;

use tracing::{event, Level};
use tracing_subscriber::prelude::*;

use sevenseg::render::side_by_side;
use sevenseg::{count_uniquely_identifiable_readings, sum_decoded_readings, DecodeError, ScanLine};

fn part1(lines: &[ScanLine]) {
    println!(
        "Day 8 part 1: {}",
        count_uniquely_identifiable_readings(lines)
    );
}

fn describe_readings(line: &ScanLine) -> Result<String, DecodeError> {
    let mapping = line.resolve_mapping()?;
    let canonical = line.canonical_readings(&mapping)?;
    Ok(side_by_side(&canonical, "  ").join("\n"))
}

fn part2(lines: &[ScanLine]) -> Result<(), DecodeError> {
    if tracing::enabled!(Level::DEBUG) {
        for line in lines {
            event!(
                Level::DEBUG,
                "{} reads as:\n{}",
                line,
                describe_readings(line)?
            );
        }
    }
    let total = sum_decoded_readings(lines)?;
    println!("Day 8 part 2: {}", total);
    Ok(())
}

fn read_scan_lines() -> Result<Vec<ScanLine>, String> {
    let mut result = Vec::new();
    for (n, line) in io::BufReader::new(io::stdin()).lines().enumerate() {
        let line = line.map_err(|e| format!("failed to read input: {}", e))?;
        if line.trim().is_empty() {
            continue;
        }
        match ScanLine::try_from(line.as_str()) {
            Ok(scan_line) => result.push(scan_line),
            Err(e) => {
                return Err(format!("line {}: {}", n + 1, e));
            }
        }
    }
    Ok(result)
}

fn make_filter_layer() -> Result<tracing_subscriber::EnvFilter, String> {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
        .map_err(|e| e.to_string())
}

#[test]
fn test_default_filter() {
    assert!(tracing_subscriber::EnvFilter::try_new("info").is_ok());
    assert!(tracing_subscriber::EnvFilter::try_new("sevenseg=trace,warn").is_ok());
}

#[test]
fn test_describe_readings() {
    let line = ScanLine::try_from(
        "acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab | cdfeb fcadb cdfeb cdbaf",
    )
    .expect("example should parse");
    let picture = describe_readings(&line).expect("example should decode");
    let rows: Vec<&str> = picture.split('\n').collect();
    assert_eq!(rows.len(), 7);
    // 5 3 5 3
    assert_eq!(rows[0], " aaaa    aaaa    aaaa    aaaa ");
    assert_eq!(rows[1], "b    .  .    c  b    .  .    c");
    let bad = ScanLine::try_from("a a a a a a a a a a | a a a a").expect("tokens are valid");
    assert!(describe_readings(&bad).is_err());
}

fn main() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let filter_layer = match make_filter_layer() {
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let lines = match read_scan_lines() {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("failed to parse puzzle input: {}", e);
            std::process::exit(1);
        }
    };
    event!(Level::INFO, "read {} scan lines", lines.len());
    part1(&lines);
    if let Err(e) = part2(&lines) {
        eprintln!("failed to decode puzzle input: {}", e);
        std::process::exit(1);
    }
}
