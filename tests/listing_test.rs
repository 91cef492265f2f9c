mod common;
use common::*;
use pl0::mach::Listing;

#[test]
fn test_listing_is_deterministic() {
    let compiled = build("main { var i; i := 0; while (i < 3) { print(i); i := i + 1; } }");
    let first = Listing::new(&compiled.code).to_string();
    let second = Listing::new(&compiled.code).to_string();
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn test_listing_lines_match_the_buffer() {
    let compiled = build("main { var x; x := 1; print(x); }");
    let listing = Listing::new(&compiled.code).to_string();
    assert_eq!(listing.lines().count(), compiled.code.len());
    assert!(listing.starts_with("0 JMP 0 1\n"));
    for (addr, line) in listing.lines().enumerate() {
        assert!(line.starts_with(&format!("{} ", addr)));
    }
}

#[test]
fn test_listing_from_skips_earlier_code() {
    let compiled = build("main { var x; x := 1; }");
    let tail = Listing::from(&compiled.code, 2).to_string();
    assert!(tail.starts_with("2 "));
    assert_eq!(tail.lines().count(), compiled.code.len() - 2);
}

#[test]
fn test_string_operands_are_quoted() {
    let compiled = build("main { print(\"hi\"); }");
    let listing = Listing::new(&compiled.code).to_string();
    assert!(listing.contains("LITS 0 \"hi\""), "got:\n{}", listing);
}
