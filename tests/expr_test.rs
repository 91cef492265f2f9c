mod common;
use common::*;

#[test]
fn test_precedence() {
    let mut r = runtime("main { var x; x := 2 + 3 * 4; print(x); }");
    assert_eq!(exec(&mut r), "14\n");
}

#[test]
fn test_parens_override_precedence() {
    let mut r = runtime("main { var x; x := (2 + 3) * 4; print(x); }");
    assert_eq!(exec(&mut r), "20\n");
}

#[test]
fn test_unary_minus() {
    let mut r = runtime("main { var x; x := -5 + 2; print(x); }");
    assert_eq!(exec(&mut r), "-3\n");
}

#[test]
fn test_division_truncates_toward_zero() {
    let mut r = runtime("main { var x, y; x := 7 / 2; y := -7 / 2; print(x, y); }");
    assert_eq!(exec(&mut r), "3 -3\n");
}

#[test]
fn test_constants_fold_into_literals() {
    let mut r = runtime("main { const k = 6; var x; x := k * 7; print(x); }");
    assert_eq!(exec(&mut r), "42\n");
}

#[test]
fn test_division_by_zero_faults() {
    let mut r = runtime("main { var x; x := 1 / 0; print(x); }");
    let out = exec(&mut r);
    assert!(out.contains("DIVISION BY ZERO"), "got: {}", out);
}
