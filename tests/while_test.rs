mod common;
use common::*;

#[test]
fn test_while_counts() {
    // Each print statement carries its own trailing newline.
    let mut r = runtime("main { var i; i := 0; while (i < 3) { print(i); i := i + 1; } }");
    assert_eq!(exec(&mut r), "0\n1\n2\n");
}

#[test]
fn test_while_false_skips_body() {
    let mut r = runtime("main { var i; i := 9; while (i < 3) { print(i); }; print(i); }");
    assert_eq!(exec(&mut r), "9\n");
}

#[test]
fn test_nested_while() {
    let mut r = runtime(
        "main { var i, j, total; total := 0; i := 0; \
         while (i < 3) { \
             j := 0; \
             while (j < 4) { total := total + 1; j := j + 1; }; \
             i := i + 1; \
         }; \
         print(total); }",
    );
    assert_eq!(exec(&mut r), "12\n");
}

#[test]
fn test_while_with_odd() {
    let mut r = runtime(
        "main { var n; n := 7; \
         while (odd n) { print(n); n := n / 2; }; \
         print(n); }",
    );
    assert_eq!(exec(&mut r), "7\n3\n1\n0\n");
}
