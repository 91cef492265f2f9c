mod common;
use common::*;

fn codes(source: &str) -> Vec<u16> {
    build(source).errors.iter().map(|e| e.code()).collect()
}

#[test]
fn test_missing_semicolon_is_reported_and_recovered() {
    let compiled = build("main { var x; x := 1 print(x); }");
    let codes: Vec<u16> = compiled.errors.iter().map(|e| e.code()).collect();
    assert_eq!(codes, vec![161]);
    // The program still compiled past the error.
    let mut r = pl0::mach::Runtime::new(compiled.code);
    assert_eq!(exec(&mut r), "1\n");
}

#[test]
fn test_codegen_continues_around_undeclared_identifier() {
    let compiled = build("main { var x; x := y; print(7); }");
    let codes: Vec<u16> = compiled.errors.iter().map(|e| e.code()).collect();
    assert_eq!(codes, vec![223]);
    let mut r = pl0::mach::Runtime::new(compiled.code);
    assert_eq!(exec(&mut r), "7\n");
}

#[test]
fn test_call_of_variable_is_a_kind_error() {
    assert_eq!(codes("main { var x; call x; }"), vec![182]);
}

#[test]
fn test_scan_of_procedure_is_a_kind_error() {
    assert_eq!(
        codes("main { procedure p { }; scan(p); }"),
        vec![202]
    );
}

#[test]
fn test_duplicate_names_in_one_scope() {
    assert_eq!(codes("main { var x; string x; }"), vec![119]);
}

#[test]
fn test_diagnostics_carry_positions() {
    let compiled = build("main {\n  var x;\n  x := 1 print(x);\n}");
    assert_eq!(compiled.errors.len(), 1);
    let error = &compiled.errors[0];
    assert_eq!(error.code(), 161);
    assert_eq!(error.line_number(), Some(3));
}

#[test]
fn test_fatal_abort_reports_no_partial_result() {
    let error = pl0::mach::compile("main { var x; x := 2147483648; }").unwrap_err();
    assert_eq!(error.code(), 224);
}
