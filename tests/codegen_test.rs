mod common;
use common::*;
use pl0::mach::{Opcode, Operand};

/// Assert `want` appears in `ops` in order, other instructions
/// permitted in between.
fn assert_subsequence(ops: &[String], want: &[&str]) {
    let mut cursor = ops.iter();
    for w in want {
        if !cursor.any(|op| op == w) {
            panic!("missing {:?} (in order) from {:?}", w, ops);
        }
    }
}

#[test]
fn test_expression_compiles_to_postorder() {
    let compiled = build("main { var x; x := 2 + 3 * 4; print(x); }");
    let ops: Vec<String> = compiled.code.iter().map(|inst| inst.to_string()).collect();
    assert_subsequence(
        &ops,
        &[
            "LIT 0 2",
            "LIT 0 3",
            "LIT 0 4",
            "OPR 0 4",  // mul
            "OPR 0 2",  // add
            "STO 0 3",
            "LOD 0 3",
            "OPR 0 14", // print
            "OPR 0 15", // newline
        ],
    );
}

#[test]
fn test_block_prologue_and_epilogue() {
    let compiled = build("main { var x; x := 1; }");
    let ops: Vec<String> = compiled.code.iter().map(|inst| inst.to_string()).collect();
    // Skip jump to the reservation, reserve 3 header slots + 1 local,
    // and a return at the end.
    assert_eq!(ops[0], "JMP 0 1");
    assert_eq!(ops[1], "INT 0 4");
    assert_eq!(ops.last().unwrap(), "OPR 0 0");
}

#[test]
fn test_while_exit_jump_lands_after_back_jump() {
    let compiled = build("main { var i; i := 0; while (i < 3) { print(i); i := i + 1; } }");
    let back_jump = compiled
        .code
        .iter()
        .enumerate()
        .find(|(addr, inst)| {
            inst.op == Opcode::Jmp
                && match inst.a {
                    Operand::Number(target) => (target as usize) < *addr,
                    _ => false,
                }
        })
        .map(|(addr, _)| addr)
        .expect("loop should end with a backward jump");
    let exit_target = compiled
        .code
        .iter()
        .find(|inst| inst.op == Opcode::Jpc)
        .map(|inst| inst.a.clone())
        .expect("loop condition should emit a conditional jump");
    assert_eq!(exit_target, Operand::Number(back_jump as i32 + 1));
}

#[test]
fn test_undeclared_call_emits_no_call_instruction() {
    let compiled = build("main { call nowhere; }");
    let codes: Vec<u16> = compiled.errors.iter().map(|e| e.code()).collect();
    assert_eq!(codes, vec![181]);
    assert!(compiled.code.iter().all(|inst| inst.op != Opcode::Cal));
}

#[test]
fn test_procedure_body_sits_between_skip_jump_and_main_body() {
    let compiled = build("main { procedure noop { }; call noop; }");
    let ops: Vec<String> = compiled.code.iter().map(|inst| inst.to_string()).collect();
    // Outer skip jump hops over the nested body; the call targets the
    // procedure's own reservation instruction.
    assert_eq!(ops[0], "JMP 0 4");
    assert_eq!(ops[1], "JMP 0 2"); // nested block's own skip jump
    assert_eq!(ops[2], "INT 0 3"); // procedure frame: header only
    assert_eq!(ops[3], "OPR 0 0");
    assert_eq!(ops[4], "INT 0 3"); // main frame
    assert_eq!(ops[5], "CAL 0 2");
}

#[test]
fn test_every_jump_is_patched() {
    let compiled = build(
        "main { var i; i := 0; \
         while (i < 2) { if (odd i) then print(1) else print(0); i := i + 1; } }",
    );
    assert!(compiled
        .code
        .iter()
        .all(|inst| inst.a != Operand::None || !matches!(inst.op, Opcode::Jmp | Opcode::Jpc)));
}
