//! Assembly backend phase tests, driving `write_asm` through the driver.

use glyph_codegen::compile_program;
use glyphc::commands::write_asm;
use pretty_assertions::assert_eq;

use crate::common::frontend;

#[test]
fn test_write_asm_produces_nasm_source() {
    let output = frontend("5 while dup 0 > do dup . 1 - end");
    let dir = tempfile::tempdir().unwrap();
    let asm_path = dir.path().join("countdown.asm");

    write_asm(&output.program, &asm_path).unwrap();
    let asm = std::fs::read_to_string(&asm_path).unwrap();

    assert!(asm.starts_with("BITS 64\n"));
    assert!(asm.contains("global _start"));
    assert!(asm.contains("call dump"));
    // The loop produces a conditional exit and a back edge
    assert!(asm.contains("jz addr_"));
    assert!(asm.contains("jmp addr_1\n"));
    assert!(asm.ends_with("    mov rax, 60\n    mov rdi, 0\n    syscall\n"));
}

#[test]
fn test_written_assembly_matches_direct_lowering() {
    let output = frontend("1 2 + .");
    let dir = tempfile::tempdir().unwrap();
    let asm_path = dir.path().join("sum.asm");

    write_asm(&output.program, &asm_path).unwrap();
    let written = std::fs::read_to_string(&asm_path).unwrap();
    assert_eq!(written, compile_program(&output.program));
}
