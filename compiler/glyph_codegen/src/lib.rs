//! NASM x86-64 code generation for Glyph programs.
//!
//! [`compile_program`] lowers a resolved [`Program`] to assembly text
//! for `nasm -felf64`. The program stack maps directly onto the
//! hardware stack; every op becomes a short push/pop sequence. Each op
//! gets an `addr_N` label so jump targets resolve without a second
//! pass, and the epilogue exits via the `exit` syscall.
//!
//! The generated code is freestanding: no libc, entry point `_start`,
//! output through the `write` syscall in the builtin `dump` routine.

use std::fmt::Write;

use tracing::debug;

use glyph_ir::{OpKind, Program, UNRESOLVED_TARGET};

/// Assembly text under construction.
struct Asm {
    text: String,
}

impl Asm {
    fn new() -> Self {
        Asm {
            text: String::with_capacity(4096),
        }
    }

    fn raw(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
    }

    fn ins(&mut self, line: &str) {
        self.text.push_str("    ");
        self.raw(line);
    }

    fn label(&mut self, ip: usize) {
        // writes to a String cannot fail
        let _ = writeln!(self.text, "addr_{ip}:");
    }

    fn comment(&mut self, name: &str) {
        let _ = writeln!(self.text, "    ;; -- {name} --");
    }
}

/// Lower a resolved program to NASM source.
///
/// Precondition: every jump target has been patched by block
/// resolution. The driver only reaches code generation when parsing
/// reported no errors.
pub fn compile_program(program: &Program) -> String {
    debug!(ops = program.len(), "generating assembly");

    let mut asm = Asm::new();
    emit_prologue(&mut asm);

    for (ip, op) in program.ops.iter().enumerate() {
        debug_assert_ne!(
            op.kind.jump_target(),
            Some(UNRESOLVED_TARGET),
            "unresolved jump at op {ip}"
        );
        asm.label(ip);
        asm.comment(op.kind.name());
        emit_op(&mut asm, ip, op.kind);
    }

    // Jumps past the last op land on the epilogue label.
    asm.label(program.len());
    emit_epilogue(&mut asm);
    asm.text
}

fn emit_op(asm: &mut Asm, ip: usize, kind: OpKind) {
    match kind {
        OpKind::Push(value) => emit_push(asm, value),
        OpKind::Plus => {
            asm.ins("pop rax");
            asm.ins("pop rbx");
            asm.ins("add rax, rbx");
            asm.ins("push rax");
        }
        OpKind::Minus => {
            asm.ins("pop rax");
            asm.ins("pop rbx");
            asm.ins("sub rbx, rax");
            asm.ins("push rbx");
        }
        OpKind::Equal => emit_compare(asm, "cmove"),
        OpKind::Greater => emit_compare(asm, "cmovg"),
        OpKind::Less => emit_compare(asm, "cmovl"),
        OpKind::Dup => {
            asm.ins("pop rax");
            asm.ins("push rax");
            asm.ins("push rax");
        }
        OpKind::Dump => {
            asm.ins("pop rdi");
            asm.ins("call dump");
        }
        OpKind::If { target } | OpKind::Do { target } => {
            asm.ins("pop rax");
            asm.ins("test rax, rax");
            asm.ins(&format!("jz addr_{target}"));
        }
        OpKind::Else { target } => {
            asm.ins(&format!("jmp addr_{target}"));
        }
        OpKind::End { target } => {
            // Only loop back edges need a jump; a fall-through end is
            // just its label.
            if target != ip + 1 {
                asm.ins(&format!("jmp addr_{target}"));
            }
        }
        OpKind::While => {}
    }
}

/// Push an immediate. `push imm` sign-extends a 32-bit operand, so
/// values outside that range go through `rax`.
fn emit_push(asm: &mut Asm, value: u64) {
    let signed = value as i64;
    if (i64::from(i32::MIN)..=i64::from(i32::MAX)).contains(&signed) {
        asm.ins(&format!("push {signed}"));
    } else {
        asm.ins(&format!("mov rax, {value}"));
        asm.ins("push rax");
    }
}

/// Comparison sequence shared by `=`, `>` and `<`; only the
/// conditional-move mnemonic differs.
fn emit_compare(asm: &mut Asm, cmov: &str) {
    asm.ins("mov rcx, 0");
    asm.ins("mov rdx, 1");
    asm.ins("pop rbx");
    asm.ins("pop rax");
    asm.ins("cmp rax, rbx");
    asm.ins(&format!("{cmov} rcx, rdx"));
    asm.ins("push rcx");
}

/// File header plus the `dump` routine: prints rdi as unsigned decimal
/// with a trailing newline via the `write` syscall.
fn emit_prologue(asm: &mut Asm) {
    asm.raw("BITS 64");
    asm.raw("segment .text");
    asm.raw("dump:");
    asm.ins("mov r9, -3689348814741910323");
    asm.ins("sub rsp, 40");
    asm.ins("mov BYTE [rsp+31], 10");
    asm.ins("lea rcx, [rsp+30]");
    asm.raw(".L2:");
    asm.ins("mov rax, rdi");
    asm.ins("lea r8, [rsp+32]");
    asm.ins("mul r9");
    asm.ins("mov rax, rdi");
    asm.ins("sub r8, rcx");
    asm.ins("shr rdx, 3");
    asm.ins("lea rsi, [rdx+rdx*4]");
    asm.ins("add rsi, rsi");
    asm.ins("sub rax, rsi");
    asm.ins("add eax, 48");
    asm.ins("mov BYTE [rcx], al");
    asm.ins("mov rax, rdi");
    asm.ins("mov rdi, rdx");
    asm.ins("mov rdx, rcx");
    asm.ins("sub rcx, 1");
    asm.ins("cmp rax, 9");
    asm.ins("ja .L2");
    asm.ins("lea rax, [rsp+32]");
    asm.ins("mov edi, 1");
    asm.ins("sub rdx, rax");
    asm.ins("xor eax, eax");
    asm.ins("lea rsi, [rsp+32+rdx]");
    asm.ins("mov rdx, r8");
    asm.ins("mov rax, 1");
    asm.ins("syscall");
    asm.ins("add rsp, 40");
    asm.ins("ret");
    asm.raw("global _start");
    asm.raw("_start:");
}

fn emit_epilogue(asm: &mut Asm) {
    asm.ins("mov rax, 60");
    asm.ins("mov rdi, 0");
    asm.ins("syscall");
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph_lexer::lex;
    use glyph_parse::parse;
    use pretty_assertions::assert_eq;

    fn compile(source: &str) -> String {
        let output = parse(&lex(source), source);
        assert!(!output.has_errors(), "parse errors in {source:?}");
        compile_program(&output.program)
    }

    #[test]
    fn test_prologue_and_epilogue() {
        let asm = compile("");
        assert!(asm.starts_with("BITS 64\nsegment .text\ndump:\n"));
        assert!(asm.contains("global _start\n_start:\n"));
        assert!(asm.ends_with("addr_0:\n    mov rax, 60\n    mov rdi, 0\n    syscall\n"));
    }

    #[test]
    fn test_arithmetic_sequences() {
        let asm = compile("34 35 + .");
        assert!(asm.contains(
            "addr_0:\n    ;; -- push --\n    push 34\n"
        ));
        assert!(asm.contains(
            "    ;; -- plus --\n    pop rax\n    pop rbx\n    add rax, rbx\n    push rax\n"
        ));
        assert!(asm.contains("    ;; -- dump --\n    pop rdi\n    call dump\n"));
    }

    #[test]
    fn test_minus_subtracts_top_from_under() {
        let asm = compile("10 3 -");
        assert!(asm.contains(
            "    ;; -- minus --\n    pop rax\n    pop rbx\n    sub rbx, rax\n    push rbx\n"
        ));
    }

    #[test]
    fn test_comparison_mnemonics() {
        assert!(compile("1 2 =").contains("cmove rcx, rdx"));
        assert!(compile("1 2 >").contains("cmovg rcx, rdx"));
        assert!(compile("1 2 <").contains("cmovl rcx, rdx"));
    }

    #[test]
    fn test_push_immediate_width() {
        // Values in the sign-extended imm32 range push directly
        assert!(compile("-1").contains("    push -1\n"));
        assert!(compile("2147483647").contains("    push 2147483647\n"));
        assert!(compile("-2147483648").contains("    push -2147483648\n"));
        // Wider values go through rax
        let wide = compile("4294967296");
        assert!(wide.contains("    mov rax, 4294967296\n    push rax\n"));
        let negative_wide = compile("-9223372036854775808");
        assert!(negative_wide.contains("    mov rax, 9223372036854775808\n    push rax\n"));
    }

    #[test]
    fn test_if_jumps_over_its_block() {
        // ops: 0 Push 1 If 2 Push 3 Dump 4 End
        let asm = compile("1 if 2 . end");
        assert!(asm.contains(
            "    ;; -- if --\n    pop rax\n    test rax, rax\n    jz addr_4\n"
        ));
        // Fall-through end emits no jump, just its label
        assert!(asm.contains("addr_4:\n    ;; -- end --\naddr_5:\n"));
    }

    #[test]
    fn test_else_jumps_to_end() {
        // ops: 0 Push 1 If 2 Push 3 Else 4 Push 5 End
        let asm = compile("1 if 2 else 3 end");
        assert!(asm.contains("    jz addr_4\n"));
        assert!(asm.contains("    ;; -- else --\n    jmp addr_5\n"));
    }

    #[test]
    fn test_while_loop_back_edge() {
        // ops: 0 While 1 Push 2 Do 3 Push 4 Dump 5 End
        let asm = compile("while 1 do 2 . end");
        assert!(asm.contains("addr_0:\n    ;; -- while --\naddr_1:\n"));
        assert!(asm.contains(
            "    ;; -- do --\n    pop rax\n    test rax, rax\n    jz addr_6\n"
        ));
        assert!(asm.contains("    ;; -- end --\n    jmp addr_0\n"));
    }

    #[test]
    fn test_every_op_gets_a_label() {
        let asm = compile("1 2 + .");
        for ip in 0..=4 {
            assert!(asm.contains(&format!("addr_{ip}:\n")), "missing addr_{ip}");
        }
        assert_eq!(asm.matches("addr_4:").count(), 1);
    }
}
