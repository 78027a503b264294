//! Contract compliance tests for machine_ir
//!
//! Verifies the instruction-record interface consumed by the annotation
//! layer: operand variant with type predicates, positional get/set/append/
//! erase on the operand sequence, and operand count.

use machine_ir::{Instruction, Opcode, Operand, Reg, SymbolExpr, SymbolId};

/// Verify all operand variants exist as specified
#[test]
fn test_contract_operand_variants() {
    let _ = Operand::Reg(Reg(0));
    let _ = Operand::Imm(0i64);
    let _ = Operand::FpImm(0.0f64);
    let _ = Operand::Expr(SymbolExpr::new(SymbolId(0), 0));
    let _ = Operand::InstMarker;
    let _ = Operand::SubInst(Box::new(Instruction::new(Opcode(0))));
}

/// Verify the type predicates required at the interface boundary
#[test]
fn test_contract_operand_predicates() {
    let op = Operand::Reg(Reg(1));
    let _: bool = op.is_reg();
    let _: bool = op.is_imm();
    let _: bool = op.is_expr();
    let _: bool = op.is_sentinel();
    let _: bool = op.is_inst();
}

/// Verify positional operand access methods exist with the right shapes
#[test]
fn test_contract_positional_access() {
    let mut inst = Instruction::new(Opcode(1));

    // append_operand(op) -> ()
    inst.append_operand(Operand::Imm(1));
    inst.append_operand(Operand::Imm(2));

    // num_operands() -> usize
    let count: usize = inst.num_operands();
    assert_eq!(count, 2);

    // operand(i) -> &Operand
    let first: &Operand = inst.operand(0);
    assert_eq!(first.as_imm(), Some(1));

    // set_operand(i, op) -> ()
    inst.set_operand(0, Operand::Imm(10));
    assert_eq!(inst.operand(0).as_imm(), Some(10));

    // erase_operand(i) -> Operand, shifting later operands down
    let removed: Operand = inst.erase_operand(0);
    assert_eq!(removed.as_imm(), Some(10));
    assert_eq!(inst.num_operands(), 1);
    assert_eq!(inst.operand(0).as_imm(), Some(2));
}

/// Verify the immediate payload is a 64-bit signed value
#[test]
fn test_contract_immediate_width() {
    let inst = Instruction::with_operands(
        Opcode(1),
        vec![Operand::Imm(i64::MIN), Operand::Imm(i64::MAX)],
    );
    assert_eq!(inst.operand(0).as_imm(), Some(i64::MIN));
    assert_eq!(inst.operand(1).as_imm(), Some(i64::MAX));
}

/// Verify Instruction exposes its opcode field
#[test]
fn test_contract_instruction_structure() {
    let inst = Instruction::new(Opcode(5));
    let _opcode: &Opcode = &inst.opcode;
    assert_eq!(inst.opcode.0, 5);
}

/// Verify Reg and SymbolId are tuple newtypes over fixed-width integers
#[test]
fn test_contract_newtype_structure() {
    let reg = Reg(42);
    assert_eq!(reg.0, 42u16);
    let sym = SymbolId(7);
    assert_eq!(sym.0, 7u32);
}
