//! Tests for the Instruction record and its positional operand access

use machine_ir::{Instruction, InstructionList, Opcode, Operand, Reg};

#[test]
fn test_instruction_creation() {
    let inst = Instruction::new(Opcode(7));
    assert_eq!(inst.opcode, Opcode(7));
    assert_eq!(inst.num_operands(), 0);
    assert!(inst.operands().is_empty());
}

#[test]
fn test_with_operands_preserves_order() {
    let inst = Instruction::with_operands(
        Opcode(1),
        vec![Operand::Reg(Reg(2)), Operand::Imm(-1), Operand::FpImm(0.5)],
    );
    assert_eq!(inst.num_operands(), 3);
    assert!(inst.operand(0).is_reg());
    assert!(inst.operand(1).is_imm());
    assert!(inst.operand(2).is_fp_imm());
}

#[test]
fn test_operand_mut_in_place_update() {
    let mut inst = Instruction::with_operands(Opcode(1), vec![Operand::Imm(1)]);
    if let Operand::Imm(v) = inst.operand_mut(0) {
        *v = 99;
    }
    assert_eq!(inst.operand(0).as_imm(), Some(99));
}

#[test]
fn test_erase_keeps_sequence_contiguous() {
    let mut inst = Instruction::with_operands(
        Opcode(2),
        vec![
            Operand::Imm(0),
            Operand::Imm(1),
            Operand::Imm(2),
            Operand::Imm(3),
        ],
    );
    inst.erase_operand(1);
    inst.erase_operand(1);
    assert_eq!(inst.num_operands(), 2);
    assert_eq!(inst.operand(0).as_imm(), Some(0));
    assert_eq!(inst.operand(1).as_imm(), Some(3));
}

#[test]
fn test_truncate_drops_tail_only() {
    let mut inst = Instruction::with_operands(
        Opcode(2),
        vec![Operand::Reg(Reg(1)), Operand::InstMarker, Operand::Imm(9)],
    );
    inst.truncate_operands(1);
    assert_eq!(inst.num_operands(), 1);
    assert!(inst.operand(0).is_reg());

    // Truncating beyond the current length is a no-op.
    inst.truncate_operands(10);
    assert_eq!(inst.num_operands(), 1);
}

#[test]
fn test_instruction_clone_is_deep() {
    let mut inst = Instruction::with_operands(Opcode(3), vec![Operand::Imm(5)]);
    let copy = inst.clone();
    inst.set_operand(0, Operand::Imm(6));
    assert_eq!(copy.operand(0).as_imm(), Some(5));
    assert_eq!(inst.operand(0).as_imm(), Some(6));
}

#[test]
fn test_instruction_list_alias() {
    let mut list: InstructionList = Vec::new();
    list.push(Instruction::new(Opcode(1)));
    list.push(Instruction::new(Opcode(2)));
    assert_eq!(list.len(), 2);
    assert_eq!(list[1].opcode, Opcode(2));
}

#[test]
fn test_instruction_equality_covers_operands() {
    let a = Instruction::with_operands(Opcode(1), vec![Operand::Imm(5)]);
    let b = Instruction::with_operands(Opcode(1), vec![Operand::Imm(5)]);
    let c = Instruction::with_operands(Opcode(1), vec![Operand::Imm(6)]);
    assert_eq!(a, b);
    assert_ne!(a, c);
}
