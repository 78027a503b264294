//! Pass Interaction Integration Tests
//!
//! Simulates several optimization passes sharing one annotation session:
//! a profile loader writes, later passes read and rewrite, and emission
//! cleans up.

use annotation_system::{AnnotationValue, Annotator};
use machine_ir::{Instruction, InstructionList, Opcode, Operand, Reg, SymbolId};

const CALL: Opcode = Opcode(3);
const BRANCH: Opcode = Opcode(4);

fn attach_profile(annotator: &Annotator, body: &mut InstructionList) {
    for (position, inst) in body.iter_mut().enumerate() {
        annotator
            .add_named(inst, "exec-count", AnnotationValue::U64(100 * (position as u64 + 1)))
            .unwrap();
    }
}

/// Test: A later pass reads annotations by name without knowing their indices
#[test]
fn test_passes_share_one_session() {
    let annotator = Annotator::new();
    let mut body: InstructionList = vec![
        Instruction::with_operands(CALL, vec![Operand::Expr(SymbolId(7).into())]),
        Instruction::with_operands(BRANCH, vec![Operand::Expr(SymbolId(8).into())]),
    ];
    attach_profile(&annotator, &mut body);

    let hot: Vec<bool> = body
        .iter()
        .map(|inst| {
            annotator
                .get_named(inst, "exec-count")
                .and_then(|value| value.as_u64())
                .is_some_and(|count| count > 150)
        })
        .collect();
    assert_eq!(hot, vec![false, true]);
}

/// Test: A rewriting pass updates values in place and copies observe them
#[test]
fn test_rewriting_pass_updates_in_place() {
    let annotator = Annotator::new();
    let mut body: InstructionList =
        vec![Instruction::with_operands(CALL, vec![Operand::Reg(Reg(2))])];
    attach_profile(&annotator, &mut body);
    let scheduled_copy = body[0].clone();

    annotator.set_named(&mut body[0], "exec-count", AnnotationValue::U64(0)).unwrap();

    let seen = annotator.get_named(&scheduled_copy, "exec-count").unwrap();
    assert_eq!(seen.as_u64(), Some(0));
    assert_eq!(annotator.arena().len(), 1);
}

/// Test: Reserved-kind helpers carry control-flow facts between passes
#[test]
fn test_control_flow_facts_cross_passes() {
    let annotator = Annotator::new();
    let mut call = Instruction::with_operands(CALL, vec![Operand::Expr(SymbolId(40).into())]);
    let mut branch = Instruction::with_operands(BRANCH, vec![Operand::Expr(SymbolId(41).into())]);

    annotator.set_tail_call(&mut call).unwrap();
    annotator.set_conditional_tail_call(&mut branch).unwrap();
    annotator.set_unwind_args_size(&mut call, 16).unwrap();

    let needs_return_fixup: Vec<bool> = [&call, &branch]
        .into_iter()
        .map(|inst| annotator.is_tail_call(inst) || annotator.is_conditional_tail_call(inst))
        .collect();
    assert_eq!(needs_return_fixup, vec![true, true]);
    assert_eq!(annotator.unwind_args_size(&call), Some(16));

    assert!(annotator.unset_conditional_tail_call(&mut branch));
    assert!(!annotator.is_conditional_tail_call(&branch));
}

/// Test: A fresh session starts with nothing interned and nothing owned
#[test]
fn test_fresh_session_starts_empty() {
    let annotator = Annotator::new();
    assert!(annotator.arena().is_empty());
    assert!(annotator.registry().is_empty());

    let inst = Instruction::with_operands(CALL, vec![Operand::Reg(Reg(0))]);
    assert!(!annotator.has_named(&inst, "exec-count"));
    assert_eq!(annotator.registry().len(), 0);
}

/// Test: Pass-private names coexist with reserved kinds on one instruction
#[test]
fn test_private_names_and_reserved_kinds_coexist() {
    let annotator = Annotator::new();
    let mut inst = Instruction::with_operands(BRANCH, vec![Operand::Expr(SymbolId(9).into())]);

    annotator.set_jump_table(&mut inst, SymbolId(55)).unwrap();
    annotator.add_named(&mut inst, "indirect-targets", AnnotationValue::U64(4)).unwrap();
    annotator.add_named(&mut inst, "fallthrough-weight", AnnotationValue::U64(60)).unwrap();

    assert_eq!(annotator.jump_table(&inst), Some(SymbolId(55)));
    assert_eq!(annotator.get_named(&inst, "indirect-targets").unwrap().as_u64(), Some(4));

    assert!(annotator.unset_jump_table(&mut inst));
    assert_eq!(annotator.get_named(&inst, "indirect-targets").unwrap().as_u64(), Some(4));
    assert_eq!(annotator.get_named(&inst, "fallthrough-weight").unwrap().as_u64(), Some(60));
}
