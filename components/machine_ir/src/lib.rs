//! Machine instruction model for the binary optimizer
//!
//! This crate provides the target-neutral instruction record every
//! optimization pass operates on: a closed operand variant and an ordered
//! operand sequence with positional access.
//!
//! # Features
//!
//! - Closed operand variant (registers, immediates, expressions, markers)
//! - Positional operand access (get/set/append/erase)
//! - Nested instruction handles for sub-instruction bundles
//! - Optional `serde` serialization behind the `serde` feature
//!
//! # Example
//!
//! ```
//! use machine_ir::{Instruction, Opcode, Operand, Reg};
//!
//! let mut inst = Instruction::new(Opcode(42));
//! inst.append_operand(Operand::Reg(Reg(1)));
//! inst.append_operand(Operand::Imm(5));
//!
//! assert_eq!(inst.num_operands(), 2);
//! assert!(inst.operand(0).is_reg());
//! assert_eq!(inst.to_string(), "op42 r1, 5");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod instruction;
pub mod operand;

// Re-export main types at crate root
pub use instruction::{Instruction, InstructionList, Opcode};
pub use operand::{Operand, Reg, SymbolExpr, SymbolId};
