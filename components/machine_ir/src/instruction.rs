//! Machine instruction record
//!
//! An instruction is a target-defined opcode plus an ordered operand
//! sequence. Consumers that must not observe trailing metadata operands
//! go through the annotation layer's prime-operand view instead of the
//! raw sequence.

use std::fmt;

use crate::operand::Operand;

/// Target-defined opcode number
///
/// The annotation layer never interprets opcodes; they are carried through
/// unchanged and compared for equality only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Opcode(pub u32);

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op{}", self.0)
    }
}

/// A single machine instruction record
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instruction {
    /// The opcode for this instruction
    pub opcode: Opcode,
    /// Ordered operand sequence
    operands: Vec<Operand>,
}

/// Sequence of instructions forming a code region
pub type InstructionList = Vec<Instruction>;

impl Instruction {
    /// Create a new instruction with no operands
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            operands: Vec::new(),
        }
    }

    /// Create a new instruction with the given operand sequence
    pub fn with_operands(opcode: Opcode, operands: Vec<Operand>) -> Self {
        Self { opcode, operands }
    }

    /// Get the number of operands
    pub fn num_operands(&self) -> usize {
        self.operands.len()
    }

    /// Get the operand at `index`
    ///
    /// Panics if `index` is out of bounds, like direct sequence indexing.
    pub fn operand(&self, index: usize) -> &Operand {
        &self.operands[index]
    }

    /// Get a mutable reference to the operand at `index`
    ///
    /// Panics if `index` is out of bounds.
    pub fn operand_mut(&mut self, index: usize) -> &mut Operand {
        &mut self.operands[index]
    }

    /// Replace the operand at `index`
    ///
    /// Panics if `index` is out of bounds.
    pub fn set_operand(&mut self, index: usize, operand: Operand) {
        self.operands[index] = operand;
    }

    /// Append an operand at the end of the sequence
    pub fn append_operand(&mut self, operand: Operand) {
        self.operands.push(operand);
    }

    /// Remove and return the operand at `index`, shifting later operands
    /// down by one position
    ///
    /// Panics if `index` is out of bounds.
    pub fn erase_operand(&mut self, index: usize) -> Operand {
        self.operands.remove(index)
    }

    /// Drop every operand at positions `len` and above
    pub fn truncate_operands(&mut self, len: usize) {
        self.operands.truncate(len);
    }

    /// Get the full operand sequence
    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    /// Get the full operand sequence mutably
    pub fn operands_mut(&mut self) -> &mut [Operand] {
        &mut self.operands
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode)?;
        for (i, op) in self.operands.iter().enumerate() {
            if i == 0 {
                write!(f, " {}", op)?;
            } else {
                write!(f, ", {}", op)?;
            }
        }
        Ok(())
    }
}
