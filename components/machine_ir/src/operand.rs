//! Machine operand representation
//!
//! Defines the closed operand variant used by every instruction record.

use std::fmt;

use crate::instruction::Instruction;

/// Machine register number, as assigned by the target description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reg(pub u16);

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Index of a symbol in the session's symbol table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolId(pub u32);

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sym{}", self.0)
    }
}

/// Symbolic expression operand: a symbol reference plus a constant addend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolExpr {
    /// Referenced symbol
    pub symbol: SymbolId,
    /// Constant offset added to the symbol's value
    pub addend: i64,
}

impl SymbolExpr {
    /// Create an expression referencing `symbol` with the given addend
    pub fn new(symbol: SymbolId, addend: i64) -> Self {
        Self { symbol, addend }
    }
}

impl From<SymbolId> for SymbolExpr {
    fn from(symbol: SymbolId) -> Self {
        Self { symbol, addend: 0 }
    }
}

impl fmt::Display for SymbolExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.addend == 0 {
            write!(f, "{}", self.symbol)
        } else if self.addend > 0 {
            write!(f, "{}+{}", self.symbol, self.addend)
        } else {
            write!(f, "{}{}", self.symbol, self.addend)
        }
    }
}

/// One element of an instruction's operand sequence
///
/// The variant set is closed: real operands are registers, immediates and
/// symbolic expressions; `InstMarker` and `SubInst` carry no assembly
/// semantics on this level and are used to delimit and nest instructions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operand {
    /// Register operand
    Reg(Reg),
    /// Immediate operand (64-bit signed)
    Imm(i64),
    /// Floating-point immediate operand
    FpImm(f64),
    /// Symbolic expression operand (symbol plus addend)
    Expr(SymbolExpr),
    /// Payload-less instruction marker; delimits a trailing metadata suffix
    InstMarker,
    /// Nested instruction handle (sub-instruction bundles)
    SubInst(Box<Instruction>),
}

impl Operand {
    /// Check if this operand is a register
    pub fn is_reg(&self) -> bool {
        matches!(self, Operand::Reg(_))
    }

    /// Check if this operand is an immediate
    pub fn is_imm(&self) -> bool {
        matches!(self, Operand::Imm(_))
    }

    /// Check if this operand is a floating-point immediate
    pub fn is_fp_imm(&self) -> bool {
        matches!(self, Operand::FpImm(_))
    }

    /// Check if this operand is a symbolic expression
    pub fn is_expr(&self) -> bool {
        matches!(self, Operand::Expr(_))
    }

    /// Check if this operand is the payload-less instruction marker
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Operand::InstMarker)
    }

    /// Check if this operand is of the instruction class
    /// (marker or nested handle)
    pub fn is_inst(&self) -> bool {
        matches!(self, Operand::InstMarker | Operand::SubInst(_))
    }

    /// Try to get the register number
    pub fn as_reg(&self) -> Option<Reg> {
        match self {
            Operand::Reg(r) => Some(*r),
            _ => None,
        }
    }

    /// Try to get the immediate value
    pub fn as_imm(&self) -> Option<i64> {
        match self {
            Operand::Imm(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get the floating-point immediate value
    pub fn as_fp_imm(&self) -> Option<f64> {
        match self {
            Operand::FpImm(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get the symbolic expression
    pub fn as_expr(&self) -> Option<&SymbolExpr> {
        match self {
            Operand::Expr(e) => Some(e),
            _ => None,
        }
    }

    /// Try to get the nested instruction
    pub fn as_sub_inst(&self) -> Option<&Instruction> {
        match self {
            Operand::SubInst(inst) => Some(inst),
            _ => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Reg(r) => write!(f, "{}", r),
            Operand::Imm(v) => write!(f, "{}", v),
            Operand::FpImm(v) => write!(f, "{}", v),
            Operand::Expr(e) => write!(f, "{}", e),
            Operand::InstMarker => write!(f, "<marker>"),
            Operand::SubInst(inst) => write!(f, "<inst {}>", inst),
        }
    }
}
