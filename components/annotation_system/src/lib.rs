//! Instruction annotation subsystem for the binary optimizer
//!
//! This crate lets optimization passes attach typed metadata to
//! [`machine_ir`] instructions without growing the instruction type
//! itself: each annotation is packed into an operand suffix behind a
//! marker operand, with heap-backed values owned by a session arena.
//! Consumers that only care about real operands use the prime-operand
//! view and never see the suffix.
//!
//! # Features
//!
//! - Reserved kinds for control-flow and unwind facts, generic kinds
//!   addressed by name
//! - Inline immediate encoding for word-sized reserved payloads
//! - Arena ownership with explicit release and session-end reclamation
//! - Annotation-aware instruction equality
//!
//! # Example
//!
//! ```
//! use machine_ir::{Instruction, Opcode, Operand, Reg};
//! use annotation_system::{AnnotationValue, Annotator};
//!
//! let annotator = Annotator::new();
//! let mut call = Instruction::with_operands(Opcode(40), vec![Operand::Reg(Reg(0))]);
//!
//! annotator.add_named(&mut call, "block-weight", AnnotationValue::U64(1000))?;
//! annotator.set_offset(&mut call, 0x400)?;
//!
//! let weight = annotator.get_named(&call, "block-weight").unwrap();
//! assert_eq!(weight.as_u64(), Some(1000));
//! assert_eq!(annotation_system::prime_operands(&call).len(), 1);
//! # Ok::<(), annotation_system::AnnotationError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod annotator;
pub mod arena;
pub mod error;
pub mod kind;
pub mod registry;
pub mod suffix;
pub mod value;

// Re-export main types at crate root
pub use annotator::Annotator;
pub use arena::{AnnotationArena, ValueHandle};
pub use error::AnnotationError;
pub use kind::{Kind, ReservedKind, FIRST_GENERIC};
pub use registry::KindRegistry;
pub use suffix::{num_prime_operands, prime_operands, prime_operands_mut};
pub use value::{AnnotationValue, LandingPad, OpaqueValue};
