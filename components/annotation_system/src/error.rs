//! Error types for annotation operations.

use thiserror::Error;

use crate::kind::ReservedKind;

/// Errors surfaced by annotation suffix operations.
///
/// These cover the recoverable failures a well-behaved pass can hit;
/// structural misuse (malformed suffixes, cross-type comparisons) is
/// checked by debug assertions instead.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationError {
    /// A reserved kind was added to an instruction that already carries it.
    #[error("reserved annotation kind `{0}` is already present on the instruction")]
    DuplicateReservedKind(ReservedKind),

    /// A reserved-kind payload has no word-sized inline form.
    #[error("annotation payload does not fit the inline immediate encoding")]
    NotInlinable,
}
