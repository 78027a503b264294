//! Annotation payload values.
//!
//! [`AnnotationValue`] is the closed set of payload categories the
//! subsystem understands natively. Passes with richer per-instruction
//! state wrap it in an [`OpaqueValue`], which erases the concrete type
//! but carries explicit clone, equality and print functions so the
//! subsystem can still copy, compare and dump it.

use std::any::Any;
use std::fmt;

use machine_ir::SymbolId;

use crate::kind::ReservedKind;

/// Exception-handling info for a call site: landing-pad symbol plus
/// action code.
pub type LandingPad = (SymbolId, u64);

/// Type-erased annotation payload with caller-supplied behavior.
///
/// Construction pins the concrete type: the stored function pointers are
/// monomorphized for it, so every later clone, comparison and print goes
/// through the original type. Comparing opaque values of two different
/// concrete types is a contract violation; it trips a debug assertion
/// and reports unequal in release builds.
pub struct OpaqueValue {
    value: Box<dyn Any + Send>,
    type_name: &'static str,
    clone_fn: fn(&(dyn Any + Send)) -> Box<dyn Any + Send>,
    eq_fn: fn(&(dyn Any + Send), &(dyn Any + Send)) -> bool,
    print_fn: fn(&(dyn Any + Send), &mut fmt::Formatter<'_>) -> fmt::Result,
}

fn clone_opaque<T: Any + Clone + Send>(value: &(dyn Any + Send)) -> Box<dyn Any + Send> {
    let value = value.downcast_ref::<T>().expect("opaque value type drift");
    Box::new(value.clone())
}

fn eq_opaque<T: Any + PartialEq + Send>(lhs: &(dyn Any + Send), rhs: &(dyn Any + Send)) -> bool {
    let lhs = lhs.downcast_ref::<T>().expect("opaque value type drift");
    match rhs.downcast_ref::<T>() {
        Some(rhs) => lhs == rhs,
        None => {
            debug_assert!(false, "comparing opaque values of different concrete types");
            false
        }
    }
}

fn print_opaque<T: Any + fmt::Display + Send>(
    value: &(dyn Any + Send),
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    let value = value.downcast_ref::<T>().expect("opaque value type drift");
    write!(f, "{value}")
}

impl OpaqueValue {
    /// Wrap `value`, capturing its clone, equality and print behavior.
    pub fn new<T>(value: T) -> Self
    where
        T: Any + Clone + PartialEq + fmt::Display + Send,
    {
        Self {
            value: Box::new(value),
            type_name: std::any::type_name::<T>(),
            clone_fn: clone_opaque::<T>,
            eq_fn: eq_opaque::<T>,
            print_fn: print_opaque::<T>,
        }
    }

    /// Borrow the wrapped value as `T`, if that is its concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Name of the wrapped concrete type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Compare two opaque values through the captured equality function.
    pub fn equals(&self, other: &OpaqueValue) -> bool {
        (self.eq_fn)(self.value.as_ref(), other.value.as_ref())
    }
}

impl Clone for OpaqueValue {
    fn clone(&self) -> Self {
        Self {
            value: (self.clone_fn)(self.value.as_ref()),
            type_name: self.type_name,
            clone_fn: self.clone_fn,
            eq_fn: self.eq_fn,
            print_fn: self.print_fn,
        }
    }
}

impl fmt::Display for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.print_fn)(self.value.as_ref(), f)
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpaqueValue<{}>({})", self.type_name, self)
    }
}

/// An annotation payload.
///
/// The word-sized categories double as the inline forms reserved-kind
/// records pack into the operand suffix; `String` and `Opaque` always
/// live in the arena.
#[derive(Debug, Clone)]
pub enum AnnotationValue {
    /// Signed integer payload.
    I64(i64),
    /// Unsigned integer payload.
    U64(u64),
    /// Flag payload.
    Bool(bool),
    /// Symbol reference payload.
    Symbol(SymbolId),
    /// Heap-backed text payload.
    String(String),
    /// Caller-defined payload behind a type-erased wrapper.
    Opaque(OpaqueValue),
}

impl AnnotationValue {
    /// Shorthand for wrapping a caller-defined payload.
    pub fn opaque<T>(value: T) -> Self
    where
        T: Any + Clone + PartialEq + fmt::Display + Send,
    {
        Self::Opaque(OpaqueValue::new(value))
    }

    /// Compare two payloads of the same category.
    ///
    /// Cross-category comparison is a contract violation: it trips a
    /// debug assertion and reports unequal in release builds.
    pub fn equals(&self, other: &AnnotationValue) -> bool {
        match (self, other) {
            (Self::I64(a), Self::I64(b)) => a == b,
            (Self::U64(a), Self::U64(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Symbol(a), Self::Symbol(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Opaque(a), Self::Opaque(b)) => a.equals(b),
            _ => {
                debug_assert!(false, "comparing annotation values of different categories");
                false
            }
        }
    }

    /// The payload as a signed integer, if that is its category.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(value) => Some(*value),
            _ => None,
        }
    }

    /// The payload as an unsigned integer, if that is its category.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::U64(value) => Some(*value),
            _ => None,
        }
    }

    /// The payload as a flag, if that is its category.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The payload as a symbol reference, if that is its category.
    pub fn as_symbol(&self) -> Option<SymbolId> {
        match self {
            Self::Symbol(value) => Some(*value),
            _ => None,
        }
    }

    /// The payload as text, if that is its category.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// The payload as an opaque wrapper, if that is its category.
    pub fn as_opaque(&self) -> Option<&OpaqueValue> {
        match self {
            Self::Opaque(value) => Some(value),
            _ => None,
        }
    }

    /// Convert a word-sized payload to the signed word reserved-kind
    /// records store inline. `None` for categories that need the arena
    /// or for unsigned values that do not fit a signed word.
    pub(crate) fn to_inline(&self) -> Option<i64> {
        match self {
            Self::I64(value) => Some(*value),
            Self::U64(value) => i64::try_from(*value).ok(),
            Self::Bool(value) => Some(i64::from(*value)),
            Self::Symbol(symbol) => Some(i64::from(symbol.0)),
            Self::String(_) | Self::Opaque(_) => None,
        }
    }

    /// Rebuild a payload from its inline form, typed per reserved kind.
    pub(crate) fn from_inline(kind: ReservedKind, payload: i64) -> Self {
        match kind {
            ReservedKind::EhLandingPad | ReservedKind::JumpTable | ReservedKind::Label => {
                Self::Symbol(SymbolId(payload as u32))
            }
            ReservedKind::EhAction | ReservedKind::UnwindArgsSize | ReservedKind::Offset => {
                Self::U64(payload as u64)
            }
            ReservedKind::TailCall | ReservedKind::ConditionalTailCall => Self::Bool(payload != 0),
        }
    }
}

impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I64(value) => write!(f, "{value}"),
            Self::U64(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Symbol(symbol) => write!(f, "{symbol}"),
            Self::String(value) => f.write_str(value),
            Self::Opaque(value) => write!(f, "{value}"),
        }
    }
}
