//! Annotation kind taxonomy.
//!
//! Kinds split into two zones sharing a single 8-bit index space. The
//! reserved zone holds a fixed set of architecture-independent kinds
//! whose payloads are stored inline in the operand suffix. The generic
//! zone starts at [`FIRST_GENERIC`] and is addressed by name through a
//! [`KindRegistry`](crate::registry::KindRegistry); generic payloads
//! live in the arena.

/// First index available to generic, name-addressed kinds.
///
/// Indices below this value belong to [`ReservedKind`] variants; a
/// generic kind numbered `n` occupies flat index `FIRST_GENERIC + n`.
pub const FIRST_GENERIC: u32 = 8;

/// Reserved annotation kinds with fixed indices and inline payloads.
///
/// The discriminant order is load-bearing: each variant's position is
/// its flat index, encoded into the low bits of suffix records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedKind {
    /// Landing-pad symbol for an exception-raising call site.
    EhLandingPad,
    /// Exception action code paired with the landing pad.
    EhAction,
    /// Outgoing argument stack size for unwind info generation.
    UnwindArgsSize,
    /// Jump table referenced by an indirect branch.
    JumpTable,
    /// Marks a branch as a tail call.
    TailCall,
    /// Marks a branch as a conditional tail call.
    ConditionalTailCall,
    /// Offset of the instruction in its input function.
    Offset,
    /// Symbol marking the instruction's position.
    Label,
}

impl ReservedKind {
    /// Number of reserved kinds; equal to [`FIRST_GENERIC`].
    pub const COUNT: usize = FIRST_GENERIC as usize;

    /// Flat index of this kind in the shared index space.
    pub fn index(self) -> u32 {
        self as u32
    }

    /// Reverse of [`index`](Self::index); `None` for generic-zone indices.
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(Self::EhLandingPad),
            1 => Some(Self::EhAction),
            2 => Some(Self::UnwindArgsSize),
            3 => Some(Self::JumpTable),
            4 => Some(Self::TailCall),
            5 => Some(Self::ConditionalTailCall),
            6 => Some(Self::Offset),
            7 => Some(Self::Label),
            _ => None,
        }
    }

    /// Stable diagnostic name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::EhLandingPad => "eh-landing-pad",
            Self::EhAction => "eh-action",
            Self::UnwindArgsSize => "unwind-args-size",
            Self::JumpTable => "jump-table",
            Self::TailCall => "tail-call",
            Self::ConditionalTailCall => "conditional-tail-call",
            Self::Offset => "offset",
            Self::Label => "label",
        }
    }
}

impl std::fmt::Display for ReservedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An annotation kind: either a fixed reserved kind or a registry-assigned
/// generic kind.
///
/// `Generic(n)` carries the registry's zero-based number, not the flat
/// index; the two are related by [`FIRST_GENERIC`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// One of the fixed, inline-payload kinds.
    Reserved(ReservedKind),
    /// A name-addressed kind with an arena-backed payload.
    Generic(u32),
}

impl Kind {
    /// Flat index of this kind in the shared 8-bit index space.
    pub fn index(self) -> u32 {
        match self {
            Self::Reserved(reserved) => reserved.index(),
            Self::Generic(number) => FIRST_GENERIC + number,
        }
    }

    /// Decode a flat index back into a kind. Total: every index below
    /// [`FIRST_GENERIC`] is reserved, everything above is generic.
    pub fn from_index(index: u32) -> Self {
        match ReservedKind::from_index(index) {
            Some(reserved) => Self::Reserved(reserved),
            None => Self::Generic(index - FIRST_GENERIC),
        }
    }

    /// True for reserved-zone kinds.
    pub fn is_reserved(self) -> bool {
        matches!(self, Self::Reserved(_))
    }

    /// True for generic-zone kinds.
    pub fn is_generic(self) -> bool {
        matches!(self, Self::Generic(_))
    }
}

impl From<ReservedKind> for Kind {
    fn from(reserved: ReservedKind) -> Self {
        Self::Reserved(reserved)
    }
}
