//! Pass-facing annotation operations.
//!
//! [`Annotator`] bundles the per-session state every operation needs:
//! the arena owning heap-backed values and the registry interning
//! generic kind names. All operations take `&self`; internal locking
//! lives in the arena and registry, so worker threads annotating
//! disjoint instructions share one annotator freely.

use machine_ir::{Instruction, SymbolId};

use crate::arena::{AnnotationArena, ValueHandle};
use crate::error::AnnotationError;
use crate::kind::{Kind, ReservedKind};
use crate::registry::KindRegistry;
use crate::suffix;
use crate::value::{AnnotationValue, LandingPad};

fn inline_payload(value: &AnnotationValue) -> Result<i64, AnnotationError> {
    value
        .to_inline()
        .filter(|payload| suffix::fits_inline(*payload))
        .ok_or(AnnotationError::NotInlinable)
}

/// Session-scoped annotation engine: one arena, one registry.
#[derive(Debug, Default)]
pub struct Annotator {
    arena: AnnotationArena,
    registry: KindRegistry,
}

impl Annotator {
    /// Create an annotator with a fresh arena and registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The arena owning this session's heap-backed annotation values.
    pub fn arena(&self) -> &AnnotationArena {
        &self.arena
    }

    /// The registry interning this session's generic kind names.
    pub fn registry(&self) -> &KindRegistry {
        &self.registry
    }

    /// Attach an annotation of `kind` to `inst`.
    ///
    /// Reserved kinds store the value inline and must not already be
    /// present; a payload without a word-sized form is rejected with
    /// [`AnnotationError::NotInlinable`]. Generic kinds move the value
    /// into the arena. Adding a generic kind that is already present is
    /// a caller logic error: it trips a debug assertion and degrades to
    /// replacing the existing value in release builds, keeping kinds
    /// unique per instruction.
    pub fn add(
        &self,
        inst: &mut Instruction,
        kind: Kind,
        value: AnnotationValue,
    ) -> Result<(), AnnotationError> {
        match kind {
            Kind::Reserved(reserved) => {
                if suffix::find_record(inst, kind).is_some() {
                    return Err(AnnotationError::DuplicateReservedKind(reserved));
                }
                let payload = inline_payload(&value)?;
                suffix::append_record(inst, kind, payload);
            }
            Kind::Generic(_) => match suffix::find_record(inst, kind) {
                Some((_, payload)) => {
                    debug_assert!(false, "generic annotation kind added twice");
                    self.arena.replace(ValueHandle(payload as u32), value);
                }
                None => {
                    let handle = self.arena.alloc(value);
                    suffix::append_record(inst, kind, i64::from(handle.index()));
                }
            },
        }
        Ok(())
    }

    /// Attach a generic annotation addressed by name, interning the name
    /// on first use.
    pub fn add_named(
        &self,
        inst: &mut Instruction,
        name: &str,
        value: AnnotationValue,
    ) -> Result<(), AnnotationError> {
        let kind = self.registry.get_or_create(name);
        self.add(inst, kind, value)
    }

    /// Retrieve the value annotated on `inst` under `kind`.
    ///
    /// Reserved kinds decode straight from the suffix record; generic
    /// kinds clone out of the arena. `None` if the kind is absent or its
    /// arena value was already released.
    pub fn get(&self, inst: &Instruction, kind: Kind) -> Option<AnnotationValue> {
        let (_, payload) = suffix::find_record(inst, kind)?;
        match kind {
            Kind::Reserved(reserved) => Some(AnnotationValue::from_inline(reserved, payload)),
            Kind::Generic(_) => self.arena.get(ValueHandle(payload as u32)),
        }
    }

    /// Retrieve a generic annotation by name. An unregistered name is
    /// simply absent.
    pub fn get_named(&self, inst: &Instruction, name: &str) -> Option<AnnotationValue> {
        let kind = self.registry.lookup(name)?;
        self.get(inst, kind)
    }

    /// Check whether `inst` carries an annotation of `kind`.
    pub fn has(&self, inst: &Instruction, kind: Kind) -> bool {
        suffix::find_record(inst, kind).is_some()
    }

    /// Check for a generic annotation by name without interning it.
    pub fn has_named(&self, inst: &Instruction, name: &str) -> bool {
        match self.registry.lookup(name) {
            Some(kind) => self.has(inst, kind),
            None => false,
        }
    }

    /// Set the value for `kind`, replacing an existing record in place
    /// or adding a fresh one.
    ///
    /// Replacing a generic value reuses the arena slot, so previously
    /// copied instructions sharing the handle observe the new value.
    pub fn set(
        &self,
        inst: &mut Instruction,
        kind: Kind,
        value: AnnotationValue,
    ) -> Result<(), AnnotationError> {
        match suffix::find_record(inst, kind) {
            Some((position, payload)) => match kind {
                Kind::Reserved(_) => {
                    let payload = inline_payload(&value)?;
                    suffix::rewrite_record(inst, position, kind, payload);
                    Ok(())
                }
                Kind::Generic(_) => {
                    self.arena.replace(ValueHandle(payload as u32), value);
                    Ok(())
                }
            },
            None => self.add(inst, kind, value),
        }
    }

    /// Set a generic annotation by name, interning the name on first use.
    pub fn set_named(
        &self,
        inst: &mut Instruction,
        name: &str,
        value: AnnotationValue,
    ) -> Result<(), AnnotationError> {
        let kind = self.registry.get_or_create(name);
        self.set(inst, kind, value)
    }

    /// Remove the annotation of `kind` from `inst`.
    ///
    /// Generic values are released from the arena eagerly. Later records
    /// shift down to keep the suffix contiguous, and the marker operand
    /// is dropped with the last record. Removing an absent kind is a
    /// no-op; returns whether a record was removed.
    pub fn remove(&self, inst: &mut Instruction, kind: Kind) -> bool {
        match suffix::find_record(inst, kind) {
            Some((position, payload)) => {
                if kind.is_generic() {
                    self.arena.release(ValueHandle(payload as u32));
                }
                suffix::erase_record(inst, position);
                true
            }
            None => false,
        }
    }

    /// Remove a generic annotation by name.
    pub fn remove_named(&self, inst: &mut Instruction, name: &str) -> bool {
        match self.registry.lookup(name) {
            Some(kind) => self.remove(inst, kind),
            None => false,
        }
    }

    /// Release every heap-backed value annotated on `inst`, then drop
    /// the whole suffix.
    pub fn remove_all(&self, inst: &mut Instruction) {
        for (kind, payload) in suffix::records(inst) {
            if kind.is_generic() {
                self.arena.release(ValueHandle(payload as u32));
            }
        }
        suffix::truncate_suffix(inst);
    }

    /// Drop the whole suffix without touching the arena.
    ///
    /// Use this when emitting instructions to their final form: the
    /// arena still owns the values and reclaims them at session end.
    pub fn strip(&self, inst: &mut Instruction) {
        suffix::truncate_suffix(inst);
    }

    /// Compare two instructions on opcode, prime operands and annotation
    /// records, ignoring record order.
    ///
    /// Generic records compare by arena value, not by handle, so two
    /// instructions annotated separately with equal values compare
    /// equal. A record whose arena value was released compares unequal
    /// to everything.
    pub fn instructions_equal(&self, a: &Instruction, b: &Instruction) -> bool {
        if a.opcode != b.opcode {
            return false;
        }
        if suffix::prime_operands(a) != suffix::prime_operands(b) {
            return false;
        }
        let a_records: Vec<(Kind, i64)> = suffix::records(a).collect();
        let b_records: Vec<(Kind, i64)> = suffix::records(b).collect();
        if a_records.len() != b_records.len() {
            return false;
        }
        a_records.iter().all(|&(kind, a_payload)| {
            b_records
                .iter()
                .any(|&(other, b_payload)| other == kind && self.payloads_equal(kind, a_payload, b_payload))
        })
    }

    fn payloads_equal(&self, kind: Kind, a_payload: i64, b_payload: i64) -> bool {
        match kind {
            Kind::Reserved(_) => a_payload == b_payload,
            Kind::Generic(_) => {
                let a_value = self.arena.get(ValueHandle(a_payload as u32));
                let b_value = self.arena.get(ValueHandle(b_payload as u32));
                match (a_value, b_value) {
                    (Some(a_value), Some(b_value)) => a_value.equals(&b_value),
                    _ => false,
                }
            }
        }
    }

    // Typed helpers for the reserved kinds.

    /// Record exception-handling info for a call site, replacing any
    /// previous landing pad and action.
    pub fn set_eh_info(&self, inst: &mut Instruction, info: LandingPad) -> Result<(), AnnotationError> {
        let (pad, action) = info;
        self.set(inst, Kind::Reserved(ReservedKind::EhLandingPad), AnnotationValue::Symbol(pad))?;
        self.set(inst, Kind::Reserved(ReservedKind::EhAction), AnnotationValue::U64(action))
    }

    /// Read the exception-handling info recorded on `inst`. Present only
    /// when both the landing pad and the action code are.
    pub fn eh_info(&self, inst: &Instruction) -> Option<LandingPad> {
        let pad = self.get(inst, Kind::Reserved(ReservedKind::EhLandingPad))?.as_symbol()?;
        let action = self.get(inst, Kind::Reserved(ReservedKind::EhAction))?.as_u64()?;
        Some((pad, action))
    }

    /// Record the outgoing argument stack size used for unwind info.
    pub fn set_unwind_args_size(&self, inst: &mut Instruction, size: u64) -> Result<(), AnnotationError> {
        self.set(inst, Kind::Reserved(ReservedKind::UnwindArgsSize), AnnotationValue::U64(size))
    }

    /// Read the recorded unwind argument stack size.
    pub fn unwind_args_size(&self, inst: &Instruction) -> Option<u64> {
        self.get(inst, Kind::Reserved(ReservedKind::UnwindArgsSize))?.as_u64()
    }

    /// Associate `inst` with the jump table it branches through.
    pub fn set_jump_table(&self, inst: &mut Instruction, table: SymbolId) -> Result<(), AnnotationError> {
        self.set(inst, Kind::Reserved(ReservedKind::JumpTable), AnnotationValue::Symbol(table))
    }

    /// The jump table `inst` branches through, if recorded.
    pub fn jump_table(&self, inst: &Instruction) -> Option<SymbolId> {
        self.get(inst, Kind::Reserved(ReservedKind::JumpTable))?.as_symbol()
    }

    /// Drop the jump table association; returns whether one was present.
    pub fn unset_jump_table(&self, inst: &mut Instruction) -> bool {
        self.remove(inst, Kind::Reserved(ReservedKind::JumpTable))
    }

    /// Mark `inst` as a tail call.
    pub fn set_tail_call(&self, inst: &mut Instruction) -> Result<(), AnnotationError> {
        self.set(inst, Kind::Reserved(ReservedKind::TailCall), AnnotationValue::Bool(true))
    }

    /// True if `inst` is marked as a tail call.
    pub fn is_tail_call(&self, inst: &Instruction) -> bool {
        self.get(inst, Kind::Reserved(ReservedKind::TailCall))
            .and_then(|value| value.as_bool())
            .unwrap_or(false)
    }

    /// Mark `inst` as a conditional tail call.
    pub fn set_conditional_tail_call(&self, inst: &mut Instruction) -> Result<(), AnnotationError> {
        self.set(
            inst,
            Kind::Reserved(ReservedKind::ConditionalTailCall),
            AnnotationValue::Bool(true),
        )
    }

    /// True if `inst` is marked as a conditional tail call.
    pub fn is_conditional_tail_call(&self, inst: &Instruction) -> bool {
        self.get(inst, Kind::Reserved(ReservedKind::ConditionalTailCall))
            .and_then(|value| value.as_bool())
            .unwrap_or(false)
    }

    /// Drop the conditional tail call mark; returns whether it was set.
    pub fn unset_conditional_tail_call(&self, inst: &mut Instruction) -> bool {
        self.remove(inst, Kind::Reserved(ReservedKind::ConditionalTailCall))
    }

    /// Record the input offset `inst` originated from.
    pub fn set_offset(&self, inst: &mut Instruction, offset: u32) -> Result<(), AnnotationError> {
        self.set(inst, Kind::Reserved(ReservedKind::Offset), AnnotationValue::U64(u64::from(offset)))
    }

    /// The input offset `inst` originated from, if recorded.
    pub fn offset(&self, inst: &Instruction) -> Option<u32> {
        let offset = self.get(inst, Kind::Reserved(ReservedKind::Offset))?.as_u64()?;
        Some(offset as u32)
    }

    /// Drop the recorded input offset; returns whether one was present.
    pub fn clear_offset(&self, inst: &mut Instruction) -> bool {
        self.remove(inst, Kind::Reserved(ReservedKind::Offset))
    }

    /// Attach the symbol marking `inst`'s position.
    pub fn set_label(&self, inst: &mut Instruction, label: SymbolId) -> Result<(), AnnotationError> {
        self.set(inst, Kind::Reserved(ReservedKind::Label), AnnotationValue::Symbol(label))
    }

    /// The symbol marking `inst`'s position, if attached.
    pub fn label(&self, inst: &Instruction) -> Option<SymbolId> {
        self.get(inst, Kind::Reserved(ReservedKind::Label))?.as_symbol()
    }
}
