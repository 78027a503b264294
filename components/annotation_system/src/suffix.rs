//! Operand-suffix encoding for instruction annotations.
//!
//! Annotations ride on an instruction as a contiguous operand suffix: a
//! payload-less marker operand followed by one immediate per annotation
//! record. This module is the only place that reads or writes that
//! packed form; the rest of the crate deals in decoded `(Kind, payload)`
//! records and the prime-operand view.
//!
//! A record immediate packs the kind's flat index into its low 8 bits
//! and the payload into the upper 56. Reserved-zone records carry the
//! payload value itself; generic-zone records carry the arena handle of
//! the value.

use machine_ir::{Instruction, Operand};

use crate::kind::Kind;

/// Bits of a record immediate occupied by the kind index.
const INDEX_BITS: u32 = 8;

/// Mask extracting the kind index from a record immediate.
const INDEX_MASK: i64 = (1 << INDEX_BITS) - 1;

/// True if `payload` survives the index-bits shift untruncated.
pub(crate) fn fits_inline(payload: i64) -> bool {
    (payload << INDEX_BITS) >> INDEX_BITS == payload
}

/// Pack one annotation record into an immediate value.
pub(crate) fn encode_record(kind: Kind, payload: i64) -> i64 {
    let index = kind.index();
    debug_assert!(i64::from(index) <= INDEX_MASK, "annotation kind index out of range");
    debug_assert!(fits_inline(payload), "annotation payload out of range");
    (payload << INDEX_BITS) | i64::from(index)
}

/// Unpack a record immediate into its kind and payload.
pub(crate) fn decode_record(imm: i64) -> (Kind, i64) {
    let index = (imm & INDEX_MASK) as u32;
    (Kind::from_index(index), imm >> INDEX_BITS)
}

/// Number of leading prime (real) operands of `inst`.
///
/// Scans backwards from the last operand: an instruction-class operand
/// marks the start of the annotation suffix, and any other non-immediate
/// proves there is no suffix at all. Trailing immediates without a
/// marker are genuine operands and are never misclassified.
pub fn num_prime_operands(inst: &Instruction) -> usize {
    let operands = inst.operands();
    for index in (0..operands.len()).rev() {
        if operands[index].is_inst() {
            return index;
        }
        if !operands[index].is_imm() {
            return operands.len();
        }
    }
    operands.len()
}

/// View over only the prime operands of `inst`.
pub fn prime_operands(inst: &Instruction) -> &[Operand] {
    &inst.operands()[..num_prime_operands(inst)]
}

/// Mutable view over only the prime operands of `inst`.
pub fn prime_operands_mut(inst: &mut Instruction) -> &mut [Operand] {
    let count = num_prime_operands(inst);
    &mut inst.operands_mut()[..count]
}

/// Position of the first record operand, past the marker, if `inst`
/// carries a suffix.
fn suffix_start(inst: &Instruction) -> Option<usize> {
    let boundary = num_prime_operands(inst);
    if boundary == inst.num_operands() {
        None
    } else {
        Some(boundary + 1)
    }
}

/// Iterate the decoded records of `inst`'s annotation suffix.
///
/// A non-immediate operand inside the suffix is a malformed encoding;
/// it trips a debug assertion and is skipped in release builds.
pub(crate) fn records(inst: &Instruction) -> impl Iterator<Item = (Kind, i64)> + '_ {
    let start = suffix_start(inst).unwrap_or_else(|| inst.num_operands());
    inst.operands()[start..].iter().filter_map(|operand| {
        let imm = operand.as_imm();
        debug_assert!(imm.is_some(), "malformed annotation suffix: non-immediate record");
        imm.map(decode_record)
    })
}

/// Locate the record for `kind`, returning its operand position and
/// payload.
pub(crate) fn find_record(inst: &Instruction, kind: Kind) -> Option<(usize, i64)> {
    let start = suffix_start(inst)?;
    for position in start..inst.num_operands() {
        let Some(imm) = inst.operand(position).as_imm() else {
            debug_assert!(false, "malformed annotation suffix: non-immediate record");
            continue;
        };
        let (found, payload) = decode_record(imm);
        if found == kind {
            return Some((position, payload));
        }
    }
    None
}

/// Append a record for `kind`, creating the marker first if this is the
/// instruction's first annotation.
pub(crate) fn append_record(inst: &mut Instruction, kind: Kind, payload: i64) {
    if suffix_start(inst).is_none() {
        inst.append_operand(Operand::InstMarker);
    }
    inst.append_operand(Operand::Imm(encode_record(kind, payload)));
}

/// Rewrite the record at `position` in place.
pub(crate) fn rewrite_record(inst: &mut Instruction, position: usize, kind: Kind, payload: i64) {
    inst.set_operand(position, Operand::Imm(encode_record(kind, payload)));
}

/// Erase the record at `position`, shifting later records down. Once the
/// suffix holds no records the marker is dropped too, restoring the
/// instruction's pre-annotation operand count.
pub(crate) fn erase_record(inst: &mut Instruction, position: usize) {
    inst.erase_operand(position);
    let boundary = num_prime_operands(inst);
    if boundary + 1 == inst.num_operands() && inst.operand(boundary).is_sentinel() {
        inst.erase_operand(boundary);
    }
}

/// Drop the whole suffix, marker included, leaving only prime operands.
pub(crate) fn truncate_suffix(inst: &mut Instruction) {
    let boundary = num_prime_operands(inst);
    inst.truncate_operands(boundary);
}
