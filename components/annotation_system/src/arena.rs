//! Arena ownership for heap-backed annotation values.
//!
//! Generic-kind payloads do not live inside instructions; the suffix
//! record stores only a [`ValueHandle`] and the arena owns the value.
//! Dropping or cloning an instruction therefore never touches annotation
//! storage. Values are reclaimed in bulk when the arena is dropped at
//! the end of a session, or eagerly through [`release`].
//!
//! [`release`]: AnnotationArena::release

use parking_lot::Mutex;

use crate::value::AnnotationValue;

/// Owning handle to an arena-allocated annotation value.
///
/// Handles are plain indices and stay unique for the arena's lifetime:
/// a released slot is retired, never handed out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueHandle(pub(crate) u32);

impl ValueHandle {
    /// The handle's slot index, as packed into suffix records.
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Slot table owning every heap-backed annotation value of one session.
#[derive(Debug, Default)]
pub struct AnnotationArena {
    slots: Mutex<Vec<Option<AnnotationValue>>>,
}

impl AnnotationArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `value` and return its handle.
    pub fn alloc(&self, value: AnnotationValue) -> ValueHandle {
        let mut slots = self.slots.lock();
        let index = slots.len() as u32;
        slots.push(Some(value));
        ValueHandle(index)
    }

    /// Clone out the value behind `handle`, if it is still live.
    pub fn get(&self, handle: ValueHandle) -> Option<AnnotationValue> {
        let slots = self.slots.lock();
        slots.get(handle.0 as usize).and_then(|slot| slot.clone())
    }

    /// Replace the value behind `handle` in place, keeping every copy of
    /// the handle valid. Returns false if the slot was already released.
    pub fn replace(&self, handle: ValueHandle, value: AnnotationValue) -> bool {
        let mut slots = self.slots.lock();
        match slots.get_mut(handle.0 as usize) {
            Some(slot) if slot.is_some() => {
                *slot = Some(value);
                true
            }
            _ => false,
        }
    }

    /// Drop the value behind `handle` now instead of at session end.
    ///
    /// The slot is retired and the handle becomes dangling. Releasing a
    /// dead handle is a no-op; returns whether a live value was dropped.
    pub fn release(&self, handle: ValueHandle) -> bool {
        let mut slots = self.slots.lock();
        match slots.get_mut(handle.0 as usize) {
            Some(slot) => slot.take().is_some(),
            None => false,
        }
    }

    /// Number of values currently owned by the arena.
    pub fn live_count(&self) -> usize {
        let slots = self.slots.lock();
        slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Total number of slots ever allocated, released ones included.
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    /// True if the arena has never allocated.
    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }
}
