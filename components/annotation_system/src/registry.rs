//! Name-indexed registry for generic annotation kinds.
//!
//! Passes address their own annotations by string name; the registry
//! interns each name into a generic [`Kind`] on first use and keeps the
//! mapping stable for its lifetime. Registries are session state, not
//! globals: two registries may assign the same name different numbers.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::kind::Kind;

#[derive(Debug, Default)]
struct RegistryInner {
    names: Vec<String>,
    numbers: HashMap<String, u32>,
}

/// Bidirectional name-to-kind mapping for one annotation session.
#[derive(Debug, Default)]
pub struct KindRegistry {
    inner: Mutex<RegistryInner>,
}

impl KindRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `name`, assigning the next free generic number on first
    /// use. Later calls with the same name return the same kind.
    pub fn get_or_create(&self, name: &str) -> Kind {
        let mut inner = self.inner.lock();
        if let Some(&number) = inner.numbers.get(name) {
            return Kind::Generic(number);
        }
        let number = inner.names.len() as u32;
        inner.names.push(name.to_string());
        inner.numbers.insert(name.to_string(), number);
        Kind::Generic(number)
    }

    /// Look up `name` without interning it.
    pub fn lookup(&self, name: &str) -> Option<Kind> {
        let inner = self.inner.lock();
        inner.numbers.get(name).copied().map(Kind::Generic)
    }

    /// Reverse lookup: the name a generic kind was interned under.
    /// Reserved kinds are not registry-managed and return `None`.
    pub fn name_of(&self, kind: Kind) -> Option<String> {
        match kind {
            Kind::Generic(number) => {
                let inner = self.inner.lock();
                inner.names.get(number as usize).cloned()
            }
            Kind::Reserved(_) => None,
        }
    }

    /// Number of generic kinds interned so far.
    pub fn len(&self) -> usize {
        self.inner.lock().names.len()
    }

    /// True if no generic kind has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().names.is_empty()
    }
}
