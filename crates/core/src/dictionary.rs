//! Dictionary: name -> definition
//!
//! Built-in primitives and user quotations share one namespace. There is no
//! separate primitive table, so `def` can shadow a built-in like any other
//! binding. The map is a persistent `im::HashMap`: `define` shares structure
//! with the receiver and leaves it untouched, which keeps every older `State`
//! valid.

use crate::error::Result;
use crate::state::State;
use crate::value::Quotation;
use im::HashMap;
use std::fmt;
use std::sync::Arc;

/// Signature of a primitive: a direct state transition
pub type PrimitiveFn = dyn Fn(&State) -> Result<State> + Send + Sync;

/// A named built-in or host-supplied operation
///
/// Two primitives are equal only if they are the same function object.
#[derive(Clone)]
pub struct Primitive {
    name: String,
    func: Arc<PrimitiveFn>,
}

impl Primitive {
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(&State) -> Result<State> + Send + Sync + 'static,
    ) -> Self {
        Primitive {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, state: &State) -> Result<State> {
        (self.func)(state)
    }
}

impl fmt::Debug for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Primitive({})", self.name)
    }
}

impl PartialEq for Primitive {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

/// What a name is bound to
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Quotation(Quotation),
    Primitive(Primitive),
}

impl From<Quotation> for Definition {
    fn from(q: Quotation) -> Self {
        Definition::Quotation(q)
    }
}

impl From<Primitive> for Definition {
    fn from(p: Primitive) -> Self {
        Definition::Primitive(p)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: HashMap<String, Definition>,
}

impl Dictionary {
    /// An empty dictionary (not even `def`)
    pub fn new() -> Self {
        Self::default()
    }

    /// The base primitive set: `dup`, `swap`, `drop`, `def`
    pub fn prelude() -> Self {
        crate::primitives::prelude()
    }

    /// Return a dictionary with `name` bound to `definition`, overwriting any
    /// previous binding.
    pub fn define(&self, name: impl Into<String>, definition: impl Into<Definition>) -> Self {
        Dictionary {
            entries: self.entries.update(name.into(), definition.into()),
        }
    }

    /// Bind a host primitive under its own name
    pub fn with_primitive(&self, primitive: Primitive) -> Self {
        self.define(primitive.name().to_string(), primitive)
    }

    pub fn lookup(&self, name: &str) -> Option<&Definition> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Layer `other` on top of `self`; bindings in `other` win
    pub fn merge(&self, other: &Dictionary) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        Dictionary {
            entries: other.entries.clone().union(self.entries.clone()),
        }
    }

    /// Bound names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, D: Into<Definition>> FromIterator<(N, D)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (N, D)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(name, definition)| (name.into(), definition.into()))
            .collect();
        Dictionary { entries }
    }
}
