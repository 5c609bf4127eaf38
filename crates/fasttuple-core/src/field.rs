//! Field declarations and the ordered [`FieldTable`].

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::FieldError;
use crate::kind::FieldKind;

/// A single field declaration: a name and a kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    /// Accessor name. Must be a valid identifier.
    pub name: String,
    /// Storage kind.
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Create a field declaration.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Whether `name` can be used as an accessor name.
///
/// Accepts an ASCII letter or `_` followed by ASCII alphanumerics or `_`.
/// A lone `_` is rejected.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        Some('_') if name.len() > 1 => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Ordered, name-unique table of a schema's fields.
///
/// Field `n` (1-based) is the `n`-th inserted entry. Kinds are also kept
/// in a shared slice so records can hold the kind table without cloning.
#[derive(Clone, Debug)]
pub struct FieldTable {
    by_name: IndexMap<String, FieldKind>,
    kinds: Arc<[FieldKind]>,
}

impl FieldTable {
    /// Build a table from declarations.
    ///
    /// Declarations are checked in order; the first name that is not a
    /// valid identifier or repeats an earlier one is reported.
    pub fn from_specs<I>(specs: I) -> Result<Self, FieldError>
    where
        I: IntoIterator<Item = FieldSpec>,
    {
        let specs = specs.into_iter();
        let mut by_name = IndexMap::with_capacity(specs.size_hint().0);
        for spec in specs {
            if !is_valid_identifier(&spec.name) {
                return Err(FieldError::InvalidName { name: spec.name });
            }
            if by_name.contains_key(&spec.name) {
                return Err(FieldError::Duplicate { name: spec.name });
            }
            by_name.insert(spec.name, spec.kind);
        }
        let kinds: Arc<[FieldKind]> = by_name.values().copied().collect();
        Ok(Self { by_name, kinds })
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether the table has no fields.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Field kinds in declaration order.
    pub fn kinds(&self) -> &[FieldKind] {
        &self.kinds
    }

    /// Shared handle to the kind table.
    pub fn shared_kinds(&self) -> Arc<[FieldKind]> {
        Arc::clone(&self.kinds)
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.by_name.keys().map(String::as_str)
    }

    /// 1-based index of the field called `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get_index_of(name).map(|slot| slot + 1)
    }

    /// Declaration at 1-based `index`.
    pub fn get(&self, index: usize) -> Option<(&str, FieldKind)> {
        let slot = index.checked_sub(1)?;
        self.by_name
            .get_index(slot)
            .map(|(name, kind)| (name.as_str(), *kind))
    }

    /// Iterate declarations in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, FieldKind)> + '_ {
        self.by_name.iter().map(|(name, kind)| (name.as_str(), *kind))
    }
}

impl PartialEq for FieldTable {
    // Positional comparison; IndexMap equality ignores order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for FieldTable {}

impl std::hash::Hash for FieldTable {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (name, kind) in self.iter() {
            name.hash(state);
            kind.hash(state);
        }
    }
}

impl fmt::Display for FieldTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, (name, kind)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "'{name}':{kind}")?;
        }
        f.write_str(")")
    }
}
