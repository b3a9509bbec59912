//! # Multi-key polymorphic dispatch
//!
//! A [`DispatchTable`] maps ordered key tuples to values and resolves a tuple
//! of runtime dispatch values to the most specific registered entry. One table
//! instance exists per polymorphic operation (page rendering, action listing,
//! table styling, cell styling, and so on); all of them share the same
//! resolution mechanics.
//!
//! # Resolution
//!
//! Each axis of a key is matched independently against the corresponding
//! query value:
//!
//! - a [`KeyPart::Tag`] axis matches any query tag that `is_a` the key's tag,
//!   at a cost equal to the hierarchy distance;
//! - a [`KeyPart::Type`] axis matches only the identical type identifier, at
//!   cost zero;
//! - a [`KeyPart::Any`] axis matches anything, at a fixed wildcard penalty.
//!
//! The matching key with the lowest total cost wins. Two distinct keys tied at
//! the lowest cost are a declaration conflict and resolution fails with
//! [`DispatchError::Ambiguous`] rather than picking one arbitrarily. The
//! fully-wildcarded key, when registered, is the table's *default*: it is held
//! out of the specificity comparison and applies only when nothing else
//! matches.
//!
//! Resolution is a pure function of (hierarchy, table, query): no interior
//! state, no registration order sensitivity.

use crate::error::DispatchError;
use crate::hierarchy::TagHierarchy;
use crate::tag::Tag;
use std::fmt;

/// Cost assigned to a wildcard axis match.
///
/// Chosen to outweigh any realistic ancestor chain so an explicit tag match on
/// one axis always beats a wildcard there.
const WILDCARD_COST: usize = 64;

/// One axis of a registered dispatch key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyPart {
    /// Matches the query tag and all of its descendants.
    Tag(Tag),
    /// Matches exactly this concrete type identifier.
    Type(String),
    /// Matches any query value on this axis.
    Any,
}

impl KeyPart {
    /// Tag axis shorthand.
    pub fn tag(tag: impl Into<Tag>) -> Self {
        Self::Tag(tag.into())
    }

    /// Type axis shorthand.
    pub fn ty(name: impl Into<String>) -> Self {
        Self::Type(name.into())
    }
}

/// One axis of a dispatch query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchValue {
    /// A tag, matched through the hierarchy.
    Tag(Tag),
    /// A concrete type identifier, matched exactly (or by a wildcard axis).
    Type(String),
}

impl DispatchValue {
    /// Tag value shorthand.
    pub fn tag(tag: impl Into<Tag>) -> Self {
        Self::Tag(tag.into())
    }

    /// Type value shorthand.
    pub fn ty(name: impl Into<String>) -> Self {
        Self::Type(name.into())
    }
}

impl fmt::Display for DispatchValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(tag) => write!(f, "#{tag}"),
            Self::Type(name) => f.write_str(name),
        }
    }
}

/// An ordered tuple of key axes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchKey(Vec<KeyPart>);

impl DispatchKey {
    /// Build a key from its axes.
    pub fn of(parts: impl IntoIterator<Item = KeyPart>) -> Self {
        Self(parts.into_iter().collect())
    }

    /// The fully-wildcarded key of the given arity, the table's default.
    pub fn fallback(arity: usize) -> Self {
        Self(vec![KeyPart::Any; arity])
    }

    /// The key's axes.
    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }

    fn is_fallback(&self) -> bool {
        self.0.iter().all(|part| matches!(part, KeyPart::Any))
    }

    /// Total match cost of this key against the query, or `None` when any
    /// axis fails to match.
    fn cost(&self, hierarchy: &TagHierarchy, values: &[DispatchValue]) -> Option<usize> {
        if self.0.len() != values.len() {
            return None;
        }
        let mut total = 0;
        for (part, value) in self.0.iter().zip(values) {
            total += match (part, value) {
                (KeyPart::Any, _) => WILDCARD_COST,
                (KeyPart::Tag(key), DispatchValue::Tag(query)) => hierarchy.distance(query, key)?,
                (KeyPart::Type(key), DispatchValue::Type(query)) => {
                    if key == query {
                        0
                    } else {
                        return None;
                    }
                }
                _ => return None,
            };
        }
        Some(total)
    }
}

impl<const N: usize> From<[KeyPart; N]> for DispatchKey {
    fn from(parts: [KeyPart; N]) -> Self {
        Self::of(parts)
    }
}

impl From<Vec<KeyPart>> for DispatchKey {
    fn from(parts: Vec<KeyPart>) -> Self {
        Self::of(parts)
    }
}

/// A table of dispatch keys to values.
///
/// The value type is whatever the operation needs: a handler trait object, a
/// column ordering, a cell-style tag. Registration replaces an existing entry
/// for the same key (last declaration wins); resolution never mutates the
/// table.
#[derive(Clone, Debug)]
pub struct DispatchTable<V> {
    entries: Vec<(DispatchKey, V)>,
}

impl<V> Default for DispatchTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> DispatchTable<V> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Associate `value` with an exact key, replacing any previous entry.
    pub fn register(&mut self, key: impl Into<DispatchKey>, value: V) {
        let key = key.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve the most specific entry for the given query values.
    ///
    /// Fails with [`DispatchError::Ambiguous`] when two distinct keys are
    /// equally specific, and with [`DispatchError::NoHandler`] when nothing
    /// matches and no fallback key is registered.
    pub fn resolve<'a>(
        &'a self,
        hierarchy: &TagHierarchy,
        values: &[DispatchValue],
    ) -> Result<&'a V, DispatchError> {
        let mut best: Option<(usize, &V)> = None;
        let mut tied = 0usize;
        let mut fallback: Option<&V> = None;

        for (key, value) in &self.entries {
            if key.is_fallback() {
                if key.parts().len() == values.len() {
                    fallback = Some(value);
                }
                continue;
            }
            let Some(cost) = key.cost(hierarchy, values) else {
                continue;
            };
            match best {
                Some((best_cost, _)) if cost > best_cost => {}
                Some((best_cost, _)) if cost == best_cost => tied += 1,
                _ => {
                    best = Some((cost, value));
                    tied = 1;
                }
            }
        }

        match best {
            Some(_) if tied > 1 => Err(DispatchError::Ambiguous {
                query: describe(values),
                candidates: tied,
            }),
            Some((_, value)) => Ok(value),
            None => fallback.ok_or_else(|| DispatchError::NoHandler(describe(values))),
        }
    }

    /// Like [`resolve`], but treats a missing handler as `None`.
    ///
    /// Ambiguity still fails: an equally-specific declaration conflict must
    /// surface even on optional operations.
    ///
    /// [`resolve`]: Self::resolve
    pub fn resolve_opt<'a>(
        &'a self,
        hierarchy: &TagHierarchy,
        values: &[DispatchValue],
    ) -> Result<Option<&'a V>, DispatchError> {
        match self.resolve(hierarchy, values) {
            Ok(value) => Ok(Some(value)),
            Err(DispatchError::NoHandler(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

fn describe(values: &[DispatchValue]) -> String {
    let parts: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("({})", parts.join(", "))
}
