//! # Tag inheritance hierarchy
//!
//! A mutable directed acyclic graph of [`Tag`]s supporting multiple
//! inheritance. The hierarchy is built up incrementally while page-kinds,
//! table-styles and cell-styles are declared, and is read-only once serving
//! begins; there is no deletion operation.
//!
//! Dispatch specificity is derived from this graph: [`TagHierarchy::distance`]
//! measures how many parent hops separate a tag from an ancestor, and the
//! closest registered ancestor wins a dispatch.

use crate::error::CycleError;
use crate::tag::Tag;
use std::collections::{HashMap, HashSet, VecDeque};

/// The tag inheritance graph.
///
/// Edges point from a tag to its parents. Diamond shapes are allowed; cycles
/// are rejected at declaration time.
#[derive(Debug, Default, Clone)]
pub struct TagHierarchy {
    parents: HashMap<Tag, Vec<Tag>>,
}

impl TagHierarchy {
    /// Create an empty hierarchy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare that `tag` inherits from `parent`.
    ///
    /// Registering the same edge twice is a no-op. An edge that would close a
    /// cycle (including `tag == parent`) fails with [`CycleError`] and leaves
    /// the hierarchy unchanged.
    pub fn derive(&mut self, tag: impl Into<Tag>, parent: impl Into<Tag>) -> Result<(), CycleError> {
        let tag = tag.into();
        let parent = parent.into();

        // A cycle exists iff `tag` is already an ancestor of `parent`.
        if self.is_a(&parent, &tag) {
            return Err(CycleError { tag, parent });
        }

        let edges = self.parents.entry(tag).or_default();
        if !edges.contains(&parent) {
            edges.push(parent);
        }
        Ok(())
    }

    /// The declared parents of `tag`, in declaration order.
    pub fn parents(&self, tag: &Tag) -> &[Tag] {
        self.parents.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True iff `ancestor` is `tag` itself or reachable through any chain of
    /// parent edges.
    pub fn is_a(&self, tag: &Tag, ancestor: &Tag) -> bool {
        self.distance(tag, ancestor).is_some()
    }

    /// Minimum number of parent hops from `tag` up to `ancestor`.
    ///
    /// Returns `Some(0)` when the two are equal and `None` when `ancestor` is
    /// not reachable. With diamond inheritance the shortest path counts.
    pub fn distance(&self, tag: &Tag, ancestor: &Tag) -> Option<usize> {
        if tag == ancestor {
            return Some(0);
        }

        let mut seen: HashSet<&Tag> = HashSet::new();
        let mut queue: VecDeque<(&Tag, usize)> = VecDeque::new();
        queue.push_back((tag, 0));

        while let Some((current, depth)) = queue.pop_front() {
            for parent in self.parents(current) {
                if parent == ancestor {
                    return Some(depth + 1);
                }
                if seen.insert(parent) {
                    queue.push_back((parent, depth + 1));
                }
            }
        }
        None
    }
}
