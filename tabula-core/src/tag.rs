//! Symbolic classifier tags.

use std::fmt;
use std::sync::Arc;

/// A symbolic classifier participating in the inheritance hierarchy.
///
/// Page-kinds, table-styles and cell-styles are all tags. A tag is an
/// immutable name; its meaning comes entirely from the edges declared in a
/// [`TagHierarchy`] and the dispatch entries registered against it.
///
/// Tags are cheap to clone and safe to use as map keys.
///
/// # Example
///
/// ```rust,ignore
/// let list = Tag::new("list");
/// let audit = Tag::new("audit-list");
/// hierarchy.derive(&audit, &list)?;
/// ```
///
/// [`TagHierarchy`]: crate::TagHierarchy
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(Arc<str>);

impl Tag {
    /// Create a tag with the given name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// The tag's name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self.0)
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Tag {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&Tag> for Tag {
    fn from(tag: &Tag) -> Self {
        tag.clone()
    }
}
