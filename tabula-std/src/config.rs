//! Site configuration.

use tabula_core::Tag;

/// Tunable defaults for a [`Site`].
///
/// Everything here is a convention, not a capability: the template names are
/// whatever the template-engine collaborator understands, and the default
/// table style is just a tag the style declarations can hang entries on.
///
/// [`Site`]: crate::site::Site
#[derive(Clone, Debug)]
pub struct SiteConfig {
    /// Records per list page.
    pub page_size: usize,
    /// Outer page-shell template name.
    pub shell_template: String,
    /// Content template for list pages.
    pub list_template: String,
    /// Content template for detail pages.
    pub detail_template: String,
    /// The global table style consulted when a specific style has no entry.
    pub default_table_style: Tag,
    /// Cell template of last resort when no cell style applies.
    pub default_cell_template: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            shell_template: "page/shell".to_string(),
            list_template: "page/list".to_string(),
            detail_template: "page/detail".to_string(),
            default_table_style: Tag::new("table"),
            default_cell_template: "cell/text".to_string(),
        }
    }
}
