//! Release notes rendering.
//!
//! Three built-in layouts are selected by name through [`TemplateKind`].
//! A user supplied Tera body can replace them, see [`custom`].
use std::{fmt, str::FromStr};

use crate::{
    analyzer::{Category, ChangeItem, ReleaseData},
    error::RelnotesError,
};

pub mod custom;
mod detailed;
mod minimal;
mod standard;

pub use custom::CustomTemplate;
pub use detailed::DetailedTemplate;
pub use minimal::MinimalTemplate;
pub use standard::StandardTemplate;

/// A release notes layout.
pub trait Template {
    /// Render the complete section for one release.
    fn generate(&self, data: &ReleaseData) -> String;

    /// Render a single bullet line.
    fn format_change_item(
        &self,
        item: &ChangeItem,
        owner: &str,
        repo: &str,
    ) -> String;

    /// Render one category section. Empty categories render as "".
    fn format_category(
        &self,
        category: Category,
        items: &[ChangeItem],
        owner: &str,
        repo: &str,
    ) -> String;
}

/// Heading decoration for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDisplay {
    pub emoji: &'static str,
    pub title: &'static str,
}

const FALLBACK_DISPLAY: CategoryDisplay = CategoryDisplay {
    emoji: "📦",
    title: "Other Changes",
};

impl CategoryDisplay {
    /// Look up display data by category key. Unknown keys get the generic
    /// "Other Changes" heading.
    pub fn for_key(key: &str) -> CategoryDisplay {
        let (emoji, title) = match key {
            "breaking" => ("🚨", "Breaking Changes"),
            "features" => ("✨", "Features"),
            "bugFixes" => ("🐛", "Bug Fixes"),
            "documentation" => ("📚", "Documentation"),
            "performance" => ("⚡", "Performance"),
            "refactoring" => ("🔧", "Refactoring"),
            "style" => ("🎨", "Style"),
            "tests" => ("✅", "Tests"),
            "build" => ("🔨", "Build System"),
            "ci" => ("🤖", "CI/CD"),
            _ => return FALLBACK_DISPLAY,
        };

        CategoryDisplay { emoji, title }
    }

    pub fn for_category(category: Category) -> CategoryDisplay {
        Self::for_key(category.key())
    }
}

/// The built-in layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TemplateKind {
    #[default]
    Standard,
    Detailed,
    Minimal,
}

static STANDARD: StandardTemplate = StandardTemplate;
static DETAILED: DetailedTemplate = DetailedTemplate;
static MINIMAL: MinimalTemplate = MinimalTemplate;

impl TemplateKind {
    pub const ALL: [TemplateKind; 3] = [
        TemplateKind::Standard,
        TemplateKind::Detailed,
        TemplateKind::Minimal,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TemplateKind::Standard => "standard",
            TemplateKind::Detailed => "detailed",
            TemplateKind::Minimal => "minimal",
        }
    }

    /// Comma separated list of accepted names.
    pub fn available() -> String {
        Self::ALL
            .iter()
            .map(|k| k.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn renderer(&self) -> &'static dyn Template {
        match self {
            TemplateKind::Standard => &STANDARD,
            TemplateKind::Detailed => &DETAILED,
            TemplateKind::Minimal => &MINIMAL,
        }
    }

    pub fn render(&self, data: &ReleaseData) -> String {
        self.renderer().generate(data)
    }
}

impl FromStr for TemplateKind {
    type Err = RelnotesError;

    /// Names are matched case-insensitively. Unknown names are an error.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| RelnotesError::UnknownTemplate {
                name: name.to_string(),
                available: Self::available(),
            })
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
