//! User supplied Tera template body.
//!
//! The template sees every [`ReleaseData`] field (camelCase, e.g.
//! `version`, `date`, `changes.bugFixes`, `compareUrl`) plus `sections`:
//! the non-empty categories in presentation order, each with `key`,
//! `emoji`, `title` and `items`.
use serde::Serialize;
use std::path::Path;

use crate::{
    Result,
    analyzer::{ChangeItem, ReleaseData},
    template::CategoryDisplay,
};

const TEMPLATE_NAME: &str = "release-notes";

#[derive(Debug, Serialize)]
struct Section<'a> {
    key: &'static str,
    emoji: &'static str,
    title: &'static str,
    items: &'a [ChangeItem],
}

#[derive(Debug, Serialize)]
struct CustomContext<'a> {
    #[serde(flatten)]
    data: &'a ReleaseData,
    sections: Vec<Section<'a>>,
}

/// A compiled Tera template body.
pub struct CustomTemplate {
    tera: tera::Tera,
}

impl CustomTemplate {
    /// Compile a template body. Syntax errors surface here.
    pub fn new(body: &str) -> Result<Self> {
        let mut tera = tera::Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, body)?;
        Ok(Self { tera })
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let body = tokio::fs::read_to_string(path).await?;
        Self::new(&body)
    }

    pub fn render(&self, data: &ReleaseData) -> Result<String> {
        let sections = data
            .changes
            .iter()
            .map(|(category, items)| {
                let display = CategoryDisplay::for_category(category);
                Section {
                    key: category.key(),
                    emoji: display.emoji,
                    title: display.title,
                    items,
                }
            })
            .collect();

        let context = tera::Context::from_serialize(CustomContext {
            data,
            sections,
        })?;

        Ok(self.tera.render(TEMPLATE_NAME, &context)?)
    }
}
