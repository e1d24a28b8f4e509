use crate::{
    analyzer::{
        Category, ChangeItem, ReleaseData, contributors::format_contributors,
    },
    template::{CategoryDisplay, Template},
};

/// Categorized sections with PR links and author mentions.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTemplate;

impl Template for StandardTemplate {
    fn format_change_item(
        &self,
        item: &ChangeItem,
        owner: &str,
        repo: &str,
    ) -> String {
        let mut line = format!("- {}", item.description);

        if let Some(number) = item.pr_number() {
            line.push_str(&format!(
                " ([#{number}](https://github.com/{owner}/{repo}/pull/{number}))"
            ));
        }

        if !item.author.is_empty() {
            line.push_str(&format!(" @{}", item.author));
        }

        line
    }

    fn format_category(
        &self,
        category: Category,
        items: &[ChangeItem],
        owner: &str,
        repo: &str,
    ) -> String {
        if items.is_empty() {
            return String::new();
        }

        let display = CategoryDisplay::for_category(category);
        let mut section = format!("\n### {} {}\n\n", display.emoji, display.title);

        for item in items {
            section.push_str(&self.format_change_item(item, owner, repo));
            section.push('\n');
        }

        section
    }

    fn generate(&self, data: &ReleaseData) -> String {
        let mut content = format!("## [{}] - {}\n", data.version, data.date);

        for category in Category::ALL {
            content.push_str(&self.format_category(
                category,
                data.changes.get(category),
                &data.owner,
                &data.repo,
            ));
        }

        if !data.contributors.is_empty() {
            content.push_str("\n### Contributors\n\n");
            content.push_str(&format_contributors(&data.contributors));
            content.push('\n');
        }

        if let Some(url) = &data.compare_url {
            content.push_str(&format!("\n**Full Changelog**: {url}\n"));
        }

        content
    }
}
