use crate::{
    analyzer::{CategorizedChanges, Category, ChangeItem, ReleaseData},
    template::{CategoryDisplay, Template},
};

/// Standard layout plus statistics, commit links, closed issues and a
/// contributor list.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetailedTemplate;

impl DetailedTemplate {
    fn statistics(changes: &CategorizedChanges) -> String {
        format!(
            "\n### 📊 Statistics\n\n- {} changes\n- {} features\n- {} bug fixes\n- {} breaking changes\n",
            changes.total(),
            changes.features.len(),
            changes.bug_fixes.len(),
            changes.breaking.len(),
        )
    }

    fn contributors(data: &ReleaseData) -> String {
        let count = data.contributors.len();
        if count == 0 {
            return String::new();
        }

        let plural = if count > 1 { "s" } else { "" };
        let mut section = format!(
            "\n### 👥 Contributors\n\nThis release was made possible by {count} contributor{plural}:\n\n"
        );

        for contributor in &data.contributors {
            section.push_str(&format!("- @{contributor}\n"));
        }

        section
    }
}

impl Template for DetailedTemplate {
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
        } else if let Some(hash) = item.commit_hash() {
            line.push_str(&format!(
                " ([`{hash}`](https://github.com/{owner}/{repo}/commit/{hash}))"
            ));
        }

        if !item.author.is_empty() {
            line.push_str(&format!(" @{}", item.author));
        }

        if !item.issues.is_empty() {
            let links = item
                .issues
                .iter()
                .map(|n| {
                    format!("[#{n}](https://github.com/{owner}/{repo}/issues/{n})")
                })
                .collect::<Vec<_>>()
                .join(", ");
            line.push_str(&format!("\n  - Closes: {links}"));
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
        let mut section = format!(
            "\n### {} {} ({})\n\n",
            display.emoji,
            display.title,
            items.len()
        );

        for item in items {
            section.push_str(&self.format_change_item(item, owner, repo));
            section.push('\n');
        }

        section
    }

    fn generate(&self, data: &ReleaseData) -> String {
        let mut content = format!("## [{}] - {}\n", data.version, data.date);

        content.push_str(&Self::statistics(&data.changes));

        for category in Category::ALL {
            content.push_str(&self.format_category(
                category,
                data.changes.get(category),
                &data.owner,
                &data.repo,
            ));
        }

        content.push_str(&Self::contributors(data));

        if let Some(url) = &data.compare_url {
            content.push_str(&format!("\n**Full Changelog**: {url}\n"));
        }

        content
    }
}
