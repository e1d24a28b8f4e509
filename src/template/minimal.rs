use crate::{
    analyzer::{Category, ChangeItem, ReleaseData},
    template::Template,
};

/// One flat bullet list, no categories.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimalTemplate;

impl Template for MinimalTemplate {
    fn format_change_item(
        &self,
        item: &ChangeItem,
        _owner: &str,
        _repo: &str,
    ) -> String {
        match item.pr_number() {
            Some(number) => format!("- {} (#{number})", item.description),
            None => format!("- {}", item.description),
        }
    }

    fn format_category(
        &self,
        _category: Category,
        items: &[ChangeItem],
        owner: &str,
        repo: &str,
    ) -> String {
        items
            .iter()
            .map(|item| self.format_change_item(item, owner, repo) + "\n")
            .collect()
    }

    fn generate(&self, data: &ReleaseData) -> String {
        let mut content = format!("## {} - {}\n\n", data.version, data.date);

        for item in data.changes.all_items() {
            content.push_str(&self.format_change_item(
                item,
                &data.owner,
                &data.repo,
            ));
            content.push('\n');
        }

        if let Some(url) = &data.compare_url {
            content.push_str(&format!("\nChanges: {url}\n"));
        }

        content
    }
}
