use color_eyre::eyre::{ContextCompat, eyre};
use git_url_parse::GitUrl;

use crate::Result;

/// Repository coordinates resolved from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub host: String,
    pub owner: String,
    pub repo: String,
}

/// `https://github.com/{owner}/{repo}/compare/{previous}...{current}`
pub fn compare_url(owner: &str, repo: &str, previous: &str, current: &str) -> String {
    format!("https://github.com/{owner}/{repo}/compare/{previous}...{current}")
}

/// Parse `owner/repo` or a full repository URL (https or ssh).
pub fn parse_repo(input: &str) -> Result<RepoSlug> {
    let input = input.trim();

    if input.contains("://") || input.starts_with("git@") {
        return parse_repo_url(input);
    }

    match input.split('/').collect::<Vec<_>>().as_slice() {
        [owner, repo] if !owner.is_empty() && !repo.is_empty() => Ok(RepoSlug {
            host: "github.com".to_string(),
            owner: owner.to_string(),
            repo: repo.trim_end_matches(".git").to_string(),
        }),
        _ => Err(eyre!(
            "invalid repository: '{input}', expected owner/repo or a repository url"
        )),
    }
}

fn parse_repo_url(input: &str) -> Result<RepoSlug> {
    let parsed = GitUrl::parse(input)?;

    let host = parsed
        .host
        .wrap_err(format!("unable to parse host from repo: {input}"))?;

    let owner = parsed
        .owner
        .wrap_err(format!("unable to parse owner from repo: {input}"))?;

    Ok(RepoSlug {
        host,
        owner,
        repo: parsed.name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_compare_url() {
        assert_eq!(
            compare_url("acme", "widgets", "v1.0.0", "v1.1.0"),
            "https://github.com/acme/widgets/compare/v1.0.0...v1.1.0"
        );
    }

    #[test]
    fn parses_owner_repo_shorthand() {
        let slug = parse_repo("acme/widgets").unwrap();
        assert_eq!(
            slug,
            RepoSlug {
                host: "github.com".into(),
                owner: "acme".into(),
                repo: "widgets".into(),
            }
        );
    }

    #[test]
    fn parses_https_url() {
        let slug = parse_repo("https://github.com/acme/widgets").unwrap();
        assert_eq!(slug.host, "github.com");
        assert_eq!(slug.owner, "acme");
        assert_eq!(slug.repo, "widgets");
    }

    #[test]
    fn parses_enterprise_url() {
        let slug = parse_repo("https://git.example.com/acme/widgets.git").unwrap();
        assert_eq!(slug.host, "git.example.com");
        assert_eq!(slug.repo, "widgets");
    }

    #[test]
    fn rejects_malformed_shorthand() {
        assert!(parse_repo("widgets").is_err());
        assert!(parse_repo("/widgets").is_err());
        assert!(parse_repo("a/b/c").is_err());
    }
}
