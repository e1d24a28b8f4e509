//! Connection settings for the remote forge.
use secrecy::SecretString;

/// Page size for paginated list requests.
pub const DEFAULT_PAGE_SIZE: u8 = 100;

/// Remote repository connection configuration.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Forge host (e.g., "github.com").
    pub host: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Access token for authentication.
    pub token: SecretString,
    /// Log remote writes instead of performing them.
    pub dry_run: bool,
}

impl RemoteConfig {
    /// `owner/repo`
    pub fn path(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// REST API base for the configured host.
    pub fn api_base_uri(&self) -> String {
        if self.host == "github.com" {
            "https://api.github.com".to_string()
        } else {
            format!("https://{}/api/v3", self.host)
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: "github.com".to_string(),
            owner: "".to_string(),
            repo: "".to_string(),
            token: SecretString::from("".to_string()),
            dry_run: false,
        }
    }
}
