//! Request and response types exchanged with the forge.
use serde::Serialize;

/// Parameters for creating a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateReleaseRequest {
    pub tag_name: String,
    pub name: String,
    pub body: String,
    pub draft: bool,
    pub prerelease: bool,
}

/// Parameters for replacing the body of an existing release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateReleaseRequest {
    #[serde(skip)]
    pub release_id: u64,
    pub body: String,
}

/// A release as reported by the forge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgeRelease {
    pub id: u64,
    pub tag_name: String,
    pub html_url: String,
}
