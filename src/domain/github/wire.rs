//! Wire types for the GitHub REST API (snake_case JSON).

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::IssueState;

#[derive(Debug, Clone, Deserialize)]
pub struct AccountResponse {
    pub login: String,
    pub id: u64,
    pub name: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub public_repos: Option<u32>,
    pub followers: Option<u32>,
    pub following: Option<u32>,
    pub html_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwnerRef {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryResponse {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: OwnerRef,
    pub description: Option<String>,
    #[serde(default)]
    pub private: bool,
    pub html_url: String,
    pub default_branch: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    #[serde(default)]
    pub open_issues_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueResponse {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub state: IssueState,
    pub user: OwnerRef,
    #[serde(default)]
    pub labels: Vec<LabelRef>,
    pub html_url: String,
    pub created_at: Option<DateTime<Utc>>,
}
