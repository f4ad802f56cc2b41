//! Conversions from wire types to domain types for GitHub.

use super::wire::{AccountResponse, IssueResponse, RepositoryResponse};
use super::{Account, Issue, Repository};

impl From<AccountResponse> for Account {
    fn from(a: AccountResponse) -> Self {
        Self {
            login: a.login,
            id: a.id,
            name: a.name,
            company: a.company,
            location: a.location,
            bio: a.bio,
            public_repos: a.public_repos,
            followers: a.followers,
            following: a.following,
            html_url: a.html_url,
        }
    }
}

impl From<RepositoryResponse> for Repository {
    fn from(r: RepositoryResponse) -> Self {
        Self {
            id: r.id,
            name: r.name,
            full_name: r.full_name,
            owner: r.owner.login,
            description: r.description,
            private: r.private,
            html_url: r.html_url,
            default_branch: r.default_branch,
            stars: r.stargazers_count,
            forks: r.forks_count,
            open_issues: r.open_issues_count,
        }
    }
}

impl From<IssueResponse> for Issue {
    fn from(i: IssueResponse) -> Self {
        Self {
            id: i.id,
            number: i.number,
            title: i.title,
            body: i.body,
            state: i.state,
            author: i.user.login,
            labels: i.labels.into_iter().map(|l| l.name).collect(),
            html_url: i.html_url,
            created_at: i.created_at,
        }
    }
}
