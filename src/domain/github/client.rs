//! GitHub client — accounts, repositories, and issues.

use std::time::Duration;

use crate::auth::{plausible_token, CredentialSource, Service};
use crate::domain::github::wire::{AccountResponse, IssueResponse, RepositoryResponse};
use crate::domain::github::{Account, Issue, IssueFilter, NewIssue, NewRepository, Repository};
use crate::domain::require_id;
use crate::error::{AuthError, SdkError};
use crate::http::{
    ApiRequest, HttpTransport, Method, RequestExecutor, RetryConfig, Sleep, TimerSleep, Transport,
    DEFAULT_TIMEOUT,
};
use crate::network::GITHUB_API_URL;

const ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("tridesk/", env!("CARGO_PKG_VERSION"));

/// Client for the GitHub REST API.
///
/// Construct with [`GitHubClient::from_env`] (credential from `GITHUB_TOKEN`)
/// or [`GitHubClient::builder`] for explicit overrides.
pub struct GitHubClient<T = HttpTransport, S = TimerSleep> {
    http: RequestExecutor<T, S>,
    base_url: String,
}

impl GitHubClient {
    /// Build with defaults, resolving the token from the environment.
    pub fn from_env() -> Result<Self, SdkError> {
        Self::builder().build()
    }

    pub fn builder() -> GitHubClientBuilder {
        GitHubClientBuilder::default()
    }
}

impl<T: Transport, S: Sleep> GitHubClient<T, S> {
    /// Build around a custom executor (custom transport, test fakes).
    pub fn with_executor(http: RequestExecutor<T, S>, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Profile of the authenticated user.
    pub async fn authenticated_user(&self) -> Result<Account, SdkError> {
        let url = format!("{}/user", self.base_url);
        let resp: AccountResponse = self.http.execute(ApiRequest::new(Method::Get, url)).await?;
        Ok(resp.into())
    }

    /// Public profile of another user.
    pub async fn user(&self, username: &str) -> Result<Account, SdkError> {
        require_id(username, "username")?;
        let url = format!("{}/users/{}", self.base_url, username);
        let resp: AccountResponse = self.http.execute(ApiRequest::new(Method::Get, url)).await?;
        Ok(resp.into())
    }

    /// Repositories of `owner`, or of the authenticated user when `None`.
    ///
    /// `per_page` must be 1..=100 and `page` ≥ 1 (the API's own bounds,
    /// checked locally so a bad page size never reaches the wire).
    pub async fn repositories(
        &self,
        owner: Option<&str>,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<Repository>, SdkError> {
        if !(1..=100).contains(&per_page) {
            return Err(SdkError::Validation(
                "per_page must be between 1 and 100".to_string(),
            ));
        }
        if page < 1 {
            return Err(SdkError::Validation("page must be at least 1".to_string()));
        }
        let url = match owner {
            Some(owner) => {
                require_id(owner, "owner")?;
                format!(
                    "{}/users/{}/repos?per_page={}&page={}",
                    self.base_url, owner, per_page, page
                )
            }
            None => format!(
                "{}/user/repos?per_page={}&page={}",
                self.base_url, per_page, page
            ),
        };
        let resp: Vec<RepositoryResponse> =
            self.http.execute(ApiRequest::new(Method::Get, url)).await?;
        Ok(resp.into_iter().map(Repository::from).collect())
    }

    /// One repository by owner and name.
    pub async fn repository(&self, owner: &str, repo: &str) -> Result<Repository, SdkError> {
        require_id(owner, "owner")?;
        require_id(repo, "repository name")?;
        let url = format!("{}/repos/{}/{}", self.base_url, owner, repo);
        let resp: RepositoryResponse =
            self.http.execute(ApiRequest::new(Method::Get, url)).await?;
        Ok(resp.into())
    }

    /// Create a repository under the authenticated user.
    pub async fn create_repository(&self, new: &NewRepository) -> Result<Repository, SdkError> {
        require_id(&new.name, "repository name")?;
        let url = format!("{}/user/repos", self.base_url);
        let resp: RepositoryResponse = self
            .http
            .execute(ApiRequest::new(Method::Post, url).json(serde_json::to_value(new)?))
            .await?;
        Ok(resp.into())
    }

    /// Issues of a repository, filtered by state.
    pub async fn issues(
        &self,
        owner: &str,
        repo: &str,
        filter: IssueFilter,
        per_page: u32,
    ) -> Result<Vec<Issue>, SdkError> {
        require_id(owner, "owner")?;
        require_id(repo, "repository name")?;
        if !(1..=100).contains(&per_page) {
            return Err(SdkError::Validation(
                "per_page must be between 1 and 100".to_string(),
            ));
        }
        let url = format!(
            "{}/repos/{}/{}/issues?state={}&per_page={}",
            self.base_url, owner, repo, filter, per_page
        );
        let resp: Vec<IssueResponse> =
            self.http.execute(ApiRequest::new(Method::Get, url)).await?;
        Ok(resp.into_iter().map(Issue::from).collect())
    }

    /// Open a new issue.
    pub async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        new: &NewIssue,
    ) -> Result<Issue, SdkError> {
        require_id(owner, "owner")?;
        require_id(repo, "repository name")?;
        require_id(&new.title, "issue title")?;
        let url = format!("{}/repos/{}/{}/issues", self.base_url, owner, repo);
        let resp: IssueResponse = self
            .http
            .execute(ApiRequest::new(Method::Post, url).json(serde_json::to_value(new)?))
            .await?;
        Ok(resp.into())
    }

    /// Cheap connectivity check: fetch the authenticated user.
    pub async fn ping(&self) -> bool {
        self.authenticated_user().await.is_ok()
    }
}

// ─── Builder ─────────────────────────────────────────────────────────────────

pub struct GitHubClientBuilder {
    token: Option<String>,
    base_url: String,
    source: CredentialSource,
    retry: RetryConfig,
    timeout: Duration,
}

impl Default for GitHubClientBuilder {
    fn default() -> Self {
        Self {
            token: None,
            base_url: GITHUB_API_URL.to_string(),
            source: CredentialSource::from_env(),
            retry: RetryConfig::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GitHubClientBuilder {
    /// Explicit token; takes precedence over `GITHUB_TOKEN`.
    pub fn token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Credential lookup used when no explicit token is set.
    pub fn credentials(mut self, source: CredentialSource) -> Self {
        self.source = source;
        self
    }

    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<GitHubClient, SdkError> {
        let credential = self.source.resolve(Service::GitHub, self.token.as_deref())?;
        if !plausible_token(Service::GitHub, credential.expose()) {
            return Err(AuthError::MalformedToken {
                service: Service::GitHub,
            }
            .into());
        }
        let http = RequestExecutor::new(
            HttpTransport::new(self.timeout),
            TimerSleep,
            Service::GitHub.scheme(),
            credential,
            self.retry,
        )
        .with_default_headers([("Accept", ACCEPT), ("User-Agent", USER_AGENT)]);
        Ok(GitHubClient::with_executor(http, &self.base_url))
    }
}
