use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder,
    header::{ACCEPT, AUTHORIZATION},
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::GitHubConfig;
use crate::domain::alert::Alert;
use crate::domain::repository::{CustomProperty, Repository};
use crate::error::{AppError, AppResult};
use crate::infra::pagination::{OnFailure, Page, PageSource, collect_pages, next_link};
use crate::services::SourceControlService;

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("dependabot-tickets/", env!("CARGO_PKG_VERSION"));

pub struct GitHubClient {
    http: Client,
    api_url: String,
    organization: String,
    token: String,
    repo_type: String,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig) -> AppResult<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            organization: config.organization.clone(),
            token: config.token.clone(),
            repo_type: config.repo_type.clone(),
        })
    }

    fn get(&self, url: &str) -> RequestBuilder {
        self.http
            .get(url)
            .header(ACCEPT, "application/vnd.github+json")
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    fn repositories_url(&self) -> String {
        format!(
            "{}/orgs/{}/repos?type={}&per_page=100&page=1",
            self.api_url, self.organization, self.repo_type
        )
    }

    fn alerts_url(&self, repo: &str) -> String {
        format!(
            "{}/repos/{}/{}/dependabot/alerts?state=open",
            self.api_url, self.organization, repo
        )
    }

    fn properties_url(&self, repo: &str) -> String {
        format!(
            "{}/repos/{}/{}/properties/values",
            self.api_url, self.organization, repo
        )
    }
}

#[async_trait]
impl PageSource for GitHubClient {
    async fn fetch_page(&self, url: &str) -> AppResult<Option<Page>> {
        let response = self.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "GitHub list request was unsuccessful");
            return Ok(None);
        }

        let next = next_link(response.headers());
        let items: Vec<Value> = response.json().await.map_err(|err| {
            AppError::SourceControl(format!("failed to parse GitHub page from {url}: {err}"))
        })?;
        Ok(Some(Page { items, next }))
    }
}

#[async_trait]
impl SourceControlService for GitHubClient {
    async fn list_repositories(&self) -> AppResult<Vec<Repository>> {
        let repositories: Vec<Repository> =
            collect_pages(self, &self.repositories_url(), OnFailure::KeepCollected).await?;
        debug!(
            organization = %self.organization,
            count = repositories.len(),
            "listed repositories"
        );
        Ok(repositories)
    }

    async fn custom_properties(&self, repo: &str) -> AppResult<Vec<CustomProperty>> {
        let response = self.get(&self.properties_url(repo)).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(repo, %status, "could not read custom properties");
            return Ok(Vec::new());
        }
        response.json().await.map_err(|err| {
            AppError::SourceControl(format!("failed to parse properties for {repo}: {err}"))
        })
    }

    /// Any unsuccessful page means "no alerts"; a partial list would understate severity.
    async fn open_alerts(&self, repo: &str) -> AppResult<Vec<Alert>> {
        collect_pages(self, &self.alerts_url(repo), OnFailure::DiscardAll).await
    }
}
