use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use chrono::NaiveDate;
use reqwest::{
    Client, RequestBuilder, Response,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::JiraConfig;
use crate::domain::ticket::{FieldMetadata, IssueDraft, IssueRef, Ticket};
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

const DESCRIPTION_LEAD: &str = "Update dependencies to remove security vulnerabilities displayed in ";

pub struct JiraClient {
    http: Client,
    base_url: String,
    username: String,
    token: String,
}

impl JiraClient {
    pub fn new(config: &JiraConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            token: config.api_token.clone(),
        }
    }

    fn auth_header(username: &str, token: &str) -> String {
        let credentials = format!("{username}:{token}");
        let encoded = BASE64_STANDARD.encode(credentials);
        format!("Basic {encoded}")
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/rest/api/3/{}", self.base_url, path)
    }

    fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.base_url, key)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(AUTHORIZATION, Self::auth_header(&self.username, &self.token))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        let response = self.authorize(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Rejected {
                service: "Jira",
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn get_json<T>(&self, request: RequestBuilder) -> AppResult<T>
    where
        T: DeserializeOwned + Send,
    {
        self.send(request).await?.json().await.map_err(|err| {
            AppError::IssueTracker(format!("failed to parse Jira response: {err}"))
        })
    }
}

#[async_trait]
impl IssueTrackerService for JiraClient {
    async fn search_issues(&self, jql: &str) -> AppResult<Vec<IssueRef>> {
        let request = self.http.get(self.endpoint("search")).query(&[("jql", jql)]);
        let payload: JiraSearchResponse = self.get_json(request).await?;
        Ok(payload.issues)
    }

    async fn create_issue(&self, draft: &IssueDraft) -> AppResult<Ticket> {
        let request = self
            .http
            .post(self.endpoint("issue"))
            .json(&JiraCreateIssueRequest::from_draft(draft));
        let payload: JiraCreateIssueResponse = self.get_json(request).await?;

        let url = payload
            .self_url
            .unwrap_or_else(|| self.browse_url(&payload.key));

        Ok(Ticket {
            id: payload.id,
            key: payload.key,
            url: Some(url),
        })
    }

    async fn fields(&self) -> AppResult<Vec<FieldMetadata>> {
        self.get_json(self.http.get(self.endpoint("field"))).await
    }

    async fn field_context_options(&self, field_id: &str, context_id: &str) -> AppResult<Value> {
        let path = format!("field/{field_id}/context/{context_id}/option");
        self.get_json(self.http.get(self.endpoint(&path))).await
    }

    async fn create_metadata(&self, project_key: &str, issue_type: &str) -> AppResult<Value> {
        let request = self.http.get(self.endpoint("issue/createmeta")).query(&[
            ("projectKeys", project_key),
            ("issuetypeNames", issue_type),
            ("expand", "projects.issuetypes.fields"),
        ]);
        self.get_json(request).await
    }
}

#[derive(Serialize)]
struct JiraCreateIssueRequest {
    fields: JiraCreateIssueFields,
}

impl JiraCreateIssueRequest {
    fn from_draft(draft: &IssueDraft) -> Self {
        let mut extra = draft.custom_fields.clone();
        extra.insert(
            draft.epic_field.clone(),
            Value::String(draft.epic_key.clone()),
        );

        Self {
            fields: JiraCreateIssueFields {
                project: JiraProject {
                    key: draft.project_key.clone(),
                },
                summary: draft.summary.clone(),
                description: JiraDescription::linked(DESCRIPTION_LEAD, &draft.detail_url),
                duedate: draft.due_date,
                issuetype: JiraIssueType {
                    name: draft.issue_type.clone(),
                },
                priority: JiraPriority {
                    id: draft.priority_id.clone(),
                },
                labels: draft.labels.clone(),
                extra,
            },
        }
    }
}

#[derive(Serialize)]
struct JiraCreateIssueFields {
    project: JiraProject,
    summary: String,
    description: JiraDescription,
    duedate: Option<NaiveDate>,
    issuetype: JiraIssueType,
    priority: JiraPriority,
    labels: Vec<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Serialize)]
struct JiraProject {
    key: String,
}

#[derive(Serialize)]
struct JiraIssueType {
    name: String,
}

#[derive(Serialize)]
struct JiraPriority {
    id: String,
}

/// Atlassian Document Format body.
#[derive(Serialize)]
struct JiraDescription {
    #[serde(rename = "type")]
    doc_type: &'static str,
    version: u8,
    content: Vec<JiraDocNode>,
}

impl JiraDescription {
    fn linked(lead: &str, href: &str) -> Self {
        Self {
            doc_type: "doc",
            version: 1,
            content: vec![JiraDocNode::paragraph(vec![
                JiraDocText::text(lead.to_string()),
                JiraDocText::link(href),
            ])],
        }
    }
}

#[derive(Serialize)]
struct JiraDocNode {
    #[serde(rename = "type")]
    node_type: &'static str,
    content: Vec<JiraDocText>,
}

impl JiraDocNode {
    fn paragraph(content: Vec<JiraDocText>) -> Self {
        Self {
            node_type: "paragraph",
            content,
        }
    }
}

#[derive(Serialize)]
struct JiraDocText {
    #[serde(rename = "type")]
    text_type: &'static str,
    text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    marks: Vec<JiraMark>,
}

impl JiraDocText {
    fn text(text: String) -> Self {
        Self {
            text_type: "text",
            text,
            marks: Vec::new(),
        }
    }

    fn link(href: &str) -> Self {
        Self {
            text_type: "text",
            text: href.to_string(),
            marks: vec![JiraMark {
                mark_type: "link",
                attrs: JiraLinkAttrs {
                    href: href.to_string(),
                },
            }],
        }
    }
}

#[derive(Serialize)]
struct JiraMark {
    #[serde(rename = "type")]
    mark_type: &'static str,
    attrs: JiraLinkAttrs,
}

#[derive(Serialize)]
struct JiraLinkAttrs {
    href: String,
}

#[derive(Deserialize)]
struct JiraSearchResponse {
    #[serde(default)]
    issues: Vec<IssueRef>,
}

#[derive(Deserialize)]
struct JiraCreateIssueResponse {
    #[serde(default)]
    id: Option<String>,
    key: String,
    #[serde(rename = "self")]
    self_url: Option<String>,
}
