//! Raw HTTP access to the Filmtrack API
//!
//! One method per API operation, no caching and no retries. Error bodies of
//! the form `{"error": {"code", "message"}}` are mapped onto `ClientError`.

use filmtrack_projects::{
    FilmProject, FilmProjectUpdate, Insight, NewFilmProject, ProjectId, ProjectPhase,
};
use reqwest::{Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{ClientConfig, ClientError, Result};

#[derive(Deserialize)]
struct CreatedProject {
    id: ProjectId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MaxProjectId {
    max_id: i64,
}

#[derive(Deserialize)]
struct ProjectWithInsights {
    project: FilmProject,
    insights: Vec<Insight>,
}

#[derive(Serialize)]
struct AdvancePhase {
    phase: ProjectPhase,
}

#[derive(Serialize)]
struct AddInsight<'a> {
    content: &'a str,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Typed HTTP client for the Filmtrack API.
#[derive(Clone)]
pub struct ProjectClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProjectClient {
    /// Create a new client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1{}", self.base_url, path)
    }

    pub async fn create_project(&self, project: &NewFilmProject) -> Result<ProjectId> {
        let response = self
            .http
            .post(self.url("/projects"))
            .json(project)
            .send()
            .await
            .map_err(transport_error)?;
        let created: CreatedProject = decode(response).await?;

        tracing::debug!(project_id = %created.id, "Project created");
        Ok(created.id)
    }

    /// Fetch one project; an unknown id is `Ok(None)`
    pub async fn get_project(&self, id: ProjectId) -> Result<Option<FilmProject>> {
        let response = self
            .http
            .get(self.url(&format!("/projects/{}", id)))
            .send()
            .await
            .map_err(transport_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(response).await.map(Some)
    }

    pub async fn list_projects(&self) -> Result<Vec<FilmProject>> {
        self.get_json("/projects").await
    }

    pub async fn get_project_with_insights(
        &self,
        id: ProjectId,
    ) -> Result<(FilmProject, Vec<Insight>)> {
        let body: ProjectWithInsights = self
            .get_json(&format!("/projects/{}/with-insights", id))
            .await?;
        Ok((body.project, body.insights))
    }

    pub async fn max_project_id(&self) -> Result<i64> {
        let body: MaxProjectId = self.get_json("/projects/max-id").await?;
        Ok(body.max_id)
    }

    pub async fn list_insights(&self, id: ProjectId) -> Result<Vec<Insight>> {
        self.get_json(&format!("/projects/{}/insights", id)).await
    }

    pub async fn titles_starting_with(&self, letter: &str) -> Result<Vec<String>> {
        let response = self
            .http
            .get(self.url("/projects/titles"))
            .query(&[("letter", letter)])
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    pub async fn update_project(
        &self,
        id: ProjectId,
        update: &FilmProjectUpdate,
    ) -> Result<FilmProject> {
        let response = self
            .http
            .put(self.url(&format!("/projects/{}", id)))
            .json(update)
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    pub async fn advance_phase(&self, id: ProjectId, phase: ProjectPhase) -> Result<FilmProject> {
        let response = self
            .http
            .put(self.url(&format!("/projects/{}/phase", id)))
            .json(&AdvancePhase { phase })
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    pub async fn add_insight(&self, id: ProjectId, content: &str) -> Result<Insight> {
        let response = self
            .http
            .post(self.url(&format!("/projects/{}/insights", id)))
            .json(&AddInsight { content })
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }
}

fn transport_error(e: reqwest::Error) -> ClientError {
    if e.is_connect() || e.is_timeout() || e.is_request() {
        ClientError::Unavailable(e.to_string())
    } else {
        ClientError::Server {
            status: e.status().map_or(0, |s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()));
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read response body".to_string());
    Err(status_error(status, &body))
}

/// Map a non-success status and its body onto a `ClientError`
fn status_error(status: StatusCode, body: &str) -> ClientError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.to_string());

    match status {
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ClientError::Validation(message)
        }
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY | StatusCode::GATEWAY_TIMEOUT => {
            ClientError::Unavailable(message)
        }
        _ => ClientError::Server {
            status: status.as_u16(),
            message,
        },
    }
}
