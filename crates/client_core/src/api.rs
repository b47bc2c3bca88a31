use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use shared::domain::TeamId;
use shared::protocol::{ApiData, EventRecord, Team, TeamPatch, TeamSummary};

use crate::error::{FetchError, UpdateError};

/// Seam over the team service so the flows can run against scripted
/// implementations in tests.
#[async_trait]
pub trait TeamApi: Send + Sync {
    async fn fetch_team(&self, id: &TeamId) -> Result<Team, FetchError>;
    async fn update_team(&self, id: &TeamId, patch: &TeamPatch) -> Result<Team, UpdateError>;
    async fn list_teams(&self) -> Result<Vec<TeamSummary>, FetchError>;
    async fn fetch_events(&self) -> Result<Vec<EventRecord>, FetchError>;
}

/// Thin `reqwest` client for the hosted team service. One call, one request:
/// no caching, retries, timeouts, or deduplication at this layer.
pub struct HttpTeamApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTeamApi {
    /// Validates the base URL once, up front, and normalizes away a trailing
    /// slash so path formatting stays uniform.
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(base_url)?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn team_url(&self, id: &TeamId) -> String {
        format!("{}/api/v1/team/{}", self.base_url, id)
    }
}

/// Update responses come back either enveloped like the reads or as the bare
/// resource, depending on the service deployment.
#[derive(Deserialize)]
#[serde(untagged)]
enum UpdateReply {
    Enveloped(ApiData<Team>),
    Bare(Team),
}

impl UpdateReply {
    fn into_team(self) -> Team {
        match self {
            UpdateReply::Enveloped(reply) => reply.data,
            UpdateReply::Bare(team) => team,
        }
    }
}

#[async_trait]
impl TeamApi for HttpTeamApi {
    async fn fetch_team(&self, id: &TeamId) -> Result<Team, FetchError> {
        debug!(team_id = %id, "api: fetching team");
        let wrap = |source| FetchError::new(format!("team {id}"), source);
        let reply: ApiData<Team> = self
            .http
            .get(self.team_url(id))
            .send()
            .await
            .map_err(wrap)?
            .error_for_status()
            .map_err(wrap)?
            .json()
            .await
            .map_err(wrap)?;
        Ok(reply.data)
    }

    async fn update_team(&self, id: &TeamId, patch: &TeamPatch) -> Result<Team, UpdateError> {
        debug!(team_id = %id, "api: patching team");
        let wrap = |source| UpdateError::new(id.clone(), source);
        let reply: UpdateReply = self
            .http
            .patch(self.team_url(id))
            .json(patch)
            .send()
            .await
            .map_err(wrap)?
            .error_for_status()
            .map_err(wrap)?
            .json()
            .await
            .map_err(wrap)?;
        Ok(reply.into_team())
    }

    async fn list_teams(&self) -> Result<Vec<TeamSummary>, FetchError> {
        debug!("api: fetching team listing");
        let wrap = |source| FetchError::new("team listing", source);
        let reply: ApiData<Vec<TeamSummary>> = self
            .http
            .get(format!("{}/api/v1/team", self.base_url))
            .send()
            .await
            .map_err(wrap)?
            .error_for_status()
            .map_err(wrap)?
            .json()
            .await
            .map_err(wrap)?;
        Ok(reply.data)
    }

    // The events endpoint replies with a bare array, no envelope.
    async fn fetch_events(&self) -> Result<Vec<EventRecord>, FetchError> {
        debug!("api: fetching events");
        let wrap = |source| FetchError::new("events", source);
        let events = self
            .http
            .get(format!("{}/api/v1/events", self.base_url))
            .send()
            .await
            .map_err(wrap)?
            .error_for_status()
            .map_err(wrap)?
            .json()
            .await
            .map_err(wrap)?;
        Ok(events)
    }
}
