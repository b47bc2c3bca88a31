use shared::domain::TeamId;
use thiserror::Error;

use crate::form::ValidationError;
use crate::EditorPhase;

/// A read from the team service failed: transport, a non-success status, or
/// an undecodable body.
#[derive(Debug, Error)]
#[error("fetch of {resource} failed: {source}")]
pub struct FetchError {
    pub resource: String,
    #[source]
    pub source: reqwest::Error,
}

impl FetchError {
    pub fn new(resource: impl Into<String>, source: reqwest::Error) -> Self {
        Self {
            resource: resource.into(),
            source,
        }
    }
}

/// The partial update for a team was not accepted.
#[derive(Debug, Error)]
#[error("update of team {team_id} failed: {source}")]
pub struct UpdateError {
    pub team_id: TeamId,
    #[source]
    pub source: reqwest::Error,
}

impl UpdateError {
    pub fn new(team_id: TeamId, source: reqwest::Error) -> Self {
        Self { team_id, source }
    }
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("no team editor is open")]
    Closed,
    #[error("editor is {phase:?}, submit requires a hydrated form")]
    NotReady { phase: EditorPhase },
    #[error("attempt superseded by a newer editor session")]
    Superseded,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Update(#[from] UpdateError),
}
