//! UI/backend events and error modeling for the dashboard controller.

use std::time::Duration;

use client_core::form::{FieldError, TeamFields};
use client_core::{EditorPhase, Route};
use shared::{
    domain::TeamId,
    protocol::{EventRecord, TeamSummary},
};

pub enum UiEvent {
    Info(String),
    TeamsLoaded(Vec<TeamSummary>),
    EventsLoaded(Vec<EventRecord>),
    TeamsInvalidated,
    EditorPhaseChanged {
        team_id: TeamId,
        phase: EditorPhase,
    },
    EditorHydrated {
        team_id: TeamId,
        fields: TeamFields,
    },
    EditorFieldErrors(Vec<FieldError>),
    Toast {
        message: String,
        duration: Duration,
    },
    Alert {
        title: String,
        body: String,
    },
    Navigated(Route),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Api,
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadTeams,
    LoadEvents,
}

pub fn classify_fetch_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("backend worker startup failure")
        || lower.contains("failed to build backend runtime")
    {
        "Backend worker startup failure; relaunch the dashboard.".to_string()
    } else if lower.contains("error sending request")
        || lower.contains("connection refused")
        || lower.contains("dns")
        || lower.contains("timed out")
    {
        "Team service unreachable; check the API base URL and your network.".to_string()
    } else {
        format!("Request error: {message}")
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("status")
            || message_lower.contains("decoding response body")
        {
            UiErrorCategory::Api
        } else if message_lower.contains("error sending request")
            || message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_http_status_failures_as_api_errors() {
        let err = UiError::from_message(
            UiErrorContext::LoadTeams,
            "fetch of teams failed: HTTP status server error (500 Internal Server Error) for url (https://hands-on-iota.vercel.app/api/v1/team)",
        );
        assert_eq!(err.category(), UiErrorCategory::Api);
        assert_eq!(err.context(), UiErrorContext::LoadTeams);
    }

    #[test]
    fn classifies_connection_failures_as_transport_errors() {
        let err = UiError::from_message(
            UiErrorContext::LoadEvents,
            "fetch of events failed: error sending request for url (http://127.0.0.1:1/api/v1/events)",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }

    #[test]
    fn unreachable_service_gets_a_friendly_status_line() {
        let friendly =
            classify_fetch_failure("fetch of teams failed: error sending request for url (...)");
        assert_eq!(
            friendly,
            "Team service unreachable; check the API base URL and your network."
        );
    }
}
