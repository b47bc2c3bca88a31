pub mod api;
pub mod cache;
pub mod error;
pub mod form;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex};
use tracing::{error, info};
use uuid::Uuid;

use shared::domain::TeamId;
use shared::protocol::{EventRecord, TeamSummary};

use crate::api::{HttpTeamApi, TeamApi};
use crate::cache::{QueryCache, QueryKey};
use crate::error::{EditorError, FetchError};
use crate::form::{FieldError, TeamFields, TeamForm};

/// How long the success toast stays up before dismissing itself.
pub const TOAST_DURATION: Duration = Duration::from_millis(1500);

/// Resting and transitional states of the team editor. "Idle" is the absence
/// of an open editor, so it has no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    Loading,
    Ready,
    Submitting,
    Succeeded,
    LoadFailed,
}

/// Where the flow sends the user after a successful update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    TeamListing,
}

/// User-facing notices emitted by the flows. Toasts dismiss themselves after
/// `duration`; alerts stay up until acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Toast { message: String, duration: Duration },
    Alert { title: String, body: String },
}

impl Notification {
    pub fn team_updated() -> Self {
        Notification::Toast {
            message: "Your team has been updated!".into(),
            duration: TOAST_DURATION,
        }
    }

    pub fn team_load_failed() -> Self {
        Notification::Alert {
            title: "Failed to load team data".into(),
            body: "Could not retrieve team data. Please try again later.".into(),
        }
    }

    pub fn team_update_failed() -> Self {
        Notification::Alert {
            title: "Update failed".into(),
            body: "Failed to update team. Try again!".into(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ClientEvent {
    TeamsLoaded {
        teams: Vec<TeamSummary>,
    },
    EventsLoaded {
        events: Vec<EventRecord>,
    },
    EditorPhaseChanged {
        team_id: TeamId,
        phase: EditorPhase,
    },
    EditorHydrated {
        team_id: TeamId,
        fields: TeamFields,
    },
    EditorFieldErrors {
        team_id: TeamId,
        errors: Vec<FieldError>,
    },
    Notified(Notification),
    Navigated(Route),
}

struct EditorState {
    team_id: TeamId,
    attempt: Uuid,
    phase: EditorPhase,
    form: TeamForm,
}

/// Point-in-time view of the open editor, for frontends and tests.
#[derive(Debug, Clone)]
pub struct EditorSnapshot {
    pub team_id: TeamId,
    pub phase: EditorPhase,
    pub fields: TeamFields,
    pub errors: Vec<FieldError>,
}

/// Frontend-agnostic core of the dashboard: the team service client, the
/// single editor slot, and the query cache, with a broadcast channel carrying
/// everything frontends need to render.
pub struct DashboardClient {
    api: Arc<dyn TeamApi>,
    cache: Arc<QueryCache>,
    editor: Mutex<Option<EditorState>>,
    events: broadcast::Sender<ClientEvent>,
}

impl DashboardClient {
    /// Builds a client against the hosted team service. The query cache is
    /// created here, once, and lives exactly as long as the client.
    pub fn new(base_url: &str) -> Result<Arc<Self>, url::ParseError> {
        Ok(Self::with_api(Arc::new(HttpTeamApi::new(base_url)?)))
    }

    /// Dependency-injecting constructor for tests and embedders.
    pub fn with_api(api: Arc<dyn TeamApi>) -> Arc<Self> {
        let (events, _) = broadcast::channel(1024);
        Arc::new(Self {
            api,
            cache: QueryCache::new(),
            editor: Mutex::new(None),
            events,
        })
    }

    pub fn cache(&self) -> Arc<QueryCache> {
        Arc::clone(&self.cache)
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: ClientEvent) {
        let _ = self.events.send(event);
    }

    /// Fetches the team listing and freshens its cache key.
    pub async fn refresh_teams(&self) -> Result<Vec<TeamSummary>, FetchError> {
        let teams = self.api.list_teams().await?;
        self.cache.mark_fresh(QueryKey::Teams).await;
        info!(count = teams.len(), "teams: listing refreshed");
        self.emit(ClientEvent::TeamsLoaded {
            teams: teams.clone(),
        });
        Ok(teams)
    }

    /// Fetches the events listing and freshens its cache key. Read-only, no
    /// transformation of the records.
    pub async fn refresh_events(&self) -> Result<Vec<EventRecord>, FetchError> {
        let events = self.api.fetch_events().await?;
        self.cache.mark_fresh(QueryKey::Events).await;
        info!(count = events.len(), "events: listing refreshed");
        self.emit(ClientEvent::EventsLoaded {
            events: events.clone(),
        });
        Ok(events)
    }

    /// Opens the editor for `team_id` and runs the load phase: exactly one
    /// fetch, then hydration of all four fields from the response. Opening
    /// again while an earlier load or submit is still in flight supersedes
    /// it; the stale response is discarded when it lands.
    pub async fn open_team_editor(&self, team_id: TeamId) -> Result<(), EditorError> {
        let attempt = Uuid::new_v4();
        {
            let mut editor = self.editor.lock().await;
            *editor = Some(EditorState {
                team_id: team_id.clone(),
                attempt,
                phase: EditorPhase::Loading,
                form: TeamForm::default(),
            });
        }
        info!(team_id = %team_id, "editor: loading team");
        self.emit(ClientEvent::EditorPhaseChanged {
            team_id: team_id.clone(),
            phase: EditorPhase::Loading,
        });

        match self.api.fetch_team(&team_id).await {
            Ok(team) => {
                let fields = {
                    let mut editor = self.editor.lock().await;
                    let state = Self::current_attempt(&mut editor, attempt)?;
                    state.form.hydrate(&team);
                    state.phase = EditorPhase::Ready;
                    state.form.fields().clone()
                };
                info!(team_id = %team_id, "editor: form hydrated");
                self.emit(ClientEvent::EditorHydrated {
                    team_id: team_id.clone(),
                    fields,
                });
                self.emit(ClientEvent::EditorPhaseChanged {
                    team_id,
                    phase: EditorPhase::Ready,
                });
                Ok(())
            }
            Err(err) => {
                {
                    let mut editor = self.editor.lock().await;
                    let state = Self::current_attempt(&mut editor, attempt)?;
                    state.phase = EditorPhase::LoadFailed;
                }
                error!(team_id = %team_id, error = %err, "editor: load failed");
                self.emit(ClientEvent::EditorPhaseChanged {
                    team_id: team_id.clone(),
                    phase: EditorPhase::LoadFailed,
                });
                self.emit(ClientEvent::Notified(Notification::team_load_failed()));
                Err(err.into())
            }
        }
    }

    /// Submits the form with `fields` as the final values. Validation
    /// failures stop the attempt before any network call. A rejected update
    /// keeps the edits and returns the editor to Ready so the user can submit
    /// again by hand; an accepted one invalidates the team listing, emits the
    /// success toast, and navigates back to the listing.
    pub async fn submit_team_update(&self, fields: TeamFields) -> Result<(), EditorError> {
        let (team_id, attempt, patch) = {
            let mut editor = self.editor.lock().await;
            let state = editor.as_mut().ok_or(EditorError::Closed)?;
            if state.phase != EditorPhase::Ready {
                return Err(EditorError::NotReady { phase: state.phase });
            }
            state.form.apply(fields);
            match state.form.validate() {
                Ok(patch) => {
                    state.phase = EditorPhase::Submitting;
                    (state.team_id.clone(), state.attempt, patch)
                }
                Err(invalid) => {
                    let team_id = state.team_id.clone();
                    let errors = invalid.errors.clone();
                    drop(editor);
                    info!(
                        team_id = %team_id,
                        fields = errors.len(),
                        "editor: submit blocked by validation"
                    );
                    self.emit(ClientEvent::EditorFieldErrors { team_id, errors });
                    return Err(invalid.into());
                }
            }
        };
        info!(team_id = %team_id, "editor: submitting update");
        self.emit(ClientEvent::EditorPhaseChanged {
            team_id: team_id.clone(),
            phase: EditorPhase::Submitting,
        });

        match self.api.update_team(&team_id, &patch).await {
            Ok(_) => {
                {
                    let mut editor = self.editor.lock().await;
                    let state = Self::current_attempt(&mut editor, attempt)?;
                    state.phase = EditorPhase::Succeeded;
                }
                self.cache.invalidate(QueryKey::Teams).await;
                info!(team_id = %team_id, "editor: update accepted");
                self.emit(ClientEvent::EditorPhaseChanged {
                    team_id: team_id.clone(),
                    phase: EditorPhase::Succeeded,
                });
                self.emit(ClientEvent::Notified(Notification::team_updated()));
                self.emit(ClientEvent::Navigated(Route::TeamListing));
                Ok(())
            }
            Err(err) => {
                {
                    let mut editor = self.editor.lock().await;
                    let state = Self::current_attempt(&mut editor, attempt)?;
                    state.phase = EditorPhase::Ready;
                }
                error!(team_id = %team_id, error = %err, "editor: update failed");
                self.emit(ClientEvent::EditorPhaseChanged {
                    team_id: team_id.clone(),
                    phase: EditorPhase::Ready,
                });
                self.emit(ClientEvent::Notified(Notification::team_update_failed()));
                Err(err.into())
            }
        }
    }

    /// Drops the open editor, if any. Frontends call this when leaving the
    /// edit screen; an in-flight attempt becomes superseded.
    pub async fn close_team_editor(&self) {
        let mut editor = self.editor.lock().await;
        if editor.take().is_some() {
            info!("editor: closed");
        }
    }

    pub async fn editor_snapshot(&self) -> Option<EditorSnapshot> {
        let editor = self.editor.lock().await;
        editor.as_ref().map(|state| EditorSnapshot {
            team_id: state.team_id.clone(),
            phase: state.phase,
            fields: state.form.fields().clone(),
            errors: state.form.errors().to_vec(),
        })
    }

    fn current_attempt(
        editor: &mut Option<EditorState>,
        attempt: Uuid,
    ) -> Result<&mut EditorState, EditorError> {
        match editor.as_mut() {
            Some(state) if state.attempt == attempt => Ok(state),
            _ => {
                info!("editor: discarding completion of a superseded attempt");
                Err(EditorError::Superseded)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
