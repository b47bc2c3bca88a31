use super::*;

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::time::{sleep, timeout};

use crate::cache::{CacheEvent, QueryKey};
use crate::error::EditorError;
use crate::form::{TeamFields, MEMBERS_REQUIRED, NAME_REQUIRED};
use shared::domain::{EventId, TeamField, TeamId};
use shared::protocol::{EventRecord, Team, TeamPatch};

#[derive(Default)]
struct TeamServiceState {
    team_fetches: usize,
    listing_fetches: usize,
    events_fetches: usize,
    update_bodies: Vec<serde_json::Value>,
    fail_team_fetch: bool,
    fail_updates_remaining: usize,
}

fn sample_team() -> Team {
    Team {
        name: "Platform".into(),
        description: "Core infrastructure".into(),
        category: "Development".into(),
        members: vec!["Alice".into(), "Bob".into()],
    }
}

fn sample_events() -> Vec<EventRecord> {
    vec![
        EventRecord {
            id: EventId(1),
            title: "Tech Conference 2024".into(),
            date: "2024-03-15".into(),
            time: "10:00 AM".into(),
            location: "Main Hall".into(),
            category: "Development".into(),
        },
        EventRecord {
            id: EventId(2),
            title: "Design Review".into(),
            date: "2024-03-22".into(),
            time: "2:30 PM".into(),
            location: "Studio B".into(),
            category: "Design".into(),
        },
    ]
}

async fn fetch_team_handler(
    State(state): State<Arc<Mutex<TeamServiceState>>>,
    Path(_team_id): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut state = state.lock().await;
    state.team_fetches += 1;
    if state.fail_team_fetch {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(serde_json::json!({ "data": sample_team() })))
}

async fn update_team_handler(
    State(state): State<Arc<Mutex<TeamServiceState>>>,
    Path(_team_id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut state = state.lock().await;
    state.update_bodies.push(body.clone());
    if state.fail_updates_remaining > 0 {
        state.fail_updates_remaining -= 1;
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    // The service stores the raw members string and echoes it back as-is.
    Ok(Json(serde_json::json!({
        "data": {
            "name": body["name"],
            "description": body["description"],
            "category": body["category"],
            "members": body["members"],
        }
    })))
}

async fn list_teams_handler(
    State(state): State<Arc<Mutex<TeamServiceState>>>,
) -> Json<serde_json::Value> {
    let mut state = state.lock().await;
    state.listing_fetches += 1;
    Json(serde_json::json!({
        "data": [
            {
                "id": "t-1",
                "name": "Platform",
                "description": "Core infrastructure",
                "category": "Development",
                "members": ["Alice", "Bob"],
            },
            {
                "_id": "65f0c1",
                "name": "Design Guild",
                "description": "Brand work",
                "category": "Design",
                "members": ["Carol"],
            },
        ]
    }))
}

async fn list_events_handler(
    State(state): State<Arc<Mutex<TeamServiceState>>>,
) -> Json<Vec<EventRecord>> {
    let mut state = state.lock().await;
    state.events_fetches += 1;
    Json(sample_events())
}

async fn spawn_team_service() -> (String, Arc<Mutex<TeamServiceState>>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let state = Arc::new(Mutex::new(TeamServiceState::default()));
    let app = Router::new()
        .route("/api/v1/team", get(list_teams_handler))
        .route(
            "/api/v1/team/:team_id",
            get(fetch_team_handler).patch(update_team_handler),
        )
        .route("/api/v1/events", get(list_events_handler))
        .with_state(Arc::clone(&state));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), state)
}

fn drain_events(rx: &mut broadcast::Receiver<ClientEvent>) -> Vec<ClientEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

async fn wait_for_snapshot<F>(client: &Arc<DashboardClient>, description: &str, predicate: F)
where
    F: Fn(&EditorSnapshot) -> bool,
{
    let outcome = timeout(Duration::from_secs(2), async {
        loop {
            if let Some(snapshot) = client.editor_snapshot().await {
                if predicate(&snapshot) {
                    return;
                }
            }
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await;
    assert!(outcome.is_ok(), "timed out waiting for {description}");
}

fn hydrated_fields(events: &[ClientEvent]) -> Vec<TeamFields> {
    events
        .iter()
        .filter_map(|event| match event {
            ClientEvent::EditorHydrated { fields, .. } => Some(fields.clone()),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn submit_sends_a_single_patch_with_exactly_the_form_fields() {
    let (base_url, state) = spawn_team_service().await;
    let client = DashboardClient::new(&base_url).unwrap();

    client
        .open_team_editor(TeamId::new("team-1"))
        .await
        .unwrap();
    let mut fields = client.editor_snapshot().await.unwrap().fields;
    fields.name = "Platform Guild".into();
    fields.members = "Alice, Bob, Carol".into();
    client.submit_team_update(fields).await.unwrap();

    let state = state.lock().await;
    assert_eq!(state.update_bodies.len(), 1);
    let body = state.update_bodies[0].as_object().unwrap();
    let mut keys: Vec<&str> = body.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["category", "description", "members", "name"]);
    assert_eq!(body["name"], "Platform Guild");
    assert_eq!(body["description"], "Core infrastructure");
    assert_eq!(body["category"], "Development");
    assert_eq!(body["members"], "Alice, Bob, Carol");
}

#[tokio::test]
async fn loading_hydrates_members_into_a_delimited_string() {
    let (base_url, _state) = spawn_team_service().await;
    let client = DashboardClient::new(&base_url).unwrap();
    let mut rx = client.subscribe_events();

    client
        .open_team_editor(TeamId::new("team-1"))
        .await
        .unwrap();

    let snapshot = client.editor_snapshot().await.unwrap();
    assert_eq!(snapshot.phase, EditorPhase::Ready);
    assert_eq!(snapshot.fields.name, "Platform");
    assert_eq!(snapshot.fields.members, "Alice, Bob");

    let hydrated = hydrated_fields(&drain_events(&mut rx));
    assert_eq!(hydrated.len(), 1);
    assert_eq!(hydrated[0].members, "Alice, Bob");
}

#[tokio::test]
async fn submitting_an_empty_field_is_blocked_before_any_request() {
    let (base_url, state) = spawn_team_service().await;
    let client = DashboardClient::new(&base_url).unwrap();

    client
        .open_team_editor(TeamId::new("team-1"))
        .await
        .unwrap();
    let mut fields = client.editor_snapshot().await.unwrap().fields;
    fields.name = String::new();
    let err = client.submit_team_update(fields).await.unwrap_err();
    assert!(matches!(err, EditorError::Validation(_)));

    let snapshot = client.editor_snapshot().await.unwrap();
    assert_eq!(snapshot.phase, EditorPhase::Ready);
    assert_eq!(snapshot.errors.len(), 1);
    assert_eq!(snapshot.errors[0].field, TeamField::Name);
    assert_eq!(snapshot.errors[0].message, NAME_REQUIRED);
    assert!(state.lock().await.update_bodies.is_empty());
}

#[tokio::test]
async fn a_successful_update_invalidates_the_listing_once_and_navigates_once() {
    let (base_url, state) = spawn_team_service().await;
    let client = DashboardClient::new(&base_url).unwrap();

    client.refresh_teams().await.unwrap();
    assert!(!client.cache().is_stale(QueryKey::Teams).await);

    client
        .open_team_editor(TeamId::new("team-1"))
        .await
        .unwrap();
    let mut rx = client.subscribe_events();
    let mut cache_rx = client.cache().subscribe();

    let fields = client.editor_snapshot().await.unwrap().fields;
    client.submit_team_update(fields).await.unwrap();

    let events = drain_events(&mut rx);
    let toast_at = events
        .iter()
        .position(|event| matches!(event, ClientEvent::Notified(Notification::Toast { .. })))
        .expect("success toast emitted");
    let navigate_at = events
        .iter()
        .position(|event| matches!(event, ClientEvent::Navigated(Route::TeamListing)))
        .expect("navigation emitted");
    assert!(toast_at < navigate_at, "toast precedes navigation");
    let navigations = events
        .iter()
        .filter(|event| matches!(event, ClientEvent::Navigated(_)))
        .count();
    assert_eq!(navigations, 1);
    if let ClientEvent::Notified(Notification::Toast { message, duration }) = &events[toast_at] {
        assert_eq!(message, "Your team has been updated!");
        assert_eq!(*duration, TOAST_DURATION);
    }

    assert_eq!(
        cache_rx.try_recv().ok(),
        Some(CacheEvent::Invalidated(QueryKey::Teams))
    );
    assert!(cache_rx.try_recv().is_err(), "invalidated exactly once");
    assert!(client.cache().is_stale(QueryKey::Teams).await);

    // The listing view consults the cache and refetches.
    client.refresh_teams().await.unwrap();
    assert!(!client.cache().is_stale(QueryKey::Teams).await);
    assert_eq!(state.lock().await.listing_fetches, 2);
}

#[tokio::test]
async fn a_failed_load_leaves_the_form_unpopulated_and_raises_an_alert() {
    let (base_url, state) = spawn_team_service().await;
    state.lock().await.fail_team_fetch = true;
    let client = DashboardClient::new(&base_url).unwrap();
    let mut rx = client.subscribe_events();

    let err = client
        .open_team_editor(TeamId::new("team-1"))
        .await
        .unwrap_err();
    assert!(matches!(err, EditorError::Fetch(_)));

    let snapshot = client.editor_snapshot().await.unwrap();
    assert_eq!(snapshot.phase, EditorPhase::LoadFailed);
    assert_eq!(snapshot.fields, TeamFields::default());

    let events = drain_events(&mut rx);
    let alert = events.iter().find_map(|event| match event {
        ClientEvent::Notified(Notification::Alert { title, body }) => {
            Some((title.clone(), body.clone()))
        }
        _ => None,
    });
    assert_eq!(
        alert,
        Some((
            "Failed to load team data".to_string(),
            "Could not retrieve team data. Please try again later.".to_string(),
        ))
    );
    assert!(hydrated_fields(&events).is_empty());

    // Without a successful hydration the editor refuses to submit.
    let err = client
        .submit_team_update(TeamFields {
            name: "Manual".into(),
            description: "Entered by hand".into(),
            category: "Design".into(),
            members: "Dana".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EditorError::NotReady {
            phase: EditorPhase::LoadFailed
        }
    ));
    assert!(state.lock().await.update_bodies.is_empty());
}

#[tokio::test]
async fn a_failed_update_keeps_the_edits_and_a_second_submit_succeeds() {
    let (base_url, state) = spawn_team_service().await;
    state.lock().await.fail_updates_remaining = 1;
    let client = DashboardClient::new(&base_url).unwrap();

    client
        .open_team_editor(TeamId::new("team-1"))
        .await
        .unwrap();
    let mut rx = client.subscribe_events();
    let mut cache_rx = client.cache().subscribe();

    let mut fields = client.editor_snapshot().await.unwrap().fields;
    fields.description = "Rewritten while offline".into();
    let err = client.submit_team_update(fields.clone()).await.unwrap_err();
    assert!(matches!(err, EditorError::Update(_)));

    let events = drain_events(&mut rx);
    let alert = events.iter().find_map(|event| match event {
        ClientEvent::Notified(Notification::Alert { body, .. }) => Some(body.clone()),
        _ => None,
    });
    assert_eq!(alert, Some("Failed to update team. Try again!".to_string()));
    assert!(!events
        .iter()
        .any(|event| matches!(event, ClientEvent::Navigated(_))));
    assert!(cache_rx.try_recv().is_err(), "no invalidation on failure");

    let snapshot = client.editor_snapshot().await.unwrap();
    assert_eq!(snapshot.phase, EditorPhase::Ready);
    assert_eq!(snapshot.fields, fields, "edits survive the failure");

    client.submit_team_update(fields).await.unwrap();
    let state = state.lock().await;
    assert_eq!(state.update_bodies.len(), 2);
    assert_eq!(
        state.update_bodies[1]["description"],
        "Rewritten while offline"
    );
}

#[tokio::test]
async fn refresh_events_returns_the_listing_untransformed() {
    let (base_url, state) = spawn_team_service().await;
    let client = DashboardClient::new(&base_url).unwrap();

    let events = client.refresh_events().await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, EventId(1));
    assert_eq!(events[0].title, "Tech Conference 2024");
    assert_eq!(events[0].time, "10:00 AM");
    assert_eq!(events[1].category, "Design");
    assert!(!client.cache().is_stale(QueryKey::Events).await);
    assert_eq!(state.lock().await.events_fetches, 1);
}

#[tokio::test]
async fn the_team_listing_accepts_document_store_identifiers() {
    let (base_url, _state) = spawn_team_service().await;
    let client = DashboardClient::new(&base_url).unwrap();

    let teams = client.refresh_teams().await.unwrap();
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0].id, TeamId::new("t-1"));
    assert_eq!(teams[1].id, TeamId::new("65f0c1"));
    assert_eq!(teams[1].members, vec!["Carol"]);
}

struct ScriptedTeamApi {
    teams: HashMap<String, Team>,
    fetch_gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    update_gates: Mutex<Vec<oneshot::Receiver<()>>>,
    update_calls: Mutex<usize>,
}

impl ScriptedTeamApi {
    fn new(teams: impl IntoIterator<Item = (&'static str, Team)>) -> Self {
        Self {
            teams: teams
                .into_iter()
                .map(|(id, team)| (id.to_string(), team))
                .collect(),
            fetch_gates: Mutex::new(HashMap::new()),
            update_gates: Mutex::new(Vec::new()),
            update_calls: Mutex::new(0),
        }
    }

    async fn gate_fetch(&self, team_id: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.fetch_gates
            .lock()
            .await
            .insert(team_id.to_string(), rx);
        tx
    }

    async fn gate_next_update(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.update_gates.lock().await.push(rx);
        tx
    }
}

#[async_trait::async_trait]
impl api::TeamApi for ScriptedTeamApi {
    async fn fetch_team(&self, id: &TeamId) -> Result<Team, crate::error::FetchError> {
        let gate = self.fetch_gates.lock().await.remove(id.as_str());
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(self.teams.get(id.as_str()).cloned().expect("scripted team"))
    }

    async fn update_team(
        &self,
        _id: &TeamId,
        patch: &TeamPatch,
    ) -> Result<Team, crate::error::UpdateError> {
        *self.update_calls.lock().await += 1;
        let gate = self.update_gates.lock().await.pop();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(Team {
            name: patch.name.clone(),
            description: patch.description.clone(),
            category: patch.category.as_str().to_string(),
            members: patch
                .members
                .split(',')
                .map(|member| member.trim().to_string())
                .collect(),
        })
    }

    async fn list_teams(
        &self,
    ) -> Result<Vec<shared::protocol::TeamSummary>, crate::error::FetchError> {
        Ok(Vec::new())
    }

    async fn fetch_events(&self) -> Result<Vec<EventRecord>, crate::error::FetchError> {
        Ok(Vec::new())
    }
}

fn scripted_team(name: &str) -> Team {
    Team {
        name: name.into(),
        description: format!("{name} description"),
        category: "Development".into(),
        members: vec!["Alice".into()],
    }
}

#[tokio::test]
async fn reopening_the_editor_discards_a_stale_load_response() {
    let api = Arc::new(ScriptedTeamApi::new([
        ("alpha", scripted_team("Alpha")),
        ("beta", scripted_team("Beta")),
    ]));
    let release_alpha = api.gate_fetch("alpha").await;
    let client = DashboardClient::with_api(Arc::clone(&api) as Arc<dyn api::TeamApi>);
    let mut rx = client.subscribe_events();

    let slow = tokio::spawn({
        let client = Arc::clone(&client);
        async move { client.open_team_editor(TeamId::new("alpha")).await }
    });
    wait_for_snapshot(&client, "alpha load to start", |snapshot| {
        snapshot.team_id == TeamId::new("alpha") && snapshot.phase == EditorPhase::Loading
    })
    .await;

    client.open_team_editor(TeamId::new("beta")).await.unwrap();
    release_alpha.send(()).unwrap();

    let outcome = slow.await.unwrap();
    assert!(matches!(outcome, Err(EditorError::Superseded)));

    let snapshot = client.editor_snapshot().await.unwrap();
    assert_eq!(snapshot.team_id, TeamId::new("beta"));
    assert_eq!(snapshot.phase, EditorPhase::Ready);
    assert_eq!(snapshot.fields.name, "Beta");

    let hydrated = hydrated_fields(&drain_events(&mut rx));
    assert_eq!(hydrated.len(), 1, "the stale response never hydrates");
    assert_eq!(hydrated[0].name, "Beta");
}

#[tokio::test]
async fn reopening_the_editor_discards_a_stale_submit_response() {
    let api = Arc::new(ScriptedTeamApi::new([("alpha", scripted_team("Alpha"))]));
    let release_update = api.gate_next_update().await;
    let client = DashboardClient::with_api(Arc::clone(&api) as Arc<dyn api::TeamApi>);

    client.open_team_editor(TeamId::new("alpha")).await.unwrap();
    let mut fields = client.editor_snapshot().await.unwrap().fields;
    fields.description = "Edited".into();

    let slow = tokio::spawn({
        let client = Arc::clone(&client);
        let fields = fields.clone();
        async move { client.submit_team_update(fields).await }
    });
    wait_for_snapshot(&client, "submit to start", |snapshot| {
        snapshot.phase == EditorPhase::Submitting
    })
    .await;

    // A second submit while one is in flight is refused outright.
    let err = client.submit_team_update(fields).await.unwrap_err();
    assert!(matches!(
        err,
        EditorError::NotReady {
            phase: EditorPhase::Submitting
        }
    ));

    client.open_team_editor(TeamId::new("alpha")).await.unwrap();
    let mut rx = client.subscribe_events();
    let mut cache_rx = client.cache().subscribe();
    release_update.send(()).unwrap();

    let outcome = slow.await.unwrap();
    assert!(matches!(outcome, Err(EditorError::Superseded)));

    let snapshot = client.editor_snapshot().await.unwrap();
    assert_eq!(
        snapshot.phase,
        EditorPhase::Ready,
        "reopened editor is untouched"
    );
    assert_eq!(snapshot.fields.description, "Alpha description");
    assert_eq!(*api.update_calls.lock().await, 1);
    assert!(
        cache_rx.try_recv().is_err(),
        "no invalidation for a stale submit"
    );
    let events = drain_events(&mut rx);
    assert!(!events
        .iter()
        .any(|event| matches!(event, ClientEvent::Notified(_) | ClientEvent::Navigated(_))));
}

#[tokio::test]
async fn closing_the_editor_supersedes_the_inflight_load() {
    let api = Arc::new(ScriptedTeamApi::new([("alpha", scripted_team("Alpha"))]));
    let release_alpha = api.gate_fetch("alpha").await;
    let client = DashboardClient::with_api(Arc::clone(&api) as Arc<dyn api::TeamApi>);

    let slow = tokio::spawn({
        let client = Arc::clone(&client);
        async move { client.open_team_editor(TeamId::new("alpha")).await }
    });
    wait_for_snapshot(&client, "alpha load to start", |snapshot| {
        snapshot.phase == EditorPhase::Loading
    })
    .await;

    client.close_team_editor().await;
    release_alpha.send(()).unwrap();

    let outcome = slow.await.unwrap();
    assert!(matches!(outcome, Err(EditorError::Superseded)));
    assert!(client.editor_snapshot().await.is_none());
}

#[tokio::test]
async fn validation_reports_field_errors_through_the_event_channel() {
    let (base_url, _state) = spawn_team_service().await;
    let client = DashboardClient::new(&base_url).unwrap();

    client
        .open_team_editor(TeamId::new("team-1"))
        .await
        .unwrap();
    let mut rx = client.subscribe_events();

    let err = client
        .submit_team_update(TeamFields {
            name: "Platform".into(),
            description: "Core infrastructure".into(),
            category: "Development".into(),
            members: "   ".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, EditorError::Validation(_)));

    let events = drain_events(&mut rx);
    let errors = events
        .iter()
        .find_map(|event| match event {
            ClientEvent::EditorFieldErrors { errors, .. } => Some(errors.clone()),
            _ => None,
        })
        .expect("field errors emitted");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, TeamField::Members);
    assert_eq!(errors[0].message, MEMBERS_REQUIRED);
}
