use std::thread;
use std::time::{Duration, Instant};

use chrono::Local;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::Settings;
use crate::controller::events::{
    classify_fetch_failure, UiError, UiErrorCategory, UiErrorContext, UiEvent,
};
use crate::controller::orchestration::dispatch_backend_command;
use client_core::cache::{CacheEvent, QueryKey};
use client_core::error::EditorError;
use client_core::form::{FieldError, TeamFields, MEMBER_JOIN};
use client_core::{ClientEvent, DashboardClient, EditorPhase, Notification, Route};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{TeamCategory, TeamField, TeamId};
use shared::protocol::{EventRecord, TeamSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Teams,
    TeamEditor,
    Events,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

/// Draft state for the editor screen. The backend worker owns the canonical
/// form; this copy is what the text widgets edit between submits.
struct EditorUi {
    team_id: TeamId,
    phase: EditorPhase,
    draft: TeamFields,
    field_errors: Vec<FieldError>,
}

struct ActiveToast {
    message: String,
    expires_at: Instant,
}

struct ActiveAlert {
    title: String,
    body: String,
}

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Api => "Service",
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

fn service_environment_label(api_base_url: &str) -> &'static str {
    let url = api_base_url.to_ascii_lowercase();
    if url.contains("127.0.0.1") || url.contains("localhost") {
        "Local"
    } else if url.contains("staging") {
        "Staging"
    } else if url.contains("dev") {
        "Development"
    } else {
        "Production"
    }
}

fn field_error_text(errors: &[FieldError], field: TeamField) -> Option<&'static str> {
    errors
        .iter()
        .find(|error| error.field == field)
        .map(|error| error.message)
}

fn clear_field_error(errors: &mut Vec<FieldError>, field: TeamField) {
    errors.retain(|error| error.field != field);
}

fn show_field_error(ui: &mut egui::Ui, errors: &[FieldError], field: TeamField) {
    if let Some(message) = field_error_text(errors, field) {
        ui.colored_label(egui::Color32::from_rgb(220, 90, 90), message);
    }
}

fn draft_text_field(
    ui: &mut egui::Ui,
    id: &'static str,
    label: &str,
    hint: &str,
    value: &mut String,
) -> egui::Response {
    ui.label(egui::RichText::new(label).strong());
    let edit = egui::TextEdit::singleline(value)
        .id_salt(id)
        .hint_text(
            egui::RichText::new(hint).color(ui.visuals().weak_text_color().gamma_multiply(0.85)),
        )
        .desired_width(f32::INFINITY);
    ui.add_sized([ui.available_width(), 30.0], edit)
}

pub struct DashboardApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    api_base_url: String,
    service_host: String,
    screen: Screen,

    teams: Vec<TeamSummary>,
    teams_refreshed_at: Option<String>,
    events: Vec<EventRecord>,
    events_refreshed_at: Option<String>,

    editor: Option<EditorUi>,

    status: String,
    status_banner: Option<StatusBanner>,
    toasts: Vec<ActiveToast>,
    alert: Option<ActiveAlert>,
}

impl DashboardApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: &Settings,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            api_base_url: settings.api_base_url.clone(),
            service_host: settings.service_host(),
            screen: Screen::Teams,
            teams: Vec::new(),
            teams_refreshed_at: None,
            events: Vec::new(),
            events_refreshed_at: None,
            editor: None,
            status: "Backend worker starting...".to_string(),
            status_banner: None,
            toasts: Vec::new(),
            alert: None,
        };
        dispatch_backend_command(
            &app.cmd_tx,
            BackendCommand::LoadTeams { force: false },
            &mut app.status,
        );
        app
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::TeamsLoaded(teams) => {
                    self.teams = teams;
                    self.teams_refreshed_at = Some(Local::now().format("%H:%M:%S").to_string());
                    self.status = format!("{} teams loaded", self.teams.len());
                }
                UiEvent::EventsLoaded(events) => {
                    self.events = events;
                    self.events_refreshed_at = Some(Local::now().format("%H:%M:%S").to_string());
                    self.status = format!("{} events loaded", self.events.len());
                }
                UiEvent::TeamsInvalidated => {
                    // Refetch rides on the next visit to the listing; only a
                    // mounted listing refetches immediately.
                    if self.screen == Screen::Teams {
                        dispatch_backend_command(
                            &self.cmd_tx,
                            BackendCommand::LoadTeams { force: false },
                            &mut self.status,
                        );
                    }
                }
                UiEvent::EditorPhaseChanged { team_id, phase } => {
                    if let Some(editor) = self.editor.as_mut() {
                        if editor.team_id == team_id {
                            editor.phase = phase;
                        }
                    }
                }
                UiEvent::EditorHydrated { team_id, fields } => {
                    if let Some(editor) = self.editor.as_mut() {
                        if editor.team_id == team_id {
                            editor.draft = fields;
                            editor.field_errors.clear();
                        }
                    }
                }
                UiEvent::EditorFieldErrors(errors) => {
                    if let Some(editor) = self.editor.as_mut() {
                        editor.field_errors = errors;
                    }
                }
                UiEvent::Toast { message, duration } => {
                    self.toasts.push(ActiveToast {
                        message,
                        expires_at: Instant::now() + duration,
                    });
                }
                UiEvent::Alert { title, body } => {
                    self.alert = Some(ActiveAlert { title, body });
                }
                UiEvent::Navigated(Route::TeamListing) => {
                    self.editor = None;
                    self.select_screen(Screen::Teams);
                }
                UiEvent::Error(err) => {
                    self.status = match err.category() {
                        UiErrorCategory::Transport => classify_fetch_failure(err.message()),
                        category => format!("{} error: {}", err_label(category), err.message()),
                    };
                    if err.context() == UiErrorContext::BackendStartup {
                        self.status_banner = Some(StatusBanner {
                            severity: StatusBannerSeverity::Error,
                            message: self.status.clone(),
                        });
                    }
                }
            }
        }
    }

    fn select_screen(&mut self, screen: Screen) {
        if self.screen == Screen::TeamEditor && screen != Screen::TeamEditor {
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::CloseTeamEditor,
                &mut self.status,
            );
            self.editor = None;
        }
        self.screen = screen;
        match screen {
            Screen::Teams => dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::LoadTeams { force: false },
                &mut self.status,
            ),
            Screen::Events => dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::LoadEvents { force: false },
                &mut self.status,
            ),
            Screen::TeamEditor => {}
        }
    }

    fn open_editor(&mut self, team_id: TeamId) {
        self.editor = Some(EditorUi {
            team_id: team_id.clone(),
            phase: EditorPhase::Loading,
            draft: TeamFields::default(),
            field_errors: Vec::new(),
        });
        self.screen = Screen::TeamEditor;
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::OpenTeamEditor { team_id },
            &mut self.status,
        );
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header")
            .resizable(false)
            .exact_height(44.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.heading("Dashboard");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let env = service_environment_label(&self.api_base_url);
                        ui.label(egui::RichText::new(env).weak().size(11.0))
                            .on_hover_text(&self.api_base_url);
                    });
                });
            });

        if self.status_banner.is_some() {
            egui::TopBottomPanel::top("status_banner")
                .resizable(false)
                .show(ctx, |ui| {
                    ui.add_space(4.0);
                    self.show_status_banner(ui);
                    ui.add_space(4.0);
                });
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
        }
    }

    fn show_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("sidebar")
            .resizable(false)
            .default_width(160.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                let on_teams = matches!(self.screen, Screen::Teams | Screen::TeamEditor);
                if ui.selectable_label(on_teams, "All Teams").clicked() {
                    self.select_screen(Screen::Teams);
                }
                if ui
                    .selectable_label(self.screen == Screen::Events, "Events")
                    .clicked()
                {
                    self.select_screen(Screen::Events);
                }
            });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&self.status).size(12.0));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(egui::RichText::new(&self.service_host).weak().size(12.0));
                    });
                });
            });
    }

    fn show_teams_screen(&mut self, ctx: &egui::Context) {
        let mut open_request: Option<TeamId> = None;
        let mut refresh_requested = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading("All Teams");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Refresh").clicked() {
                        refresh_requested = true;
                    }
                    if let Some(stamp) = &self.teams_refreshed_at {
                        ui.weak(format!("refreshed {stamp}"));
                    }
                });
            });
            ui.separator();

            if self.teams.is_empty() {
                ui.weak("No teams to show yet.");
                return;
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                egui::Grid::new("teams_table")
                    .striped(true)
                    .num_columns(5)
                    .spacing([16.0, 6.0])
                    .show(ui, |ui| {
                        ui.strong("Name");
                        ui.strong("Category");
                        ui.strong("Members");
                        ui.strong("Description");
                        ui.label("");
                        ui.end_row();

                        for team in &self.teams {
                            ui.label(&team.name);
                            ui.label(&team.category);
                            ui.label(team.members.join(MEMBER_JOIN));
                            ui.label(&team.description);
                            if ui.button("Edit").clicked() {
                                open_request = Some(team.id.clone());
                            }
                            ui.end_row();
                        }
                    });
            });
        });

        if refresh_requested {
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::LoadTeams { force: true },
                &mut self.status,
            );
        }
        if let Some(team_id) = open_request {
            self.open_editor(team_id);
        }
    }

    fn show_editor_screen(&mut self, ctx: &egui::Context) {
        let mut submit_request: Option<TeamFields> = None;
        let mut retry_request: Option<TeamId> = None;

        let Some(editor) = self.editor.as_mut() else {
            self.screen = Screen::Teams;
            return;
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading("Update a Team");
            ui.separator();

            match editor.phase {
                EditorPhase::Loading => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading team...");
                    });
                    return;
                }
                EditorPhase::LoadFailed => {
                    ui.colored_label(
                        egui::Color32::from_rgb(220, 90, 90),
                        "Team data is unavailable.",
                    );
                    if ui.button("Retry").clicked() {
                        retry_request = Some(editor.team_id.clone());
                    }
                    ui.add_space(8.0);
                }
                EditorPhase::Ready | EditorPhase::Submitting | EditorPhase::Succeeded => {}
            }

            let editable = editor.phase == EditorPhase::Ready;
            ui.add_enabled_ui(editable, |ui| {
                ui.set_width(ui.available_width().min(520.0));

                if draft_text_field(
                    ui,
                    "team_name",
                    "Team Name",
                    "Enter team name",
                    &mut editor.draft.name,
                )
                .changed()
                {
                    clear_field_error(&mut editor.field_errors, TeamField::Name);
                }
                show_field_error(ui, &editor.field_errors, TeamField::Name);
                ui.add_space(6.0);

                ui.label(egui::RichText::new("Description").strong());
                let description = egui::TextEdit::multiline(&mut editor.draft.description)
                    .id_salt("team_description")
                    .hint_text(
                        egui::RichText::new("Describe the team...")
                            .color(ui.visuals().weak_text_color().gamma_multiply(0.85)),
                    )
                    .desired_rows(3)
                    .desired_width(f32::INFINITY);
                if ui.add(description).changed() {
                    clear_field_error(&mut editor.field_errors, TeamField::Description);
                }
                show_field_error(ui, &editor.field_errors, TeamField::Description);
                ui.add_space(6.0);

                ui.label(egui::RichText::new("Category").strong());
                let selected_text = if editor.draft.category.is_empty() {
                    "Select a category".to_string()
                } else {
                    editor.draft.category.clone()
                };
                let mut category_picked = false;
                egui::ComboBox::from_id_salt("team_category")
                    .selected_text(selected_text)
                    .width(ui.available_width())
                    .show_ui(ui, |ui| {
                        for category in TeamCategory::ALL {
                            if ui
                                .selectable_value(
                                    &mut editor.draft.category,
                                    category.as_str().to_string(),
                                    category.as_str(),
                                )
                                .changed()
                            {
                                category_picked = true;
                            }
                        }
                    });
                if category_picked {
                    clear_field_error(&mut editor.field_errors, TeamField::Category);
                }
                show_field_error(ui, &editor.field_errors, TeamField::Category);
                ui.add_space(6.0);

                if draft_text_field(
                    ui,
                    "team_members",
                    "Members (comma separated)",
                    "Enter member names",
                    &mut editor.draft.members,
                )
                .changed()
                {
                    clear_field_error(&mut editor.field_errors, TeamField::Members);
                }
                show_field_error(ui, &editor.field_errors, TeamField::Members);
            });

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(editable, egui::Button::new("Update Team"))
                    .clicked()
                {
                    submit_request = Some(editor.draft.clone());
                }
                if editor.phase == EditorPhase::Submitting {
                    ui.spinner();
                    ui.weak("Updating...");
                }
            });
        });

        if let Some(team_id) = retry_request {
            self.open_editor(team_id);
        }
        if let Some(fields) = submit_request {
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::SubmitTeamUpdate { fields },
                &mut self.status,
            );
        }
    }

    fn show_events_screen(&mut self, ctx: &egui::Context) {
        let mut refresh_requested = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading("Events");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Refresh").clicked() {
                        refresh_requested = true;
                    }
                    if let Some(stamp) = &self.events_refreshed_at {
                        ui.weak(format!("refreshed {stamp}"));
                    }
                });
            });
            ui.separator();

            if self.events.is_empty() {
                ui.weak("No events to show yet.");
                return;
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                egui::Grid::new("events_table")
                    .striped(true)
                    .num_columns(5)
                    .spacing([16.0, 6.0])
                    .show(ui, |ui| {
                        ui.strong("Title");
                        ui.strong("Date");
                        ui.strong("Time");
                        ui.strong("Location");
                        ui.strong("Category");
                        ui.end_row();

                        for event in &self.events {
                            ui.label(&event.title);
                            ui.label(&event.date);
                            ui.label(&event.time);
                            ui.label(&event.location);
                            ui.label(&event.category);
                            ui.end_row();
                        }
                    });
            });
        });

        if refresh_requested {
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::LoadEvents { force: true },
                &mut self.status,
            );
        }
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(alert) = self.alert.as_ref() else {
            return;
        };
        let mut acknowledged = false;
        egui::Window::new(alert.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(alert.body.as_str());
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        acknowledged = true;
                    }
                });
            });
        if acknowledged {
            self.alert = None;
        }
    }

    fn prune_expired_toasts(&mut self, now: Instant) {
        self.toasts.retain(|toast| toast.expires_at > now);
    }

    fn show_toasts(&mut self, ctx: &egui::Context) {
        self.prune_expired_toasts(Instant::now());
        if self.toasts.is_empty() {
            return;
        }
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 12.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for toast in &self.toasts {
                    egui::Frame::NONE
                        .fill(egui::Color32::from_rgb(47, 133, 90))
                        .corner_radius(6.0)
                        .inner_margin(egui::Margin::symmetric(12, 8))
                        .show(ui, |ui| {
                            ui.label(
                                egui::RichText::new(&toast.message).color(egui::Color32::WHITE),
                            );
                        });
                    ui.add_space(6.0);
                }
            });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_header(ctx);
        self.show_sidebar(ctx);
        self.show_status_bar(ctx);
        match self.screen {
            Screen::Teams => self.show_teams_screen(ctx),
            Screen::TeamEditor => self.show_editor_screen(ctx),
            Screen::Events => self.show_events_screen(ctx),
        }
        self.show_alert(ctx);
        self.show_toasts(ctx);

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

pub fn start_backend_bridge(
    settings: Settings,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = match DashboardClient::new(&settings.api_base_url) {
                Ok(client) => client,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!(
                            "backend worker startup failure: invalid API base URL '{}': {err}",
                            settings.api_base_url
                        ),
                    )));
                    tracing::error!(url = %settings.api_base_url, "invalid API base URL: {err}");
                    return;
                }
            };

            let mut client_events = client.subscribe_events();
            let ui_tx_events = ui_tx.clone();
            tokio::spawn(async move {
                while let Ok(event) = client_events.recv().await {
                    let evt = match event {
                        ClientEvent::TeamsLoaded { teams } => UiEvent::TeamsLoaded(teams),
                        ClientEvent::EventsLoaded { events } => UiEvent::EventsLoaded(events),
                        ClientEvent::EditorPhaseChanged { team_id, phase } => {
                            UiEvent::EditorPhaseChanged { team_id, phase }
                        }
                        ClientEvent::EditorHydrated { team_id, fields } => {
                            UiEvent::EditorHydrated { team_id, fields }
                        }
                        ClientEvent::EditorFieldErrors { errors, .. } => {
                            UiEvent::EditorFieldErrors(errors)
                        }
                        ClientEvent::Notified(Notification::Toast { message, duration }) => {
                            UiEvent::Toast { message, duration }
                        }
                        ClientEvent::Notified(Notification::Alert { title, body }) => {
                            UiEvent::Alert { title, body }
                        }
                        ClientEvent::Navigated(route) => UiEvent::Navigated(route),
                    };
                    let _ = ui_tx_events.try_send(evt);
                }
            });

            let mut cache_events = client.cache().subscribe();
            let ui_tx_cache = ui_tx.clone();
            tokio::spawn(async move {
                while let Ok(CacheEvent::Invalidated(key)) = cache_events.recv().await {
                    if key == QueryKey::Teams {
                        let _ = ui_tx_cache.try_send(UiEvent::TeamsInvalidated);
                    }
                }
            });

            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::LoadTeams { force } => {
                        if !force && !client.cache().is_stale(QueryKey::Teams).await {
                            tracing::debug!("backend: team listing still fresh, skipping fetch");
                            continue;
                        }
                        tracing::info!(force, "backend: load_teams");
                        if let Err(err) = client.refresh_teams().await {
                            tracing::error!("backend: load_teams failed: {err}");
                            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                UiErrorContext::LoadTeams,
                                err.to_string(),
                            )));
                        }
                    }
                    BackendCommand::LoadEvents { force } => {
                        if !force && !client.cache().is_stale(QueryKey::Events).await {
                            tracing::debug!("backend: events listing still fresh, skipping fetch");
                            continue;
                        }
                        tracing::info!(force, "backend: load_events");
                        if let Err(err) = client.refresh_events().await {
                            tracing::error!("backend: load_events failed: {err}");
                            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                UiErrorContext::LoadEvents,
                                err.to_string(),
                            )));
                        }
                    }
                    BackendCommand::OpenTeamEditor { team_id } => {
                        tracing::info!(team_id = %team_id, "backend: open_team_editor");
                        if let Err(err) = client.open_team_editor(team_id).await {
                            // the load-failure alert is emitted by the client itself
                            tracing::debug!("backend: open_team_editor reported: {err}");
                        }
                    }
                    BackendCommand::SubmitTeamUpdate { fields } => {
                        tracing::info!("backend: submit_team_update");
                        match client.submit_team_update(fields).await {
                            Ok(()) => {}
                            Err(EditorError::NotReady {
                                phase: EditorPhase::Submitting,
                            }) => {
                                let _ = ui_tx.try_send(UiEvent::Info(
                                    "An update is already in flight".to_string(),
                                ));
                            }
                            Err(EditorError::NotReady { .. }) => {
                                let _ = ui_tx.try_send(UiEvent::Info(
                                    "Team data is not loaded; reload before submitting".to_string(),
                                ));
                            }
                            Err(err) => {
                                // validation and update failures surface through client events
                                tracing::debug!("backend: submit_team_update reported: {err}");
                            }
                        }
                    }
                    BackendCommand::CloseTeamEditor => {
                        client.close_team_editor().await;
                    }
                }
            }
        });
    });
}
