//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        BackendCommand::LoadTeams { .. } => "load_teams",
        BackendCommand::LoadEvents { .. } => "load_events",
        BackendCommand::OpenTeamEditor { .. } => "open_team_editor",
        BackendCommand::SubmitTeamUpdate { .. } => "submit_team_update",
        BackendCommand::CloseTeamEditor => "close_team_editor",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Backend command processor disconnected (possible startup/runtime failure); relaunch the dashboard".to_string();
        }
    }
}
