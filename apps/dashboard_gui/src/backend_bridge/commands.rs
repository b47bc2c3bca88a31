//! Backend commands queued from UI to backend worker.

use client_core::form::TeamFields;
use shared::domain::TeamId;

pub enum BackendCommand {
    LoadTeams {
        force: bool,
    },
    LoadEvents {
        force: bool,
    },
    OpenTeamEditor {
        team_id: TeamId,
    },
    SubmitTeamUpdate {
        fields: TeamFields,
    },
    CloseTeamEditor,
}
