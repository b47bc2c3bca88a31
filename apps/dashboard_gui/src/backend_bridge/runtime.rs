//! Runtime bridge between the UI command queue and the backend worker.

use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::config::Settings;
use crate::controller::events::UiEvent;

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    crate::ui::app::start_backend_bridge(settings, cmd_rx, ui_tx);
}
