use crate::application::system::{DashboardCommand, DashboardHandle};
use crate::domain::forecast::ForecastForm;
use crate::domain::health::BackendStatus;
use anyhow::Result;
use crossbeam_channel::Receiver;

/// Unified event type for the User Interface
#[derive(Clone, Debug)]
pub enum ClientEvent {
    Log(String),
    BackendStatus(BackendStatus),
}

/// A client interface for interacting with the running dashboard.
/// Abstracts away channel management and provides a clean API for the UI.
pub struct DashboardClient {
    log_rx: Receiver<String>,
    handle: DashboardHandle,
    last_status: BackendStatus,
}

impl DashboardClient {
    pub fn new(handle: DashboardHandle, log_rx: Receiver<String>) -> Self {
        Self {
            handle,
            log_rx,
            last_status: BackendStatus::Unknown,
        }
    }

    /// Poll for the next available event from any channel.
    /// This is a non-blocking call that checks all channels in priority order.
    pub fn poll_next(&mut self) -> Option<ClientEvent> {
        // The probe drops its sender once done, so compare values instead of
        // relying on the watch channel's change flag
        let status = self.handle.status_rx.borrow().clone();
        if status != self.last_status {
            self.last_status = status.clone();
            return Some(ClientEvent::BackendStatus(status));
        }

        if let Ok(msg) = self.log_rx.try_recv() {
            return Some(ClientEvent::Log(msg));
        }

        None
    }

    // --- Command Methods ---

    pub fn submit(&self, form: ForecastForm) -> Result<()> {
        self.handle
            .cmd_tx
            .try_send(DashboardCommand::Submit(form))
            .map_err(|e| anyhow::anyhow!("Failed to send prediction request: {}", e))
    }

    pub fn reset(&self) -> Result<()> {
        self.handle
            .cmd_tx
            .try_send(DashboardCommand::Reset)
            .map_err(|e| anyhow::anyhow!("Failed to send reset: {}", e))
    }

    pub fn backend_status(&self) -> BackendStatus {
        self.handle.status_rx.borrow().clone()
    }
}
