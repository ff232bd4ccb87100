use anyhow::Result;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::application::{
    dashboard::{ChartSurfaces, Dashboard, SharedDashboard},
    prediction_controller::PredictionController,
    weather_poller::WeatherPoller,
};
use crate::config::{Config, Mode};
use crate::domain::forecast::ForecastForm;
use crate::domain::health::BackendStatus;
use crate::domain::ports::{DashboardView, HealthService, PredictionService, WeatherService};
use crate::infrastructure::{HttpBackend, MockBackend};

/// User actions forwarded from the UI thread to the runtime.
#[derive(Debug, Clone)]
pub enum DashboardCommand {
    Submit(ForecastForm),
    Reset,
}

pub struct Application {
    pub config: Config,
    pub weather_service: Arc<dyn WeatherService>,
    pub prediction_service: Arc<dyn PredictionService>,
    pub health_service: Arc<dyn HealthService>,
    pub dashboard: SharedDashboard,
}

/// Running dashboard: command sender, shared state and background tasks.
pub struct DashboardHandle {
    pub cmd_tx: mpsc::Sender<DashboardCommand>,
    pub dashboard: SharedDashboard,
    pub status_rx: watch::Receiver<BackendStatus>,
    pub poller_task: JoinHandle<()>,
    pub command_task: JoinHandle<()>,
}

impl DashboardHandle {
    /// Stops polling and command processing.
    pub fn shutdown(&self) {
        self.poller_task.abort();
        self.command_task.abort();
    }
}

impl Application {
    pub fn build(
        config: Config,
        surfaces: ChartSurfaces,
        view: Arc<dyn DashboardView>,
    ) -> Result<Self> {
        info!("Building loadcast dashboard (Mode: {:?})...", config.mode);

        let (weather_service, prediction_service, health_service): (
            Arc<dyn WeatherService>,
            Arc<dyn PredictionService>,
            Arc<dyn HealthService>,
        ) = match config.mode {
            Mode::Mock => {
                let backend = Arc::new(MockBackend::new());
                (backend.clone(), backend.clone(), backend)
            }
            Mode::Http => {
                info!("Using forecasting backend at {}", config.api.base_url);
                let backend = Arc::new(HttpBackend::new(&config.api)?);
                (backend.clone(), backend.clone(), backend)
            }
        };

        let dashboard = Dashboard::new(config.series_capacity, surfaces, view).into_shared();

        Ok(Self {
            config,
            weather_service,
            prediction_service,
            health_service,
            dashboard,
        })
    }

    /// Spawns the health probe, the weather poller and the command loop.
    pub async fn start(self) -> Result<DashboardHandle> {
        // 1. Health probe (one shot, non-fatal)
        let (status_tx, status_rx) = watch::channel(BackendStatus::Unknown);
        let health_service = self.health_service.clone();
        tokio::spawn(async move {
            let status = probe_health(health_service.as_ref()).await;
            let _ = status_tx.send(status);
        });

        // 2. Weather poller
        let poller = WeatherPoller::new(
            self.weather_service.clone(),
            self.dashboard.clone(),
            self.config.timing.weather_poll_interval,
        );
        let poller_task = tokio::spawn(async move { poller.run().await });

        // 3. Command loop
        let (cmd_tx, cmd_rx) = mpsc::channel(32);
        let controller = Arc::new(PredictionController::new(
            self.prediction_service.clone(),
            self.dashboard.clone(),
            self.config.timing.scroll_delay,
        ));
        let command_task = tokio::spawn(run_commands(controller, cmd_rx));

        info!("Dashboard started.");

        Ok(DashboardHandle {
            cmd_tx,
            dashboard: self.dashboard,
            status_rx,
            poller_task,
            command_task,
        })
    }
}

/// Each submit runs as its own task so a slow backend never blocks a reset
/// or a later submit; responses land in whatever order they arrive.
async fn run_commands(
    controller: Arc<PredictionController>,
    mut cmd_rx: mpsc::Receiver<DashboardCommand>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            DashboardCommand::Submit(form) => {
                let controller = controller.clone();
                tokio::spawn(async move {
                    controller.submit(&form).await;
                });
            }
            DashboardCommand::Reset => controller.reset().await,
        }
    }
    info!("Command channel closed, stopping command loop");
}

pub async fn probe_health(service: &dyn HealthService) -> BackendStatus {
    match service.health().await {
        Ok(health) if health.is_ok() => {
            info!(
                "Backend healthy: {} / {}",
                health.backend.as_deref().unwrap_or("unknown backend"),
                health.model.as_deref().unwrap_or("unknown model")
            );
            BackendStatus::Online(health)
        }
        Ok(health) => {
            warn!("Backend reports status '{}'", health.status);
            BackendStatus::Offline(format!("status {}", health.status))
        }
        Err(e) => {
            warn!("Backend health check failed: {}", e);
            BackendStatus::Offline(e.to_string())
        }
    }
}
