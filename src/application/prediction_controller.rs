use crate::application::dashboard::SharedDashboard;
use crate::domain::forecast::{ForecastForm, PredictionOutcome};
use crate::domain::ports::{DashboardView, PredictionService};
use crate::domain::reveal::Section;
use chrono::Local;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{error, info, warn};

/// Pause between scrolling the forecast box and the load chart into view.
pub const SCROLL_DELAY: Duration = Duration::from_millis(350);

/// Owns the predict/reset cycle triggered from the form.
///
/// Responses are applied in arrival order. Overlapping submits are neither
/// cancelled nor fenced, so the last response to arrive wins the display.
pub struct PredictionController {
    service: Arc<dyn PredictionService>,
    dashboard: SharedDashboard,
    scroll_delay: Duration,
}

impl PredictionController {
    pub fn new(
        service: Arc<dyn PredictionService>,
        dashboard: SharedDashboard,
        scroll_delay: Duration,
    ) -> Self {
        Self {
            service,
            dashboard,
            scroll_delay,
        }
    }

    pub async fn submit(&self, form: &ForecastForm) -> PredictionOutcome {
        let request = form.to_request();
        info!(
            "Requesting load prediction for {} ({}, {})",
            request.date, request.daytype, request.season
        );

        let outcome = PredictionOutcome::from_response(self.service.predict(&request).await);
        match &outcome {
            PredictionOutcome::Predicted { load_mw, unit } => {
                info!("Predicted load for {}: {} {}", request.date, load_mw, unit);
            }
            PredictionOutcome::Rejected { message } => {
                warn!("Prediction rejected by backend: {}", message);
            }
            PredictionOutcome::Failed { reason } => {
                error!("Prediction request failed: {}", reason);
            }
        }

        let (revealed, view) = {
            let mut dashboard = self.dashboard.write().await;
            let revealed = dashboard.apply_prediction(&outcome, Local::now().time());
            (revealed, dashboard.view())
        };

        if revealed {
            self.scroll_to_results(view);
        }

        outcome
    }

    pub async fn reset(&self) {
        info!("Resetting forecast");
        self.dashboard.write().await.reset();
    }

    /// Scrolls the forecast box into view now and the chart section after the
    /// configured delay, without holding up the caller.
    fn scroll_to_results(&self, view: Arc<dyn DashboardView>) -> JoinHandle<()> {
        view.scroll_into_view(Section::Forecast);

        let delay = self.scroll_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            view.scroll_into_view(Section::Chart);
        })
    }
}
