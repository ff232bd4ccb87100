use crate::application::dashboard::SharedDashboard;
use crate::domain::ports::WeatherService;
use chrono::Local;
use std::sync::Arc;
use tokio::time::{self, Duration, MissedTickBehavior};
use tracing::{debug, info};

/// Default cadence of live weather reads.
pub const WEATHER_POLL_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// Both windows received a point with this label.
    Applied { label: String },
    /// The endpoint answered but temperature or humidity was missing.
    Incomplete,
    /// Network error, bad status or malformed body.
    Failed,
}

/// Keeps the temperature and humidity windows fresh without user interaction.
pub struct WeatherPoller {
    service: Arc<dyn WeatherService>,
    dashboard: SharedDashboard,
    poll_interval: Duration,
}

impl WeatherPoller {
    pub fn new(
        service: Arc<dyn WeatherService>,
        dashboard: SharedDashboard,
        poll_interval: Duration,
    ) -> Self {
        Self {
            service,
            dashboard,
            poll_interval,
        }
    }

    /// Polls immediately, then on a fixed-rate cadence anchored at start.
    /// Never returns; abort the task to stop it.
    pub async fn run(&self) {
        info!("WeatherPoller started. Interval: {:?}", self.poll_interval);

        let mut interval = time::interval(self.poll_interval);
        // Ticks missed while a slow fetch was in flight collapse into one
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            // The first tick completes immediately
            interval.tick().await;
            self.poll_once().await;
        }
    }

    /// One read of the live weather endpoint. Failures are swallowed here and
    /// only show up in debug logs.
    pub async fn poll_once(&self) -> PollOutcome {
        let payload = match self.service.live_weather().await {
            Ok(payload) => payload,
            Err(e) => {
                debug!("WeatherPoller: skipping tick, fetch failed: {}", e);
                return PollOutcome::Failed;
            }
        };

        let upstream_error = payload.error.clone();
        let Some(reading) = payload.into_reading() else {
            debug!(
                "WeatherPoller: skipping tick, incomplete reading (upstream error: {:?})",
                upstream_error
            );
            return PollOutcome::Incomplete;
        };

        let label = {
            let mut dashboard = self.dashboard.write().await;
            dashboard.apply_weather(&reading, Local::now().time())
        };
        debug!(
            "WeatherPoller: {} -> {:.1}°C / {:.1}%",
            label, reading.temperature, reading.humidity
        );

        PollOutcome::Applied { label }
    }
}
