//! Dashboard timing configuration parsing from environment variables.

use super::parse_var;
use crate::application::prediction_controller::SCROLL_DELAY;
use crate::application::weather_poller::WEATHER_POLL_INTERVAL;
use anyhow::Result;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct TimingEnvConfig {
    pub weather_poll_interval: Duration,
    pub scroll_delay: Duration,
}

impl Default for TimingEnvConfig {
    fn default() -> Self {
        Self {
            weather_poll_interval: WEATHER_POLL_INTERVAL,
            scroll_delay: SCROLL_DELAY,
        }
    }
}

impl TimingEnvConfig {
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let poll_ms: u64 = parse_var(
            lookup,
            "WEATHER_POLL_MS",
            defaults.weather_poll_interval.as_millis() as u64,
        )?;
        if poll_ms == 0 {
            anyhow::bail!("WEATHER_POLL_MS must be greater than zero");
        }

        let scroll_ms: u64 = parse_var(
            lookup,
            "SCROLL_DELAY_MS",
            defaults.scroll_delay.as_millis() as u64,
        )?;

        Ok(Self {
            weather_poll_interval: Duration::from_millis(poll_ms),
            scroll_delay: Duration::from_millis(scroll_ms),
        })
    }
}
