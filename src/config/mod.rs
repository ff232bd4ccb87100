//! Configuration module for loadcast.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: backend API and dashboard timing.

mod api_config;
mod timing_config;

pub use api_config::ApiEnvConfig;
pub use timing_config::TimingEnvConfig;

use crate::domain::series::SERIES_CAPACITY;
use anyhow::{Context, Result};
use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Where the dashboard gets its data from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Mock,
    Http,
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(Mode::Mock),
            "http" => Ok(Mode::Http),
            _ => anyhow::bail!("Invalid LOADCAST_MODE: {}. Must be 'mock' or 'http'", s),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub api: ApiEnvConfig,
    pub timing: TimingEnvConfig,
    /// Points kept by each of the load, temperature and humidity charts
    pub series_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mode_str = lookup("LOADCAST_MODE").unwrap_or_else(|| "http".to_string());
        let mode = Mode::from_str(&mode_str)?;

        let api = ApiEnvConfig::from_lookup(&lookup).context("Failed to load API config")?;
        let timing =
            TimingEnvConfig::from_lookup(&lookup).context("Failed to load timing config")?;

        let series_capacity: usize = parse_var(&lookup, "SERIES_CAPACITY", SERIES_CAPACITY)?;
        if series_capacity == 0 {
            anyhow::bail!("SERIES_CAPACITY must be greater than zero");
        }

        Ok(Self {
            mode,
            api,
            timing,
            series_capacity,
        })
    }
}

/// Parses `key` when set, otherwise returns `default`.
pub(crate) fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("Invalid value for {}: '{}'", key, raw)),
        None => Ok(default),
    }
}
