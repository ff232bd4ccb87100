// Owned dashboard state
pub mod dashboard;

// Background weather polling
pub mod weather_poller;

// Predict/reset cycle
pub mod prediction_controller;

// System orchestrator
pub mod client;
pub mod system;
