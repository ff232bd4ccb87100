// Rolling chart buffers
pub mod series;

// Live weather readings and chart labels
pub mod weather;

// Load prediction request/response cycle
pub mod forecast;

// Section visibility state machines
pub mod reveal;

// Backend health probe
pub mod health;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;
