pub mod backend;
pub mod core;
pub mod log_view;
pub mod mock;

pub use backend::HttpBackend;
pub use mock::MockBackend;
