use crate::config::ApiEnvConfig;
use reqwest::Client;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates the shared HTTP client for the forecasting backend.
    /// No retry layer: a weather tick performs exactly one read and a
    /// prediction exactly one POST.
    pub fn create_client(api: &ApiEnvConfig) -> Client {
        Client::builder()
            .pool_max_idle_per_host(5)
            .timeout(api.request_timeout)
            .connect_timeout(api.connect_timeout)
            .user_agent(concat!("loadcast/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    }
}
