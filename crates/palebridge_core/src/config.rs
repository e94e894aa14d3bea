use serde::Deserialize;

/// The frozen configuration value the core consumes. Constructed by an
/// external loader (YAML parsing, env vars, whatever — out of scope) and
/// handed to [`SessionManager::new`][crate::manager::SessionManager::new].
/// The core never reads a file or environment variable itself.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProxyConfig {
    pub bind_address: String,
    pub bind_port: u16,
    pub remote_address: String,
    pub remote_port: u16,
    pub max_players: usize,
    pub thread_pool_size: usize,
    pub ping_passthrough: bool,
    pub online_mode: bool,
    pub auth_server_url: String,
    pub default_locale: String,
    pub view_distance: u8,
    pub form_response_timeout_secs: u64,
}

impl Default for ProxyConfig {
    /// A reasonable value for the illustrative bootstrap binary and the test
    /// harness; not meant to be a real deployment default.
    fn default() -> Self {
        ProxyConfig {
            bind_address: "0.0.0.0".into(),
            bind_port: 19132,
            remote_address: "127.0.0.1".into(),
            remote_port: 25565,
            max_players: 100,
            thread_pool_size: num_cpus(),
            ping_passthrough: true,
            online_mode: false,
            auth_server_url: String::new(),
            default_locale: "en_US".into(),
            view_distance: 8,
            form_response_timeout_secs: 60,
        }
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}
