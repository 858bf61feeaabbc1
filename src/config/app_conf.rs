use std::env;
use std::net::SocketAddr;

pub struct AppConfig {
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5000);
        AppConfig { host, port }
    }

    /// The socket address the server binds. An unparseable host can only
    /// come from operator configuration, so failing loudly is correct.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host.parse().expect("Invalid APP_HOST"), self.port)
    }
}
