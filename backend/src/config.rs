use log::warn;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_UPSTREAM: &str = "http://localhost:5000";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Gateway settings, read from the environment.
///
/// | Variable         | Default                 |
/// |------------------|-------------------------|
/// | `HOST`           | `127.0.0.1`             |
/// | `PORT`           | `8080`                  |
/// | `WORKERS`        | number of CPUs          |
/// | `UPSTREAM_URL`   | `http://localhost:5000` |
/// | `ALLOWED_ORIGIN` | `http://localhost:3000` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub upstream_url: String,
    pub allowed_origin: String,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("Ignoring invalid PORT {:?}, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };
        let workers = lookup("WORKERS")
            .and_then(|w| w.parse().ok())
            .filter(|w: &usize| *w > 0)
            .unwrap_or_else(num_cpus::get);

        Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            workers,
            upstream_url: lookup("UPSTREAM_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_UPSTREAM.to_string()),
            allowed_origin: lookup("ALLOWED_ORIGIN")
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string()),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
