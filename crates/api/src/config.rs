//! Process configuration, read once at startup and immutable afterwards.

/// Runtime configuration for the API process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    /// HS256 signing secret shared by every token the process issues.
    pub jwt_secret: String,
    pub access_ttl_secs: i64,
    pub refresh_ttl_secs: i64,
}

impl AppConfig {
    /// Load configuration from the environment, with dev defaults.
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("CUEHALL_JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("CUEHALL_JWT_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        Self {
            bind_addr: std::env::var("CUEHALL_BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            jwt_secret,
            access_ttl_secs: env_i64("CUEHALL_ACCESS_TTL_SECS", 900),
            refresh_ttl_secs: env_i64("CUEHALL_REFRESH_TTL_SECS", 7 * 24 * 3600),
        }
    }
}

fn env_i64(key: &str, default: i64) -> i64 {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, raw = %raw, "not a valid integer; using default");
            default
        }),
        Err(_) => default,
    }
}
