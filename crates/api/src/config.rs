use roomkey_core::booking::DEFAULT_BOOKING_WINDOW_DAYS;
use roomkey_core::catalog::{CivilClock, SlotCatalog};

use crate::auth::jwt::JwtConfig;
use crate::auth::qr::QrTokenConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Staff/user JWT configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Scanner (QR) identity-token configuration. Explicit config passed
    /// into the verifier; no process-wide secret.
    pub qr: QrTokenConfig,
    /// Device keys accepted from kiosk terminals via `x-kiosk-key`.
    pub kiosk_api_keys: Vec<String>,
    /// Deployment timezone as a fixed UTC offset in minutes (default: `480`).
    pub timezone_offset_minutes: i32,
    /// How far ahead reservations may be placed, in days (default: `30`).
    pub booking_window_days: i64,
    /// Interval between background no-show sweeps in seconds (default: `300`).
    pub sweep_interval_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                 |
    /// |-----------------------------|-------------------------|
    /// | `HOST`                      | `0.0.0.0`               |
    /// | `PORT`                      | `3000`                  |
    /// | `CORS_ORIGINS`              | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                    |
    /// | `KIOSK_API_KEYS`            | (empty)                 |
    /// | `TIMEZONE_OFFSET_MINUTES`   | `480` (UTC+8)           |
    /// | `BOOKING_WINDOW_DAYS`       | `30`                    |
    /// | `NO_SHOW_SWEEP_INTERVAL_SECS` | `300`                 |
    ///
    /// JWT and QR token secrets are loaded by [`JwtConfig::from_env`] and
    /// [`QrTokenConfig::from_env`] and are required.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let kiosk_api_keys: Vec<String> = std::env::var("KIOSK_API_KEYS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let timezone_offset_minutes: i32 = std::env::var("TIMEZONE_OFFSET_MINUTES")
            .unwrap_or_else(|_| "480".into())
            .parse()
            .expect("TIMEZONE_OFFSET_MINUTES must be a valid i32");

        let booking_window_days: i64 = std::env::var("BOOKING_WINDOW_DAYS")
            .unwrap_or_else(|_| DEFAULT_BOOKING_WINDOW_DAYS.to_string())
            .parse()
            .expect("BOOKING_WINDOW_DAYS must be a valid i64");

        let sweep_interval_secs: u64 = std::env::var("NO_SHOW_SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("NO_SHOW_SWEEP_INTERVAL_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            qr: QrTokenConfig::from_env(),
            kiosk_api_keys,
            timezone_offset_minutes,
            booking_window_days,
            sweep_interval_secs,
        }
    }

    /// The civil clock for the deployment's fixed timezone.
    pub fn clock(&self) -> CivilClock {
        CivilClock::new(self.timezone_offset_minutes)
    }

    /// The canonical slot catalog.
    ///
    /// Currently the standard catalog; kept behind config so a deployment
    /// with different slot granularity only touches this function.
    pub fn catalog(&self) -> SlotCatalog {
        SlotCatalog::standard()
    }
}
