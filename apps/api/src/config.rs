use anyhow::{Context, Result};

const DEFAULT_FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

/// Application configuration loaded from environment variables.
/// Every variable is optional; see the defaults below.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Enables the LLM text enhancer when set.
    pub anthropic_api_key: Option<String>,
    /// TrueType font used to rasterize PDF exports.
    pub resume_font_path: String,
    /// In-flight enhancement results arriving later than this are abandoned.
    pub enhance_timeout_secs: u64,
    /// Opening a session past this many evicts the oldest.
    pub max_sessions: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            resume_font_path: optional_env("RESUME_FONT_PATH")
                .unwrap_or_else(|| DEFAULT_FONT_PATH.to_string()),
            enhance_timeout_secs: parse_env("ENHANCE_TIMEOUT_SECS", 60)?,
            max_sessions: parse_env("MAX_SESSIONS", 256)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            anthropic_api_key: None,
            resume_font_path: DEFAULT_FONT_PATH.to_string(),
            enhance_timeout_secs: 60,
            max_sessions: 256,
        }
    }
}

/// Unset and blank both count as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>())),
        None => Ok(default),
    }
}
