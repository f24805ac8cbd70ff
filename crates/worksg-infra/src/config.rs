//! Environment-driven server configuration.
//!
//! All configuration is read once at startup from the process environment
//! (a `.env` file is loaded beforehand by the binary). Invalid values fall
//! back to defaults with a warning rather than aborting startup.
//!
//! Recognized variables:
//! - `PORT` -- listen port, default 3000
//! - `ALLOWED_ORIGINS` -- comma-separated extra origins for the allow-list
//! - `OPENAI_API_KEY` -- upstream credential; absence leaves chat unconfigured
//! - `MODEL` -- model identifier for the agent runner, default `gpt-5`
//! - `WORKSG_WEB_DIR` -- static site root, default `public`

use std::path::PathBuf;

use secrecy::SecretString;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MODEL: &str = "gpt-5";
const DEFAULT_WEB_DIR: &str = "public";

/// Immutable server configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Extra allowed origins beyond the built-in defaults.
    pub allowed_origins: Vec<String>,
    /// Upstream credential. `None` means the chat endpoint answers 503.
    pub openai_api_key: Option<SecretString>,
    pub model: String,
    pub web_dir: PathBuf,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        let port = parse_port(std::env::var("PORT").ok().as_deref());
        let allowed_origins = split_origins(std::env::var("ALLOWED_ORIGINS").ok().as_deref());

        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(SecretString::from);

        let model =
            std::env::var("MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let web_dir = std::env::var("WORKSG_WEB_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_WEB_DIR));

        Self {
            port,
            allowed_origins,
            openai_api_key,
            model,
            web_dir,
        }
    }

    /// Whether the chat endpoint has a credential to work with.
    pub fn chat_configured(&self) -> bool {
        self.openai_api_key.is_some()
    }
}

/// Parse the listen port, falling back to the default on bad input.
fn parse_port(raw: Option<&str>) -> u16 {
    match raw {
        None => DEFAULT_PORT,
        Some(value) => match value.trim().parse::<u16>() {
            Ok(port) => port,
            Err(_) => {
                tracing::warn!(value, "invalid PORT, using {DEFAULT_PORT}");
                DEFAULT_PORT
            }
        },
    }
}

/// Split a comma-separated origin list, dropping empty segments.
fn split_origins(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_port_default_when_missing() {
        assert_eq!(parse_port(None), DEFAULT_PORT);
    }

    #[test]
    fn test_parse_port_valid_value() {
        assert_eq!(parse_port(Some("8080")), 8080);
        assert_eq!(parse_port(Some(" 8081 ")), 8081);
    }

    #[test]
    fn test_parse_port_invalid_falls_back() {
        assert_eq!(parse_port(Some("not-a-port")), DEFAULT_PORT);
        assert_eq!(parse_port(Some("99999")), DEFAULT_PORT);
        assert_eq!(parse_port(Some("")), DEFAULT_PORT);
    }

    #[test]
    fn test_split_origins_handles_whitespace_and_empties() {
        let origins = split_origins(Some("https://a.example, ,https://b.example,,"));
        assert_eq!(origins, ["https://a.example", "https://b.example"]);
    }

    #[test]
    fn test_split_origins_missing_is_empty() {
        assert!(split_origins(None).is_empty());
    }
}
