//! Assistant tools: current time, weather lookup, and local file reads.
//!
//! Tool schemas and execution for the functions the assistant may call
//! during a run. Weather comes from the public wttr.in JSON API; time
//! formatting supports UTC directly and answers other timezones with an
//! ISO fallback so a bad timezone never fails the run. File reads are
//! sandboxed to a fixed set of project directories with a byte cap.

use std::path::{Component, Path, PathBuf};

use chrono::Utc;
use serde_json::{Value, json};

use worksg_types::error::AgentError;

use super::types::{FunctionDefinition, ToolDefinition};

const WEATHER_ENDPOINT: &str = "https://wttr.in";

/// Project directories the file tool may read from.
const ALLOWED_DIRECTORIES: [&str; 3] = ["assets", "docs", "public"];

/// Default and maximum byte caps for a single file read.
const DEFAULT_READ_BYTES: u64 = 4_096;
const MAX_READ_BYTES: u64 = 32_768;

/// Definitions of all tools offered to the model.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            kind: "function".to_string(),
            function: FunctionDefinition {
                name: "time_now".to_string(),
                description:
                    "Return the current date and time. Optionally accepts an IANA timezone."
                        .to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "timezone": {
                            "type": "string",
                            "description": "IANA timezone identifier such as \"Asia/Singapore\"."
                        }
                    },
                    "additionalProperties": false
                }),
            },
        },
        ToolDefinition {
            kind: "function".to_string(),
            function: FunctionDefinition {
                name: "get_weather".to_string(),
                description: "Fetch the current weather for a city or location using the public wttr.in service."
                    .to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "location": {
                            "type": "string",
                            "description": "Location name, e.g. \"Singapore\" or \"94105\"."
                        },
                        "units": {
                            "type": "string",
                            "enum": ["metric", "imperial"],
                            "description": "Measurement units, default metric."
                        }
                    },
                    "required": ["location"],
                    "additionalProperties": false
                }),
            },
        },
        ToolDefinition {
            kind: "function".to_string(),
            function: FunctionDefinition {
                name: "read_local_file".to_string(),
                description:
                    "Read local project files (assets, docs, public) to answer user questions."
                        .to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "path": {
                            "type": "string",
                            "description": "Relative path to the file to load."
                        },
                        "max_bytes": {
                            "type": "integer",
                            "minimum": 1,
                            "maximum": MAX_READ_BYTES,
                            "description": "Maximum number of bytes to read for large files."
                        }
                    },
                    "required": ["path"],
                    "additionalProperties": false
                }),
            },
        },
    ]
}

/// Execute a tool call by name with raw JSON arguments.
pub async fn execute(
    client: &reqwest::Client,
    name: &str,
    arguments: &str,
) -> Result<String, AgentError> {
    let args: Value = serde_json::from_str(arguments).unwrap_or(Value::Null);

    match name {
        "time_now" => Ok(time_now(args.get("timezone").and_then(Value::as_str))),
        "get_weather" => get_weather(client, &args).await,
        "read_local_file" => {
            let base = std::env::current_dir().map_err(|e| AgentError::Tool {
                name: "read_local_file".to_string(),
                message: format!("failed to resolve working directory: {e}"),
            })?;
            read_local_file(&base, &args).await
        }
        other => Err(AgentError::Tool {
            name: other.to_string(),
            message: "unknown tool".to_string(),
        }),
    }
}

/// Current date/time. UTC is formatted directly; any other timezone gets
/// the ISO fallback answer so the model can still respond.
fn time_now(timezone: Option<&str>) -> String {
    let now = Utc::now();
    match timezone {
        None | Some("UTC") | Some("Etc/UTC") => {
            now.format("%B %d, %Y, %H:%M:%S UTC").to_string()
        }
        Some(tz) => format!(
            "Unable to format using timezone \"{tz}\". Current UTC time: {}",
            now.to_rfc3339()
        ),
    }
}

/// Fetch current conditions from wttr.in and summarize them.
async fn get_weather(client: &reqwest::Client, args: &Value) -> Result<String, AgentError> {
    let location = args
        .get("location")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .ok_or_else(|| AgentError::Tool {
            name: "get_weather".to_string(),
            message: "missing location argument".to_string(),
        })?;

    let units = match args.get("units").and_then(Value::as_str) {
        Some("imperial") => Units::Imperial,
        _ => Units::Metric,
    };

    // wttr.in accepts '+' for spaces in the location path segment.
    let url = format!(
        "{WEATHER_ENDPOINT}/{}?format=j1",
        location.replace(' ', "+")
    );

    let response = client.get(&url).send().await.map_err(|e| AgentError::Tool {
        name: "get_weather".to_string(),
        message: format!("weather request failed: {e}"),
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(AgentError::Tool {
            name: "get_weather".to_string(),
            message: format!("weather service responded with status {status}"),
        });
    }

    let payload: Value = response.json().await.map_err(|e| AgentError::Tool {
        name: "get_weather".to_string(),
        message: format!("failed to parse weather response: {e}"),
    })?;

    if payload.get("data").and_then(Value::as_str) == Some("Unknown location") {
        return Ok(format!(
            "Weather data for \"{location}\" is not available right now."
        ));
    }

    Ok(weather_summary(&payload, units))
}

/// Read a project file (or list a directory) under the allowed roots,
/// relative to `base`. Large files are cut at the byte cap with a
/// truncation marker appended.
async fn read_local_file(base: &Path, args: &Value) -> Result<String, AgentError> {
    let tool_err = |message: String| AgentError::Tool {
        name: "read_local_file".to_string(),
        message,
    };

    let requested = args
        .get("path")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| tool_err("missing path argument".to_string()))?;

    let max_bytes = args
        .get("max_bytes")
        .and_then(Value::as_u64)
        .unwrap_or(DEFAULT_READ_BYTES)
        .clamp(1, MAX_READ_BYTES) as usize;

    let relative = resolve_safe_path(requested).map_err(tool_err)?;
    let target = base.join(&relative);

    let metadata = tokio::fs::metadata(&target)
        .await
        .map_err(|e| tool_err(format!("failed to read \"{requested}\": {e}")))?;

    if metadata.is_dir() {
        let mut entries = tokio::fs::read_dir(&target)
            .await
            .map_err(|e| tool_err(format!("failed to list \"{requested}\": {e}")))?;
        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| tool_err(format!("failed to list \"{requested}\": {e}")))?
        {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        return Ok(format!(
            "Directory listing for {requested}:\n{}",
            names.join("\n")
        ));
    }

    let bytes = tokio::fs::read(&target)
        .await
        .map_err(|e| tool_err(format!("failed to read \"{requested}\": {e}")))?;

    let truncated = bytes.len() > max_bytes;
    let content = String::from_utf8_lossy(&bytes[..bytes.len().min(max_bytes)]);
    let suffix = if truncated { "\n...\n[content truncated]" } else { "" };

    Ok(format!(
        "File: {}\n---\n{content}{suffix}",
        relative.display()
    ))
}

/// Normalize a requested path and confirm it stays inside the allowed
/// roots. Absolute paths and any parent-directory traversal are rejected.
fn resolve_safe_path(requested: &str) -> Result<PathBuf, String> {
    let trimmed = requested.trim_start_matches(['/', '\\']);
    let path = Path::new(trimmed);

    if path.is_absolute() {
        return Err("Only relative paths within the project are allowed.".to_string());
    }

    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            _ => {
                return Err("Only relative paths within the project are allowed.".to_string());
            }
        }
    }

    let within_allowed_root = ALLOWED_DIRECTORIES
        .iter()
        .any(|root| normalized == Path::new(root) || normalized.starts_with(root));

    if !within_allowed_root {
        return Err(format!(
            "Access to \"{requested}\" is not permitted. Allowed roots: {}",
            ALLOWED_DIRECTORIES.join(", ")
        ));
    }

    Ok(normalized)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Units {
    Metric,
    Imperial,
}

/// Build a one-line summary from a wttr.in `format=j1` payload.
fn weather_summary(raw: &Value, units: Units) -> String {
    let Some(current) = raw
        .get("current_condition")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
    else {
        return "No weather data was returned for that location.".to_string();
    };

    let field = |key: &str| current.get(key).and_then(Value::as_str);

    let (temp, feels_like) = match units {
        Units::Imperial => (field("temp_F"), field("FeelsLikeF")),
        Units::Metric => (field("temp_C"), field("FeelsLikeC")),
    };
    let unit_suffix = match units {
        Units::Imperial => "\u{b0}F",
        Units::Metric => "\u{b0}C",
    };

    let description = current
        .get("weatherDesc")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
        .and_then(|d| d.get("value"))
        .and_then(Value::as_str)
        .unwrap_or("Unknown conditions");

    let mut pieces = vec![description.to_string()];

    if let (Some(temp), Some(feels)) = (temp, feels_like) {
        pieces.push(format!(
            "Temperature {temp}{unit_suffix} (feels like {feels}{unit_suffix})"
        ));
    }

    if let Some(humidity) = field("humidity") {
        pieces.push(format!("{humidity}% humidity"));
    }

    let wind = match units {
        Units::Imperial => field("windspeedMiles").map(|w| format!("{w} mph winds")),
        Units::Metric => field("windspeedKmph").map(|w| format!("{w} km/h winds")),
    };
    if let Some(wind) = wind {
        pieces.push(wind);
    }

    pieces.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> Value {
        json!({
            "current_condition": [{
                "temp_C": "31",
                "temp_F": "88",
                "FeelsLikeC": "36",
                "FeelsLikeF": "97",
                "humidity": "70",
                "windspeedKmph": "12",
                "windspeedMiles": "7",
                "weatherDesc": [{"value": "Partly cloudy"}]
            }]
        })
    }

    #[test]
    fn test_weather_summary_metric() {
        let summary = weather_summary(&sample_payload(), Units::Metric);
        assert_eq!(
            summary,
            "Partly cloudy; Temperature 31\u{b0}C (feels like 36\u{b0}C); 70% humidity; 12 km/h winds"
        );
    }

    #[test]
    fn test_weather_summary_imperial() {
        let summary = weather_summary(&sample_payload(), Units::Imperial);
        assert!(summary.contains("88\u{b0}F"));
        assert!(summary.contains("7 mph winds"));
    }

    #[test]
    fn test_weather_summary_empty_payload() {
        let summary = weather_summary(&json!({}), Units::Metric);
        assert_eq!(summary, "No weather data was returned for that location.");
    }

    #[test]
    fn test_weather_summary_partial_fields() {
        let payload = json!({
            "current_condition": [{
                "weatherDesc": [{"value": "Sunny"}]
            }]
        });
        let summary = weather_summary(&payload, Units::Metric);
        assert_eq!(summary, "Sunny");
    }

    #[test]
    fn test_time_now_utc_formats() {
        let out = time_now(None);
        assert!(out.ends_with("UTC"));
    }

    #[test]
    fn test_time_now_unknown_timezone_falls_back() {
        let out = time_now(Some("Asia/Singapore"));
        assert!(out.starts_with("Unable to format using timezone \"Asia/Singapore\""));
    }

    #[tokio::test]
    async fn test_execute_unknown_tool_errors() {
        let client = reqwest::Client::new();
        let result = execute(&client, "no_such_tool", "{}").await;
        assert!(matches!(result, Err(AgentError::Tool { .. })));
    }

    #[tokio::test]
    async fn test_execute_weather_requires_location() {
        let client = reqwest::Client::new();
        let result = execute(&client, "get_weather", "{}").await;
        assert!(matches!(result, Err(AgentError::Tool { .. })));
    }

    #[test]
    fn test_resolve_safe_path_accepts_allowed_roots() {
        assert_eq!(
            resolve_safe_path("docs/guide.md").unwrap(),
            PathBuf::from("docs/guide.md")
        );
        // Leading slashes are stripped, matching how models tend to quote paths.
        assert_eq!(
            resolve_safe_path("/public/index.html").unwrap(),
            PathBuf::from("public/index.html")
        );
        assert_eq!(
            resolve_safe_path("./assets/logo.svg").unwrap(),
            PathBuf::from("assets/logo.svg")
        );
    }

    #[test]
    fn test_resolve_safe_path_rejects_traversal() {
        assert!(resolve_safe_path("docs/../secrets.txt").is_err());
        assert!(resolve_safe_path("../outside").is_err());
    }

    #[test]
    fn test_resolve_safe_path_rejects_unlisted_roots() {
        let err = resolve_safe_path("src/main.rs").unwrap_err();
        assert!(err.contains("not permitted"));
    }

    #[tokio::test]
    async fn test_read_local_file_reads_within_sandbox() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs/about.md"), "Workflow SG automates ops.").unwrap();

        let out = read_local_file(dir.path(), &json!({"path": "docs/about.md"}))
            .await
            .unwrap();
        assert!(out.starts_with("File: docs/about.md\n---\n"));
        assert!(out.ends_with("Workflow SG automates ops."));
    }

    #[tokio::test]
    async fn test_read_local_file_truncates_at_byte_cap() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs/big.txt"), "x".repeat(100)).unwrap();

        let out = read_local_file(dir.path(), &json!({"path": "docs/big.txt", "max_bytes": 10}))
            .await
            .unwrap();
        assert!(out.contains(&"x".repeat(10)));
        assert!(!out.contains(&"x".repeat(11)));
        assert!(out.ends_with("\n...\n[content truncated]"));
    }

    #[tokio::test]
    async fn test_read_local_file_lists_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("assets")).unwrap();
        std::fs::write(dir.path().join("assets/b.css"), "").unwrap();
        std::fs::write(dir.path().join("assets/a.js"), "").unwrap();

        let out = read_local_file(dir.path(), &json!({"path": "assets"}))
            .await
            .unwrap();
        assert_eq!(out, "Directory listing for assets:\na.js\nb.css");
    }

    #[tokio::test]
    async fn test_read_local_file_rejects_escape_attempts() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_local_file(dir.path(), &json!({"path": "docs/../../etc/passwd"})).await;
        assert!(matches!(result, Err(AgentError::Tool { .. })));
    }

    #[tokio::test]
    async fn test_read_local_file_requires_path() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_local_file(dir.path(), &json!({})).await;
        assert!(matches!(result, Err(AgentError::Tool { .. })));
    }

    #[tokio::test]
    async fn test_read_local_file_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        let result = read_local_file(dir.path(), &json!({"path": "docs/nope.md"})).await;
        assert!(matches!(result, Err(AgentError::Tool { .. })));
    }
}
