//! Fixed JSON endpoints: health, capabilities, updates.
//!
//! The capability and update lists are served verbatim -- no filtering,
//! pagination, or mutation.

use axum::Json;
use chrono::Utc;
use serde_json::{Value, json};

use worksg_types::content::{Capability, Update};

/// GET /api/health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "workflow-sg",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// GET /api/capabilities
pub async fn capabilities() -> Json<Vec<Capability>> {
    Json(capability_list())
}

/// GET /api/updates
pub async fn updates() -> Json<Vec<Update>> {
    Json(update_list())
}

fn capability_list() -> Vec<Capability> {
    vec![
        Capability {
            id: "pipeline-designer".to_string(),
            title: "Pipeline Designer".to_string(),
            description: "Drag-and-drop tasks, set dependencies, and export reusable automation templates.".to_string(),
        },
        Capability {
            id: "compliance-guard".to_string(),
            title: "Compliance Guard".to_string(),
            description: "Continuously validate workflows against SG regulatory baselines with automated alerts.".to_string(),
        },
        Capability {
            id: "analytics-pulse".to_string(),
            title: "Analytics Pulse".to_string(),
            description: "Track latency, throughput, and team adoption using out-of-the-box dashboards.".to_string(),
        },
    ]
}

fn update_list() -> Vec<Update> {
    vec![
        Update {
            title: "Workflow SG v1.3".to_string(),
            date: "2025-09-12".to_string(),
            summary: "Added API throttling controls and Slack incident responder integration.".to_string(),
        },
        Update {
            title: "Data Lake Connector".to_string(),
            date: "2025-08-28".to_string(),
            summary: "Seamlessly sync workflow events with Snowflake and BigQuery.".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_shape() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "workflow-sg");
        assert!(body["timestamp"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_capability_list_is_fixed() {
        let list = capability_list();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].id, "pipeline-designer");
    }

    #[test]
    fn test_update_list_is_fixed() {
        let list = update_list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].title, "Workflow SG v1.3");
    }
}
