//! Fixed marketing content records served by the static JSON endpoints.

use serde::{Deserialize, Serialize};

/// A product capability card shown on the landing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capability {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// An entry in the product update feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub title: String,
    pub date: String,
    pub summary: String,
}
