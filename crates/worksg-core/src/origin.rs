//! Cross-origin allow-list policy.
//!
//! Built once at startup from a fixed default set plus any extra origins
//! from configuration, then shared read-only with the HTTP layer. Decision
//! rules, in order:
//! 1. absent origin (same-origin or non-browser request) -> allowed;
//! 2. case-insensitive exact match against the set -> allowed;
//! 3. host ends with `.workflow.sg` -> allowed (covers all subdomains);
//! 4. otherwise -> denied.
//!
//! The boundary layer turns a denial into `403 {"error":"Origin not
//! allowed"}` before any route handler runs.

use std::collections::HashSet;

/// Host suffix admitted without enumeration in the allow-list.
const ALLOWED_HOST_SUFFIX: &str = ".workflow.sg";

/// Origins always present regardless of configuration. Production hosts
/// are also covered by the suffix rule; the localhost entries support
/// local development against a separately served front end.
const DEFAULT_ORIGINS: [&str; 4] = [
    "https://workflow.sg",
    "https://www.workflow.sg",
    "http://localhost:3000",
    "http://127.0.0.1:3000",
];

/// Immutable allow/deny policy for request origins.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    allowed: HashSet<String>,
}

impl OriginPolicy {
    /// Build the policy from the default set plus `extra` origins
    /// (typically the parsed `ALLOWED_ORIGINS` environment list).
    /// All entries are normalized to lowercase; empty entries are ignored.
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut allowed: HashSet<String> = DEFAULT_ORIGINS
            .iter()
            .map(|o| o.to_ascii_lowercase())
            .collect();

        for origin in extra {
            let origin = origin.as_ref().trim();
            if !origin.is_empty() {
                allowed.insert(origin.to_ascii_lowercase());
            }
        }

        Self { allowed }
    }

    /// Decide whether a request with the given declared origin may receive
    /// a cross-origin response.
    pub fn is_allowed(&self, origin: Option<&str>) -> bool {
        let Some(origin) = origin else {
            return true;
        };

        let origin = origin.trim().to_ascii_lowercase();
        if self.allowed.contains(&origin) {
            return true;
        }

        host_of(&origin).is_some_and(|host| host.ends_with(ALLOWED_HOST_SUFFIX))
    }
}

impl Default for OriginPolicy {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}

/// Extract the host portion of an origin (`scheme://host[:port]`).
/// Returns `None` when the value does not look like an origin.
fn host_of(origin: &str) -> Option<&str> {
    let rest = origin.split_once("://")?.1;
    // An origin carries no path or userinfo; anything after the host is
    // at most a port.
    if rest.is_empty() || rest.contains('/') || rest.contains('@') {
        return None;
    }
    Some(rest.split(':').next().unwrap_or(rest))
}
