//! Protocol version classification.
//!
//! The assistant platform speaks two wire dialects. The version is resolved
//! once per turn and every other component branches on the resulting
//! [`Dialect`] instead of re-deriving it.

use serde::Serialize;
use serde_json::Value;

/// Header carrying the numeric Actions API version (e.g. `2`).
pub const ACTIONS_API_VERSION_HEADER: &str = "Google-Actions-API-Version";

/// Header carrying the legacy assistant API version label (e.g. `v1`).
pub const ASSISTANT_API_VERSION_HEADER: &str = "Google-Assistant-API-Version";

/// Header carrying the deployed agent's version label.
pub const AGENT_VERSION_LABEL_HEADER: &str = "Agent-Version-Label";

/// First major version that uses the current dialect.
const CURRENT_DIALECT_MAJOR: u32 = 2;

/// Wire-format dialect in effect for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Older snake_case dialect (API v1).
    Legacy,
    /// Newer camelCase dialect (API v2 and later).
    Current,
}

impl Dialect {
    /// True for the current dialect.
    pub fn is_current(&self) -> bool {
        matches!(self, Dialect::Current)
    }
}

/// Resolved protocol version for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiVersion {
    label: String,
    major: u32,
}

impl ApiVersion {
    /// Version with a bare numeric label.
    pub fn new(major: u32) -> Self {
        Self {
            label: major.to_string(),
            major,
        }
    }

    /// Parses a version label such as `"2"`, `"v1"` or `"2.0"`.
    ///
    /// Returns `None` when the label carries no leading major number.
    pub fn parse(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        let digits: String = trimmed
            .trim_start_matches(['v', 'V'])
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        let major = digits.parse().ok()?;
        Some(Self {
            label: trimmed.to_string(),
            major,
        })
    }

    /// The label as it was declared.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The major version number.
    pub fn major(&self) -> u32 {
        self.major
    }

    /// Dialect implied by the major version.
    pub fn dialect(&self) -> Dialect {
        if self.major >= CURRENT_DIALECT_MAJOR {
            Dialect::Current
        } else {
            Dialect::Legacy
        }
    }
}

/// Resolves the API version for a turn.
///
/// Sources are consulted in order: the numeric Actions API header, the
/// legacy assistant API header, the version declared in the body, and
/// finally `default_version`.
pub fn classify<'h>(
    header: impl Fn(&str) -> Option<&'h str>,
    body: &Value,
    default_version: &ApiVersion,
) -> ApiVersion {
    let declared = header(ACTIONS_API_VERSION_HEADER)
        .or_else(|| header(ASSISTANT_API_VERSION_HEADER))
        .and_then(ApiVersion::parse)
        .or_else(|| body_declared_version(body));

    let version = declared.unwrap_or_else(|| default_version.clone());
    tracing::debug!(
        version = version.label(),
        dialect = ?version.dialect(),
        "Classified request protocol version"
    );
    version
}

fn body_declared_version(body: &Value) -> Option<ApiVersion> {
    let declared = body.get("apiVersion").or_else(|| body.get("api_version"))?;
    match declared {
        Value::String(s) => ApiVersion::parse(s),
        Value::Number(n) => n.as_u64().and_then(|n| ApiVersion::parse(&n.to_string())),
        _ => None,
    }
}
