//! Permission request types.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ConversationError;

/// Type discriminator for permission specs in the current dialect.
pub const PERMISSION_VALUE_SPEC_TYPE: &str =
    "type.googleapis.com/google.actions.v2.PermissionValueSpec";

/// User information the platform can ask permission for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    /// The user's name.
    Name,
    /// Precise device location (coordinates, address).
    DevicePreciseLocation,
    /// Coarse device location (zip code, city).
    DeviceCoarseLocation,
}

/// What to ask permission for, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSpec {
    /// Reason spoken to the user before the platform's consent prompt.
    pub opt_context: String,
    pub permissions: Vec<Permission>,
}

impl PermissionSpec {
    /// Validates and builds a permission spec.
    ///
    /// The context must be non-blank and at least one permission must be
    /// requested. Duplicates are collapsed, keeping first occurrence.
    pub fn new(
        context: impl Into<String>,
        permissions: impl IntoIterator<Item = Permission>,
    ) -> Result<Self, ConversationError> {
        let opt_context = context.into();
        if opt_context.trim().is_empty() {
            return Err(ConversationError::InvalidPermissionContext);
        }

        let mut unique = Vec::new();
        for permission in permissions {
            if !unique.contains(&permission) {
                unique.push(permission);
            }
        }
        if unique.is_empty() {
            return Err(ConversationError::invalid_permissions(
                "at least one permission is required",
            ));
        }

        Ok(Self {
            opt_context,
            permissions: unique,
        })
    }
}
