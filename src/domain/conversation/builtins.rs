//! Platform built-in intent and argument names.

use super::Dialect;

/// Intents defined by the platform itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardIntent {
    /// Conversation invocation.
    Main,
    /// Free-form text continuation.
    Text,
    /// Result of a permission request.
    Permission,
}

impl StandardIntent {
    /// Wire name of the intent in the given dialect.
    pub fn name(&self, dialect: Dialect) -> &'static str {
        match (self, dialect) {
            (StandardIntent::Main, Dialect::Legacy) => "assistant.intent.action.MAIN",
            (StandardIntent::Text, Dialect::Legacy) => "assistant.intent.action.TEXT",
            (StandardIntent::Permission, Dialect::Legacy) => "assistant.intent.action.PERMISSION",
            (StandardIntent::Main, Dialect::Current) => "actions.intent.MAIN",
            (StandardIntent::Text, Dialect::Current) => "actions.intent.TEXT",
            (StandardIntent::Permission, Dialect::Current) => "actions.intent.PERMISSION",
        }
    }

    /// Recognizes a wire intent name in either dialect.
    pub fn from_name(name: &str) -> Option<Self> {
        [
            StandardIntent::Main,
            StandardIntent::Text,
            StandardIntent::Permission,
        ]
        .into_iter()
        .find(|intent| {
            intent.name(Dialect::Legacy) == name || intent.name(Dialect::Current) == name
        })
    }
}

/// Name of the argument carrying the permission-granted flag.
pub fn permission_granted_argument(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::Legacy => "permission_granted",
        Dialect::Current => "PERMISSION",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_differ_per_dialect() {
        assert_eq!(StandardIntent::Text.name(Dialect::Legacy), "assistant.intent.action.TEXT");
        assert_eq!(StandardIntent::Text.name(Dialect::Current), "actions.intent.TEXT");
    }

    #[test]
    fn from_name_recognizes_both_dialects() {
        assert_eq!(
            StandardIntent::from_name("actions.intent.MAIN"),
            Some(StandardIntent::Main)
        );
        assert_eq!(
            StandardIntent::from_name("assistant.intent.action.PERMISSION"),
            Some(StandardIntent::Permission)
        );
        assert_eq!(StandardIntent::from_name("custom.intent"), None);
    }

    #[test]
    fn permission_argument_per_dialect() {
        assert_eq!(permission_granted_argument(Dialect::Legacy), "permission_granted");
        assert_eq!(permission_granted_argument(Dialect::Current), "PERMISSION");
    }
}
