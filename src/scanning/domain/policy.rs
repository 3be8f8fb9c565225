use serde_json::Value;
use uuid::Uuid;

const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// Strips `refs/heads/` from a git ref, leaving other refs untouched
pub fn branch_name_from_ref(ref_name: &str) -> &str {
    ref_name.strip_prefix(BRANCH_REF_PREFIX).unwrap_or(ref_name)
}

/// One repository/ref pair a policy applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyScope {
    pub repository_id: Option<Uuid>,
    pub ref_name: Option<String>,
}

/// Branch policy configuration as returned by the policy API
///
/// `settings` keeps the raw JSON because every policy type carries its own
/// settings shape.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyConfiguration {
    id: i64,
    is_enabled: bool,
    type_display_name: String,
    scopes: Vec<PolicyScope>,
    settings: Value,
}

impl PolicyConfiguration {
    pub fn new(
        id: i64,
        is_enabled: bool,
        type_display_name: impl Into<String>,
        scopes: Vec<PolicyScope>,
        settings: Value,
    ) -> Self {
        Self {
            id,
            is_enabled,
            type_display_name: type_display_name.into(),
            scopes,
            settings,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    pub fn type_display_name(&self) -> &str {
        &self.type_display_name
    }

    pub fn scopes(&self) -> &[PolicyScope] {
        &self.scopes
    }

    pub fn settings(&self) -> &Value {
        &self.settings
    }

    /// Reads a boolean setting; Azure DevOps stores these as JSON booleans
    pub fn bool_setting(&self, key: &str) -> bool {
        match self.settings.get(key) {
            Some(Value::Bool(value)) => *value,
            Some(Value::String(value)) => value.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    /// Renders a setting as display text; strings are unquoted, missing keys are empty
    pub fn setting_text(&self, key: &str) -> String {
        match self.settings.get(key) {
            Some(Value::String(value)) => value.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn policy_with_settings(settings: Value) -> PolicyConfiguration {
        PolicyConfiguration::new(1, true, "Minimum number of reviewers", vec![], settings)
    }

    #[test]
    fn test_branch_name_from_ref() {
        assert_eq!(branch_name_from_ref("refs/heads/main"), "main");
        assert_eq!(branch_name_from_ref("refs/heads/release/1.0"), "release/1.0");
        assert_eq!(branch_name_from_ref("main"), "main");
        assert_eq!(branch_name_from_ref("refs/tags/v1"), "refs/tags/v1");
    }

    #[test]
    fn test_bool_setting() {
        let policy = policy_with_settings(json!({
            "creatorVoteCounts": true,
            "useSquashMerge": "True",
            "allowDownvotes": false
        }));
        assert!(policy.bool_setting("creatorVoteCounts"));
        assert!(policy.bool_setting("useSquashMerge"));
        assert!(!policy.bool_setting("allowDownvotes"));
        assert!(!policy.bool_setting("missing"));
    }

    #[test]
    fn test_setting_text() {
        let policy = policy_with_settings(json!({
            "minimumApproverCount": 2,
            "displayName": "CI",
            "empty": null
        }));
        assert_eq!(policy.setting_text("minimumApproverCount"), "2");
        assert_eq!(policy.setting_text("displayName"), "CI");
        assert_eq!(policy.setting_text("empty"), "");
        assert_eq!(policy.setting_text("missing"), "");
    }
}
