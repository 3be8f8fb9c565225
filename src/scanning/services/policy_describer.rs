use crate::scanning::domain::PolicyConfiguration;
use std::collections::HashMap;

type Describe = fn(&PolicyConfiguration) -> String;

fn minimum_reviewers(policy: &PolicyConfiguration) -> String {
    let suffix = if policy.bool_setting("creatorVoteCounts") {
        "(creatorVoteCounts)"
    } else {
        ""
    };
    format!(
        "{}: {} {}",
        policy.type_display_name(),
        policy.setting_text("minimumApproverCount"),
        suffix
    )
}

fn merge_strategy(policy: &PolicyConfiguration) -> String {
    let strategy = if policy.bool_setting("useSquashMerge") {
        "Squash"
    } else {
        "Non-Squash"
    };
    format!("{}: {}", policy.type_display_name(), strategy)
}

fn build(_: &PolicyConfiguration) -> String {
    "Require a successful build before updating protected refs".to_string()
}

fn status(_: &PolicyConfiguration) -> String {
    "Require a successful status to be posted before updating protected refs".to_string()
}

fn comment_requirements(_: &PolicyConfiguration) -> String {
    "Check if the pull request has any active comments".to_string()
}

/// Turns policy configurations into human readable descriptions
///
/// Known policy types are looked up by display name; anything else is
/// described by its display name alone.
pub struct PolicyDescriber {
    describers: HashMap<&'static str, Describe>,
}

impl PolicyDescriber {
    pub fn new() -> Self {
        let mut describers: HashMap<&'static str, Describe> = HashMap::new();
        describers.insert("Minimum number of reviewers", minimum_reviewers);
        describers.insert("Require a merge strategy", merge_strategy);
        describers.insert("Build", build);
        describers.insert("Status", status);
        describers.insert("Comment requirements", comment_requirements);
        Self { describers }
    }

    pub fn describe(&self, policy: &PolicyConfiguration) -> String {
        match self.describers.get(policy.type_display_name()) {
            Some(describe) => describe(policy),
            None => policy.type_display_name().to_string(),
        }
    }

    /// Describes each policy, alphabetized by policy type name
    ///
    /// Identical descriptions are kept once.
    pub fn describe_all(&self, policies: &[PolicyConfiguration]) -> Vec<String> {
        let mut described: Vec<(&str, String)> = policies
            .iter()
            .map(|p| (p.type_display_name(), self.describe(p)))
            .collect();
        described.sort();

        let mut descriptions: Vec<String> = Vec::with_capacity(described.len());
        for (_, description) in described {
            if !descriptions.contains(&description) {
                descriptions.push(description);
            }
        }
        descriptions
    }
}

impl Default for PolicyDescriber {
    fn default() -> Self {
        Self::new()
    }
}
