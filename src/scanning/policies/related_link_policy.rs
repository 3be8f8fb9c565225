use crate::scanning::domain::RelationKind;
use std::collections::HashSet;

/// How far the connectivity search follows "related" links
///
/// Hierarchy links are always followed without limit. Related links are a
/// cost control knob:
/// 1. `OneHop` (default): a work item reached only through a related link
///    counts when it carries its own artifact link, but its links are not
///    followed further
/// 2. `Ignore`: related links are not followed at all
/// 3. `Transitive`: related links are followed like hierarchy links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelatedLinkPolicy {
    #[default]
    OneHop,
    Ignore,
    Transitive,
}

/// Expansion rights granted to a work item during the connectivity search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    /// The work item's own links may be followed
    Full,
    /// Only the work item's own artifact links count
    DirectOnly,
}

impl RelatedLinkPolicy {
    /// Whether a relation of this kind leads to a work item worth visiting
    pub fn follows(&self, kind: &RelationKind) -> bool {
        match kind {
            RelationKind::HierarchyForward => true,
            RelationKind::Related => !matches!(self, RelatedLinkPolicy::Ignore),
            _ => false,
        }
    }

    /// Expansion rights for a target, given every relation kind it was reached through
    ///
    /// A hierarchy link anywhere in the set wins over related links.
    pub fn expansion_for(&self, kinds: &HashSet<RelationKind>) -> Expansion {
        if kinds.contains(&RelationKind::HierarchyForward) {
            return Expansion::Full;
        }
        match self {
            RelatedLinkPolicy::Transitive => Expansion::Full,
            RelatedLinkPolicy::OneHop | RelatedLinkPolicy::Ignore => Expansion::DirectOnly,
        }
    }
}

impl std::str::FromStr for RelatedLinkPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "one-hop" | "onehop" | "one_hop" => Ok(RelatedLinkPolicy::OneHop),
            "ignore" | "none" => Ok(RelatedLinkPolicy::Ignore),
            "transitive" | "full" => Ok(RelatedLinkPolicy::Transitive),
            _ => Err(format!(
                "Invalid related link policy: {}. Please specify 'one-hop', 'ignore' or 'transitive'",
                s
            )),
        }
    }
}

impl std::fmt::Display for RelatedLinkPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelatedLinkPolicy::OneHop => write!(f, "one-hop"),
            RelatedLinkPolicy::Ignore => write!(f, "ignore"),
            RelatedLinkPolicy::Transitive => write!(f, "transitive"),
        }
    }
}
