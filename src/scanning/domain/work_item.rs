use std::fmt;

/// Relation name Azure DevOps uses for commit, pull request and branch links
pub const ARTIFACT_LINK: &str = "ArtifactLink";
/// Parent-to-child hierarchy link
pub const HIERARCHY_FORWARD: &str = "System.LinkTypes.Hierarchy-Forward";
/// Child-to-parent hierarchy link
pub const HIERARCHY_REVERSE: &str = "System.LinkTypes.Hierarchy-Reverse";
/// Symmetric "related" link
pub const RELATED: &str = "System.LinkTypes.Related";

/// NewType wrapper for a work item id
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkItemId(i64);

impl WorkItemId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for WorkItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for WorkItemId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Kind of a work item relation, derived from the `rel` attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// Link to a code artifact (commit, pull request, branch)
    ArtifactLink,
    /// Parent to child
    HierarchyForward,
    /// Child to parent
    HierarchyReverse,
    Related,
    /// Any other relation, kept verbatim
    Other(String),
}

impl RelationKind {
    pub fn from_rel(rel: &str) -> Self {
        match rel {
            ARTIFACT_LINK => RelationKind::ArtifactLink,
            HIERARCHY_FORWARD => RelationKind::HierarchyForward,
            HIERARCHY_REVERSE => RelationKind::HierarchyReverse,
            RELATED => RelationKind::Related,
            other => RelationKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RelationKind::ArtifactLink => ARTIFACT_LINK,
            RelationKind::HierarchyForward => HIERARCHY_FORWARD,
            RelationKind::HierarchyReverse => HIERARCHY_REVERSE,
            RelationKind::Related => RELATED,
            RelationKind::Other(rel) => rel,
        }
    }
}

/// A typed link from a work item to another resource
#[derive(Debug, Clone, PartialEq)]
pub struct WorkItemRelation {
    kind: RelationKind,
    url: String,
}

impl WorkItemRelation {
    pub fn new(kind: RelationKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
        }
    }

    pub fn kind(&self) -> &RelationKind {
        &self.kind
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Id of the linked work item, taken from the trailing path segment of
    /// `.../_apis/wit/workItems/{id}`. Artifact links never resolve to an id.
    pub fn target_id(&self) -> Option<WorkItemId> {
        if self.kind == RelationKind::ArtifactLink {
            return None;
        }
        self.url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse::<i64>().ok())
            .map(WorkItemId::new)
    }
}

/// Fields the scanner reads from a work item
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkItemFields {
    pub project: String,
    pub title: String,
    pub state: String,
    pub work_item_type: String,
}

/// Work item with its relations expanded
#[derive(Debug, Clone, PartialEq)]
pub struct WorkItem {
    id: WorkItemId,
    fields: WorkItemFields,
    relations: Vec<WorkItemRelation>,
}

impl WorkItem {
    pub fn new(id: WorkItemId, fields: WorkItemFields, relations: Vec<WorkItemRelation>) -> Self {
        Self {
            id,
            fields,
            relations,
        }
    }

    pub fn id(&self) -> WorkItemId {
        self.id
    }

    pub fn fields(&self) -> &WorkItemFields {
        &self.fields
    }

    pub fn relations(&self) -> &[WorkItemRelation] {
        &self.relations
    }

    /// True when the work item links straight to a commit or pull request
    pub fn has_artifact_link(&self) -> bool {
        self.relations
            .iter()
            .any(|relation| relation.kind() == &RelationKind::ArtifactLink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_kind_from_rel() {
        assert_eq!(RelationKind::from_rel("ArtifactLink"), RelationKind::ArtifactLink);
        assert_eq!(
            RelationKind::from_rel("System.LinkTypes.Hierarchy-Forward"),
            RelationKind::HierarchyForward
        );
        assert_eq!(
            RelationKind::from_rel("System.LinkTypes.Hierarchy-Reverse"),
            RelationKind::HierarchyReverse
        );
        assert_eq!(
            RelationKind::from_rel("System.LinkTypes.Related"),
            RelationKind::Related
        );
        assert_eq!(
            RelationKind::from_rel("AttachedFile"),
            RelationKind::Other("AttachedFile".to_string())
        );
    }

    #[test]
    fn test_relation_kind_as_str_keeps_unknown_rel() {
        let kind = RelationKind::from_rel("Microsoft.VSTS.Common.TestedBy-Forward");
        assert_eq!(kind.as_str(), "Microsoft.VSTS.Common.TestedBy-Forward");
    }

    #[test]
    fn test_target_id_from_work_item_url() {
        let relation = WorkItemRelation::new(
            RelationKind::HierarchyForward,
            "https://dev.azure.com/contoso/_apis/wit/workItems/101",
        );
        assert_eq!(relation.target_id(), Some(WorkItemId::new(101)));
    }

    #[test]
    fn test_target_id_ignores_trailing_slash() {
        let relation = WorkItemRelation::new(
            RelationKind::Related,
            "https://dev.azure.com/contoso/_apis/wit/workItems/7/",
        );
        assert_eq!(relation.target_id(), Some(WorkItemId::new(7)));
    }

    #[test]
    fn test_target_id_none_for_artifact_link() {
        let relation = WorkItemRelation::new(
            RelationKind::ArtifactLink,
            "vstfs:///Git/Commit/a%2Fb%2Fc",
        );
        assert_eq!(relation.target_id(), None);
    }

    #[test]
    fn test_target_id_none_for_non_numeric_segment() {
        let relation = WorkItemRelation::new(
            RelationKind::Other("Hyperlink".to_string()),
            "https://example.com/docs",
        );
        assert_eq!(relation.target_id(), None);
    }

    #[test]
    fn test_has_artifact_link() {
        let item = WorkItem::new(
            WorkItemId::new(1),
            WorkItemFields::default(),
            vec![
                WorkItemRelation::new(RelationKind::Related, "https://x/_apis/wit/workItems/2"),
                WorkItemRelation::new(RelationKind::ArtifactLink, "vstfs:///Git/PullRequestId/1"),
            ],
        );
        assert!(item.has_artifact_link());

        let bare = WorkItem::new(WorkItemId::new(3), WorkItemFields::default(), vec![]);
        assert!(!bare.has_artifact_link());
    }

    #[test]
    fn test_work_item_id_display_and_ordering() {
        assert_eq!(WorkItemId::new(42).to_string(), "42");
        assert!(WorkItemId::new(1) < WorkItemId::new(2));
        assert_eq!(WorkItemId::from(5).value(), 5);
    }
}
