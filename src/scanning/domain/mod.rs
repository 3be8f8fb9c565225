pub mod feature_status;
pub mod policy;
pub mod repo_branch_status;
pub mod source_control;
pub mod work_item;

pub use feature_status::FeatureStatus;
pub use policy::{branch_name_from_ref, PolicyConfiguration, PolicyScope};
pub use repo_branch_status::RepoBranchStatus;
pub use source_control::{Branch, Project, Repository};
pub use work_item::{RelationKind, WorkItem, WorkItemFields, WorkItemId, WorkItemRelation};
