pub mod branch_activity;
pub mod connectivity_resolver;
pub mod policy_describer;
pub mod policy_index;
pub mod readme_inspector;

pub use connectivity_resolver::{ConnectivityMemo, ConnectivityResolver};
pub use policy_describer::PolicyDescriber;
pub use policy_index::PolicyIndex;
