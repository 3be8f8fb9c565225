//! Read models for the reports
//!
//! These structs hold report rows in their final presentation order, so
//! formatters only have to lay them out.

pub mod feature_report;
pub mod repo_branch_report;

pub use feature_report::FeatureReport;
pub use repo_branch_report::RepoBranchReport;
