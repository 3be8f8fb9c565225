//! Scanning domain: work items, repositories and the rules that judge them
pub mod domain;
pub mod policies;
pub mod services;
