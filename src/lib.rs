//! ado-scanner - Azure DevOps repository health and feature traceability reports
//!
//! This library scans an Azure DevOps organization and answers two questions:
//! which Features are traceable to code (a commit, pull request or branch
//! linked somewhere in their work item hierarchy), and which base branches
//! are protected, documented and still active. It follows hexagonal
//! architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`scanning`): Work items, policies and the connectivity search
//! - **Application Layer** (`application`): Use cases, requests and report read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Azure DevOps REST client, formatters, console and files
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use ado_scanner::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! // Create adapters
//! let client = AzureDevOpsClient::new(ClientSettings::new(
//!     "https://dev.azure.com/contoso",
//!     "my-personal-access-token",
//! ))?;
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = ScanFeaturesUseCase::new(CachingWorkItemRepository::new(client), progress_reporter);
//!
//! // Execute
//! let report = use_case.execute(FeatureScanRequest::default()).await?;
//!
//! // Format output
//! let formatter = CsvFormatter::new();
//! println!("{}", formatter.format_features(&report)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod ports;
pub mod scanning;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
    pub use crate::adapters::outbound::formatters::{CsvFormatter, TableFormatter};
    pub use crate::adapters::outbound::network::{
        AzureDevOpsClient, CachingWorkItemRepository, ClientSettings,
    };
    pub use crate::application::dto::{
        FeatureScanRequest, OutputFormat, ReportKind, RepositoryScanRequest,
    };
    pub use crate::application::read_models::{FeatureReport, RepoBranchReport};
    pub use crate::application::use_cases::{ScanFeaturesUseCase, ScanRepositoriesUseCase};
    pub use crate::ports::outbound::{
        OutputPresenter, ProgressReporter, ReportFormatter, SourceControlRepository,
        WorkItemRepository,
    };
    pub use crate::scanning::domain::{
        Branch, FeatureStatus, PolicyConfiguration, Project, RepoBranchStatus, Repository,
        WorkItem, WorkItemId,
    };
    pub use crate::scanning::policies::RelatedLinkPolicy;
    pub use crate::scanning::services::{
        ConnectivityMemo, ConnectivityResolver, PolicyDescriber, PolicyIndex,
    };
    pub use crate::shared::Result;
}
