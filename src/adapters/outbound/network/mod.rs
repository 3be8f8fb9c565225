/// Network adapters for the Azure DevOps REST API
mod azure_devops_client;
mod caching_work_item_repository;

pub use azure_devops_client::{AzureDevOpsClient, ClientSettings};
pub use caching_work_item_repository::CachingWorkItemRepository;
