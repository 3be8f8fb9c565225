/// Use cases module containing application business logic orchestration
mod scan_features;
mod scan_repositories;

pub use scan_features::ScanFeaturesUseCase;
pub use scan_repositories::ScanRepositoriesUseCase;
