mod formatter_factory;
mod presenter_factory;

pub use formatter_factory::FormatterFactory;
pub use presenter_factory::{
    PresenterFactory, PresenterType, FEATURE_REPORT_FILE, REPO_BRANCH_REPORT_FILE,
};
