/// Which reports a run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportKind {
    /// Feature traceability only
    Features,
    /// Repository/branch health only
    Repositories,
    /// Both reports (default)
    #[default]
    All,
}

impl ReportKind {
    pub fn includes_features(&self) -> bool {
        matches!(self, ReportKind::Features | ReportKind::All)
    }

    pub fn includes_repositories(&self) -> bool {
        matches!(self, ReportKind::Repositories | ReportKind::All)
    }
}

impl std::str::FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "features" | "feature" => Ok(ReportKind::Features),
            "repositories" | "repos" | "repobranch" => Ok(ReportKind::Repositories),
            "all" => Ok(ReportKind::All),
            _ => Err(format!(
                "Invalid report: {}. Please specify 'features', 'repositories' or 'all'",
                s
            )),
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportKind::Features => write!(f, "features"),
            ReportKind::Repositories => write!(f, "repositories"),
            ReportKind::All => write!(f, "all"),
        }
    }
}
