use clap::Parser;
use std::path::PathBuf;

use ado_scanner::application::dto::{OutputFormat, ReportKind};
use ado_scanner::scanning::policies::RelatedLinkPolicy;

/// Scan an Azure DevOps organization for repository health and feature traceability
///
/// Options left unset fall back to `ado-scanner.config.yml`, then to
/// built-in defaults.
#[derive(Parser, Debug)]
#[command(name = "ado-scanner")]
#[command(version)]
#[command(
    about = "Report Azure DevOps repository health and feature traceability as CSV or console tables",
    long_about = None
)]
pub struct Args {
    /// Organization URL, e.g. https://dev.azure.com/contoso
    #[arg(short, long, env = "AZURE_DEVOPS_ORG_URL", value_name = "URL")]
    pub organization: Option<String>,

    /// Personal access token with read access to Work Items, Code and Project
    #[arg(long, env = "AZURE_DEVOPS_PAT", hide_env_values = true, value_name = "TOKEN")]
    pub pat: Option<String>,

    /// Reports to produce: features, repositories or all [default: all]
    #[arg(short, long, value_name = "KIND")]
    pub report: Option<ReportKind>,

    /// Output format: csv (files) or table (stdout) [default: csv]
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Directory for the CSV files [default: .]
    #[arg(short = 'd', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// WIQL query selecting the features to check [default: all Feature work items]
    #[arg(short, long, value_name = "WIQL")]
    pub query: Option<String>,

    /// Only scan these projects (case-insensitive).
    /// Can be specified multiple times: -p Eng -p Web
    #[arg(short, long = "project", value_name = "NAME")]
    pub project: Vec<String>,

    /// How far related links are followed: one-hop, ignore or transitive [default: one-hop]
    #[arg(long, value_name = "POLICY")]
    pub related_links: Option<RelatedLinkPolicy>,

    /// A branch is active when its last commit is at most this many months old [default: 3]
    #[arg(long, value_name = "MONTHS")]
    pub active_months: Option<u32>,

    /// Retries for network errors, HTTP 429 and 5xx responses [default: 0]
    #[arg(long, value_name = "N")]
    pub max_retries: Option<u32>,

    /// Path to a config file (defaults to ./ado-scanner.config.yml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Exit right away instead of waiting for Enter
    #[arg(long)]
    pub no_wait: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        let mut argv = vec!["ado-scanner"];
        argv.extend_from_slice(args);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_unset_options_stay_none() {
        let args = parse(&["--organization", "https://dev.azure.com/contoso"]);
        assert!(args.report.is_none());
        assert!(args.format.is_none());
        assert!(args.output_dir.is_none());
        assert!(args.related_links.is_none());
        assert!(args.project.is_empty());
        assert!(!args.no_wait);
    }

    #[test]
    fn test_all_options() {
        let args = parse(&[
            "-o",
            "https://dev.azure.com/contoso",
            "--pat",
            "secret",
            "-r",
            "features",
            "-f",
            "table",
            "-d",
            "out",
            "-q",
            "SELECT [Id] FROM workitems",
            "-p",
            "Eng",
            "-p",
            "Web",
            "--related-links",
            "transitive",
            "--active-months",
            "6",
            "--max-retries",
            "2",
            "-c",
            "custom.yml",
            "--no-wait",
        ]);

        assert_eq!(args.organization.as_deref(), Some("https://dev.azure.com/contoso"));
        assert_eq!(args.pat.as_deref(), Some("secret"));
        assert_eq!(args.report, Some(ReportKind::Features));
        assert_eq!(args.format, Some(OutputFormat::Table));
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert_eq!(args.query.as_deref(), Some("SELECT [Id] FROM workitems"));
        assert_eq!(args.project, vec!["Eng".to_string(), "Web".to_string()]);
        assert_eq!(args.related_links, Some(RelatedLinkPolicy::Transitive));
        assert_eq!(args.active_months, Some(6));
        assert_eq!(args.max_retries, Some(2));
        assert_eq!(args.config, Some(PathBuf::from("custom.yml")));
        assert!(args.no_wait);
    }

    #[test]
    fn test_invalid_format_is_rejected() {
        let result = Args::try_parse_from(["ado-scanner", "--format", "xml"]);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Invalid format"));
    }

    #[test]
    fn test_invalid_related_links_is_rejected() {
        assert!(Args::try_parse_from(["ado-scanner", "--related-links", "sometimes"]).is_err());
    }
}
