use crate::application::read_models::{FeatureReport, RepoBranchReport};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

const FEATURE_TABLE_HEADER: &str =
    "| Project | Id | Title | Status | Is Connected With Commit Or PullRequest |\n";
const FEATURE_TABLE_SEPARATOR: &str = "| :--- | ---: | :--- | :--- | :--- |\n";

const REPO_BRANCH_TABLE_HEADER: &str = "| Project | Repository Name | Branch | Is Default Branch | Is Active | Has README.md | Has Owner | Has Policy | Policies |\n";
const REPO_BRANCH_TABLE_SEPARATOR: &str =
    "| :--- | :--- | :--- | :--- | :--- | :--- | :--- | :--- | :--- |\n";

/// TableFormatter adapter rendering Markdown style tables for the console
///
/// Policies are joined with `<br>` so one branch stays on one table row.
pub struct TableFormatter;

impl TableFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|").replace(['\r', '\n'], " ")
    }

    fn bool_cell(value: bool) -> &'static str {
        if value {
            "True"
        } else {
            "False"
        }
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for TableFormatter {
    fn format_features(&self, report: &FeatureReport) -> Result<String> {
        let mut output = String::new();
        output.push_str(FEATURE_TABLE_HEADER);
        output.push_str(FEATURE_TABLE_SEPARATOR);

        for feature in report.features() {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                Self::escape_cell(feature.project()),
                feature.id(),
                Self::escape_cell(feature.title()),
                Self::escape_cell(feature.status()),
                Self::bool_cell(feature.is_connected_with_commit_or_pull_request())
            ));
        }

        Ok(output)
    }

    fn format_repo_branches(&self, report: &RepoBranchReport) -> Result<String> {
        let mut output = String::new();
        output.push_str(REPO_BRANCH_TABLE_HEADER);
        output.push_str(REPO_BRANCH_TABLE_SEPARATOR);

        for row in report.rows() {
            let policies = row
                .policies
                .iter()
                .map(|policy| Self::escape_cell(policy))
                .collect::<Vec<_>>()
                .join("<br>");

            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
                Self::escape_cell(&row.project),
                Self::escape_cell(&row.repo_name),
                Self::escape_cell(&row.branch),
                Self::bool_cell(row.is_default_branch),
                Self::bool_cell(row.active),
                Self::bool_cell(row.has_read_me),
                Self::bool_cell(row.has_owner),
                Self::bool_cell(row.has_policy),
                policies
            ));
        }

        Ok(output)
    }
}
