use crate::application::read_models::{FeatureReport, RepoBranchReport};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

const FEATURE_HEADER: [&str; 5] = [
    "Project",
    "Id",
    "Title",
    "Status",
    "Is Connected With Commit Or PullRequest",
];

const REPO_BRANCH_HEADER: [&str; 9] = [
    "Project",
    "Repository Name",
    "Branch",
    "Is Default Branch",
    "Is Active",
    "Has README.md",
    "Has Owner",
    "Has Policy",
    "Policies",
];

/// Record terminator, as in RFC 4180
const LINE_END: &str = "\r\n";

/// CsvFormatter adapter producing the two CSV reports
///
/// Fields containing a comma, quote, CR or LF are quoted with inner quotes
/// doubled. Policy descriptions share one field, separated by a line feed.
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn new() -> Self {
        Self
    }

    fn escape_field(field: &str) -> String {
        if field.contains([',', '"', '\r', '\n']) {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn bool_field(value: bool) -> &'static str {
        if value {
            "True"
        } else {
            "False"
        }
    }

    fn push_record<S: AsRef<str>>(output: &mut String, fields: &[S]) {
        let line = fields
            .iter()
            .map(|field| Self::escape_field(field.as_ref()))
            .collect::<Vec<_>>()
            .join(",");
        output.push_str(&line);
        output.push_str(LINE_END);
    }
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for CsvFormatter {
    fn format_features(&self, report: &FeatureReport) -> Result<String> {
        let mut output = String::new();
        Self::push_record(&mut output, &FEATURE_HEADER);

        for feature in report.features() {
            let id = feature.id().to_string();
            let fields: [&str; 5] = [
                feature.project(),
                &id,
                feature.title(),
                feature.status(),
                Self::bool_field(feature.is_connected_with_commit_or_pull_request()),
            ];
            Self::push_record(&mut output, &fields);
        }

        Ok(output)
    }

    fn format_repo_branches(&self, report: &RepoBranchReport) -> Result<String> {
        let mut output = String::new();
        Self::push_record(&mut output, &REPO_BRANCH_HEADER);

        for row in report.rows() {
            let policies = row.policies.join("\n");
            let fields: [&str; 9] = [
                &row.project,
                &row.repo_name,
                &row.branch,
                Self::bool_field(row.is_default_branch),
                Self::bool_field(row.active),
                Self::bool_field(row.has_read_me),
                Self::bool_field(row.has_owner),
                Self::bool_field(row.has_policy),
                &policies,
            ];
            Self::push_record(&mut output, &fields);
        }

        Ok(output)
    }
}
