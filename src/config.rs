//! Configuration file support for ado-scanner.
//!
//! Provides YAML-based configuration through `ado-scanner.config.yml` files,
//! and the merge of command-line options, file values and defaults into
//! the settings a scan runs with.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ado_scanner::application::dto::{
    OutputFormat, ReportKind, DEFAULT_FEATURE_QUERY, DEFAULT_README_PATH,
};
use ado_scanner::scanning::policies::RelatedLinkPolicy;
use ado_scanner::scanning::services::branch_activity::DEFAULT_ACTIVE_MONTHS;
use ado_scanner::shared::error::ScanError;
use ado_scanner::shared::Result;

use crate::cli::Args;

pub const CONFIG_FILENAME: &str = "ado-scanner.config.yml";
const MAX_RETRIES_LIMIT: u32 = 10;
const SECRET_KEYS: [&str; 3] = ["pat", "personal_access_token", "token"];

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub organization_url: Option<String>,
    pub format: Option<String>,
    pub report: Option<String>,
    pub output_dir: Option<String>,
    pub query: Option<String>,
    pub projects: Option<Vec<String>>,
    pub related_links: Option<String>,
    pub active_months: Option<u32>,
    pub max_retries: Option<u32>,
    pub readme_path: Option<String>,
    pub no_wait: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    for key in SECRET_KEYS {
        if config.unknown_fields.contains_key(key) {
            bail!(
                "Invalid config: '{}' must not be stored in the config file.\n\n\
                 💡 Hint: Pass the token with --pat or the AZURE_DEVOPS_PAT environment variable.",
                key
            );
        }
    }

    if let Some(ref format) = config.format {
        if let Err(e) = format.parse::<OutputFormat>() {
            bail!("Invalid config: {}\n\n💡 Hint: Use 'csv' or 'table'.", e);
        }
    }

    if let Some(ref report) = config.report {
        if let Err(e) = report.parse::<ReportKind>() {
            bail!(
                "Invalid config: {}\n\n💡 Hint: Use 'features', 'repositories' or 'all'.",
                e
            );
        }
    }

    if let Some(ref related_links) = config.related_links {
        if let Err(e) = related_links.parse::<RelatedLinkPolicy>() {
            bail!(
                "Invalid config: {}\n\n💡 Hint: 'one-hop' is the default and usually what you want.",
                e
            );
        }
    }

    if config.active_months == Some(0) {
        bail!(
            "Invalid config: active_months must be at least 1.\n\n\
             💡 Hint: Omit the field to use the default of {} months.",
            DEFAULT_ACTIVE_MONTHS
        );
    }

    if let Some(retries) = config.max_retries {
        if retries > MAX_RETRIES_LIMIT {
            bail!(
                "Invalid config: max_retries must be between 0 and {}, got {}.",
                MAX_RETRIES_LIMIT,
                retries
            );
        }
    }

    if let Some(ref query) = config.query {
        if query.trim().is_empty() {
            bail!(
                "Invalid config: query must not be empty.\n\n\
                 💡 Hint: Remove the field to scan every Feature work item."
            );
        }
    }

    if let Some(ref projects) = config.projects {
        for (i, name) in projects.iter().enumerate() {
            if name.trim().is_empty() {
                bail!("Invalid config: projects[{}] must not be empty.", i);
            }
        }
    }

    if let Some(ref readme_path) = config.readme_path {
        if readme_path.trim().is_empty() {
            bail!("Invalid config: readme_path must not be empty.");
        }
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Effective settings for one run.
///
/// Command-line values win over config file values, which win over defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub organization_url: String,
    pub personal_access_token: String,
    pub report: ReportKind,
    pub format: OutputFormat,
    pub output_dir: PathBuf,
    pub query: String,
    pub projects: Vec<String>,
    pub related_links: RelatedLinkPolicy,
    pub active_months: u32,
    pub max_retries: u32,
    pub readme_path: String,
    pub no_wait: bool,
}

impl Settings {
    pub fn resolve(args: &Args, config: Option<ConfigFile>) -> Result<Self> {
        let config = config.unwrap_or_default();

        let organization_url = args
            .organization
            .clone()
            .or(config.organization_url)
            .filter(|url| !url.trim().is_empty())
            .ok_or(ScanError::MissingOrganization)?;

        let personal_access_token = args
            .pat
            .clone()
            .filter(|pat| !pat.trim().is_empty())
            .ok_or(ScanError::MissingCredentials)?;

        let report = match args.report {
            Some(report) => report,
            None => parse_or_default(config.report.as_deref())?,
        };
        let format = match args.format {
            Some(format) => format,
            None => parse_or_default(config.format.as_deref())?,
        };
        let related_links = match args.related_links {
            Some(policy) => policy,
            None => parse_or_default(config.related_links.as_deref())?,
        };

        let active_months = args
            .active_months
            .or(config.active_months)
            .unwrap_or(DEFAULT_ACTIVE_MONTHS);
        if active_months == 0 {
            return Err(ScanError::Validation {
                message: "--active-months must be at least 1".to_string(),
            }
            .into());
        }

        let max_retries = args.max_retries.or(config.max_retries).unwrap_or(0);
        if max_retries > MAX_RETRIES_LIMIT {
            return Err(ScanError::Validation {
                message: format!(
                    "--max-retries must be between 0 and {}, got {}",
                    MAX_RETRIES_LIMIT, max_retries
                ),
            }
            .into());
        }

        let projects = if args.project.is_empty() {
            config.projects.unwrap_or_default()
        } else {
            args.project.clone()
        };

        Ok(Self {
            organization_url,
            personal_access_token,
            report,
            format,
            output_dir: args
                .output_dir
                .clone()
                .or(config.output_dir.map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(".")),
            query: args
                .query
                .clone()
                .or(config.query)
                .unwrap_or_else(|| DEFAULT_FEATURE_QUERY.to_string()),
            projects,
            related_links,
            active_months,
            max_retries,
            readme_path: config
                .readme_path
                .unwrap_or_else(|| DEFAULT_README_PATH.to_string()),
            no_wait: args.no_wait || config.no_wait.unwrap_or(false),
        })
    }
}

fn parse_or_default<T>(value: Option<&str>) -> Result<T>
where
    T: std::str::FromStr<Err = String> + Default,
{
    match value {
        Some(raw) => raw.parse::<T>().map_err(|message| {
            ScanError::Validation { message }.into()
        }),
        None => Ok(T::default()),
    }
}
