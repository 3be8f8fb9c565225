use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - all requested reports were written
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (API error, network error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for Azure DevOps scanning.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Azure DevOps organization URL is not set\n\n💡 Hint: Pass --organization https://dev.azure.com/<org>, set AZURE_DEVOPS_ORG_URL, or add organization_url to ado-scanner.config.yml")]
    MissingOrganization,

    #[error("Azure DevOps personal access token is not set\n\n💡 Hint: Pass --pat <TOKEN> or set AZURE_DEVOPS_PAT")]
    MissingCredentials,

    #[error("Invalid organization URL: {url}\nReason: {reason}\n\n💡 Hint: Use the form https://dev.azure.com/<organization>")]
    InvalidOrganizationUrl { url: String, reason: String },

    #[error("Authentication failed for {endpoint} (HTTP {status})\n\n💡 Hint: Check that the personal access token is valid and has read access to Work Items, Code and Project")]
    AuthenticationFailed { endpoint: String, status: u16 },

    #[error("Azure DevOps API request failed: {endpoint}\nStatus: {status}\nDetails: {details}")]
    ApiRequestFailed {
        endpoint: String,
        status: u16,
        details: String,
    },

    #[error("Unexpected response from {endpoint}\nDetails: {details}")]
    InvalidResponse { endpoint: String, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for settings and request builders
    #[error("Validation error: {message}")]
    Validation { message: String },
}
