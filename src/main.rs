mod cli;
mod config;

use ado_scanner::adapters::outbound::console::StderrProgressReporter;
use ado_scanner::adapters::outbound::network::{
    AzureDevOpsClient, CachingWorkItemRepository, ClientSettings,
};
use ado_scanner::application::dto::{FeatureScanRequest, OutputFormat, RepositoryScanRequest};
use ado_scanner::application::factories::{
    FormatterFactory, PresenterFactory, PresenterType, FEATURE_REPORT_FILE,
    REPO_BRANCH_REPORT_FILE,
};
use ado_scanner::application::use_cases::{ScanFeaturesUseCase, ScanRepositoriesUseCase};
use ado_scanner::shared::error::{ExitCode, ScanError};
use ado_scanner::shared::Result;
use chrono::Utc;
use cli::Args;
use config::{discover_config, load_config_from_path, Settings, CONFIG_FILENAME};
use owo_colors::OwoColorize;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    // clap exits with 2 on invalid arguments and 0 for --help/--version
    let args = Args::parse_args();

    match run(&args).await {
        Ok(no_wait) => {
            eprintln!("{}", "🎉 Scan finished".green().bold());
            if should_wait(no_wait, io::stdin().is_terminal()) {
                pause();
            }
            process::exit(ExitCode::Success.as_i32());
        }
        Err(e) => {
            eprintln!("\n{}\n", "❌ An error occurred:".red().bold());
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            if should_wait(args.no_wait, io::stdin().is_terminal()) {
                pause();
            }
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

/// Runs the requested scans and returns the effective `no_wait` setting.
async fn run(args: &Args) -> Result<bool> {
    let config = match args.config.as_deref() {
        Some(path) => {
            let config = load_config_from_path(path)?;
            eprintln!("📄 Loaded config from: {}", path.display());
            Some(config)
        }
        None => {
            let config = discover_config(&std::env::current_dir()?)?;
            if config.is_some() {
                eprintln!("📄 Auto-discovered config file: {}", CONFIG_FILENAME);
            }
            config
        }
    };
    let settings = Settings::resolve(args, config)?;

    if settings.format == OutputFormat::Csv {
        validate_output_dir(&settings.output_dir)?;
    }

    // Create adapters (Dependency Injection)
    let client = AzureDevOpsClient::new(
        ClientSettings::new(
            settings.organization_url.as_str(),
            settings.personal_access_token.as_str(),
        )
        .with_max_retries(settings.max_retries),
    )?;

    eprintln!("🔎 Scanning {}", client.organization_url().bold());

    let formatter = FormatterFactory::create(settings.format);

    if settings.report.includes_features() {
        let use_case = ScanFeaturesUseCase::new(
            CachingWorkItemRepository::new(client.clone()),
            StderrProgressReporter::new(),
        );
        let request = FeatureScanRequest::new(settings.query.as_str(), settings.related_links);
        let report = use_case.execute(request).await?;

        let content = formatter.format_features(&report)?;
        present(&settings, FEATURE_REPORT_FILE, &content)?;
    }

    if settings.report.includes_repositories() {
        let use_case = ScanRepositoriesUseCase::new(client.clone(), StderrProgressReporter::new());
        let request = RepositoryScanRequest::new(Utc::now())
            .with_active_months(settings.active_months)
            .with_projects(settings.projects.clone())
            .with_readme_path(settings.readme_path.as_str());
        let report = use_case.execute(request).await?;

        let content = formatter.format_repo_branches(&report)?;
        present(&settings, REPO_BRANCH_REPORT_FILE, &content)?;
    }

    Ok(settings.no_wait)
}

fn present(settings: &Settings, file_name: &str, content: &str) -> Result<()> {
    eprintln!("{}", FormatterFactory::progress_message(settings.format));
    let presenter = PresenterFactory::create(PresenterType::for_report(
        settings.format,
        &settings.output_dir,
        file_name,
    ));
    presenter.present(content)
}

/// Fails before any network traffic when CSV files could not be written anyway.
fn validate_output_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Err(ScanError::Validation {
            message: format!(
                "Output directory does not exist: {}\n\n💡 Hint: Create it first or pass --output-dir",
                dir.display()
            ),
        }
        .into());
    }

    if !dir.is_dir() {
        return Err(ScanError::Validation {
            message: format!("Output path is not a directory: {}", dir.display()),
        }
        .into());
    }

    Ok(())
}

/// Keeps the console open for interactive users, on success and on failure alike.
fn should_wait(no_wait: bool, stdin_is_terminal: bool) -> bool {
    !no_wait && stdin_is_terminal
}

fn pause() {
    eprint!("Press Enter to exit...");
    let _ = io::stderr().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}
