use crate::OutputFormat;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use usbrowser_core::config::DEFAULT_EXECUTABLE;
use usbrowser_core::{BrowserProfile, Config, ConfigReader, HostSource, ParsedUrl};
use usbrowser_launch::{
    DesktopNotifier, DetachedLauncher, LaunchCoordinator, LaunchPlan, Outcome, PathLocator,
};

/// Options for a single invocation
pub struct OpenOptions {
    pub config_paths: Vec<PathBuf>,
    pub host_source: HostSource,
    pub dry_run: bool,
    pub format: OutputFormat,
}

pub fn execute(url: &str, options: OpenOptions) -> Result<ExitCode> {
    let parsed = ParsedUrl::parse(url);

    // Step 1: Layer config files over the built-in fallback
    tracing::debug!("Reading config files: {:?}", options.config_paths);
    let layers = ConfigReader::read_layers(&options.config_paths)
        .context("Could not load browser configuration")?;
    let config = Config::layered(BrowserProfile::new(DEFAULT_EXECUTABLE), layers);
    tracing::debug!("Config files read - Final result:\n{}", config.to_yaml());

    // Step 2: Match, rewrite and build the command line
    let locator = PathLocator::new();
    let launcher = DetachedLauncher;
    let notifier = DesktopNotifier::default();
    let coordinator = LaunchCoordinator::new(&locator, &launcher, &notifier)
        .with_host_source(options.host_source);

    let plan = coordinator.plan(&config, &parsed, url);

    if options.dry_run {
        print_plan(&plan, options.format)?;
        return Ok(ExitCode::SUCCESS);
    }

    // Step 3: Hand off to the browser
    match coordinator.execute(&plan)? {
        Outcome::Launched { .. } => Ok(ExitCode::SUCCESS),
        Outcome::ExecutableMissing { executable } => {
            eprintln!("Cannot find executable `{}`", executable);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_plan(plan: &LaunchPlan, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(plan)?);
        }
        OutputFormat::Pretty => {
            match &plan.group {
                Some(group) => println!("Profile: {} (matched group `{}`)", plan.profile, group),
                None => println!("Profile: {} (no rule matched)", plan.profile),
            }
            println!("URL: {}", plan.url);
            println!("Command: {}", plan.argv.join(" "));
        }
    }
    Ok(())
}
