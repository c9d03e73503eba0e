use crate::launcher::ProcessLauncher;
use crate::locator::ExecutableLocator;
use crate::notifier::{Notifier, Urgency};
use crate::Result;
use serde::Serialize;
use usbrowser_core::command::synthesize;
use usbrowser_core::matcher::select;
use usbrowser_core::transform::transform;
use usbrowser_core::{Config, HostSource, ParsedUrl};

/// Summary line used for every notification the launcher sends
pub const NOTIFICATION_SUMMARY: &str = "URL Specific Browser-launcher";

/// Everything decided about an invocation before any process is touched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchPlan {
    pub profile: String,
    pub group: Option<String>,
    pub executable: String,
    pub url: String,
    pub argv: Vec<String>,
}

/// How an invocation ended when no fatal error occurred
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The browser was handed to the process launcher
    Launched { argv: Vec<String> },
    /// The executable could not be resolved; the user has been notified
    ExecutableMissing { executable: String },
}

/// Drives match -> transform -> synthesize -> launch for one URL
pub struct LaunchCoordinator<'a> {
    locator: &'a dyn ExecutableLocator,
    launcher: &'a dyn ProcessLauncher,
    notifier: &'a dyn Notifier,
    host_source: HostSource,
}

impl<'a> LaunchCoordinator<'a> {
    pub fn new(
        locator: &'a dyn ExecutableLocator,
        launcher: &'a dyn ProcessLauncher,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            locator,
            launcher,
            notifier,
            host_source: HostSource::default(),
        }
    }

    /// Compare `domain` rules against the given URL component
    pub fn with_host_source(mut self, host_source: HostSource) -> Self {
        self.host_source = host_source;
        self
    }

    /// Select a profile and build its command line, without side effects
    pub fn plan(&self, config: &Config, url: &ParsedUrl, original: &str) -> LaunchPlan {
        let selection = select(config, url, self.host_source);
        let profile = selection.profile;

        tracing::info!(
            "Browser `{}` with executable `{}`",
            selection.profile_name,
            profile.executable
        );

        let final_url = transform(profile.change_url.as_ref(), original);
        tracing::info!("URL is `{}`", final_url);

        let argv = synthesize(profile, &final_url);
        tracing::info!("Command is `{}`", argv.join(" "));

        LaunchPlan {
            profile: selection.profile_name.to_string(),
            group: selection.group.map(str::to_string),
            executable: profile.executable.clone(),
            url: final_url,
            argv,
        }
    }

    /// Launch a planned command
    ///
    /// A missing executable is not an error: the user is notified and
    /// [`Outcome::ExecutableMissing`] is returned. Launch failures are
    /// logged and returned.
    pub fn execute(&self, plan: &LaunchPlan) -> Result<Outcome> {
        if self.locator.locate(&plan.executable).is_none() {
            let body = format!(
                "Cannot find executable `{}` to launch {}",
                plan.executable, plan.url
            );
            if let Err(e) = self
                .notifier
                .notify(Urgency::Critical, NOTIFICATION_SUMMARY, &body)
            {
                tracing::warn!("Failed to send desktop notification: {}", e);
            }
            tracing::error!(
                "Cannot find executable `{}` for profile `{}`",
                plan.executable,
                plan.profile
            );

            return Ok(Outcome::ExecutableMissing {
                executable: plan.executable.clone(),
            });
        }

        if let Err(e) = self.launcher.launch(&plan.argv) {
            tracing::error!(
                "Could not open URL with browser `{}`: {} ({})",
                plan.profile,
                plan.url,
                e
            );
            return Err(e);
        }

        Ok(Outcome::Launched {
            argv: plan.argv.clone(),
        })
    }

    /// Plan and execute in one step
    pub fn run(&self, config: &Config, url: &ParsedUrl, original: &str) -> Result<Outcome> {
        let plan = self.plan(config, url, original);
        self.execute(&plan)
    }
}
