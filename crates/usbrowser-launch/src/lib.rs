mod coordinator;
mod error;
mod launcher;
mod locator;
mod notifier;

pub use coordinator::{LaunchCoordinator, LaunchPlan, NOTIFICATION_SUMMARY, Outcome};
pub use error::{Error, Result};
pub use launcher::{BlockingLauncher, DetachedLauncher, ProcessLauncher};
pub use locator::{ExecutableLocator, PathLocator};
pub use notifier::{DesktopNotifier, Notifier, Urgency};
