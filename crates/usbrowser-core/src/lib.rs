pub mod command;
pub mod config;
pub mod error;
pub mod matcher;
pub mod transform;
pub mod url;

pub use config::{BrowserProfile, Config, ConfigDocument, ConfigReader};
pub use error::{Error, Result};
pub use matcher::{HostSource, Selection};
pub use crate::url::ParsedUrl;
