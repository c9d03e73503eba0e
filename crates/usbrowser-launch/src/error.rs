use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Empty command line")]
    EmptyCommand,

    #[error("Could not launch `{executable}`: {source}")]
    Spawn {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Browser `{executable}` exited with {status}")]
    ChildFailed {
        executable: String,
        status: ExitStatus,
    },

    #[error("Notification error: {0}")]
    Notification(String),
}

pub type Result<T> = std::result::Result<T, Error>;
