use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config from {origin}: {source}")]
    ConfigParse {
        origin: String,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
