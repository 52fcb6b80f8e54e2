use thiserror::Error;

/// Errors raised by the core.
///
/// An empty segmentation set is not an error; it is reported as
/// [`crate::SessionState::NoSolutions`] or an empty result.
#[derive(Debug, Error)]
pub enum Error {
    /// The chosen word does not begin any live segmentation. Session state is unchanged.
    #[error("'{word}' is not one of the offered words")]
    InvalidChoice { word: String },

    /// A choice or backtrack was attempted before a target skeleton was given.
    #[error("no target skeleton has been started")]
    NotStarted,

    #[error("unknown word '{0}'")]
    UnknownWord(String),

    #[error("config I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("could not serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
