use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EpisodeError {
    #[error("expected 3 ' | '-separated parts in {name:?}, found {found}")]
    WrongPartCount { name: String, found: usize },

    #[error("season label {0:?} does not start with \"Season \"")]
    MissingSeasonPrefix(String),

    #[error("episode label {0:?} does not start with \"Episode \"")]
    MissingEpisodePrefix(String),

    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    #[error("invalid asset name {0:?}")]
    InvalidAssetName(String),

    #[error("season {key}, record {index}: {source}")]
    MalformedRecord {
        key: String,
        index: usize,
        #[source]
        source: Box<EpisodeError>,
    },
}
