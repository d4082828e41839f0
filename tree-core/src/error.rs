//! Error types for rejected requests and bad configuration.
//!
//! None of these are fatal: a rejected request leaves every piece of state
//! exactly as it was.

use crate::traversal::TraversalKind;

/// Why user-entered text produced no values to insert.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("no values entered")]
    Blank,
    #[error("no integers found in input (ignored: {})", .rejected.join(", "))]
    NoIntegers { rejected: Vec<String> },
}

/// A playback request that was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("nothing to build: the value list is empty")]
    NoValues,
    #[error("a build is already in progress")]
    BuildInProgress,
    #[error("cannot start a {0} traversal while a build is in progress")]
    TraversalDuringBuild(TraversalKind),
    #[error("only binary trees can be traversed")]
    NotBinary,
    #[error("there is no tree to traverse")]
    EmptyTree,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown traversal kind '{0}' (expected preorder, inorder or postorder)")]
pub struct ParseKindError(pub String);
