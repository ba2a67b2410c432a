/// Failures of the `init` command
///
/// Argument errors are detected locally before anything else runs, the other
/// two wrap whatever the [`crate::cluster::Initializer`] returned. None of them
/// is retried.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("accepts {expected} arg, received {received}")]
    ArgumentCount { expected: usize, received: usize },

    #[error("Invalid cluster name: {0}")]
    InvalidArgument(String),

    #[error("init failed due to error: {0:#}")]
    ConfigurationBuild(anyhow::Error),

    #[error("init failed due to error: {0:#}")]
    Bootstrap(anyhow::Error),
}
