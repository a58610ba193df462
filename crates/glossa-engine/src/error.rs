//! Error types for the Glossa binary.

/// Top-level error for startup failures, propagated by `main` with `?`.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: glossa_core::ConfigError,
    },

    /// Restoring the snapshot at startup failed.
    #[error("engine error: {source}")]
    Engine {
        /// The underlying engine error.
        #[from]
        source: glossa_core::EngineError,
    },
}
