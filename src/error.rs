use std::path::PathBuf;

use thiserror::Error;

/// Driver failures. All of them are programmer errors in an actor's
/// transition graph or in the host's lifecycle handling.
#[derive(Debug, Error)]
pub enum FsmError {
    #[error("{actor}: step called before the state machine was activated")]
    Inactive { actor: &'static str },

    #[error("{actor}: state machine activated twice")]
    AlreadyActive { actor: &'static str },

    #[error("{actor}: state set declares no states")]
    EmptyStateSet { actor: &'static str },

    #[error("{actor}: transition chain did not settle after {limit} changes ({from} -> {to})")]
    Unstable {
        actor: &'static str,
        from: &'static str,
        to: &'static str,
        limit: usize,
    },
}

/// Failures loading a [`GameConfig`](crate::config::GameConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fsm(#[from] FsmError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    fn unstable() -> Result<(), FsmError> {
        Err(FsmError::Unstable {
            actor: "Probe",
            from: "Red",
            to: "Green",
            limit: 3,
        })
    }

    #[test]
    fn driver_errors_convert_and_keep_their_message() {
        let err: Error = unstable().map_err(Error::from).unwrap_err();
        assert!(matches!(err, Error::Fsm(FsmError::Unstable { limit: 3, .. })));
        assert_eq!(
            err.to_string(),
            "Probe: transition chain did not settle after 3 changes (Red -> Green)"
        );
    }
}
