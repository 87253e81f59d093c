use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{kind} {namespace}/{name} not found")]
    NotFound { kind: String, namespace: String, name: String },

    /// The delete request itself succeeded; only the confirmation wait ran
    /// out of budget. Deletion may still complete in the background.
    #[error(
        "timed out after {waited:?} waiting for {kind} {namespace}/{name} to be deleted"
    )]
    DeleteWaitTimeout {
        kind: String,
        namespace: String,
        name: String,
        waited: Duration,
    },

    #[error(
        "timed out after {waited:?} waiting for {kind} {namespace}/{name} to reach the requested state"
    )]
    ConditionWaitTimeout {
        kind: String,
        namespace: String,
        name: String,
        waited: Duration,
    },

    #[error("offline mode is enabled; refusing to run {0} against the cluster")]
    Offline(String),

    #[error("kubernetes api error: {0}")]
    Api(#[from] kube::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid object: {0}")]
    InvalidObject(String),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Error::DeleteWaitTimeout { .. } | Error::ConditionWaitTimeout { .. }
        )
    }
}
