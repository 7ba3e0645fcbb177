#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("unknown event type: {0}")]
    UnknownEventType(String),
    #[error("unknown scenario preset: {0}")]
    UnknownPreset(String),
}

/// A pushed frame that could not be turned into a [`crate::PipelineEvent`].
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("frame is not valid event JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("event for step '{step}' carries no status")]
    MissingStatus { step: String },
    #[error("event has an empty step")]
    EmptyStep,
}
