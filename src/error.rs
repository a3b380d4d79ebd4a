pub type ShotforgeResult<T> = Result<T, ShotforgeError>;

#[derive(thiserror::Error, Debug)]
pub enum ShotforgeError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("unknown camera: {0}")]
    UnknownCamera(String),

    #[error("render error: {0}")]
    Render(String),

    /// The shared render environment could not be applied or restored.
    ///
    /// After a failed restore the environment may be left inconsistent; this
    /// variant is kept distinct from per-pass [`Render`](Self::Render) errors
    /// so callers can tell the two apart.
    #[error("environment error: {0}")]
    Environment(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShotforgeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unknown_camera(name: impl Into<String>) -> Self {
        Self::UnknownCamera(name.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn environment(msg: impl Into<String>) -> Self {
        Self::Environment(msg.into())
    }
}
