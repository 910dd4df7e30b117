use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwirlError {
    #[error("Knot ID {id} not found in coefficient database")]
    KnotNotFound { id: String },

    #[error("Coefficient database parse error: {0}")]
    DatabaseParse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Physics constraint violated: {0}")]
    PhysicsViolation(String),

    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SwirlResult<T> = Result<T, SwirlError>;
