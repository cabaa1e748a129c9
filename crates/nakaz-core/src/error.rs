use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("unsupported language {0:?}: only \"ru\" is served")]
    UnsupportedLang(String),

    #[error("invalid {field} {value:?}: expected YYYY-MM-DD or DDMMYYYY")]
    InvalidDate { field: &'static str, value: String },

    #[error("malformed request: {0}")]
    Json(#[from] serde_json::Error),
}
