/// Everything that can go wrong between the HTTP request and a classified
/// result. All of these map to the Unknown state; threshold violations are
/// not errors, they are encoded in the returned resource.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("device returned HTTP status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unable to find output ID '{0}'")]
    UnknownOutput(u32),
    #[error("device did not report '{0}'")]
    MissingField(&'static str),
}
