pub type Result<T> = std::result::Result<T, SidebarError>;

#[derive(Debug, thiserror::Error)]
pub enum SidebarError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Script error on line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("Error: {0}")]
    Generic(String),
}

impl From<String> for SidebarError {
    fn from(error: String) -> Self {
        SidebarError::Generic(error)
    }
}

impl From<&str> for SidebarError {
    fn from(error: &str) -> Self {
        SidebarError::Generic(error.to_string())
    }
}
