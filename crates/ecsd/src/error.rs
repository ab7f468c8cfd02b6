use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed loading environment config: {0}")]
    Load(#[from] config::ConfigError),
    #[error("template result has no container definitions")]
    NoContainers,
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("unterminated action starting at byte {0}")]
    Unterminated(usize),
    #[error("unsupported template action {0:?} (expected {{{{ .Field }}}})")]
    UnsupportedAction(String),
    #[error("can't evaluate field {0} in environment config")]
    UnknownField(String),
    #[error("failed parsing template result: {0}")]
    Parse(#[source] serde_json::Error),
}
