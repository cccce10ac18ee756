use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuardrailError {
    #[error("pattern dictionary root is not a mapping/object")]
    ConfigNotMapping,

    #[error("failed to parse pattern dictionary: {0}")]
    ConfigParse(String),
}
