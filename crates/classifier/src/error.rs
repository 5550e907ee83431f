use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClassifierError>;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("invalid rule set: {0}")]
    InvalidRuleSet(String),

    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),
}
