use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumberingError {
    #[error("Chaining counter '{child}' under '{parent}' would create a cycle.")]
    Cycle { parent: String, child: String },

    #[error("Invalid numbering configuration: {0}")]
    InvalidConfiguration(String),

    #[error("A numbering template needs at least one counter.")]
    EmptyTemplate,
}
