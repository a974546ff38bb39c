use thiserror::Error;

/// Precondition violations detected by the chart pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("parameter list is empty")]
    EmptyParameterSpec,
    #[error("parameter name must not be blank (position {0})")]
    BlankParameterName(usize),
    #[error("duplicate parameter `{0}`")]
    DuplicateParameter(String),
    #[error("invalid color `{0}`, expected #rrggbb")]
    InvalidColor(String),
    #[error("invalid parameter entry `{0}`, expected NAME or NAME=#rrggbb")]
    InvalidParameterEntry(String),
    #[error("row {row} has no `{field}` value")]
    MissingCategory { row: usize, field: String },
    #[error("category `{0}` is not part of the band scale domain")]
    UnknownCategory(String),
}
