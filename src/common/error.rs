use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid command: {reason}")]
    InvalidCommand { reason: String },

    #[error("Invalid grid: {reason}")]
    InvalidGrid { reason: String },

    #[error("Cell ({row},{col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: i64,
        col: i64,
        rows: usize,
        cols: usize,
    },

    #[error("Rack {zone}-{rack} at ({row_loc},{col_loc}) is already occupied")]
    DuplicateSlot {
        zone: String,
        rack: String,
        row_loc: i64,
        col_loc: i64,
    },

    #[error("AGV busy: a traversal is already in progress")]
    AgvBusy,

    #[error("path required")]
    EmptyPath,

    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Validation(String),

    #[error("No path from ({from_r},{from_c}) to ({to_r},{to_c})")]
    Unreachable {
        from_r: usize,
        from_c: usize,
        to_r: usize,
        to_c: usize,
    },
}

pub type DomainResult<T> = Result<T, DomainError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;
