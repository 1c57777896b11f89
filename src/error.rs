use thiserror::Error;

pub type Result<T> = std::result::Result<T, TicketingError>;

#[derive(Error, Debug)]
pub enum TicketingError {
    #[error("Ticket not found: {0}")]
    TicketNotFound(i64),

    #[error("Number range {min}..={max} cannot hold a full set of distinct numbers")]
    InvalidRange { min: u32, max: u32 },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Ticket {ticket_id} has unreadable numbers: {raw:?}")]
    CorruptNumbers { ticket_id: i64, raw: String },

    #[error("Storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response from server: {0}")]
    UnexpectedResponse(String),
}

impl TicketingError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TicketingError::TicketNotFound(_))
    }
}
