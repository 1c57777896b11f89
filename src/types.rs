use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored ticket row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ticket {
    pub id: i64,
    pub user_name: String,
    pub numbers: Vec<u32>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketCreate {
    pub user_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuyTicketQuery {
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketReceipt {
    pub ticket_id: i64,
    pub numbers: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResponse {
    pub winning_numbers: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultReport {
    pub ticket_numbers: Vec<u32>,
    pub winning_numbers: Vec<u32>,
    pub matched_numbers: Vec<u32>,
    pub match_count: usize,
}

/// Body of every user-visible failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Either a result report or `{"error": ...}`, as served by `/check-result`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CheckResultResponse {
    Report(ResultReport),
    Error(ErrorBody),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub db: bool,
    pub last_draw_at: Option<DateTime<Utc>>,
}
