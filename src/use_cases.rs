use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

use crate::connection::TicketStore;
use crate::database::{insert_ticket, require_ticket};
use crate::draw_state::{DrawSnapshot, DrawState};
use crate::error::Result;
use crate::numbers::NumberSource;
use crate::types::{HealthReport, ResultReport, Ticket, TicketReceipt};

/// Purchase, draw and result-check over the ticket store and the draw state.
#[derive(Clone)]
pub struct TicketingUseCase {
    store: TicketStore,
    draws: Arc<DrawState>,
    numbers: Arc<dyn NumberSource>,
}

impl TicketingUseCase {
    pub fn new(store: TicketStore, draws: Arc<DrawState>, numbers: Arc<dyn NumberSource>) -> Self {
        Self {
            store,
            draws,
            numbers,
        }
    }

    pub async fn purchase_ticket(&self, user_name: &str) -> Result<TicketReceipt> {
        let numbers = self.numbers.next_set();
        let owner = user_name.to_string();
        let stored = numbers.clone();

        let ticket_id = self
            .store
            .with_write_session(move |conn| insert_ticket(conn, &owner, &stored))
            .await?;

        info!(ticket_id, user_name, ?numbers, "ticket purchased");
        Ok(TicketReceipt { ticket_id, numbers })
    }

    pub async fn draw_winning_numbers(&self) -> Vec<u32> {
        let snapshot = self.draws.replace(self.numbers.next_set()).await;
        info!(winning_numbers = ?snapshot.winning_numbers, "draw completed");
        snapshot.winning_numbers.clone()
    }

    pub async fn get_ticket(&self, ticket_id: i64) -> Result<Ticket> {
        self.store
            .with_session(move |conn| require_ticket(conn, ticket_id))
            .await
    }

    pub async fn check_result(&self, ticket_id: i64) -> Result<ResultReport> {
        let ticket = self.get_ticket(ticket_id).await?;
        let draw = self.draws.snapshot().await;
        debug!(ticket_id, drawn_at = ?draw.drawn_at, "checking ticket");
        Ok(match_ticket(&ticket.numbers, &draw))
    }

    pub async fn health(&self) -> HealthReport {
        let db = self.store.ping().await;
        let last_draw_at = self.draws.snapshot().await.drawn_at;
        HealthReport {
            status: if db { "ok" } else { "degraded" }.to_string(),
            db,
            last_draw_at,
        }
    }
}

/// Matches are counted as a set: a number repeated on either side counts once.
pub fn match_ticket(ticket_numbers: &[u32], draw: &DrawSnapshot) -> ResultReport {
    let ticket: BTreeSet<u32> = ticket_numbers.iter().copied().collect();
    let winning: BTreeSet<u32> = draw.winning_numbers.iter().copied().collect();
    let matched_numbers: Vec<u32> = ticket.intersection(&winning).copied().collect();

    ResultReport {
        ticket_numbers: ticket_numbers.to_vec(),
        winning_numbers: draw.winning_numbers.clone(),
        match_count: matched_numbers.len(),
        matched_numbers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(numbers: &[u32]) -> DrawSnapshot {
        DrawSnapshot {
            winning_numbers: numbers.to_vec(),
            drawn_at: None,
        }
    }

    #[test]
    fn counts_shared_numbers() {
        let report = match_ticket(&[3, 7, 12, 19, 25, 41], &draw(&[7, 19, 25, 30, 44, 2]));
        assert_eq!(report.matched_numbers, vec![7, 19, 25]);
        assert_eq!(report.match_count, 3);
        assert_eq!(report.winning_numbers, vec![7, 19, 25, 30, 44, 2]);
    }

    #[test]
    fn no_draw_means_no_matches() {
        let report = match_ticket(&[1, 2, 3, 4, 5, 6], &DrawSnapshot::default());
        assert!(report.winning_numbers.is_empty());
        assert!(report.matched_numbers.is_empty());
        assert_eq!(report.match_count, 0);
    }

    #[test]
    fn duplicates_collapse() {
        let report = match_ticket(&[5, 5, 9, 9, 1, 2], &draw(&[5, 9, 9, 40, 41, 42]));
        assert_eq!(report.matched_numbers, vec![5, 9]);
        assert_eq!(report.match_count, 2);
        assert_eq!(report.ticket_numbers, vec![5, 5, 9, 9, 1, 2]);
    }
}
