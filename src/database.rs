use crate::error::{Result, TicketingError};
use crate::types::Ticket;
use crate::utils::{decode_numbers, encode_numbers};
use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior};

pub fn create_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS tickets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            numbers TEXT NOT NULL,
            user_name TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    Ok(())
}

/// Inserts under `BEGIN IMMEDIATE` so the write lock is taken up front and a
/// busy database waits on the busy timeout instead of failing.
pub fn insert_ticket(conn: &Connection, user_name: &str, numbers: &[u32]) -> Result<i64> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    tx.execute(
        "INSERT INTO tickets (numbers, user_name) VALUES (?1, ?2)",
        (encode_numbers(numbers), user_name),
    )?;
    let ticket_id = tx.last_insert_rowid();
    tx.commit()?;
    Ok(ticket_id)
}

pub fn get_ticket_by_id(conn: &Connection, ticket_id: i64) -> Result<Option<Ticket>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_name, numbers, created_at FROM tickets WHERE id = ?1",
    )?;
    let row = stmt
        .query_row([ticket_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        })
        .optional()?;

    match row {
        Some((id, user_name, raw_numbers, created_at)) => Ok(Some(Ticket {
            id,
            user_name,
            numbers: decode_numbers(id, &raw_numbers)?,
            created_at: created_at.unwrap_or_default(),
        })),
        None => Ok(None),
    }
}

pub fn require_ticket(conn: &Connection, ticket_id: i64) -> Result<Ticket> {
    get_ticket_by_id(conn, ticket_id)?.ok_or(TicketingError::TicketNotFound(ticket_id))
}

pub fn count_tickets(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM tickets", [], |row| row.get(0))?;
    Ok(count)
}
