use crate::error::{Result, TicketingError};
use crate::numbers::NUMBERS_PER_SET;

/// Separator used for the `tickets.numbers` column.
pub const NUMBER_SEPARATOR: &str = ",";

pub fn encode_numbers(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(NUMBER_SEPARATOR)
}

/// Parses a stored number list. A segment that is not a base-10 `u32`, or a
/// list that is not exactly `NUMBERS_PER_SET` long, makes the record unreadable.
pub fn decode_numbers(ticket_id: i64, raw: &str) -> Result<Vec<u32>> {
    let corrupt = || TicketingError::CorruptNumbers {
        ticket_id,
        raw: raw.to_string(),
    };

    let numbers = raw
        .split(NUMBER_SEPARATOR)
        .map(|part| part.trim().parse::<u32>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| corrupt())?;

    if numbers.len() != NUMBERS_PER_SET {
        return Err(corrupt());
    }
    Ok(numbers)
}
