pub mod api;
pub mod client;
pub mod config;
pub mod connection;
pub mod database;
pub mod draw_state;
pub mod error;
pub mod logger;
pub mod numbers;
pub mod types;
pub mod use_cases;
pub mod utils;

pub use api::router;
pub use client::TicketingClient;
pub use connection::TicketStore;
pub use draw_state::{DrawSnapshot, DrawState};
pub use error::{Result, TicketingError};
pub use numbers::{NUMBERS_PER_SET, NumberGenerator, NumberRange, NumberSource};
pub use types::*;
pub use use_cases::TicketingUseCase;
