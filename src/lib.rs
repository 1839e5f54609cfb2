pub mod booking;
pub mod config;
pub mod error;
pub mod export;
pub mod fare;
pub mod form;
pub mod mcp;
pub mod model;
pub mod qr;
pub mod session;
pub mod speech;
pub mod table;
pub mod ticket;

use booking::BookingInput;
use config::BookingConfig;
use error::BookingError;
use ticket::{Ticket, TicketId};

/// Validates `input`, prices it and composes the ticket. A fresh id is
/// generated unless one is supplied.
pub fn book(
    input: &BookingInput,
    config: &BookingConfig,
    id: Option<TicketId>,
) -> Result<Ticket, BookingError> {
    let valid = input.validate(config)?;
    let quote = valid.quote(&config.rates);
    tracing::debug!(?quote, "priced booking");
    let id = id.unwrap_or_else(TicketId::generate);
    Ok(ticket::compose_ticket(&valid, &quote, id))
}
