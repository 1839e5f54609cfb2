use serde::Serialize;

use crate::error::BookingError;
use crate::fare::{self, FareQuote, RateTable};
use crate::model::CarType;

pub const DEFAULT_MAX_PASSENGERS: u32 = 10;

/// File-name prefix for exported artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ArtifactLabel {
    #[default]
    Ticket,
    Journey,
}

impl ArtifactLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ticket => "Ticket",
            Self::Journey => "Journey",
        }
    }

    pub fn from_str_loose(s: &str) -> Result<Self, BookingError> {
        match s {
            "ticket" => Ok(Self::Ticket),
            "journey" => Ok(Self::Journey),
            _ => Err(BookingError::Validation(format!(
                "invalid label: {s} (expected ticket or journey)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingConfig {
    pub rates: RateTable,
    /// `None` leaves the passenger count unbounded.
    pub max_passengers: Option<u32>,
    pub label: ArtifactLabel,
}

impl BookingConfig {
    pub fn check_passengers(&self, passengers: u32) -> Result<(), BookingError> {
        if passengers == 0 {
            return Err(BookingError::NoPassengers);
        }
        if let Some(max) = self.max_passengers {
            if passengers > max {
                return Err(BookingError::TooManyPassengers {
                    count: passengers,
                    max,
                });
            }
        }
        Ok(())
    }

    /// Prices a trip without a passenger or route, applying the same
    /// count and car-type checks as a booking.
    pub fn validated_quote(
        &self,
        passengers: u32,
        cab: bool,
        car: Option<CarType>,
    ) -> Result<FareQuote, BookingError> {
        self.check_passengers(passengers)?;
        if cab && car.is_none() && self.rates.is_tiered() {
            return Err(BookingError::MissingCarType);
        }
        Ok(fare::compute_fare(passengers, cab, car, &self.rates))
    }

    /// Maps the CLI convention of `0 = unbounded` onto `max_passengers`.
    pub fn with_max_passengers(mut self, max: u32) -> Self {
        self.max_passengers = (max > 0).then_some(max);
        self
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            rates: RateTable::default(),
            max_passengers: Some(DEFAULT_MAX_PASSENGERS),
            label: ArtifactLabel::default(),
        }
    }
}
