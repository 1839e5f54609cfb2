use std::fmt;

use crate::booking::BookingInput;
use crate::config::BookingConfig;
use crate::error::BookingError;
use crate::fare::{self, FareQuote};
use crate::model::{CarType, DropLocation, Station};
use crate::table::format_inr;
use crate::ticket::{Ticket, TicketId};

pub const BOOK_METRO_AND_CAB: &str = "Book Metro & Cab";
pub const BOOK_METRO_ONLY: &str = "Book Metro Only";

/// Form state for one session. The cab toggle lives here so the cab
/// sub-form stays open across re-renders until it is explicitly declined.
#[derive(Debug, Clone)]
pub struct BookingSession {
    config: BookingConfig,
    input: BookingInput,
}

impl BookingSession {
    pub fn new(config: BookingConfig) -> Self {
        Self {
            config,
            input: BookingInput::default(),
        }
    }

    pub fn config(&self) -> &BookingConfig {
        &self.config
    }

    pub fn input(&self) -> &BookingInput {
        &self.input
    }

    pub fn cab_requested(&self) -> bool {
        self.input.cab_requested
    }

    /// Opens the cab sub-form. Like a select box, each field starts on its
    /// first option; values from an earlier toggle are kept.
    pub fn request_cab(&mut self) {
        self.input.cab_requested = true;
        self.input.drop.get_or_insert(DropLocation::ALL[0]);
        if self.config.rates.is_tiered() {
            self.input.car_type.get_or_insert(CarType::ALL[0]);
        }
    }

    pub fn decline_cab(&mut self) {
        self.input.cab_requested = false;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.input.passenger_name = name.into();
    }

    pub fn set_source(&mut self, station: Station) {
        self.input.source = station;
    }

    pub fn set_destination(&mut self, station: Station) {
        self.input.destination = station;
    }

    /// Rejects counts outside the configured bounds and keeps the previous
    /// value, so the live fare is only ever shown for a bookable count.
    pub fn set_passengers(&mut self, n: u32) -> Result<(), BookingError> {
        self.config.check_passengers(n)?;
        self.input.passengers = n;
        Ok(())
    }

    pub fn set_drop(&mut self, drop: DropLocation) {
        self.input.drop = Some(drop);
    }

    pub fn set_car_type(&mut self, car: CarType) {
        self.input.car_type = Some(car);
    }

    pub fn quote(&self) -> FareQuote {
        fare::compute_fare(
            self.input.passengers,
            self.input.cab_requested,
            self.input.car_type,
            &self.config.rates,
        )
    }

    pub fn view(&self) -> FormView {
        let cab = self.input.cab_requested.then(|| CabView {
            pickup: self.input.destination,
            drop: self.input.drop,
            car_type: self.input.car_type.filter(|_| self.config.rates.is_tiered()),
        });
        FormView {
            quote: self.quote(),
            cab,
            button_label: self.button_label(),
        }
    }

    pub fn button_label(&self) -> &'static str {
        if self.input.cab_requested {
            BOOK_METRO_AND_CAB
        } else {
            BOOK_METRO_ONLY
        }
    }

    /// Validates the current form and composes a ticket. The form itself is
    /// left untouched either way, so a failed booking can be corrected.
    pub fn book(&self, id: Option<TicketId>) -> Result<Ticket, BookingError> {
        crate::book(&self.input, &self.config, id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CabView {
    pub pickup: Station,
    pub drop: Option<DropLocation>,
    pub car_type: Option<CarType>,
}

#[derive(Debug, Clone)]
pub struct FormView {
    pub quote: FareQuote,
    pub cab: Option<CabView>,
    pub button_label: &'static str,
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Metro Fare: {}", format_inr(self.quote.metro_fare))?;
        match &self.cab {
            Some(cab) => {
                let drop = cab.drop.map_or("—", DropLocation::name);
                writeln!(f, "Cab: {} -> {drop}", cab.pickup)?;
                if let Some(car) = cab.car_type {
                    writeln!(f, "Car Type: {car}")?;
                }
                writeln!(f, "Cab Fare: {}", format_inr(self.quote.cab_fare()))?;
            }
            None => writeln!(f, "Cab Booking: Not Selected")?,
        }
        writeln!(f, "Grand Total: {}", format_inr(self.quote.grand_total))?;
        write!(f, "[{}]", self.button_label)
    }
}
