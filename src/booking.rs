use serde::Serialize;

use crate::config::BookingConfig;
use crate::error::BookingError;
use crate::fare::{self, FareQuote, RateTable};
use crate::model::{CarType, DropLocation, Station};

/// Raw form values for one submission. Nothing here is checked yet.
#[derive(Debug, Clone)]
pub struct BookingInput {
    pub passenger_name: String,
    pub source: Station,
    pub destination: Station,
    pub passengers: u32,
    pub cab_requested: bool,
    pub drop: Option<DropLocation>,
    pub car_type: Option<CarType>,
}

impl Default for BookingInput {
    fn default() -> Self {
        Self {
            passenger_name: String::new(),
            source: Station::Ameerpet,
            destination: Station::Kphb,
            passengers: 1,
            cab_requested: false,
            drop: None,
            car_type: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CabLeg {
    pub pickup: Station,
    pub drop: DropLocation,
    pub car_type: Option<CarType>,
}

/// A submission that passed validation. Only [`BookingInput::validate`]
/// builds one, so holding it proves the checks ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidBooking {
    passenger_name: String,
    source: Station,
    destination: Station,
    passengers: u32,
    cab: Option<CabLeg>,
}

impl ValidBooking {
    pub fn passenger_name(&self) -> &str {
        &self.passenger_name
    }

    pub fn source(&self) -> Station {
        self.source
    }

    pub fn destination(&self) -> Station {
        self.destination
    }

    pub fn passengers(&self) -> u32 {
        self.passengers
    }

    pub fn cab(&self) -> Option<&CabLeg> {
        self.cab.as_ref()
    }

    pub fn quote(&self, rates: &RateTable) -> FareQuote {
        fare::compute_fare(
            self.passengers,
            self.cab.is_some(),
            self.cab.as_ref().and_then(|c| c.car_type),
            rates,
        )
    }
}

impl BookingInput {
    pub fn validate(&self, config: &BookingConfig) -> Result<ValidBooking, BookingError> {
        let name = self.passenger_name.trim();
        if name.is_empty() {
            return Err(BookingError::EmptyName);
        }

        if self.source == self.destination {
            return Err(BookingError::SameStation(self.source));
        }

        config.check_passengers(self.passengers)?;

        let cab = if self.cab_requested {
            let drop = self.drop.ok_or(BookingError::MissingDropLocation)?;
            let car_type = if config.rates.is_tiered() {
                Some(self.car_type.ok_or(BookingError::MissingCarType)?)
            } else {
                self.car_type
            };
            Some(CabLeg {
                pickup: self.destination,
                drop,
                car_type,
            })
        } else {
            None
        };

        Ok(ValidBooking {
            passenger_name: name.to_string(),
            source: self.source,
            destination: self.destination,
            passengers: self.passengers,
            cab,
        })
    }
}
