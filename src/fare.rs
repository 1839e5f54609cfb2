use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::BookingError;
use crate::model::CarType;

/// Per-passenger metro fare.
pub const METRO_RATE: u16 = 30;

/// Per-passenger cab fare when every car type costs the same.
pub const FLAT_CAB_RATE: u16 = 50;

/// Cab rates keyed by car type. An empty table is a flat rate; a car type
/// missing from a non-empty table also falls back to `base`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateTable {
    pub base: u16,
    pub by_car: BTreeMap<CarType, u16>,
}

impl RateTable {
    pub fn flat() -> Self {
        Self {
            base: FLAT_CAB_RATE,
            by_car: BTreeMap::new(),
        }
    }

    pub fn tiered() -> Self {
        Self {
            base: FLAT_CAB_RATE,
            by_car: BTreeMap::from([
                (CarType::Mini, 40),
                (CarType::Sedan, 60),
                (CarType::Suv, 90),
            ]),
        }
    }

    pub fn from_str_loose(s: &str) -> Result<Self, BookingError> {
        match s {
            "flat" => Ok(Self::flat()),
            "tiered" => Ok(Self::tiered()),
            _ => Err(BookingError::Validation(format!(
                "invalid pricing: {s} (expected flat or tiered)"
            ))),
        }
    }

    pub fn is_tiered(&self) -> bool {
        !self.by_car.is_empty()
    }

    pub fn rate(&self, car: Option<CarType>) -> u16 {
        car.and_then(|c| self.by_car.get(&c).copied())
            .unwrap_or(self.base)
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::tiered()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CabQuote {
    /// Only set when the rate table distinguishes car types.
    pub car_type: Option<CarType>,
    pub rate: u16,
    pub fare: u64,
}

/// Rates are `u16` and counts `u32`, so every fare fits in a `u64` with
/// room left for the sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FareQuote {
    pub passengers: u32,
    pub metro_rate: u16,
    pub metro_fare: u64,
    pub cab: Option<CabQuote>,
    pub grand_total: u64,
}

impl FareQuote {
    pub fn cab_fare(&self) -> u64 {
        self.cab.as_ref().map_or(0, |c| c.fare)
    }
}

pub fn compute_fare(
    passengers: u32,
    cab_requested: bool,
    car_type: Option<CarType>,
    rates: &RateTable,
) -> FareQuote {
    let metro_fare = u64::from(passengers) * u64::from(METRO_RATE);

    let cab = cab_requested.then(|| {
        let rate = rates.rate(car_type);
        CabQuote {
            car_type: if rates.is_tiered() { car_type } else { None },
            rate,
            fare: u64::from(passengers) * u64::from(rate),
        }
    });

    let cab_fare = cab.as_ref().map_or(0, |c| c.fare);

    FareQuote {
        passengers,
        metro_rate: METRO_RATE,
        metro_fare,
        cab,
        grand_total: metro_fare + cab_fare,
    }
}
