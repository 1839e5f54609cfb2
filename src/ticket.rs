use serde::Serialize;

use crate::booking::{CabLeg, ValidBooking};
use crate::config::ArtifactLabel;
use crate::error::BookingError;
use crate::fare::FareQuote;
use crate::model::{CarType, Station};
use crate::table::format_inr;

const RULE: &str = "=============================";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl TicketId {
    pub const LEN: usize = 8;

    /// First eight hex digits of a random v4 UUID, uppercased. Only a
    /// display label, nothing looks bookings up by it.
    pub fn generate() -> Self {
        let mut id = uuid::Uuid::new_v4().simple().to_string();
        id.truncate(Self::LEN);
        Self(id.to_uppercase())
    }

    pub fn parse(s: &str) -> Result<Self, BookingError> {
        let valid = s.len() == Self::LEN
            && s
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase());
        if !valid {
            return Err(BookingError::InvalidBookingId(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Ticket {
    pub id: TicketId,
    pub passenger_name: String,
    pub source: Station,
    pub destination: Station,
    pub passengers: u32,
    pub cab: Option<CabLeg>,
    pub fare: FareQuote,
    pub text: String,
    pub announcement: String,
}

impl Ticket {
    pub fn confirmation(&self) -> &'static str {
        if self.cab.is_some() {
            "Metro + Cab Booking Confirmed!"
        } else {
            "Metro Booking Confirmed!"
        }
    }

    pub fn file_name(&self, label: ArtifactLabel, ext: &str) -> String {
        format!("{}_{}.{ext}", label.as_str(), self.id)
    }
}

pub fn compose_ticket(booking: &ValidBooking, fare: &FareQuote, id: TicketId) -> Ticket {
    let text = render_text(booking, fare, &id);
    let announcement = announcement(booking, fare);

    Ticket {
        id,
        passenger_name: booking.passenger_name().to_string(),
        source: booking.source(),
        destination: booking.destination(),
        passengers: booking.passengers(),
        cab: booking.cab().cloned(),
        fare: fare.clone(),
        text,
        announcement,
    }
}

fn render_text(booking: &ValidBooking, fare: &FareQuote, id: &TicketId) -> String {
    let mut lines: Vec<String> = Vec::new();

    let header = if booking.cab().is_some() {
        "UNIFIED METRO + CAB TICKET"
    } else {
        "METRO TICKET"
    };
    lines.push(header.to_string());
    lines.push(RULE.to_string());
    lines.push(format!("Booking ID : {id}"));
    lines.push(format!("Passenger  : {}", booking.passenger_name()));
    lines.push(String::new());

    match booking.cab() {
        Some(cab) => {
            lines.push(format!(
                "METRO : {} -> {}",
                booking.source(),
                booking.destination()
            ));
            lines.push(format!("Metro Fare : {}", format_inr(fare.metro_fare)));
            lines.push(String::new());
            lines.push(format!("CAB   : {} -> {}", cab.pickup, cab.drop));
            if let Some(car) = cab.car_type {
                lines.push(format!("Car Type   : {car}"));
            }
            lines.push(format!("Cab Fare   : {}", format_inr(fare.cab_fare())));
            lines.push(String::new());
            lines.push(format!("Passengers : {}", booking.passengers()));
        }
        None => {
            lines.push(format!(
                "Route : {} -> {}",
                booking.source(),
                booking.destination()
            ));
            lines.push(format!("Passengers : {}", booking.passengers()));
            lines.push(format!("Metro Fare : {}", format_inr(fare.metro_fare)));
        }
    }

    lines.push(format!("Total Fare : {}", format_inr(fare.grand_total)));
    lines.push(RULE.to_string());

    lines.join("\n")
}

fn car_phrase(car: Option<CarType>) -> String {
    match car {
        Some(CarType::Suv) => "an SUV cab".to_string(),
        Some(car) => format!("a {car} cab"),
        None => "a cab".to_string(),
    }
}

fn announcement(booking: &ValidBooking, fare: &FareQuote) -> String {
    let travellers = match booking.passengers() {
        1 => "1 passenger".to_string(),
        n => format!("{n} passengers"),
    };

    let mut sentence = format!(
        "Hello {}, your metro ticket from {} to {} for {travellers} is confirmed",
        booking.passenger_name(),
        booking.source(),
        booking.destination(),
    );

    if let Some(cab) = booking.cab() {
        sentence.push_str(&format!(
            ", with {} from {} to {}",
            car_phrase(cab.car_type),
            cab.pickup,
            cab.drop
        ));
    }

    sentence.push_str(&format!(". Total fare is {} rupees.", fare.grand_total));
    sentence
}
