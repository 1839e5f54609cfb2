use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::fare::{FareQuote, RateTable};
use crate::model::{CarType, DropLocation, Station};

pub fn format_inr(amount: u64) -> String {
    format!("₹{amount}")
}

pub fn render_quote(quote: &FareQuote) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Leg", "Per passenger", "Passengers", "Fare"]);

    table.add_row(vec![
        "Metro".to_string(),
        format_inr(u64::from(quote.metro_rate)),
        quote.passengers.to_string(),
        format_inr(quote.metro_fare),
    ]);

    match &quote.cab {
        Some(cab) => {
            let leg = match cab.car_type {
                Some(car) => format!("Cab ({car})"),
                None => "Cab".to_string(),
            };
            table.add_row(vec![
                leg,
                format_inr(u64::from(cab.rate)),
                quote.passengers.to_string(),
                format_inr(cab.fare),
            ]);
        }
        None => {
            table.add_row(vec![
                "Cab (not selected)".to_string(),
                format_inr(0),
                "0".to_string(),
                format_inr(0),
            ]);
        }
    }

    table.add_row(vec![
        "Grand Total".to_string(),
        String::new(),
        String::new(),
        format_inr(quote.grand_total),
    ]);

    table.to_string()
}

pub fn render_catalog(rates: &RateTable) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Stations", "Drop locations", "Cab", "Rate"]);

    let cars: Vec<(String, u16)> = if rates.is_tiered() {
        CarType::ALL
            .iter()
            .map(|c| (c.to_string(), rates.rate(Some(*c))))
            .collect()
    } else {
        vec![("Any (flat)".to_string(), rates.base)]
    };

    for i in 0..Station::ALL.len().max(DropLocation::ALL.len()) {
        let station = Station::ALL.get(i).map(|s| s.to_string()).unwrap_or_default();
        let location = DropLocation::ALL
            .get(i)
            .map(|l| l.to_string())
            .unwrap_or_default();
        let (car, rate) = match cars.get(i) {
            Some((car, rate)) => (car.clone(), format_inr(u64::from(*rate))),
            None => (String::new(), String::new()),
        };
        table.add_row(vec![station, location, car, rate]);
    }

    table.to_string()
}
