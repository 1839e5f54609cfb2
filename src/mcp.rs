use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::schemars;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt};
use serde::Deserialize;

use crate::booking::BookingInput;
use crate::config::BookingConfig;
use crate::error::BookingError;
use crate::fare::{self, FareQuote, RateTable};
use crate::model::{CarType, DropLocation, Station};
use crate::qr;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct QuoteArgs {
    #[schemars(description = "Number of passengers, 1-10. Default: 1")]
    passengers: Option<u32>,
    #[schemars(description = "Add a last-mile cab from the destination station. Default: false")]
    cab: Option<bool>,
    #[schemars(description = "Cab car type: mini, sedan or suv. Only used with tiered pricing")]
    car: Option<String>,
    #[schemars(description = "Cab pricing: tiered (mini 40, sedan 60, suv 90) or flat (50). Default: tiered")]
    pricing: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct BookArgs {
    #[schemars(description = "Passenger full name")]
    name: String,
    #[schemars(
        description = "Source station. One of: Ameerpet, KPHB, Kukatpally, Madhapur, Hitech City, Raidurg"
    )]
    from: String,
    #[schemars(description = "Destination station, must differ from the source")]
    to: String,
    #[schemars(description = "Number of passengers, 1-10. Default: 1")]
    passengers: Option<u32>,
    #[schemars(description = "Add a last-mile cab from the destination station. Default: false")]
    cab: Option<bool>,
    #[schemars(
        description = "Cab drop location, required with cab. One of: Office, Home, Shopping Mall, Hospital, College, Hotel"
    )]
    drop: Option<String>,
    #[schemars(description = "Cab car type: mini, sedan or suv. Required with cab under tiered pricing")]
    car: Option<String>,
    #[schemars(description = "Cab pricing: tiered or flat. Default: tiered")]
    pricing: Option<String>,
    #[schemars(description = "Return the ticket QR code as a PNG image. Default: true")]
    qr: Option<bool>,
}

fn tool_error(msg: impl Into<String>) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::error(vec![Content::text(msg.into())]))
}

fn parse_pricing(pricing: Option<&str>) -> Result<RateTable, BookingError> {
    pricing
        .map(RateTable::from_str_loose)
        .transpose()
        .map(Option::unwrap_or_default)
}

fn parse_car(car: Option<&str>) -> Result<Option<CarType>, BookingError> {
    car.map(CarType::from_str_loose).transpose()
}

fn quote_from_args(args: &QuoteArgs) -> Result<FareQuote, BookingError> {
    let config = BookingConfig {
        rates: parse_pricing(args.pricing.as_deref())?,
        ..Default::default()
    };
    config.validated_quote(
        args.passengers.unwrap_or(1),
        args.cab.unwrap_or(false),
        parse_car(args.car.as_deref())?,
    )
}

fn build_booking(args: &BookArgs) -> Result<(BookingInput, BookingConfig), BookingError> {
    let config = BookingConfig {
        rates: parse_pricing(args.pricing.as_deref())?,
        ..Default::default()
    };

    let input = BookingInput {
        passenger_name: args.name.clone(),
        source: Station::from_str_loose(&args.from)?,
        destination: Station::from_str_loose(&args.to)?,
        passengers: args.passengers.unwrap_or(1),
        cab_requested: args.cab.unwrap_or(false),
        drop: args
            .drop
            .as_deref()
            .map(DropLocation::from_str_loose)
            .transpose()?,
        car_type: parse_car(args.car.as_deref())?,
    };

    Ok((input, config))
}

#[derive(Debug, Clone)]
struct MetrocabMcp {
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl MetrocabMcp {
    fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Compute the fare for a metro trip with an optional last-mile cab. Returns metro fare, cab fare and grand total in rupees as JSON. Does not book anything."
    )]
    async fn metrocab_quote(
        &self,
        Parameters(args): Parameters<QuoteArgs>,
    ) -> Result<CallToolResult, McpError> {
        let quote = match quote_from_args(&args) {
            Ok(q) => q,
            Err(e) => return tool_error(e.to_string()),
        };
        match serde_json::to_string_pretty(&quote) {
            Ok(json) => Ok(CallToolResult::success(vec![Content::text(json)])),
            Err(e) => tool_error(e.to_string()),
        }
    }

    #[tool(
        description = "Book a metro ticket, optionally with a last-mile cab. Returns the ticket text, the ticket as JSON, and a QR code PNG of the ticket text. Nothing is stored; the booking id is a display label."
    )]
    async fn metrocab_book(
        &self,
        Parameters(args): Parameters<BookArgs>,
    ) -> Result<CallToolResult, McpError> {
        let (input, config) = match build_booking(&args) {
            Ok(b) => b,
            Err(e) => return tool_error(e.to_string()),
        };

        let ticket = match crate::book(&input, &config, None) {
            Ok(t) => t,
            Err(e) => return tool_error(e.to_string()),
        };

        let json = match serde_json::to_string_pretty(&ticket) {
            Ok(j) => j,
            Err(e) => return tool_error(e.to_string()),
        };

        let mut content = vec![Content::text(ticket.text.clone()), Content::text(json)];

        if args.qr.unwrap_or(true) {
            match qr::encode_png(&ticket.text) {
                Ok(png) => content.push(Content::image(STANDARD.encode(png), "image/png")),
                Err(e) => return tool_error(e.to_string()),
            }
        }

        Ok(CallToolResult::success(content))
    }

    #[tool(description = "List valid stations, cab drop locations and car types.")]
    async fn metrocab_stations(&self) -> Result<CallToolResult, McpError> {
        let catalog = serde_json::json!({
            "stations": Station::ALL,
            "drop_locations": DropLocation::ALL,
            "car_types": CarType::ALL,
            "metro_rate": fare::METRO_RATE,
            "tiered_rates": RateTable::tiered().by_car,
            "flat_rate": fare::FLAT_CAB_RATE,
        });
        Ok(CallToolResult::success(vec![Content::text(catalog.to_string())]))
    }
}

#[tool_handler]
impl ServerHandler for MetrocabMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "metrocab".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Metro and cab booking. Workflow: (1) metrocab_stations for valid names. (2) metrocab_quote to preview fares. (3) metrocab_book to issue the ticket and QR code.".into(),
            ),
        }
    }
}

pub async fn run() -> Result<(), BookingError> {
    let service = MetrocabMcp::new()
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| BookingError::Io(format!("failed to start MCP server: {e}")))?;
    service
        .waiting()
        .await
        .map_err(|e| BookingError::Io(format!("MCP server error: {e}")))?;
    Ok(())
}
