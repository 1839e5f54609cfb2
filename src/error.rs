use std::fmt;

use crate::model::Station;

#[derive(Debug)]
pub enum BookingError {
    EmptyName,
    SameStation(Station),
    NoPassengers,
    TooManyPassengers { count: u32, max: u32 },
    MissingDropLocation,
    MissingCarType,
    UnknownStation(String),
    UnknownLocation(String),
    UnknownCarType(String),
    InvalidBookingId(String),
    Validation(String),
    QrEncode(String),
    ImageEncode(String),
    Io(String),
    Timeout,
    ConnectionFailed(String),
    ProxyError(String),
    TlsError(String),
    RateLimited,
    HttpStatus(u16),
}

impl BookingError {
    /// True for errors caused by what the user typed, as opposed to a
    /// collaborator failing.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyName
                | Self::SameStation(_)
                | Self::NoPassengers
                | Self::TooManyPassengers { .. }
                | Self::MissingDropLocation
                | Self::MissingCarType
                | Self::UnknownStation(_)
                | Self::UnknownLocation(_)
                | Self::UnknownCarType(_)
                | Self::InvalidBookingId(_)
                | Self::Validation(_)
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::SameStation(_) => "same_station",
            Self::NoPassengers => "no_passengers",
            Self::TooManyPassengers { .. } => "too_many_passengers",
            Self::MissingDropLocation => "missing_drop_location",
            Self::MissingCarType => "missing_car_type",
            Self::UnknownStation(_) => "unknown_station",
            Self::UnknownLocation(_) => "unknown_location",
            Self::UnknownCarType(_) => "unknown_car_type",
            Self::InvalidBookingId(_) => "invalid_booking_id",
            Self::Validation(_) => "validation_error",
            Self::QrEncode(_) => "qr_error",
            Self::ImageEncode(_) => "image_error",
            Self::Io(_) => "io_error",
            Self::Timeout => "timeout",
            Self::ConnectionFailed(_) => "connection_failed",
            Self::ProxyError(_) => "proxy_error",
            Self::TlsError(_) => "tls_error",
            Self::RateLimited => "rate_limited",
            Self::HttpStatus(_) => "http_error",
        }
    }
}

impl fmt::Display for BookingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "passenger name is required"),
            Self::SameStation(station) => write!(
                f,
                "source and destination cannot be the same (both are {station})"
            ),
            Self::NoPassengers => write!(f, "at least one passenger required"),
            Self::TooManyPassengers { count, max } => write!(
                f,
                "passenger count ({count}) exceeds maximum of {max}"
            ),
            Self::MissingDropLocation => write!(
                f,
                "drop location is required when a cab is requested — pass --drop \
                 (e.g. --drop office)"
            ),
            Self::MissingCarType => write!(
                f,
                "car type is required for tiered cab pricing — pass --car mini, sedan or suv"
            ),
            Self::UnknownStation(name) => write!(
                f,
                "unknown station \"{name}\" — run `metrocab stations` to list valid stations"
            ),
            Self::UnknownLocation(name) => write!(
                f,
                "unknown drop location \"{name}\" — run `metrocab stations` to list valid locations"
            ),
            Self::UnknownCarType(name) => write!(
                f,
                "unknown car type \"{name}\" — must be one of mini, sedan, suv"
            ),
            Self::InvalidBookingId(id) => write!(
                f,
                "invalid booking id \"{id}\" — must be exactly 8 uppercase letters or digits"
            ),
            Self::Validation(msg) => write!(f, "{msg}"),
            Self::QrEncode(detail) => write!(
                f,
                "failed to encode ticket as QR code ({detail})"
            ),
            Self::ImageEncode(detail) => write!(f, "failed to write QR image as PNG ({detail})"),
            Self::Io(detail) => write!(f, "failed to write ticket files ({detail})"),
            Self::Timeout => write!(
                f,
                "speech request timed out — try increasing --timeout or drop --voice"
            ),
            Self::ConnectionFailed(detail) => write!(
                f,
                "connection failed — speech synthesis needs internet access ({detail})"
            ),
            Self::ProxyError(detail) => write!(
                f,
                "proxy error — check your --proxy URL is correct ({detail})"
            ),
            Self::TlsError(detail) => write!(
                f,
                "TLS/SSL error — connection to the speech service failed ({detail})"
            ),
            Self::RateLimited => write!(
                f,
                "rate limited by the speech service (HTTP 429) — wait a few minutes before retrying"
            ),
            Self::HttpStatus(status) => write!(
                f,
                "unexpected HTTP status {status} from the speech service"
            ),
        }
    }
}

impl std::error::Error for BookingError {}

impl From<std::io::Error> for BookingError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

pub fn from_http_error(err: wreq::Error) -> BookingError {
    if err.is_timeout() {
        return BookingError::Timeout;
    }

    if err.is_connect() {
        return BookingError::ConnectionFailed(err.to_string());
    }

    classify_http_message(err.to_string())
}

/// The transport only flags timeouts and connect failures; proxy and TLS
/// problems are recognised from the message text.
fn classify_http_message(msg: String) -> BookingError {
    let lower = msg.to_lowercase();

    if lower.contains("proxy") || lower.contains("socks") {
        return BookingError::ProxyError(msg);
    }

    if lower.contains("tls") || lower.contains("ssl") || lower.contains("certificate") {
        return BookingError::TlsError(msg);
    }

    // An unparseable --proxy URL surfaces as a builder error.
    if lower.contains("builder error") && lower.contains("uri") {
        return BookingError::ProxyError(msg);
    }

    BookingError::ConnectionFailed(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(msg: &str) -> BookingError {
        classify_http_message(msg.to_string())
    }

    #[test]
    fn proxy_messages() {
        assert!(matches!(classify("error sending request: Proxy refused"), BookingError::ProxyError(_)));
        assert!(matches!(classify("SOCKS handshake failed"), BookingError::ProxyError(_)));
        assert!(matches!(classify("builder error for uri socks6://x"), BookingError::ProxyError(_)));
    }

    #[test]
    fn tls_messages() {
        assert!(matches!(classify("tls handshake eof"), BookingError::TlsError(_)));
        assert!(matches!(classify("invalid peer certificate"), BookingError::TlsError(_)));
        assert!(matches!(classify("SSL routines failed"), BookingError::TlsError(_)));
    }

    #[test]
    fn everything_else_is_a_connection_failure() {
        match classify("connection reset by peer") {
            BookingError::ConnectionFailed(msg) => assert_eq!(msg, "connection reset by peer"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(classify("builder error"), BookingError::ConnectionFailed(_)));
    }

    #[test]
    fn classified_errors_keep_network_kinds() {
        assert_eq!(classify("socks").kind(), "proxy_error");
        assert!(!classify("tls").is_input_error());
    }
}
