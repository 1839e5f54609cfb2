use serde::Serialize;

use crate::error::BookingError;

/// Lowercases and drops separators so `Hitech City`, `hitech-city` and
/// `HITECH_CITY` all compare equal.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Station {
    Ameerpet,
    #[serde(rename = "KPHB")]
    Kphb,
    Kukatpally,
    Madhapur,
    #[serde(rename = "Hitech City")]
    HitechCity,
    Raidurg,
}

impl Station {
    pub const ALL: [Station; 6] = [
        Self::Ameerpet,
        Self::Kphb,
        Self::Kukatpally,
        Self::Madhapur,
        Self::HitechCity,
        Self::Raidurg,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Ameerpet => "Ameerpet",
            Self::Kphb => "KPHB",
            Self::Kukatpally => "Kukatpally",
            Self::Madhapur => "Madhapur",
            Self::HitechCity => "Hitech City",
            Self::Raidurg => "Raidurg",
        }
    }

    pub fn from_str_loose(s: &str) -> Result<Self, BookingError> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|st| normalize(st.name()) == wanted)
            .ok_or_else(|| BookingError::UnknownStation(s.trim().to_string()))
    }
}

impl std::fmt::Display for Station {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DropLocation {
    Office,
    Home,
    #[serde(rename = "Shopping Mall")]
    ShoppingMall,
    Hospital,
    College,
    Hotel,
}

impl DropLocation {
    pub const ALL: [DropLocation; 6] = [
        Self::Office,
        Self::Home,
        Self::ShoppingMall,
        Self::Hospital,
        Self::College,
        Self::Hotel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Office => "Office",
            Self::Home => "Home",
            Self::ShoppingMall => "Shopping Mall",
            Self::Hospital => "Hospital",
            Self::College => "College",
            Self::Hotel => "Hotel",
        }
    }

    pub fn from_str_loose(s: &str) -> Result<Self, BookingError> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|loc| normalize(loc.name()) == wanted)
            .ok_or_else(|| BookingError::UnknownLocation(s.trim().to_string()))
    }
}

impl std::fmt::Display for DropLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CarType {
    Mini,
    Sedan,
    #[serde(rename = "SUV")]
    Suv,
}

impl CarType {
    pub const ALL: [CarType; 3] = [Self::Mini, Self::Sedan, Self::Suv];

    pub fn name(self) -> &'static str {
        match self {
            Self::Mini => "Mini",
            Self::Sedan => "Sedan",
            Self::Suv => "SUV",
        }
    }

    pub fn from_str_loose(s: &str) -> Result<Self, BookingError> {
        match normalize(s).as_str() {
            "mini" => Ok(Self::Mini),
            "sedan" => Ok(Self::Sedan),
            "suv" => Ok(Self::Suv),
            _ => Err(BookingError::UnknownCarType(s.trim().to_string())),
        }
    }
}

impl std::fmt::Display for CarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
