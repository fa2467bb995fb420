//! Construction type catalogue

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of structure the visitor is asking about
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConstructionType {
    HomeExtension,
    ClassicWarm,
    SeasonalCold,
    Pergola,
    NotSure,
}

impl ConstructionType {
    pub const ALL: [ConstructionType; 5] = [
        Self::HomeExtension,
        Self::ClassicWarm,
        Self::SeasonalCold,
        Self::Pergola,
        Self::NotSure,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::HomeExtension => "home-extension",
            Self::ClassicWarm => "classic-warm",
            Self::SeasonalCold => "seasonal-cold",
            Self::Pergola => "pergola",
            Self::NotSure => "not-sure",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::HomeExtension => "Home Extension",
            Self::ClassicWarm => "Klasyczny ciepły",
            Self::SeasonalCold => "Sezonowy zimny",
            Self::Pergola => "Pergola",
            Self::NotSure => "Nie wiem",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::HomeExtension => "Rozszerzenie przestrzeni mieszkalnej",
            Self::ClassicWarm => "Całoroczny, ogrzewany ogród",
            Self::SeasonalCold => "Użytkowany w ciepłych miesiącach",
            Self::Pergola => "Otwarta konstrukcja ogrodowa",
            Self::NotSure => "Pomożemy wybrać najlepsze rozwiązanie",
        }
    }
}

impl fmt::Display for ConstructionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConstructionType {
    type Err = UnknownConstructionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.id() == s)
            .ok_or_else(|| UnknownConstructionType(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownConstructionType(pub String);

impl std::error::Error for UnknownConstructionType {}

impl fmt::Display for UnknownConstructionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown construction type: {}", self.0)
    }
}
