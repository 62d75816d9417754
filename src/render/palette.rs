use plotters::style::RGBColor;
use std::str::FromStr;

use crate::error::{BestStatsError, Result};

/// Axis, tick and edge color.
pub const SILVER: RGBColor = RGBColor(192, 192, 192);

/// The seven World Bank regions a series may belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    EastAsiaPacific,
    EuropeCentralAsia,
    LatinAmericaCaribbean,
    MiddleEastNorthAfrica,
    NorthAmerica,
    SouthAsia,
    SubSaharanAfrica,
}

impl Region {
    pub const ALL: [Region; 7] = [
        Region::EastAsiaPacific,
        Region::EuropeCentralAsia,
        Region::LatinAmericaCaribbean,
        Region::MiddleEastNorthAfrica,
        Region::NorthAmerica,
        Region::SouthAsia,
        Region::SubSaharanAfrica,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Region::EastAsiaPacific => "East Asia & Pacific",
            Region::EuropeCentralAsia => "Europe & Central Asia",
            Region::LatinAmericaCaribbean => "Latin America & Caribbean",
            Region::MiddleEastNorthAfrica => "Middle East & North Africa",
            Region::NorthAmerica => "North America",
            Region::SouthAsia => "South Asia",
            Region::SubSaharanAfrica => "Sub-Saharan Africa",
        }
    }

    pub fn color(&self) -> RGBColor {
        match self {
            Region::EastAsiaPacific => RGBColor(0x1F, 0x77, 0xB4),
            Region::EuropeCentralAsia => RGBColor(0xFF, 0x7F, 0x0E),
            Region::LatinAmericaCaribbean => RGBColor(0x2C, 0xA0, 0x2C),
            Region::MiddleEastNorthAfrica => RGBColor(0xD6, 0x27, 0x28),
            Region::NorthAmerica => RGBColor(0x94, 0x67, 0xBD),
            Region::SouthAsia => RGBColor(0x8C, 0x56, 0x4B),
            Region::SubSaharanAfrica => RGBColor(0xE3, 0x77, 0xC2),
        }
    }
}

impl FromStr for Region {
    type Err = BestStatsError;

    fn from_str(s: &str) -> Result<Self> {
        Region::ALL
            .into_iter()
            .find(|r| r.label() == s.trim())
            .ok_or_else(|| BestStatsError::Configuration(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_region_round_trips_through_its_label() {
        for r in Region::ALL {
            assert_eq!(r.label().parse::<Region>().ok(), Some(r));
        }
    }

    #[test]
    fn colors_match_the_classic_palette() {
        assert_eq!(Region::EastAsiaPacific.color(), RGBColor(31, 119, 180));
        assert_eq!(Region::SubSaharanAfrica.color(), RGBColor(227, 119, 194));
    }

    #[test]
    fn unknown_region_is_a_configuration_error() {
        let err = "Atlantis".parse::<Region>().unwrap_err();
        assert!(matches!(err, BestStatsError::Configuration(ref r) if r == "Atlantis"));
    }
}
