//! AQI severity bands and their display colors.
//!
//! | AQI       | Band                           |
//! |-----------|--------------------------------|
//! | 0 - 50    | Good                           |
//! | 51 - 100  | Moderate                       |
//! | 101 - 150 | Unhealthy for Sensitive Groups |
//! | 151 - 200 | Unhealthy                      |
//! | 201 - 300 | Very Unhealthy                 |
//! | 301 +     | Hazardous                      |

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityBand {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
    /// Negative values; AirNow uses `-1` when no index could be computed.
    ///
    /// These are not folded into `Good` even though they sit below 50.
    Unclassified,
}

impl SeverityBand {
    pub fn from_aqi(aqi: i64) -> Self {
        match aqi {
            i64::MIN..=-1 => Self::Unclassified,
            0..=50 => Self::Good,
            51..=100 => Self::Moderate,
            101..=150 => Self::UnhealthyForSensitiveGroups,
            151..=200 => Self::Unhealthy,
            201..=300 => Self::VeryUnhealthy,
            _ => Self::Hazardous,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Good => "#00e400",
            Self::Moderate => "#ffff00",
            Self::UnhealthyForSensitiveGroups => "#ff7e00",
            Self::Unhealthy => "#ff0000",
            Self::VeryUnhealthy => "#99004c",
            Self::Hazardous => "#7e0023",
            Self::Unclassified => "gray",
        }
    }
}

pub fn score_color(aqi: i64) -> &'static str {
    SeverityBand::from_aqi(aqi).color()
}
