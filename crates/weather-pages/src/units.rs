use serde::Serialize;

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Fahrenheit display label for a Celsius reading, rounded to the nearest degree.
///
/// Halves round up (`-8.5` -> `-8`) and a result of zero never prints a sign.
pub fn fahrenheit_label(celsius: f64) -> String {
    let rounded = (celsius_to_fahrenheit(celsius) + 0.5).floor();
    format!("{}°F", rounded + 0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComfortBand {
    Unknown,
    Dry,
    Comfortable,
    Moderate,
    High,
}

impl ComfortBand {
    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Dry => "Dry",
            Self::Comfortable => "Comfortable",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

pub fn humidity_comfort_band(humidity: Option<f64>) -> ComfortBand {
    let Some(value) = humidity.filter(|value| value.is_finite()) else {
        return ComfortBand::Unknown;
    };

    match value {
        v if !(0.0..=100.0).contains(&v) => ComfortBand::Unknown,
        v if v < 30.0 => ComfortBand::Dry,
        v if v < 50.0 => ComfortBand::Comfortable,
        v if v < 70.0 => ComfortBand::Moderate,
        _ => ComfortBand::High,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompassPoint {
    N,
    Nne,
    Ne,
    Ene,
    E,
    Ese,
    Se,
    Sse,
    S,
    Ssw,
    Sw,
    Wsw,
    W,
    Wnw,
    Nw,
    Nnw,
}

const COMPASS: [(&str, CompassPoint); 16] = [
    ("N", CompassPoint::N),
    ("NNE", CompassPoint::Nne),
    ("NE", CompassPoint::Ne),
    ("ENE", CompassPoint::Ene),
    ("E", CompassPoint::E),
    ("ESE", CompassPoint::Ese),
    ("SE", CompassPoint::Se),
    ("SSE", CompassPoint::Sse),
    ("S", CompassPoint::S),
    ("SSW", CompassPoint::Ssw),
    ("SW", CompassPoint::Sw),
    ("WSW", CompassPoint::Wsw),
    ("W", CompassPoint::W),
    ("WNW", CompassPoint::Wnw),
    ("NW", CompassPoint::Nw),
    ("NNW", CompassPoint::Nnw),
];

impl CompassPoint {
    /// Exact, case-sensitive match on the 16 standard codes.
    pub fn from_code(code: &str) -> Option<Self> {
        COMPASS
            .iter()
            .find(|(label, _)| *label == code)
            .map(|(_, point)| *point)
    }

    pub fn degrees(self) -> f64 {
        let index = COMPASS
            .iter()
            .position(|(_, point)| *point == self)
            .unwrap_or(0);
        index as f64 * 22.5
    }
}

/// Unknown or missing codes map to 0° (north).
pub fn compass_direction_to_degrees(code: Option<&str>) -> f64 {
    code.and_then(CompassPoint::from_code)
        .map(CompassPoint::degrees)
        .unwrap_or(0.0)
}
