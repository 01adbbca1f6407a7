/// A point on the globe, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Current conditions as reported by the weather API.
///
/// Every field is optional: the upstream may omit any of them and that is
/// carried through to the report and the log as an empty value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherObservation {
    /// API-supplied timestamp, kept verbatim.
    pub time: Option<String>,
    /// Degrees Celsius.
    pub temperature: Option<f64>,
    /// Kilometres per hour.
    pub windspeed: Option<f64>,
    /// Degrees, 0-360.
    pub winddirection: Option<i64>,
    /// WMO weather code.
    pub weathercode: Option<i64>,
}

/// Format a float so whole values keep their decimal point (`5.0`, not `5`).
pub(crate) fn decimal(value: f64) -> String {
    format!("{value:?}")
}
