use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// One labelled reading, already converted to speakable text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub label: String,
    pub value: String,
}

/// Ordered label → value readings for one city.
///
/// Labels keep the position of their first insertion; inserting an existing
/// label replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    readings: Vec<WeatherReading>,
}

impl WeatherReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let label = label.into();
        let value = value.into();
        match self.readings.iter_mut().find(|r| r.label == label) {
            Some(existing) => existing.value = value,
            None => self.readings.push(WeatherReading { label, value }),
        }
    }

    pub fn readings(&self) -> &[WeatherReading] {
        &self.readings
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}
