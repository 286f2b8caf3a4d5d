//! Station records → spoken weather readings.

use mowa_core::WeatherReport;
use serde_json::Value;

/// `(field, label, unit suffix)` for every reading read from a station.
const READINGS: &[(&str, &str, &str)] = &[
    ("temperatura_gruntu", "Temperatura", " stopni Celsjusza"),
    ("wiatr_srednia_predkosc", "Wiatr", " metrów na sekundę"),
    ("opad_10min", "Opad", " milimetrów"),
];

/// Make a measurement readable by speech synthesis: `-3.5` → `minus 3 i 5`.
pub fn spoken_number(text: &str) -> String {
    text.replace('-', "minus ").replace('.', " i ")
}

fn field_text(station: &Value, field: &str) -> Option<String> {
    match station.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Readings from every station whose name contains `city`, ignoring case.
///
/// Stations are visited in order; a later match overwrites readings set by an
/// earlier one. Missing or null fields are skipped.
pub fn report_for_city(stations: &[Value], city: &str) -> WeatherReport {
    let needle = city.to_lowercase();
    let mut report = WeatherReport::new();

    for station in stations {
        let Some(name) = station.get("nazwa_stacji").and_then(Value::as_str) else {
            continue;
        };
        if !name.to_lowercase().contains(&needle) {
            continue;
        }
        for (field, label, suffix) in READINGS {
            if let Some(value) = field_text(station, field) {
                report.insert(*label, spoken_number(&format!("{value}{suffix}")));
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stations() -> Vec<Value> {
        vec![
            json!({
                "nazwa_stacji": "WARSZAWA-BIELANY",
                "temperatura_gruntu": "-1.5",
                "wiatr_srednia_predkosc": "3",
                "opad_10min": null,
            }),
            json!({
                "nazwa_stacji": "KRAKÓW-BALICE",
                "temperatura_gruntu": "4.2",
                "wiatr_srednia_predkosc": "2.0",
                "opad_10min": "0",
            }),
            json!({
                "nazwa_stacji": "WARSZAWA-OKĘCIE",
                "temperatura_gruntu": null,
                "wiatr_srednia_predkosc": 5,
            }),
        ]
    }

    fn value<'a>(report: &'a WeatherReport, label: &str) -> Option<&'a str> {
        report
            .readings()
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
    }

    #[test]
    fn speakable_numbers() {
        assert_eq!(spoken_number("-3.5 stopni"), "minus 3 i 5 stopni");
        assert_eq!(spoken_number("12"), "12");
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let report = report_for_city(&stations(), "kraków");
        assert_eq!(value(&report, "Temperatura"), Some("4 i 2 stopni Celsjusza"));
        assert_eq!(value(&report, "Wiatr"), Some("2 i 0 metrów na sekundę"));
        assert_eq!(value(&report, "Opad"), Some("0 milimetrów"));
    }

    #[test]
    fn later_station_overwrites_in_place() {
        let report = report_for_city(&stations(), "Warszawa");
        let labels: Vec<_> = report.readings().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["Temperatura", "Wiatr"]);
        assert_eq!(value(&report, "Temperatura"), Some("minus 1 i 5 stopni Celsjusza"));
        assert_eq!(value(&report, "Wiatr"), Some("5 metrów na sekundę"));
    }

    #[test]
    fn unknown_city_gives_empty_report() {
        assert!(report_for_city(&stations(), "Atlantyda").is_empty());
    }

    #[test]
    fn station_without_name_is_skipped() {
        let stations = vec![json!({"temperatura_gruntu": "1"})];
        assert!(report_for_city(&stations, "").is_empty());
    }
}
