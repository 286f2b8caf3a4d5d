//! Weather lookups for the "sprawdź pogodę" command.

pub mod client;
pub mod stations;

pub use client::{ImgwClient, DEFAULT_ENDPOINT};
pub use stations::{report_for_city, spoken_number};
