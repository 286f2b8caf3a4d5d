pub mod launcher;
pub mod urls;

pub use launcher::SystemBrowser;
pub use urls::{has_polish_diacritics, SearchEngine};
