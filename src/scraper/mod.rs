mod models;
mod scraper;
mod scraper_error;

pub use models::{Calendar, CalendarResponse, DayStatus};
pub use scraper::{load_calendar_file, MuseumScraper};
pub use scraper_error::ScraperError;
