mod utils;

mod bluesky_tests;
mod scraper_tests;
