// scraper.rs
use crate::config::MuseumConfig;
use crate::scraper::{Calendar, CalendarResponse, ScraperError};
use reqwest::blocking::Client;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, ORIGIN, REFERER,
    UPGRADE_INSECURE_REQUESTS,
};
use std::path::Path;
use tracing::{error, info, warn};
use url::Url;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const SEC_FETCH_DEST: &str = "sec-fetch-dest";
const SEC_FETCH_MODE: &str = "sec-fetch-mode";
const SEC_FETCH_SITE: &str = "sec-fetch-site";
const SEC_CH_UA: &str = "sec-ch-ua";
const SEC_CH_UA_MOBILE: &str = "sec-ch-ua-mobile";
const SEC_CH_UA_PLATFORM: &str = "sec-ch-ua-platform";
const X_REQUESTED_WITH: &str = "x-requested-with";

/// Browser-looking client for the ticketing site. The cookie store carries
/// the session from the calendar page over to the JSON API.
pub struct MuseumScraper {
    client: Client,
    cfg: MuseumConfig,
}

impl MuseumScraper {
    pub fn new(cfg: &MuseumConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(Self::default_headers(cfg)?)
            .cookie_store(true)
            .timeout(cfg.timeout)
            .build()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        Ok(Self {
            client,
            cfg: cfg.clone(),
        })
    }

    /// Headers sent on every request. Per-request headers win over these.
    fn default_headers(cfg: &MuseumConfig) -> Result<HeaderMap, ScraperError> {
        let page_url = HeaderValue::from_str(&cfg.calendar_page_url())
            .map_err(|e| ScraperError::Network(format!("invalid referer: {e}")))?;
        let origin = HeaderValue::from_str(&cfg.base_url)
            .map_err(|e| ScraperError::Network(format!("invalid origin: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(REFERER, page_url);
        headers.insert(ORIGIN, origin);
        headers.insert(SEC_FETCH_SITE, HeaderValue::from_static("same-origin"));
        headers.insert(
            SEC_CH_UA,
            HeaderValue::from_static(
                r#""Not_A Brand";v="8", "Chromium";v="120", "Google Chrome";v="120""#,
            ),
        );
        headers.insert(SEC_CH_UA_MOBILE, HeaderValue::from_static("?0"));
        headers.insert(SEC_CH_UA_PLATFORM, HeaderValue::from_static(r#""macOS""#));
        Ok(headers)
    }

    fn navigation_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(SEC_FETCH_DEST, HeaderValue::from_static("document"));
        headers.insert(SEC_FETCH_MODE, HeaderValue::from_static("navigate"));
        headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
        headers
    }

    fn api_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(SEC_FETCH_DEST, HeaderValue::from_static("empty"));
        headers.insert(SEC_FETCH_MODE, HeaderValue::from_static("cors"));
        headers.insert(X_REQUESTED_WITH, HeaderValue::from_static("XMLHttpRequest"));
        headers
    }

    /// Loads the public calendar page so the site hands out its session cookies.
    pub fn visit_main_page(&self) -> Result<(), ScraperError> {
        let url = self.cfg.calendar_page_url();
        info!("🌐 Visiting main page: {url}");

        let resp = self
            .client
            .get(&url)
            .headers(Self::navigation_headers())
            .send()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        let status = resp.status();
        // Body has to be drained for the cookies to be kept.
        resp.bytes()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ScraperError::Http {
                status: status.as_u16(),
                body: String::new(),
            });
        }
        Ok(())
    }

    pub fn api_url(&self, year: i32, month: u32) -> Result<Url, ScraperError> {
        Url::parse_with_params(
            &self.cfg.calendar_api_url(),
            &[
                ("target_year", year.to_string()),
                ("target_month", month.to_string()),
            ],
        )
        .map_err(|e| ScraperError::Network(format!("invalid API url: {e}")))
    }

    pub fn fetch_month(&self, year: i32, month: u32) -> Result<CalendarResponse, ScraperError> {
        let url = self.api_url(year, month)?;
        info!("📅 Fetching data from: {url}");

        let resp = self
            .client
            .get(url.clone())
            .headers(Self::api_headers())
            .send()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        if resp.url() != &url {
            warn!("Request was redirected to: {}", resp.url());
        }

        let status = resp.status();
        let response_headers = resp.headers().clone();
        let text = resp
            .text()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("HTTP Error: {status}");
            error!("Response Headers: {response_headers:?}");
            error!("Response Body: {text}");
            return Err(ScraperError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            error!("Error decoding JSON: {e}");
            error!("Raw Response Body START\n{text}\nRaw Response Body END");
            ScraperError::JsonParse(e.to_string())
        })
    }

    /// Fetches each month in order and merges whatever parsed. A failed month
    /// is logged and skipped.
    pub fn fetch_months(&self, year: i32, months: &[u32]) -> Calendar {
        if let Err(e) = self.visit_main_page() {
            // The API sometimes answers without the session, so keep going.
            warn!("⚠️ Error visiting main page: {e}");
        }

        let mut merged = Calendar::new();
        for &month in months {
            match self
                .fetch_month(year, month)
                .and_then(CalendarResponse::into_calendar)
            {
                Ok(days) => {
                    info!("✅ {year}-{month:02}: {} day(s)", days.len());
                    merged.extend(days);
                }
                Err(e) => warn!("⚠️ Skipping {year}-{month:02}: {e}"),
            }
        }
        merged
    }
}

pub fn load_calendar_file(path: &Path) -> Result<CalendarResponse, ScraperError> {
    info!("📂 Loading data from file: {}", path.display());

    if !path.exists() {
        return Err(ScraperError::FileNotFound(path.display().to_string()));
    }

    let raw = std::fs::read_to_string(path).map_err(|e| ScraperError::IoError(e.to_string()))?;
    serde_json::from_str(&raw).map_err(|e| {
        ScraperError::JsonParse(format!("failed to decode '{}': {e}", path.display()))
    })
}
