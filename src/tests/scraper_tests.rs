// src/tests/scraper_tests.rs
use crate::config::MuseumConfig;
use crate::scraper::{load_calendar_file, MuseumScraper, ScraperError};
use crate::tests::utils::CALENDAR_FIXTURE;
use mockito::{Matcher, Server};
use std::io::Write;
use std::time::Duration;

fn scraper_for(server: &Server) -> MuseumScraper {
    let cfg = MuseumConfig {
        base_url: server.url(),
        timeout: Duration::from_secs(5),
    };
    MuseumScraper::new(&cfg).expect("client builds")
}

fn month_query(year: &str, month: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("target_year".into(), year.into()),
        Matcher::UrlEncoded("target_month".into(), month.into()),
    ])
}

#[test]
fn session_cookie_from_page_is_sent_to_api() {
    let mut server = Server::new();

    let page = server
        .mock("GET", "/en/calendar")
        .match_header("upgrade-insecure-requests", "1")
        .match_header("sec-fetch-mode", "navigate")
        .with_status(200)
        .with_header("set-cookie", "museum_session=abc123; Path=/")
        .with_body("<html><body>calendar</body></html>")
        .create();

    let api = server
        .mock("GET", "/en/api/calendar")
        .match_query(month_query("2026", "2"))
        .match_header("cookie", Matcher::Regex("museum_session=abc123".into()))
        .match_header("x-requested-with", "XMLHttpRequest")
        .match_header("accept", "application/json, text/plain, */*")
        .match_header("sec-fetch-mode", "cors")
        .match_header("upgrade-insecure-requests", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CALENDAR_FIXTURE)
        .create();

    let calendar = scraper_for(&server).fetch_months(2026, &[2]);

    page.assert();
    api.assert();
    assert_eq!(calendar.len(), 9);
    assert_eq!(calendar.keys().next().map(String::as_str), Some("2026-02-01"));
}

#[test]
fn failed_page_visit_does_not_stop_the_fetch() {
    let mut server = Server::new();

    let page = server.mock("GET", "/en/calendar").with_status(500).create();
    let api = server
        .mock("GET", "/en/api/calendar")
        .match_query(month_query("2026", "2"))
        .with_status(200)
        .with_body(CALENDAR_FIXTURE)
        .create();

    let calendar = scraper_for(&server).fetch_months(2026, &[2]);

    page.assert();
    api.assert();
    assert_eq!(calendar.len(), 9);
}

#[test]
fn months_are_merged_and_failures_skipped() {
    let mut server = Server::new();

    server.mock("GET", "/en/calendar").with_status(200).create();
    server
        .mock("GET", "/en/api/calendar")
        .match_query(month_query("2026", "3"))
        .with_status(200)
        .with_body(r#"{"data":{"calendar":{"2026-03-01":{"apply_type":3,"sale_status":1,"open_status":1}}}}"#)
        .create();
    server
        .mock("GET", "/en/api/calendar")
        .match_query(month_query("2026", "4"))
        .with_status(503)
        .with_body("maintenance")
        .create();
    server
        .mock("GET", "/en/api/calendar")
        .match_query(month_query("2026", "2"))
        .with_status(200)
        .with_body(r#"{"data":{"calendar":{"2026-02-28":{"apply_type":2,"sale_status":2,"open_status":1}}}}"#)
        .create();

    let calendar = scraper_for(&server).fetch_months(2026, &[3, 4, 2]);

    let dates: Vec<&str> = calendar.keys().map(String::as_str).collect();
    assert_eq!(dates, vec!["2026-02-28", "2026-03-01"]);
}

#[test]
fn http_error_carries_status_and_body() {
    let mut server = Server::new();
    server
        .mock("GET", "/en/api/calendar")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body("blocked")
        .create();

    let err = scraper_for(&server).fetch_month(2026, 5).unwrap_err();
    match err {
        ScraperError::Http { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "blocked");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[test]
fn html_instead_of_json_is_a_parse_error() {
    let mut server = Server::new();
    server
        .mock("GET", "/en/api/calendar")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>Please enable JavaScript</html>")
        .create();

    let err = scraper_for(&server).fetch_month(2026, 5).unwrap_err();
    assert!(matches!(err, ScraperError::JsonParse(_)));
}

#[test]
fn wrong_shape_is_reported_after_parsing() {
    let mut server = Server::new();
    server
        .mock("GET", "/en/api/calendar")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"data":{"days":[]}}"#)
        .create();

    let err = scraper_for(&server)
        .fetch_month(2026, 5)
        .and_then(|r| r.into_calendar())
        .unwrap_err();
    assert!(matches!(err, ScraperError::UnexpectedShape(_)));
}

#[test]
fn api_url_has_year_and_month_query() {
    let server = Server::new();
    let url = scraper_for(&server).api_url(2026, 11).unwrap();

    assert_eq!(url.path(), "/en/api/calendar");
    assert_eq!(url.query(), Some("target_year=2026&target_month=11"));
}

#[test]
fn load_calendar_file_reads_fixture() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CALENDAR_FIXTURE.as_bytes()).unwrap();

    let calendar = load_calendar_file(file.path())
        .unwrap()
        .into_calendar()
        .unwrap();
    assert_eq!(calendar.len(), 9);
}

#[test]
fn load_calendar_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    assert!(matches!(
        load_calendar_file(&missing),
        Err(ScraperError::FileNotFound(_))
    ));

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{not json").unwrap();
    assert!(matches!(
        load_calendar_file(&bad),
        Err(ScraperError::JsonParse(_))
    ));
}
