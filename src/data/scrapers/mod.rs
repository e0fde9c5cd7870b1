//! Web scrapers for fixture data

pub mod heartsfc;

/// Blocking HTTP client shared by all scrapers
pub fn http_client() -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .user_agent("hearts-scraper/0.1")
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .expect("Failed to create HTTP client")
}
