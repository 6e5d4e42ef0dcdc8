use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Shared blocking client. The timeout only applies to the first call that builds it.
pub fn http_client(timeout: Option<Duration>) -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")
    })
}

pub fn fetch_text(client: &Client, url: &str) -> Result<String> {
    let resp = client
        .get(url)
        .header(USER_AGENT, "hoops_panels/0.1")
        .send()
        .context("request failed")?;
    let status = resp.status();
    if !status.is_success() {
        return Err(anyhow!("Failed to fetch player data: {}", status));
    }
    resp.text().context("failed reading body")
}
