//! Blocking HTTP client implementation for the catalog

use crate::errors::SfplError;
use log::debug;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::{StatusCode, redirect};
use std::time::Duration;

/// Create a configured HTTP client for catalog operations
///
/// Cookies persist across every request made with the returned client and
/// redirects are not followed, so the login redirect stays visible.
///
/// # Arguments
/// * `useragent` - User-Agent header sent with every request
/// * `timeout` - per-request timeout, `None` waits forever
///
/// # Example
/// ```no_run
/// use sfpl_api::networking::create_client;
/// let client = create_client("test", None).expect("Failed to create client");
/// ```
pub fn create_client(useragent: &str, timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
    Client::builder()
        .redirect(redirect::Policy::none())
        .cookie_store(true)
        .timeout(timeout)
        .user_agent(useragent)
        .build()
}

/// Get the requested URL with the provided client
///
/// # Arguments
/// * `url` - fully qualified URL to fetch
/// * `client` - reqwest Client to use
///
/// # Returns
/// * the page body when the server answered 200
///
/// # Example
/// ```no_run
/// use sfpl_api::networking::{create_client, get_page};
/// let client = create_client("test", None).unwrap();
/// let body = get_page("https://sflib1.sfpl.org/", &client);
/// ```
pub fn get_page(url: &str, client: &Client) -> Result<String, SfplError> {
    ensure_fully_qualified(url)?;
    read_page(url, client.get(url))
}

/// Post an empty form to the requested URL, same contract as [`get_page`]
pub fn post_page(url: &str, client: &Client) -> Result<String, SfplError> {
    ensure_fully_qualified(url)?;
    read_page(url, client.post(url))
}

/// A root-relative URL here means the caller forgot to add the host.
fn ensure_fully_qualified(url: &str) -> Result<(), SfplError> {
    if url.starts_with('/') {
        return Err(SfplError::ValidationError(format!(
            "{} is not a fully qualified URL",
            url
        )));
    }
    Ok(())
}

fn read_page(url: &str, request: RequestBuilder) -> Result<String, SfplError> {
    debug!("Did request to {}", url);
    let response = request.send()?;
    debug!("{} answered {}", url, response.status());

    match response.status() {
        StatusCode::OK => Ok(response.text()?),
        status => Err(SfplError::UnexpectedStatus(status.as_u16())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_relative_urls_are_refused_before_any_request() {
        let client = create_client("test", None).unwrap();
        let err = get_page("/patroninfo~S1/2053479/items", &client).unwrap_err();
        assert!(matches!(err, SfplError::ValidationError(_)));
        let err = post_page("/search~S1?/.b1/holdings", &client).unwrap_err();
        assert!(matches!(err, SfplError::ValidationError(_)));
    }
}
