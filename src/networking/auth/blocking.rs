//! Blocking authentication implementation for the catalog
use crate::config::{LOGIN_PATH, LOGOUT_PATH};
use crate::errors::SfplError;
use log::debug;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::LOCATION;

/// What the login endpoint answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub status: u16,
    /// Patron path taken from the redirect, only set on a 302 with `Location`
    pub patron_path: Option<String>,
}

/// Post the patron credentials to the catalog
///
/// Only a 302 counts as success; any other status is returned as is and
/// left to the caller to judge. The auth cookies stay in `client`.
///
/// # Arguments
/// * `client` - reqwest Client with cookie store enabled
/// * `base_url` - catalog base URL
/// * `username` - library card number
/// * `pin` - card PIN
///
/// # Example
/// ```no_run
/// use sfpl_api::networking::{create_client, login};
/// let client = create_client("test", None).unwrap();
/// let outcome = login(&client, "https://sflib1.sfpl.org", "21223012345678", "1234");
/// ```
pub fn login(
    client: &Client,
    base_url: &str,
    username: &str,
    pin: &str,
) -> Result<LoginOutcome, SfplError> {
    let url = format!("{}{}", base_url, LOGIN_PATH);
    debug!("Posting credentials to {}", url);
    let response = client
        .post(&url)
        .form(&[("code", username), ("pin", pin)])
        .send()?;

    let status = response.status();
    let patron_path = if status == StatusCode::FOUND {
        response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(patron_path_from_location)
    } else {
        None
    };

    Ok(LoginOutcome {
        status: status.as_u16(),
        patron_path,
    })
}

/// Ends the remote session, the answer is ignored
pub fn logout(client: &Client, base_url: &str) -> Result<(), SfplError> {
    let url = format!("{}{}", base_url, LOGOUT_PATH);
    let response = client.get(&url).send()?;
    debug!("Logout answered {}", response.status());
    Ok(())
}

/// `/patroninfo~S1/2053479/top` -> `/patroninfo~S1/2053479`
pub(crate) fn patron_path_from_location(location: &str) -> String {
    location.strip_suffix("/top").unwrap_or(location).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_suffix_is_stripped() {
        assert_eq!(
            patron_path_from_location("/patroninfo~S1/2053479/top"),
            "/patroninfo~S1/2053479"
        );
    }

    #[test]
    fn other_locations_are_kept() {
        assert_eq!(
            patron_path_from_location("/patroninfo~S1/2053479"),
            "/patroninfo~S1/2053479"
        );
        assert_eq!(
            patron_path_from_location("/patroninfo~S1/2053479/topics"),
            "/patroninfo~S1/2053479/topics"
        );
        assert_eq!(
            patron_path_from_location("/patroninfo~S1/top/items"),
            "/patroninfo~S1/top/items"
        );
    }
}
