//! Authenticated access to the patron catalog.
//!
//! [`SfplSession`] owns the HTTP client (and with it the cookie jar) and the
//! patron path the catalog hands out at login. Every authenticated page is
//! requested below that path, e.g. `/patroninfo~S1/2053479/holds`.
//!
//! A session is meant for one caller at a time: `login` mutates the patron
//! path, the read operations only borrow it.

use crate::config::{
    HOLDS_PATH, ITEMS_PATH, LISTS_PATH, PATRON_INFO_PREFIX, RECORD_PREFIX, SEARCH_PARAM,
    SEARCH_PATH, SessionConfig,
};
use crate::errors::SfplError;
use crate::extraction::{
    fix_hours_markup, parse_full_copies_list, parse_hours_page, parse_list_page,
    parse_patron_items_page, parse_search_results, parse_user_lists_page, parse_work_page,
};
use crate::networking::{self, Client, create_client, get_page, post_page};
use crate::types::{
    BranchHours, Checkout, Hold, ItemCopy, ListItem, SearchResult, UserList, WorkCopies,
};
use log::{debug, info, warn};
use reqwest::Url;

pub struct SfplSession {
    client: Client,
    config: SessionConfig,
    /// Empty until a login succeeds, e.g. `/patroninfo~S1/2053479` after.
    patron_path: String,
}

impl SfplSession {
    /// Session against the production catalog
    pub fn new() -> Result<Self, SfplError> {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Result<Self, SfplError> {
        let client = create_client(&config.user_agent, config.timeout)?;
        Ok(Self {
            client,
            config,
            patron_path: String::new(),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn patron_path(&self) -> &str {
        &self.patron_path
    }

    /// Logs in and returns the status code of the login response
    ///
    /// Only a 302 means success. Any other status is returned rather than
    /// raised, so check it. Calling this twice without a new session appends
    /// a second patron path.
    pub fn login(&mut self, username: &str, pin: &str) -> Result<u16, SfplError> {
        if !self.patron_path.is_empty() {
            warn!(
                "Logging in again on a session bound to {}",
                self.patron_path
            );
        }

        let outcome = networking::login(&self.client, &self.config.base_url, username, pin)?;
        match outcome.patron_path {
            Some(path) => {
                info!("Logged in as {}", path);
                self.patron_path.push_str(&path);
            }
            None => info!("Login refused with status {}", outcome.status),
        }
        Ok(outcome.status)
    }

    /// Ends the remote session; the local patron path is kept
    pub fn logout(&self) -> Result<(), SfplError> {
        networking::logout(&self.client, &self.config.base_url)
    }

    pub fn list_checkouts(&self) -> Result<Vec<Checkout>, SfplError> {
        self.process_page(&self.patron_url(ITEMS_PATH), parse_patron_items_page)
    }

    pub fn list_holds(&self) -> Result<Vec<Hold>, SfplError> {
        self.process_page(&self.patron_url(HOLDS_PATH), parse_patron_items_page)
    }

    pub fn list_user_lists(&self) -> Result<Vec<UserList>, SfplError> {
        self.process_page(&self.patron_url(LISTS_PATH), |page| {
            parse_user_lists_page(page, &self.config.base_url)
        })
    }

    /// Contents of a saved list known by its numeric id
    pub fn get_list_contents_by_list_id(&self, list_id: &str) -> Result<Vec<ListItem>, SfplError> {
        if list_id.is_empty() || !list_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SfplError::ValidationError(format!(
                "list id should be numeric, got {:?}",
                list_id
            )));
        }
        let list_url = format!("{}{}?listNum={}", self.patron_path, LISTS_PATH, list_id);
        self.get_list_contents(&list_url)
    }

    /// Contents of a saved list
    ///
    /// `list_url` must be a `/patroninfo...` path, the host is always the
    /// catalog's own.
    pub fn get_list_contents(&self, list_url: &str) -> Result<Vec<ListItem>, SfplError> {
        if !list_url.starts_with(PATRON_INFO_PREFIX) {
            return Err(SfplError::ValidationError(format!(
                "list url should start with {}, got {}",
                PATRON_INFO_PREFIX, list_url
            )));
        }
        let url = format!("{}{}", self.config.base_url, list_url);
        self.process_page(&url, parse_list_page)
    }

    /// Every copy of a work
    ///
    /// `work_url` is either a `/record...` path or a full URL. When the work
    /// page collapses its copies, the follow-up form is posted and the full
    /// listing it answers with is returned instead.
    pub fn get_work_copies(&self, work_url: &str) -> Result<Vec<ItemCopy>, SfplError> {
        let url = self.work_url(work_url);
        let first = self.process_page(&url, |page| {
            parse_work_page(page, &self.config.base_url)
        })?;

        match first {
            WorkCopies::Copies(copies) => Ok(copies),
            WorkCopies::NeedsFollowUp(follow_url) => {
                debug!("{} has more copies, following {}", url, follow_url);
                self.process_post_page(&follow_url, parse_full_copies_list)
            }
        }
    }

    /// Catalog keyword search
    pub fn search(&self, query: &str) -> Result<Vec<SearchResult>, SfplError> {
        let endpoint = format!("{}{}", self.config.base_url, SEARCH_PATH);
        let url = Url::parse_with_params(&endpoint, &[(SEARCH_PARAM, query)]).map_err(|e| {
            SfplError::ValidationError(format!("bad search url {}: {}", endpoint, e))
        })?;
        let record_base = self.config.record_base_url();
        self.process_page(url.as_str(), |page| {
            parse_search_results(page, &record_base)
        })
    }

    /// Opening hours of every branch, no login needed
    pub fn list_all_hours(&self) -> Result<Vec<BranchHours>, SfplError> {
        self.process_page(&self.config.hours_url, |page| {
            parse_hours_page(&fix_hours_markup(page))
        })
    }

    fn patron_url(&self, suffix: &str) -> String {
        format!("{}{}{}", self.config.base_url, self.patron_path, suffix)
    }

    fn work_url(&self, work_url: &str) -> String {
        if work_url.starts_with(RECORD_PREFIX) {
            format!("{}{}", self.config.base_url, work_url)
        } else {
            work_url.to_string()
        }
    }

    fn process_page<T>(
        &self,
        url: &str,
        parse: impl FnOnce(&str) -> Result<T, SfplError>,
    ) -> Result<T, SfplError> {
        let body = get_page(url, &self.client)?;
        parse(&body)
    }

    fn process_post_page<T>(
        &self,
        url: &str,
        parse: impl FnOnce(&str) -> Result<T, SfplError>,
    ) -> Result<T, SfplError> {
        let body = post_page(url, &self.client)?;
        parse(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SfplSession {
        SfplSession::new().unwrap()
    }

    #[test]
    fn new_session_has_no_patron_path() {
        assert_eq!(session().patron_path(), "");
    }

    #[test]
    fn record_paths_are_completed() {
        let session = session();
        assert_eq!(
            session.work_url("/record=b1000001~S1"),
            "https://sflib1.sfpl.org/record=b1000001~S1"
        );
        assert_eq!(
            session.work_url("https://sflib1.sfpl.org/record=b1000001~S1"),
            "https://sflib1.sfpl.org/record=b1000001~S1"
        );
        assert_eq!(session.work_url("/patroninfo~S1"), "/patroninfo~S1");
    }

    #[test]
    fn patron_pages_hang_off_the_patron_path() {
        let mut session = session();
        session.patron_path.push_str("/patroninfo~S1/2053479");
        assert_eq!(
            session.patron_url(HOLDS_PATH),
            "https://sflib1.sfpl.org/patroninfo~S1/2053479/holds"
        );
    }

    #[test]
    fn list_urls_outside_patron_info_are_refused() {
        let session = session();
        for url in [
            "https://evil.example.org/patroninfo~S1/1/mylists?listNum=1",
            "/record=b1000001",
            "",
        ] {
            assert!(matches!(
                session.get_list_contents(url),
                Err(SfplError::ValidationError(_))
            ));
        }
    }

    #[test]
    fn non_numeric_list_ids_are_refused() {
        let session = session();
        for list_id in ["", "  ", "1&x=2", "abc", " 53282", "53282#top"] {
            assert!(
                matches!(
                    session.get_list_contents_by_list_id(list_id),
                    Err(SfplError::ValidationError(_))
                ),
                "{:?} was accepted",
                list_id
            );
        }
    }

    #[test]
    fn unqualified_work_urls_are_refused() {
        assert!(matches!(
            session().get_work_copies("/search~S1?/.b1"),
            Err(SfplError::ValidationError(_))
        ));
    }
}
