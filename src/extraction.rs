//! # extraction
//!
//! HTML extraction for the patron catalog pages.
//!
//! Each parser takes the body of one page and returns its records in
//! document order. Parsers never check how many rows they found: markup
//! that does not match gives an empty or partial result, not an error.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sfpl_api::extraction::parse_patron_items_page;
//! let html = "<tr class=\"patFuncEntry\">...</tr>";
//! if let Ok(holds) = parse_patron_items_page(html) {
//!     for hold in holds {
//!         println!("{} - {}", hold.title, hold.status);
//!     }
//! }
//! ```
use crate::errors::SfplError;
use crate::types::{
    BranchHours, DayHours, ItemCopy, ListItem, PatronItem, SearchResult, UserList, WorkCopies,
};
use crate::utils::{
    ensure_full_url, first_attr, make_selector, safe_static_regex, safe_static_selector,
};
use crate::{define_regex, define_selector, make_static, select_raw_text_next};
use log::warn;
use regex::Regex;
use scraper::{ElementRef, Html, selector::Selector};
use std::sync::LazyLock;

/// Known typo on the hours page, it leaves `<strong>` open after Tuesday.
pub const HOURS_MARKUP_DEFECT: &str = "Tue</stong>";
pub const HOURS_MARKUP_FIX: &str = "Tue</strong>";

define_selector!(LINK_SELECTOR, LINK_SELECTOR_TEXT, "a");
define_selector!(
    PATRON_ENTRY_SELECTOR,
    PATRON_ENTRY_SELECTOR_TEXT,
    "tr.patFuncEntry"
);
define_selector!(
    PATRON_TITLE_SELECTOR,
    PATRON_TITLE_SELECTOR_TEXT,
    "td.patFuncTitle"
);
define_selector!(
    PATRON_STATUS_SELECTOR,
    PATRON_STATUS_SELECTOR_TEXT,
    "td.patFuncStatus"
);
define_selector!(
    PATRON_DETAILS_SELECTOR,
    PATRON_DETAILS_SELECTOR_TEXT,
    "td.patFuncDetails"
);
define_selector!(
    LIST_ENTRY_CELL_SELECTOR,
    LIST_ENTRY_CELL_SELECTOR_TEXT,
    "tr.patFuncEntry td:nth-child(2)"
);
define_selector!(
    MORE_COPIES_FORM_SELECTOR,
    MORE_COPIES_FORM_SELECTOR_TEXT,
    "div.itemlist center form"
);
define_selector!(COPY_ROW_SELECTOR, COPY_ROW_SELECTOR_TEXT, "tr.bibItemsEntry");
define_selector!(
    COPY_LOCATION_SELECTOR,
    COPY_LOCATION_SELECTOR_TEXT,
    "td:nth-child(1)"
);
define_selector!(
    COPY_CALLNO_SELECTOR,
    COPY_CALLNO_SELECTOR_TEXT,
    "td:nth-child(2)"
);
define_selector!(
    COPY_STATUS_SELECTOR,
    COPY_STATUS_SELECTOR_TEXT,
    "td:nth-child(3)"
);
define_selector!(
    SEARCH_BLOCK_SELECTOR,
    SEARCH_BLOCK_SELECTOR_TEXT,
    "tr.briefCitRow"
);
define_selector!(
    SEARCH_TITLE_SELECTOR,
    SEARCH_TITLE_SELECTOR_TEXT,
    "span.briefcitTitle a"
);
define_selector!(
    SEARCH_CALLNO_SELECTOR,
    SEARCH_CALLNO_SELECTOR_TEXT,
    "span.briefcitCallno"
);
define_selector!(
    SEARCH_COVER_SELECTOR,
    SEARCH_COVER_SELECTOR_TEXT,
    "div.briefcitJacket img"
);
define_selector!(
    SEARCH_MEDIA_SELECTOR,
    SEARCH_MEDIA_SELECTOR_TEXT,
    "div.briefcitMedia img"
);
define_selector!(BRANCH_HEADING_SELECTOR, BRANCH_HEADING_SELECTOR_TEXT, "h2");
define_selector!(SCHEDULE_LIST_SELECTOR, SCHEDULE_LIST_SELECTOR_TEXT, "ul");
define_selector!(SCHEDULE_ENTRY_SELECTOR, SCHEDULE_ENTRY_SELECTOR_TEXT, "li");
define_selector!(SCHEDULE_DAY_SELECTOR, SCHEDULE_DAY_SELECTOR_TEXT, "strong");
define_regex!(RECID_REGEX, RECID_REGEX_TEXT, r"[?&]recid=([^&#]+)");

/// Parses the checkouts page or the holds page, both share one layout
///
/// # Arguments
/// * `page` - body of the `/items` or `/holds` patron page
///
/// # Returns
/// * one record per `tr.patFuncEntry` row, title and status trimmed
pub fn parse_patron_items_page(page: &str) -> Result<Vec<PatronItem>, SfplError> {
    let document = Html::parse_document(page);
    let entry = safe_static_selector(PATRON_ENTRY_SELECTOR.clone(), PATRON_ENTRY_SELECTOR_TEXT)?;
    let title = safe_static_selector(PATRON_TITLE_SELECTOR.clone(), PATRON_TITLE_SELECTOR_TEXT)?;
    let status = safe_static_selector(
        PATRON_STATUS_SELECTOR.clone(),
        PATRON_STATUS_SELECTOR_TEXT,
    )?;
    let link = safe_static_selector(LINK_SELECTOR.clone(), LINK_SELECTOR_TEXT)?;

    Ok(document
        .select(&entry)
        .map(|row| PatronItem {
            title: select_raw_text_next!(row, &title),
            href: row
                .select(&title)
                .next()
                .and_then(|cell| first_attr(&cell, &link, "href"))
                .unwrap_or_default(),
            status: select_raw_text_next!(row, &status),
        })
        .collect())
}

/// Parses the saved lists page
///
/// # Arguments
/// * `page` - body of the `/mylists` patron page
/// * `base_url` - catalog base, root-relative list links are prefixed with it
pub fn parse_user_lists_page(page: &str, base_url: &str) -> Result<Vec<UserList>, SfplError> {
    let document = Html::parse_document(page);
    let entry = safe_static_selector(PATRON_ENTRY_SELECTOR.clone(), PATRON_ENTRY_SELECTOR_TEXT)?;
    let title = safe_static_selector(PATRON_TITLE_SELECTOR.clone(), PATRON_TITLE_SELECTOR_TEXT)?;
    let details = safe_static_selector(
        PATRON_DETAILS_SELECTOR.clone(),
        PATRON_DETAILS_SELECTOR_TEXT,
    )?;
    let link = safe_static_selector(LINK_SELECTOR.clone(), LINK_SELECTOR_TEXT)?;

    Ok(document
        .select(&entry)
        .map(|row| {
            let href = row
                .select(&title)
                .next()
                .and_then(|cell| first_attr(&cell, &link, "href"))
                .unwrap_or_default();
            UserList {
                list_name: select_raw_text_next!(row, &title),
                href: ensure_full_url(base_url, &href),
                description: select_raw_text_next!(row, &details),
            }
        })
        .collect())
}

/// Parses the contents of one saved list
///
/// Titles keep the cell text exactly as it is in the page.
pub fn parse_list_page(page: &str) -> Result<Vec<ListItem>, SfplError> {
    let document = Html::parse_document(page);
    let cell = safe_static_selector(
        LIST_ENTRY_CELL_SELECTOR.clone(),
        LIST_ENTRY_CELL_SELECTOR_TEXT,
    )?;

    Ok(document
        .select(&cell)
        .map(|item| ListItem {
            title: item.text().collect(),
            // only a link sitting directly in the cell points at the work
            href: item
                .children()
                .filter_map(ElementRef::wrap)
                .find(|child| child.value().name() == "a")
                .and_then(|anchor| anchor.value().attr("href"))
                .map(str::to_string),
        })
        .collect())
}

/// Parses a work page
///
/// # Arguments
/// * `page` - body of a record page
/// * `base_url` - catalog base used to complete the follow-up form action
///
/// # Returns
/// * `WorkCopies::NeedsFollowUp` when the copies are collapsed behind the
///   "more copies" form, `WorkCopies::Copies` with every row otherwise
pub fn parse_work_page(page: &str, base_url: &str) -> Result<WorkCopies, SfplError> {
    let document = Html::parse_document(page);
    let form = safe_static_selector(
        MORE_COPIES_FORM_SELECTOR.clone(),
        MORE_COPIES_FORM_SELECTOR_TEXT,
    )?;

    if let Some(form) = document.select(&form).next() {
        match form.value().attr("action").map(str::trim) {
            Some(action) if !action.is_empty() => {
                return Ok(WorkCopies::NeedsFollowUp(ensure_full_url(base_url, action)));
            }
            _ => warn!("More copies form has no action, reading the copies shown"),
        }
    }

    extract_copies(&document).map(WorkCopies::Copies)
}

/// Parses the page answering the "more copies" form
pub fn parse_full_copies_list(page: &str) -> Result<Vec<ItemCopy>, SfplError> {
    extract_copies(&Html::parse_document(page))
}

fn extract_copies(document: &Html) -> Result<Vec<ItemCopy>, SfplError> {
    let row = safe_static_selector(COPY_ROW_SELECTOR.clone(), COPY_ROW_SELECTOR_TEXT)?;
    let location = safe_static_selector(
        COPY_LOCATION_SELECTOR.clone(),
        COPY_LOCATION_SELECTOR_TEXT,
    )?;
    let callno = safe_static_selector(COPY_CALLNO_SELECTOR.clone(), COPY_CALLNO_SELECTOR_TEXT)?;
    let status = safe_static_selector(COPY_STATUS_SELECTOR.clone(), COPY_STATUS_SELECTOR_TEXT)?;

    Ok(document
        .select(&row)
        .map(|tr| ItemCopy {
            location: select_raw_text_next!(tr, &location),
            callno: select_raw_text_next!(tr, &callno),
            status: select_raw_text_next!(tr, &status),
        })
        .collect())
}

/// Parses a search results page
///
/// # Arguments
/// * `page` - body of the search page
/// * `record_base` - prefix for record ids found in cover image URLs,
///   e.g. `https://sflib1.sfpl.org/record=`
pub fn parse_search_results(
    page: &str,
    record_base: &str,
) -> Result<Vec<SearchResult>, SfplError> {
    let document = Html::parse_document(page);
    let block = safe_static_selector(SEARCH_BLOCK_SELECTOR.clone(), SEARCH_BLOCK_SELECTOR_TEXT)?;
    let title = safe_static_selector(SEARCH_TITLE_SELECTOR.clone(), SEARCH_TITLE_SELECTOR_TEXT)?;
    let callno = safe_static_selector(
        SEARCH_CALLNO_SELECTOR.clone(),
        SEARCH_CALLNO_SELECTOR_TEXT,
    )?;
    let cover_img = safe_static_selector(SEARCH_COVER_SELECTOR.clone(), SEARCH_COVER_SELECTOR_TEXT)?;
    let media = safe_static_selector(SEARCH_MEDIA_SELECTOR.clone(), SEARCH_MEDIA_SELECTOR_TEXT)?;
    let recid = safe_static_regex(RECID_REGEX.clone(), RECID_REGEX_TEXT)?;

    Ok(document
        .select(&block)
        .map(|result| {
            let cover = first_attr(&result, &cover_img, "src").unwrap_or_default();
            let href = match recid.captures(&cover).and_then(|cap| cap.get(1)) {
                Some(id) => format!("{}{}", record_base, id.as_str()),
                None => first_attr(&result, &title, "href")
                    .map(|href| href.trim().to_string())
                    .unwrap_or_default(),
            };
            SearchResult {
                title: select_raw_text_next!(result, &title),
                href,
                media_type: first_attr(&result, &media, "alt")
                    .map(|alt| alt.trim().to_string())
                    .unwrap_or_default(),
                callno: select_raw_text_next!(result, &callno),
                cover,
            }
        })
        .collect())
}

/// Repairs the hours page typo so every day stays in its own entry
pub fn fix_hours_markup(page: &str) -> String {
    page.replace(HOURS_MARKUP_DEFECT, HOURS_MARKUP_FIX)
}

/// Parses the branch hours page
///
/// Expects markup already passed through [`fix_hours_markup`]. Headings
/// without a link are not branches and are skipped.
pub fn parse_hours_page(page: &str) -> Result<Vec<BranchHours>, SfplError> {
    let document = Html::parse_document(page);
    let branch_heading = safe_static_selector(
        BRANCH_HEADING_SELECTOR.clone(),
        BRANCH_HEADING_SELECTOR_TEXT,
    )?;
    let link = safe_static_selector(LINK_SELECTOR.clone(), LINK_SELECTOR_TEXT)?;
    let list = safe_static_selector(
        SCHEDULE_LIST_SELECTOR.clone(),
        SCHEDULE_LIST_SELECTOR_TEXT,
    )?;
    let entry = safe_static_selector(
        SCHEDULE_ENTRY_SELECTOR.clone(),
        SCHEDULE_ENTRY_SELECTOR_TEXT,
    )?;
    let day = safe_static_selector(SCHEDULE_DAY_SELECTOR.clone(), SCHEDULE_DAY_SELECTOR_TEXT)?;

    Ok(document
        .select(&branch_heading)
        .filter_map(|heading| {
            let branch_name = heading
                .select(&link)
                .next()?
                .text()
                .collect::<String>()
                .trim()
                .to_string();
            let days = heading
                .next_siblings()
                .find_map(ElementRef::wrap)
                .and_then(|block| block.select(&list).next())
                .map(|schedule| {
                    schedule
                        .select(&entry)
                        .map(|li| DayHours {
                            day_of_week: li
                                .select(&day)
                                .next()
                                .map(|abbr| abbr.text().collect())
                                .unwrap_or_default(),
                            hours: direct_text(&li),
                        })
                        .collect()
                })
                .unwrap_or_default();
            Some(BranchHours { branch_name, days })
        })
        .collect())
}

/// Text nodes sitting directly under `elem`, concatenated
fn direct_text(elem: &ElementRef<'_>) -> String {
    elem.children()
        .filter_map(|node| node.value().as_text())
        .map(|text| &**text)
        .collect()
}
