//! Which works of a saved list are on the shelf at a given branch.

use crate::errors::SfplError;
use crate::session::SfplSession;
use crate::types::{ItemCopy, ListItem};
use log::debug;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Status of a copy that can be picked up right now
pub const ON_SHELF_STATUS: &str = "CHECK SHELF";
pub const DEFAULT_BRANCH: &str = "MISSION BAY";

/// A list entry together with its copies
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemAvailability {
    pub item: ListItem,
    pub copies: Vec<ItemCopy>,
}

pub fn copy_available_in(copy: &ItemCopy, branch: &str) -> bool {
    copy.status == ON_SHELF_STATUS && copy.location.contains(branch)
}

/// Resolves the copies of every item in parallel
///
/// Results come back in the order of `items`. Items without a link get no
/// copies. The first failed lookup fails the whole call.
///
/// # Arguments
/// * `session` - logged in session
/// * `items` - entries of a saved list
/// * `progress` - called with (done, total) after each item
pub fn fetch_item_copies(
    session: &SfplSession,
    items: Vec<ListItem>,
    progress: impl Fn(usize, usize) + Sync,
) -> Result<Vec<ItemAvailability>, SfplError> {
    let total = items.len();
    let done = AtomicUsize::new(0);

    items
        .into_par_iter()
        .map(|item| -> Result<ItemAvailability, SfplError> {
            let copies = match item.href.as_deref() {
                Some(href) => session.get_work_copies(href)?,
                None => {
                    debug!("{} has no link, skipping", item.title.trim());
                    Vec::new()
                }
            };
            progress(done.fetch_add(1, Ordering::SeqCst) + 1, total);
            Ok(ItemAvailability { item, copies })
        })
        .collect()
}

/// Keeps the entries with a copy on the shelf at `branch`, and only those copies
pub fn shortlist(entries: Vec<ItemAvailability>, branch: &str) -> Vec<ItemAvailability> {
    entries
        .into_iter()
        .filter_map(|mut entry| {
            entry.copies.retain(|copy| copy_available_in(copy, branch));
            (!entry.copies.is_empty()).then_some(entry)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn copy(location: &str, status: &str) -> ItemCopy {
        ItemCopy {
            location: location.to_string(),
            callno: "FIC LE GUIN".to_string(),
            status: status.to_string(),
        }
    }

    fn entry(title: &str, copies: Vec<ItemCopy>) -> ItemAvailability {
        ItemAvailability {
            item: ListItem {
                title: title.to_string(),
                href: Some("/record=b1".to_string()),
            },
            copies,
        }
    }

    #[test]
    fn available_means_on_shelf_at_branch() {
        assert!(copy_available_in(&copy("MISSION BAY Fiction", "CHECK SHELF"), "MISSION BAY"));
        assert!(!copy_available_in(&copy("MISSION BAY Fiction", "DUE 11-02-26"), "MISSION BAY"));
        assert!(!copy_available_in(&copy("MAIN Fiction", "CHECK SHELF"), "MISSION BAY"));
    }

    #[test]
    fn shortlist_keeps_only_useful_copies() {
        let entries = vec![
            entry(
                "The Dispossessed",
                vec![
                    copy("MAIN Fiction", "CHECK SHELF"),
                    copy("MISSION BAY Fiction", "CHECK SHELF"),
                ],
            ),
            entry("Solaris", vec![copy("MISSION BAY Fiction", "IN TRANSIT")]),
            entry("Empty", Vec::new()),
        ];
        let short = shortlist(entries, "MISSION BAY");
        assert_eq!(short.len(), 1);
        assert_eq!(short[0].item.title, "The Dispossessed");
        assert_eq!(short[0].copies, vec![copy("MISSION BAY Fiction", "CHECK SHELF")]);
    }

    #[test]
    fn items_without_link_need_no_request() {
        let session = SfplSession::new().unwrap();
        let items = vec![ListItem {
            title: " Unlinked ".to_string(),
            href: None,
        }];
        let result = fetch_item_copies(&session, items, |_, _| {}).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result[0].copies.is_empty());
    }
}
