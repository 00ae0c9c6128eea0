//! Records produced by the page parsers.
//!
//! Every record is built once from a parsed page and never changed
//! afterwards. Field names follow the catalog's own vocabulary.

use serde::Serialize;

/// One row of the checkouts or holds page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatronItem {
    pub title: String,
    /// Link of the title cell, relative or absolute as the page gives it.
    pub href: String,
    pub status: String,
}

/// A checked out item.
pub type Checkout = PatronItem;
/// A hold placed by the patron.
pub type Hold = PatronItem;

/// One of the patron's saved lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserList {
    pub list_name: String,
    pub href: String,
    pub description: String,
}

impl UserList {
    /// Numeric list id, taken from after the last `=` of the href.
    pub fn list_id(&self) -> Option<&str> {
        self.href
            .rsplit_once('=')
            .map(|(_, id)| id)
            .filter(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
    }
}

/// An entry of a saved list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    /// Raw cell text, whitespace included.
    pub title: String,
    pub href: Option<String>,
}

/// One physical copy of a work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemCopy {
    pub location: String,
    pub callno: String,
    pub status: String,
}

/// Result of reading a work page.
///
/// Works with many copies only show a few of them and hide the rest behind
/// a form; `NeedsFollowUp` carries the absolute URL that form posts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkCopies {
    Copies(Vec<ItemCopy>),
    NeedsFollowUp(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub href: String,
    #[serde(rename = "type")]
    pub media_type: String,
    pub callno: String,
    pub cover: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayHours {
    pub day_of_week: String,
    pub hours: String,
}

/// Weekly opening hours of one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchHours {
    pub branch_name: String,
    pub days: Vec<DayHours>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(href: &str) -> UserList {
        UserList {
            list_name: "To read".to_string(),
            href: href.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn list_id_is_read_after_last_equals() {
        let list = list("https://sflib1.sfpl.org/patroninfo~S1/2053479/mylists?listNum=53282");
        assert_eq!(list.list_id(), Some("53282"));
    }

    #[test]
    fn list_id_missing_or_not_numeric() {
        assert_eq!(list("https://sflib1.sfpl.org/mylists").list_id(), None);
        assert_eq!(list("/mylists?listNum=").list_id(), None);
        assert_eq!(list("/mylists?listNum=abc").list_id(), None);
    }

    #[test]
    fn search_result_serializes_type_field() {
        let result = SearchResult {
            title: "Dune".to_string(),
            href: "https://sflib1.sfpl.org/record=b1000001".to_string(),
            media_type: "BOOK".to_string(),
            callno: "SCI-FI HERBERT".to_string(),
            cover: String::new(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["type"], "BOOK");
        assert!(json.get("media_type").is_none());
    }
}
