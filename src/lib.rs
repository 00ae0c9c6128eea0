//! # sfpl-api
//!
//! Client for the San Francisco Public Library patron catalog.
//!
//! The crate logs into the catalog, keeps the session cookies and the
//! patron path handed out at login, and turns the catalog pages into typed
//! records: checkouts, holds, saved lists and their contents, the copies of
//! a work, search results and branch hours.
//!
//! ## Usage
//!
//! ```no_run
//! use sfpl_api::SfplSession;
//!
//! let mut session = SfplSession::new().expect("Failed to create session");
//! let status = session.login("21223012345678", "1234").expect("Login request failed");
//! if status == 302 {
//!     for hold in session.list_holds().expect("Failed to list holds") {
//!         println!("{} - {}", hold.title, hold.status);
//!     }
//!     session.logout().expect("Logout request failed");
//! }
//! ```

pub mod availability;
pub mod config;
pub mod errors;
pub mod extraction;
pub mod networking;
pub mod session;
pub mod types;
mod utils;

pub use config::SessionConfig;
pub use errors::SfplError;
pub use session::SfplSession;
pub use types::{
    BranchHours, Checkout, DayHours, Hold, ItemCopy, ListItem, PatronItem, SearchResult,
    UserList, WorkCopies,
};
