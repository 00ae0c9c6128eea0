//! # networking
//!
//! Networking operations against the patron catalog.
//!
//! This module provides utilities for:
//! - HTTP client configuration with cookie support
//! - Fetching pages with a strict status contract
//! - Catalog authentication (login, logout, credential files)
//!
//! ## Usage - Blocking (default)
//!
//! ```no_run
//! use sfpl_api::networking::{create_client, get_page, login};
//!
//! // Create an HTTP client
//! let client = create_client("test", None).expect("Failed to create client");
//!
//! // Login to the catalog
//! let outcome = login(&client, "https://sflib1.sfpl.org", "21223012345678", "1234")
//!     .expect("Login request failed");
//!
//! // Fetch a page
//! let html = get_page("https://sflib1.sfpl.org/record=b1000001", &client)
//!     .expect("Failed to fetch page");
//! ```

// Module declarations
pub mod auth;
pub mod client;

// Re-export commonly used items for convenience
pub use auth::blocking::{LoginOutcome, login, logout};
pub use auth::{DEFAULT_CREDENTIALS_FILE, LoginInfo, get_login_info, resolve_login_info};
pub use client::blocking::{create_client, get_page, post_page};

// Re-export types from dependencies for convenience
pub use reqwest::Error as NetworkError;
pub use reqwest::blocking::Client;
