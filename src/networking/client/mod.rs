//! HTTP transport shared by every session request
pub mod blocking;
