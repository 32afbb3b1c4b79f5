//! Data models for the pothole reporting backend.
//!
//! Wire casing matches the frontend TypeScript interfaces exactly for
//! seamless interoperability.

mod pothole;
mod report;
mod vote;

pub use pothole::*;
pub use report::*;
pub use vote::*;
