//! Scan data
//!
//! A sweep produces one [`Sample`] per angular step. Samples are kept in a
//! [`SampleStore`] until the scan log has been sent.

pub mod sample;
pub mod store;

pub use sample::{Distance, Sample};
pub use store::SampleStore;
