//! Quarterly release support lifecycle
//!
//! - **tags**: registry tag pagination
//! - **filter**: first-quarterly-release selection with override lists
//! - **support**: premium / limited support end-date arithmetic
//! - **quarterly**: first-ship date resolution and the lifecycle table

pub mod filter;
pub mod quarterly;
pub mod support;
pub mod tags;

pub use filter::QuarterlyReleaseFilter;
pub use quarterly::{FirstShipDate, QuarterlyCalendar};
pub use support::SupportWindow;
pub use tags::{TagPages, fetch_all_tags};
