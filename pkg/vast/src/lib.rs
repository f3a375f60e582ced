//! Client side of the VAST cluster: REST API wrapper, remote group lookup,
//! and the quota-resolution pipeline the dashboard runs per page view.

pub mod capacity;
pub mod client;
pub mod groups;
pub mod lookup;
