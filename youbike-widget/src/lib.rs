//! YouBike station widget.
//!
//! Pulls the city's live bike-share feed, keeps a few pinned stations plus
//! the nearest ones to the device, and serves the result as a small widget
//! page.

pub mod config;
pub mod domain;
pub mod feed;
pub mod geo;
pub mod location;
pub mod ranking;
pub mod refresh;
pub mod store;
pub mod web;
