//! Tracker client library
//!
//! REST client, session handling and page views shared by the learning and
//! fitness trackers. The `tracker` binary is a thin front-end over this.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod navigation;
pub mod services;
pub mod session;
pub mod views;
