//! Issuetrak console - exercise the Issuetrak REST API from a terminal menu.
//!
//! Each menu entry sends one fixed request to a configured Issuetrak
//! instance and opens the response in the system's text viewer.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod menu;
pub mod operations;
pub mod quick_create;
pub mod render;
