//! # Tickerbar - Scrolling Stock Ticker
//!
//! A thin always-on-top style ticker strip for the terminal. Quotes come
//! from the Yahoo Finance chart API and scroll continuously across the
//! top rows. Built with ratatui and reqwest.
//!
//! ## Architecture
//!
//! - **App**: Terminal lifecycle and the event loop
//! - **Overlay**: Timers, fetch triggers and settings changes
//! - **UI**: Pixel layout of the strip and its terminal surface
//! - **API**: Chart API client and the retrying quote fetcher
//! - **State**: Quotes, snapshot store and menu state
//! - **Events**: Input handling and timers
//! - **Config**: Persisted preferences

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod overlay;
pub mod state;
pub mod ui;

pub use app::App;
pub use config::TickerConfig;
pub use error::{Error, Result};
pub use overlay::Overlay;
