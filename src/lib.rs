//! A terminal portfolio built from a GitHub profile.
//!
//! On start the profile of the configured user is fetched once. A failed
//! fetch is classified into rate limiting, an unknown user or a generic
//! failure and replaces the whole screen with an error page; otherwise the
//! dashboard shows the profile alongside the cards described in the config
//! file.

pub mod app;
pub mod config;
pub mod feeds;
pub mod logging;
pub mod state;
pub mod theme;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use state::{ProfileView, Store};
