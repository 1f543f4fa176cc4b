//! fileicons - per-resource icon resolution
//!
//! Strategies register candidate icons for a file or directory at different
//! priorities; an [`IconDelegate`] keeps the winner, caches it across runs and
//! lets symlinks follow the icon of their target.

pub mod cache;
pub mod cli;
pub mod config;
pub mod delegate;
pub mod error;
pub mod events;
pub mod icons;
pub mod registry;
pub mod resource;
pub mod scheduler;
pub mod services;
pub mod strategy;
pub mod ui;

pub use delegate::{IconChange, IconDelegate, MasterChange};
pub use error::{FileIconsError, FileIconsResult};
pub use registry::IconRegistry;
pub use resource::{Resource, VcsStatus};
pub use services::IconServices;
pub use strategy::{PathStrategy, Strategy};
