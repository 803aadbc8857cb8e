//! Preview server for docshelf documentation sites.
//!
//! Serves the pre-built static site, patches the edge network's handling of
//! documentation search URLs, and watches the documentation tree for changes.

pub mod server;
pub mod shim;
pub mod watcher;

pub use server::{ServeConfig, ServerError, SiteServer};
pub use shim::rewrite_target;
pub use watcher::{TreeChange, TreeWatcher};
