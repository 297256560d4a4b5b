//! Upgrade and support-timeline resolution
//!
//! - `package`: Package and Release entities backed by the metadata cache
//! - `upgrade`: upgrade candidate policies
//! - `timeline`: first-supporting release per target

mod package;
mod timeline;
mod upgrade;

pub use package::{Package, Release, ReleaseSelection};
pub use timeline::support_timeline;
pub use upgrade::UpgradeResolver;
