//! Installed-module metadata consumed by the Marquee sync tooling.

mod manifest;
mod provider;
mod record;

pub use manifest::*;
pub use provider::*;
pub use record::*;
