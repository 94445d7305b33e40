//! Configuration module

mod site;

pub use site::{LinkItem, Publication, SiteConfig};
