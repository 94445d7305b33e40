//! Helper functions shared by the generator, templates and commands

mod date;
mod url;

pub use date::*;
pub use url::*;
