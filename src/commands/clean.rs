//! Clean the output directory

use anyhow::Result;
use std::fs;

use crate::Folio;

/// Remove the output directory
pub fn run(folio: &Folio) -> Result<()> {
    if folio.out_dir.exists() {
        fs::remove_dir_all(&folio.out_dir)?;
        tracing::info!("deleted {:?}", folio.out_dir);
    }

    Ok(())
}
