//! List posts in display order

use anyhow::Result;

use crate::content::ContentLoader;
use crate::helpers::relative_date;
use crate::listing::Listing;
use crate::Folio;

/// Print the ordered post listing to stdout
pub fn run(folio: &Folio) -> Result<()> {
    let records = ContentLoader::new(folio).load()?;
    let listing = Listing::from_records(&records, "YYYY-MM-DD");

    println!("Posts ({}):", listing.len());
    for entry in &listing {
        println!(
            "  {} - {} [{}] ({})",
            entry.date,
            entry.title,
            entry.slug,
            relative_date(&entry.published_at)
        );
    }

    Ok(())
}
