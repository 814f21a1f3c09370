//! Regions command implementation
//!
//! Prints region search suggestions, or every region for an empty query.

use crate::Result;
use fraud_core::geography::{Geography, Region};
use std::io::Write;

/// Run the regions command
pub fn run<W: Write>(query: Option<&str>, out: &mut W) -> Result<()> {
    let geography = Geography::india();

    let matches: Vec<&Region> = match query {
        Some(query) if !query.is_empty() => geography
            .suggest(query)
            .into_iter()
            .filter_map(|name| geography.region(name))
            .collect(),
        _ => geography.regions().iter().collect(),
    };

    for region in &matches {
        let localities = geography.localities(&region.name);
        write!(
            out,
            "{:<28} {:>8.4} {:>9.4}",
            region.name, region.latitude, region.longitude
        )?;
        if !localities.is_empty() {
            let names: Vec<&str> = localities.iter().map(|l| l.name.as_str()).collect();
            write!(out, "  ({})", names.join(", "))?;
        }
        writeln!(out)?;
    }

    if matches.is_empty() {
        writeln!(out, "No matching regions")?;
    }
    Ok(())
}
