//! Lens brand catalog.
//!
//! The catalog is a one-column CSV file, one brand per line, no header.
//! Surrounding whitespace is trimmed, blank lines and duplicates are skipped.

use anyhow::Result;
use std::io::Read;
use std::path::Path;

pub fn load_brands<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let file = std::fs::File::open(path)?;
    read_brands(file)
}

pub fn read_brands<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(false).flexible(true).from_reader(reader);

    let mut brands: Vec<String> = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let Some(brand) = record.get(0).map(str::trim) else {
            continue;
        };
        if !brand.is_empty() && !brands.iter().any(|known| known == brand) {
            brands.push(brand.to_string());
        }
    }
    Ok(brands)
}
