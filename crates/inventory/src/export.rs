//! Arrangement export as CSV.

use std::io::Write;
use std::path::Path;

use stowage_core::{Coordinates, Error, Placement, Result};

/// Column headers of the arrangement CSV.
pub const ARRANGEMENT_HEADER: [&str; 4] = [
    "Item ID",
    "Container ID",
    "Coordinates (W1,D1,H1)",
    "(W2,D2,H2)",
];

/// Formats a corner as `(width,depth,height)`.
pub fn format_coordinates(c: &Coordinates) -> String {
    format!("({},{},{})", c.width, c.depth, c.height)
}

fn export_error(err: csv::Error) -> Error {
    Error::Export(err.to_string())
}

/// Writes one row per placement after the header.
pub fn write_arrangement_csv<W: Write>(writer: W, placements: &[Placement]) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(ARRANGEMENT_HEADER).map_err(export_error)?;

    for p in placements {
        let start = format_coordinates(&p.position.start_coordinates);
        let end = format_coordinates(&p.position.end_coordinates);
        out.write_record([
            p.item_id.as_str(),
            p.container_id.as_str(),
            start.as_str(),
            end.as_str(),
        ])
        .map_err(export_error)?;
    }

    out.flush()?;
    log::debug!("Exported {} placements", placements.len());
    Ok(())
}

/// Renders the arrangement CSV to a string.
pub fn arrangement_csv(placements: &[Placement]) -> Result<String> {
    let mut buf = Vec::new();
    write_arrangement_csv(&mut buf, placements)?;
    String::from_utf8(buf).map_err(|e| Error::Export(e.to_string()))
}

/// Writes the arrangement CSV to a file.
pub fn export_arrangement_file(path: impl AsRef<Path>, placements: &[Placement]) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_arrangement_csv(std::io::BufWriter::new(file), placements)
}
