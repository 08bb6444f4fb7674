//! CSV export of a sampled profile table.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use line_profile_core::ProfileTable;

use crate::error::AnalyzeError;

/// Write the five-column table `index,red,green,blue,average` to `path`.
///
/// One row per sample, no header. The average column uses the default f64
/// formatting, which prints the shortest representation that parses back to
/// the identical value.
pub fn write_csv(table: &ProfileTable, path: &Path) -> Result<(), AnalyzeError> {
    let wrap = |source| AnalyzeError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(wrap)?;
    let mut out = BufWriter::new(file);
    for i in 0..table.len() {
        let (d, r, g, b, avg) = table.row(i);
        writeln!(out, "{d},{r},{g},{b},{avg}").map_err(wrap)?;
    }
    out.flush().map_err(wrap)?;
    Ok(())
}
