use std::io::Write;
use tempfile::NamedTempFile;

pub const ROSTER_HEADER: &str = "id,name,gold,silver,copper,image,is_hired,description,class,levels";

/// Writes a roster CSV with the standard header and the given rows.
pub fn roster_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", ROSTER_HEADER).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    file
}

/// Writes an actions CSV with the standard header and the given rows.
pub fn actions_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "action,crew").unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    file
}
