use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// `<wavenumber>   <intensity>` row of the spectrum data files.
pub fn format_spectrum_line(wavenumber: f64, intensity: f64, precision: usize) -> String {
    format!("{wavenumber:<4.6}   {intensity:>6.precision$}")
}

/// Semicolon-delimited row of the raw/mean sample dumps.
pub fn format_delimited_sample(wavenumber: f64, intensity: f64) -> String {
    format!("{wavenumber:6.10};{intensity:6.10}")
}

pub fn normalize_text_artifact(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

/// Writes through a temporary sibling file that is renamed over `path` only
/// once every byte is flushed; on failure the temporary file is removed and
/// `path` is left untouched.
pub fn write_text_artifact(path: &Path, content: &str) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(parent)?;
    staged.write_all(normalize_text_artifact(content).as_bytes())?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|error| error.error)?;
    Ok(())
}
