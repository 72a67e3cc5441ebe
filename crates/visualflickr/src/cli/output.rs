//! Writing analysis results to stdout or a file.

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use visualflickr_core::UserAnalysis;

/// Destination for command output: a file when given, stdout otherwise.
pub fn open(output: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            Box::new(BufWriter::new(File::create(path)?))
        }
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };
    Ok(writer)
}

/// Write one JSON document.
pub fn write_json<T: Serialize + ?Sized>(
    value: &T,
    output: Option<&Path>,
    pretty: bool,
) -> anyhow::Result<()> {
    let mut writer = open(output)?;
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writeln!(writer)?;
    writer.flush()?;

    if let Some(path) = output {
        tracing::info!("Output written to {:?}", path);
    }
    Ok(())
}

/// Write one JSON line.
pub fn write_line<T: Serialize>(writer: &mut dyn Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Drop per-photo inputs unless the user asked for them.
pub fn strip_details(analysis: &mut UserAnalysis) {
    for photo in analysis.photos.values_mut() {
        photo.details = None;
    }
}
