// crates/placefeed-core/src/export/io.rs

//! Physical feed writing: serialization, optional gzip, atomic replace.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use serde::Serialize;

use crate::error::Result;

/// Serialize `records` as a JSON array and atomically replace `path`
/// with it.
///
/// The document is first written to a sibling temporary file which is
/// then renamed over the destination, so `path` always holds either the
/// previous complete feed or the new complete feed. A `.gz` extension on
/// `path` selects gzip output.
pub fn write_feed<T: Serialize>(records: &[T], path: &Path) -> Result<()> {
    let payload = serde_json::to_vec(records)?;

    let tmp = tmp_path(path);
    let result = write_payload(&tmp, &payload, is_gzip(path))
        .and_then(|_| fs::rename(&tmp, path).map_err(Into::into));
    if result.is_err() {
        // The destination is untouched; only the scratch file needs
        // cleaning up.
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn write_payload(tmp: &Path, payload: &[u8], gzip: bool) -> Result<()> {
    let mut writer = BufWriter::new(File::create(tmp)?);
    if gzip {
        let mut encoder = GzEncoder::new(writer, Compression::default());
        encoder.write_all(payload)?;
        writer = encoder.finish()?;
    } else {
        writer.write_all(payload)?;
    }
    writer.flush()?;
    Ok(())
}

pub(crate) fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// Sibling path in the same directory, so the final rename never
/// crosses a filesystem boundary.
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
