//! JSON document I/O.
//!
//! Every input is read whole and parsed into a `serde_json::Value`; the
//! output is written pretty-printed through a temporary sibling file that
//! replaces the target on success.

use crate::error::EtlError;
use serde_json::Value;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Load a required JSON document.
pub fn load_document(path: impl AsRef<Path>) -> Result<Value, EtlError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            EtlError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            EtlError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let value = serde_json::from_slice(&bytes).map_err(|source| EtlError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "loaded document");
    Ok(value)
}

/// Load an optional JSON document.
///
/// Returns `None` when the file does not exist or when its content is
/// blank (`null`, `{}` or `[]`). Malformed JSON is still an error.
pub fn load_optional_document(path: impl AsRef<Path>) -> Result<Option<Value>, EtlError> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!(path = %path.display(), "optional document absent");
        return Ok(None);
    }
    let value = load_document(path)?;
    if is_blank(&value) {
        tracing::debug!(path = %path.display(), "optional document is empty");
        return Ok(None);
    }
    Ok(Some(value))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Write a JSON document with two-space indentation.
///
/// Parent directories are created as needed. Non-ASCII text is written as
/// UTF-8, not escaped. The bytes go to a synced temporary sibling that is
/// then renamed over `path`.
pub fn save_document(path: impl AsRef<Path>, value: &Value) -> Result<(), EtlError> {
    let path = path.as_ref();
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| EtlError::Io { path, source }
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }

    let tmp_path = tmp_write_path(path);
    let write_result = (|| -> Result<(), EtlError> {
        let file = File::create(&tmp_path).map_err(io_err(&tmp_path))?;
        let mut writer = BufWriter::new(file);
        write_pretty(&mut writer, value, &tmp_path)?;
        writer.flush().map_err(io_err(&tmp_path))?;
        let file = writer
            .into_inner()
            .map_err(|e| io_err(&tmp_path)(e.into_error()))?;
        file.sync_all().map_err(io_err(&tmp_path))?;
        Ok(())
    })();

    if let Err(error) = write_result {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }

    fs::rename(&tmp_path, path).map_err(|source| {
        let _ = fs::remove_file(&tmp_path);
        EtlError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        let dir = File::open(parent).map_err(io_err(parent))?;
        dir.sync_all().map_err(io_err(parent))?;
    }

    tracing::info!(path = %path.display(), "wrote document");
    Ok(())
}

/// Pretty-print `value` plus a trailing newline. Write failures are
/// reported against `path`.
fn write_pretty(writer: &mut impl Write, value: &Value, path: &Path) -> Result<(), EtlError> {
    let io_error = |source: std::io::Error| EtlError::Io {
        path: path.to_path_buf(),
        source,
    };
    serde_json::to_writer_pretty(&mut *writer, value).map_err(|source| {
        if source.is_io() {
            io_error(source.into())
        } else {
            EtlError::Serialize(source)
        }
    })?;
    writer.write_all(b"\n").map_err(io_error)
}

fn tmp_write_path(path: &Path) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut tmp: OsString = path.as_os_str().to_os_string();
    tmp.push(format!(".tmp.{}.{}", std::process::id(), unique));
    PathBuf::from(tmp)
}
