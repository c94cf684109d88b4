//! Byte-level file transfer and comparison.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

const COMPARE_BUFFER_SIZE: usize = 64 * 1024;

/// Copy `source` to `destination`, creating missing parent directories and
/// replicating the source permission bits.
///
/// The destination is left untouched when the source cannot be opened.
pub fn copy_file(source: &Path, destination: &Path) -> io::Result<()> {
    let mut reader = File::open(source)?;

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }

    // Never write through a link, and replace read-only copies instead of opening them.
    if let Ok(existing) = fs::symlink_metadata(destination) {
        if existing.file_type().is_symlink() || existing.permissions().readonly() {
            fs::remove_file(destination)?;
        }
    }

    let mut writer = File::create(destination)?;
    io::copy(&mut reader, &mut writer)?;

    let permissions = reader.metadata()?.permissions();
    fs::set_permissions(destination, permissions)?;

    Ok(())
}

/// Compare two files chunk by chunk, stopping at the first difference.
pub fn files_identical(source: &Path, destination: &Path) -> io::Result<bool> {
    let mut source_file = File::open(source)?;
    let mut destination_file = File::open(destination)?;

    if source_file.metadata()?.len() != destination_file.metadata()?.len() {
        return Ok(false);
    }

    let mut source_buffer = vec![0u8; COMPARE_BUFFER_SIZE];
    let mut destination_buffer = vec![0u8; COMPARE_BUFFER_SIZE];

    loop {
        let source_read = read_full(&mut source_file, &mut source_buffer)?;
        let destination_read = read_full(&mut destination_file, &mut destination_buffer)?;

        if source_read != destination_read
            || source_buffer[..source_read] != destination_buffer[..destination_read]
        {
            return Ok(false);
        }

        if source_read == 0 {
            return Ok(true);
        }
    }
}

/// True when both files carry the same permission bits.
pub fn permissions_match(source: &Path, destination: &Path) -> io::Result<bool> {
    let source = fs::metadata(source)?.permissions();
    let destination = fs::metadata(destination)?.permissions();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Ok(source.mode() & 0o7777 == destination.mode() & 0o7777)
    }

    #[cfg(not(unix))]
    {
        Ok(source.readonly() == destination.readonly())
    }
}

// Fill `buf` unless EOF comes first, so chunk boundaries line up between files.
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
