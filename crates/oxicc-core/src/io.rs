//! File I/O
//!
//! Reading a profile file whole, and writing an encoded profile so that a
//! reader never sees a partially written file.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::icc::{DecodeOptions, Decoded, Profile};

/// Read a whole profile file into memory
pub fn read_profile_bytes(path: impl AsRef<Path>) -> io::Result<Vec<u8>> {
    fs::read(path)
}

fn temp_sibling(path: &Path) -> io::Result<PathBuf> {
    match path.file_name() {
        Some(name) => {
            let mut tmp_name = OsString::from(name);
            tmp_name.push(".tmp");
            Ok(path.with_file_name(tmp_name))
        }
        None => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "profile path has no file name",
        )),
    }
}

/// Write bytes through a temporary sibling file renamed into place
pub fn write_profile_bytes(path: impl AsRef<Path>, bytes: &[u8]) -> io::Result<()> {
    let path = path.as_ref();
    let tmp_path = temp_sibling(path)?;

    {
        let mut f = fs::File::create(&tmp_path)?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }

    #[cfg(windows)]
    {
        if path.exists() {
            // Windows rename fails if destination exists.
            fs::remove_file(path)?;
        }
    }

    fs::rename(&tmp_path, path)?;
    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Read and decode a profile file
pub fn load_profile(path: impl AsRef<Path>, options: &DecodeOptions) -> Result<Decoded> {
    let bytes = read_profile_bytes(path)?;
    Ok(Profile::decode(&bytes, options)?)
}

/// Encode a profile and write it atomically
pub fn save_profile(path: impl AsRef<Path>, profile: &Profile) -> Result<()> {
    let bytes = profile.encode();
    write_profile_bytes(path, &bytes)?;
    Ok(())
}
