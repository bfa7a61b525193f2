//! Zip archive creation for packaged builds.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use tracing::info;
use walkdir::WalkDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{Error, Result};

/// Compress a directory tree into a single zip archive.
///
/// Entry names are relative to `src_dir` with forward slashes, walked in
/// sorted order so archives of identical trees are laid out identically.
/// A missing or empty source directory is a loud error, never a silent
/// skip.
pub fn zip_dir(src_dir: &Path, archive_path: &Path) -> Result<()> {
    if !src_dir.is_dir() || fs::read_dir(src_dir)?.next().is_none() {
        return Err(Error::EmptyOutputDir {
            path: src_dir.to_path_buf(),
        });
    }

    let file = File::create(archive_path)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut files = 0usize;
    for entry in WalkDir::new(src_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| archive_err(archive_path, &e))?;
        let path = entry.path();

        let rel = path.strip_prefix(src_dir).unwrap_or(path);
        if rel.as_os_str().is_empty() {
            continue;
        }
        let name = rel.to_string_lossy().replace('\\', "/");

        if entry.file_type().is_dir() {
            writer
                .add_directory(name, options)
                .map_err(|e| archive_err(archive_path, &e))?;
        } else if entry.file_type().is_file() {
            writer
                .start_file(name, options)
                .map_err(|e| archive_err(archive_path, &e))?;
            let mut source = File::open(path)?;
            io::copy(&mut source, &mut writer)?;
            files += 1;
        }
    }

    writer.finish().map_err(|e| archive_err(archive_path, &e))?;

    info!(archive = %archive_path.display(), files = files, "archive written");
    Ok(())
}

fn archive_err(path: &Path, source: &dyn std::fmt::Display) -> Error {
    Error::Archive {
        path: path.to_path_buf(),
        message: source.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Read;
    use tempfile::tempdir;

    fn read_entry(archive: &Path, name: &str) -> Vec<u8> {
        let file = File::open(archive).unwrap();
        let mut zip = zip::ZipArchive::new(file).unwrap();
        let mut entry = zip.by_name(name).unwrap();
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn round_trips_file_contents() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("content-win-x64");
        fs::create_dir_all(src.join("data")).unwrap();
        fs::write(src.join("Vortex.Shared.dll"), b"shared bits").unwrap();
        fs::write(src.join("data/skins.bin"), b"skin bits").unwrap();

        let archive = temp.path().join("client-1.0.0-win-x64.zip");
        zip_dir(&src, &archive).unwrap();

        assert_eq!(read_entry(&archive, "Vortex.Shared.dll"), b"shared bits");
        assert_eq!(read_entry(&archive, "data/skins.bin"), b"skin bits");
    }

    #[test]
    fn archive_holds_exactly_the_source_files() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("content");
        fs::create_dir_all(&src).unwrap();
        for name in ["a.dll", "b.dll", "c.dll"] {
            fs::write(src.join(name), name.as_bytes()).unwrap();
        }

        let archive = temp.path().join("out.zip");
        zip_dir(&src, &archive).unwrap();

        let file = File::open(&archive).unwrap();
        let zip = zip::ZipArchive::new(file).unwrap();
        let names: Vec<&str> = zip.file_names().collect();
        assert_eq!(names.len(), 3);
        for name in ["a.dll", "b.dll", "c.dll"] {
            assert!(names.contains(&name));
        }
    }

    #[test]
    fn missing_directory_fails_loudly() {
        let temp = tempdir().unwrap();
        let result = zip_dir(&temp.path().join("absent"), &temp.path().join("out.zip"));

        assert!(matches!(result, Err(Error::EmptyOutputDir { .. })));
    }

    #[test]
    fn empty_directory_fails_loudly() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("empty");
        fs::create_dir_all(&src).unwrap();

        let result = zip_dir(&src, &temp.path().join("out.zip"));
        assert!(matches!(result, Err(Error::EmptyOutputDir { .. })));
    }
}
