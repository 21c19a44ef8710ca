//! Zip packaging of the written CSV files.
//!
//! Members are stored flat under their file names with deflate compression.
//! The archive is assembled under a `.partial` sibling and renamed into place
//! once complete, so a failed run leaves no half-written archive behind.

use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Path the archive is staged under while it is being written.
pub fn partial_path(archive_path: &Path) -> PathBuf {
    let mut name = archive_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    archive_path.with_file_name(name)
}

/// Write `members` into a deflate zip at `archive_path`.
///
/// Each member is stored under its bare file name. On any error the staged
/// file is removed and `archive_path` is left untouched.
pub fn write_archive(archive_path: &Path, members: &[PathBuf]) -> Result<()> {
    write_archive_checked(archive_path, members, |_| Ok(()))
}

/// Like [`write_archive`], but runs `check` against the staged file before
/// it is moved into place. A failed check discards the staged archive.
pub fn write_archive_checked<F>(archive_path: &Path, members: &[PathBuf], check: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let staged = partial_path(archive_path);
    let result = write_members(&staged, members)
        .and_then(|()| check(&staged))
        .and_then(|()| {
            std::fs::rename(&staged, archive_path).with_context(|| {
                format!(
                    "Failed to move archive into place: {}",
                    archive_path.display()
                )
            })
        });

    if result.is_err() && staged.exists() {
        let _ = std::fs::remove_file(&staged);
    }
    result
}

fn write_members(staged: &Path, members: &[PathBuf]) -> Result<()> {
    let file = File::create(staged)
        .with_context(|| format!("Failed to create archive: {}", staged.display()))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for member in members {
        let name = member_name(member)?;
        let bytes = std::fs::read(member)
            .with_context(|| format!("Failed to read archive member: {}", member.display()))?;
        zip.start_file(name, options)
            .with_context(|| format!("Failed to add {} to archive", member.display()))?;
        zip.write_all(&bytes)
            .with_context(|| format!("Failed to add {} to archive", member.display()))?;
    }

    let mut writer = zip
        .finish()
        .with_context(|| format!("Failed to finish archive: {}", staged.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to finish archive: {}", staged.display()))?;
    Ok(())
}

fn member_name(path: &Path) -> Result<String> {
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => Ok(name.to_string()),
        None => bail!("Archive member has no usable file name: {}", path.display()),
    }
}

/// Read back every member of an archive as `(name, bytes)`, in stored order.
pub fn read_archive(archive_path: &Path) -> Result<Vec<(String, Vec<u8>)>> {
    let file = File::open(archive_path)
        .with_context(|| format!("Failed to open archive: {}", archive_path.display()))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("Failed to read archive: {}", archive_path.display()))?;

    let mut members = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        members.push((entry.name().to_string(), bytes));
    }
    Ok(members)
}

/// Check that the archive holds exactly `expected` (name, bytes) pairs.
pub fn verify_archive(archive_path: &Path, expected: &[(String, Vec<u8>)]) -> Result<()> {
    let members = read_archive(archive_path)?;
    if members.len() != expected.len() {
        bail!(
            "Archive {} has {} members, expected {}",
            archive_path.display(),
            members.len(),
            expected.len()
        );
    }
    for ((name, bytes), (want_name, want_bytes)) in members.iter().zip(expected) {
        if name != want_name || bytes != want_bytes {
            bail!(
                "Archive member {} does not match {}",
                name,
                want_name
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_member(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn members_round_trip_flat() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("out");
        std::fs::create_dir_all(&nested).unwrap();
        let a = write_member(&nested, "categories.csv", "id,name\r\n1,Books\r\n");
        let b = write_member(&nested, "items.csv", "id,code\r\n1,BO001\r\n");
        let archive = tmp.path().join("seed.zip");

        write_archive(&archive, &[a, b]).unwrap();

        let members = read_archive(&archive).unwrap();
        let names: Vec<&str> = members.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["categories.csv", "items.csv"]);
        assert_eq!(members[1].1, b"id,code\r\n1,BO001\r\n");
        assert!(!partial_path(&archive).exists());
    }

    #[test]
    fn entries_are_deflated() {
        let tmp = TempDir::new().unwrap();
        let a = write_member(tmp.path(), "items.csv", &"x,y\r\n".repeat(100));
        let archive = tmp.path().join("seed.zip");
        write_archive(&archive, &[a]).unwrap();

        let mut zip = ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        let entry = zip.by_index(0).unwrap();
        assert_eq!(entry.compression(), CompressionMethod::Deflated);
    }

    #[test]
    fn failed_write_leaves_no_archive() {
        let tmp = TempDir::new().unwrap();
        let present = write_member(tmp.path(), "categories.csv", "id,name\r\n");
        let missing = tmp.path().join("items.csv");
        let archive = tmp.path().join("seed.zip");

        let err = write_archive(&archive, &[present, missing]).unwrap_err();
        assert!(format!("{:#}", err).contains("items.csv"));
        assert!(!archive.exists());
        assert!(!partial_path(&archive).exists());
    }

    #[test]
    fn failed_write_keeps_previous_archive() {
        let tmp = TempDir::new().unwrap();
        let archive = tmp.path().join("seed.zip");
        std::fs::write(&archive, b"previous").unwrap();

        let missing = tmp.path().join("nope.csv");
        assert!(write_archive(&archive, &[missing]).is_err());
        assert_eq!(std::fs::read(&archive).unwrap(), b"previous");
    }

    #[test]
    fn verify_detects_mismatch() {
        let tmp = TempDir::new().unwrap();
        let a = write_member(tmp.path(), "categories.csv", "id,name\r\n");
        let archive = tmp.path().join("seed.zip");
        write_archive(&archive, &[a]).unwrap();

        let good = vec![("categories.csv".to_string(), b"id,name\r\n".to_vec())];
        assert!(verify_archive(&archive, &good).is_ok());

        let bad = vec![("categories.csv".to_string(), b"other".to_vec())];
        assert!(verify_archive(&archive, &bad).is_err());
    }

    #[test]
    fn failed_check_discards_staged_archive() {
        let tmp = TempDir::new().unwrap();
        let a = write_member(tmp.path(), "categories.csv", "id,name\r\n");
        let archive = tmp.path().join("seed.zip");
        let expected = vec![("categories.csv".to_string(), b"other".to_vec())];

        let err = write_archive_checked(&archive, &[a], |staged| {
            verify_archive(staged, &expected)
        })
        .unwrap_err();
        assert!(err.to_string().contains("does not match"));
        assert!(!archive.exists());
        assert!(!partial_path(&archive).exists());
    }

    #[test]
    fn partial_path_is_a_sibling() {
        let path = Path::new("/tmp/out/inventory_seed_data.zip");
        assert_eq!(
            partial_path(path),
            Path::new("/tmp/out/inventory_seed_data.zip.partial")
        );
    }
}
