//! Common file system operations

use std::fs;
use std::io;
use std::path::Path;

/// Copy the contents of `src` into `dst`, creating `dst` if needed.
///
/// Existing files in `dst` are overwritten, other existing files are kept.
pub fn copy_dir_recursive<P1, P2>(src: P1, dst: P2) -> io::Result<()>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    let src_ref = src.as_ref();
    let dst_ref = dst.as_ref();

    if !dst_ref.exists() {
        fs::create_dir_all(dst_ref)?;
    }

    for entry in fs::read_dir(src_ref)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let entry_path = entry.path();
        let dst_path = dst_ref.join(entry.file_name());

        if file_type.is_dir() {
            copy_dir_recursive(&entry_path, &dst_path)?;
        } else {
            fs::copy(&entry_path, &dst_path)?;
        }
    }

    Ok(())
}

/// Whether `path` is a directory with at least one entry
pub fn is_non_empty_dir(path: &Path) -> bool {
    fs::read_dir(path)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

/// Remove a file or directory tree if it exists
pub fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_dir_recursive() {
        let temp = tempfile::TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir_all(src.join("nested/deeper")).unwrap();
        fs::write(src.join("test.txt"), "hello").unwrap();
        fs::write(src.join("nested/deeper/inner.txt"), "inner").unwrap();

        copy_dir_recursive(&src, &dst).unwrap();
        assert_eq!(fs::read_to_string(dst.join("test.txt")).unwrap(), "hello");
        assert_eq!(
            fs::read_to_string(dst.join("nested/deeper/inner.txt")).unwrap(),
            "inner"
        );
    }

    #[test]
    fn test_copy_dir_recursive_overwrites() {
        let temp = tempfile::TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&dst).unwrap();
        fs::write(src.join("a.txt"), "new").unwrap();
        fs::write(dst.join("a.txt"), "old").unwrap();
        fs::write(dst.join("keep.txt"), "keep").unwrap();

        copy_dir_recursive(&src, &dst).unwrap();
        assert_eq!(fs::read_to_string(dst.join("a.txt")).unwrap(), "new");
        assert!(dst.join("keep.txt").exists());
    }

    #[test]
    fn test_is_non_empty_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(!is_non_empty_dir(temp.path()));
        assert!(!is_non_empty_dir(&temp.path().join("missing")));
        fs::write(temp.path().join("f"), "").unwrap();
        assert!(is_non_empty_dir(temp.path()));
    }

    #[test]
    fn test_remove_if_exists() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("dir");
        fs::create_dir_all(dir.join("sub")).unwrap();
        let file = temp.path().join("file");
        fs::write(&file, "x").unwrap();

        remove_if_exists(&dir).unwrap();
        remove_if_exists(&file).unwrap();
        remove_if_exists(&temp.path().join("missing")).unwrap();
        assert!(!dir.exists());
        assert!(!file.exists());
    }
}
