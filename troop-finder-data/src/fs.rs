//! UTF-8 file access built on `cap-std` and `camino`.

use std::io;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};

/// Open the directory containing `path` and return it with the file name.
fn open_parent(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, &str)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Read a whole file as UTF-8 text.
pub fn read_utf8(path: &Utf8Path) -> io::Result<String> {
    let (dir, name) = open_parent(path)?;
    dir.read_to_string(name)
}

/// Write `contents` to `path`, creating missing parent directories.
pub fn write_utf8(path: &Utf8Path, contents: &str) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_parent(path)?;
    dir.write(name, contents)
}

/// Create the parent directory of `path` if it does not exist.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => {
            fs_utf8::Dir::create_ambient_dir_all(parent, ambient_authority())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::rstest;
    use tempfile::TempDir;

    fn utf8_root(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 temp dir")
    }

    #[rstest]
    fn writes_create_missing_directories() {
        let temp = TempDir::new().expect("temp dir");
        let path = utf8_root(&temp).join("nested/deeper/cache.json");
        write_utf8(&path, "{}").expect("write succeeds");
        assert_eq!(read_utf8(&path).expect("read back"), "{}");
    }

    #[rstest]
    fn missing_files_report_not_found() {
        let temp = TempDir::new().expect("temp dir");
        let err = read_utf8(&utf8_root(&temp).join("absent.json")).expect_err("missing file");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
