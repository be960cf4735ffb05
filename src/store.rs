use log::debug;
use std::{
    fs::read_to_string,
    io::{BufWriter, Write},
    path::Path,
};
use tempfile::NamedTempFile;

use crate::{Error, Result};

pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(content.lines().map(String::from).collect())
}

/// File body for `lines`: newline-joined, with a final newline.
///
/// CRLF input read through [`read_lines`] comes back out with LF endings.
pub fn to_text<S: AsRef<str>>(lines: &[S]) -> String {
    let mut text = lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n");
    text.push('\n');
    text
}

/// Replaces the contents of `path` with `lines`.
///
/// The text goes to a temporary file next to `path` which is then renamed
/// over it, so the store is either fully rewritten or left as it was.
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut outfile = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    let mut writer = BufWriter::new(&mut outfile);
    writer
        .write_all(to_text(lines).as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| Error::io(path, e))?;
    drop(writer);
    outfile.persist(path).map_err(|e| Error::io(path, e.error))?;
    debug!("wrote {} lines to {path:?}", lines.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_read_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials");
        fs::write(&path, "[default]\r\naws_access_key_id = X\n\n").unwrap();
        assert_eq!(
            read_lines(&path).unwrap(),
            vec!["[default]", "aws_access_key_id = X", ""]
        );
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_lines(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_write_lines_replaces_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials");
        fs::write(&path, "old content that is longer than the new one\n").unwrap();

        write_lines(&path, &["[temp]", "a = 1"]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[temp]\na = 1\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_crlf_store_is_written_with_lf() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials");
        fs::write(&path, "[default]\r\naws_access_key_id = X\r\n").unwrap();

        write_lines(&path, &read_lines(&path).unwrap()).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[default]\naws_access_key_id = X\n"
        );
    }

    #[test]
    fn test_write_into_missing_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope").join("credentials");
        let err = write_lines(&path, &["[temp]"]).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(!path.exists());
    }
}
