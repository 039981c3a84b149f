//! Decoding note files into plain text.

use crate::domain::TextFormat;
use crate::domain::rtf::{self, RtfError};
use crate::infra::fs::FsError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors while turning a note file into plain text.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Fs(#[from] FsError),

    #[error("invalid encoding in {path}: {encoding}")]
    InvalidEncoding { path: PathBuf, encoding: String },

    #[error("failed to read rich text in {path}: {source}")]
    Rtf {
        path: PathBuf,
        #[source]
        source: RtfError,
    },
}

/// Turns a note file into plain text.
pub trait TextDecoder {
    fn decode(&self, path: &Path, format: TextFormat) -> Result<String, DecodeError>;
}

/// Decoder that reads note files from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileDecoder;

impl TextDecoder for FileDecoder {
    fn decode(&self, path: &Path, format: TextFormat) -> Result<String, DecodeError> {
        let bytes = std::fs::read(path).map_err(|e| FsError::from_io(path, e))?;
        decode_bytes(bytes, path, format)
    }
}

/// Decodes already-read bytes of a note file.
///
/// # Errors
///
/// Returns `DecodeError::InvalidEncoding` if the bytes are not valid UTF-8 or
/// carry a UTF-16 byte order mark.
/// Returns `DecodeError::Rtf` if a rich text document cannot be read.
pub fn decode_bytes(bytes: Vec<u8>, path: &Path, format: TextFormat) -> Result<String, DecodeError> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(DecodeError::InvalidEncoding {
            path: path.into(),
            encoding: "UTF-16 LE detected (byte order mark FF FE); convert to UTF-8".into(),
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(DecodeError::InvalidEncoding {
            path: path.into(),
            encoding: "UTF-16 BE detected (byte order mark FE FF); convert to UTF-8".into(),
        });
    }

    let content = String::from_utf8(bytes).map_err(|e| DecodeError::InvalidEncoding {
        path: path.into(),
        encoding: format!("invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
    })?;

    let content = content
        .strip_prefix('\u{FEFF}')
        .map(str::to_string)
        .unwrap_or(content);

    match format {
        TextFormat::Plain | TextFormat::Markdown => Ok(content),
        TextFormat::Rtf => rtf::decode(&content).map_err(|source| DecodeError::Rtf {
            path: path.into(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn decodes_plain_text() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.txt", "line one\nline two".as_bytes());

        let text = FileDecoder.decode(&path, TextFormat::Plain).unwrap();

        assert_eq!(text, "line one\nline two");
    }

    #[test]
    fn markdown_is_read_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.md", b"# Heading\n\n*emphasis*");

        let text = FileDecoder.decode(&path, TextFormat::Markdown).unwrap();

        assert_eq!(text, "# Heading\n\n*emphasis*");
    }

    #[test]
    fn strips_utf8_bom() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.txt", b"\xEF\xBB\xBFhello");

        let text = FileDecoder.decode(&path, TextFormat::Plain).unwrap();

        assert_eq!(text, "hello");
    }

    #[test]
    fn rejects_utf16_bom() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.txt", &[0xFF, 0xFE, b'h', 0]);

        let result = FileDecoder.decode(&path, TextFormat::Plain);

        assert!(matches!(result, Err(DecodeError::InvalidEncoding { .. })));
    }

    #[test]
    fn rejects_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.txt", &[b'o', b'k', 0xC3, 0x28]);

        let result = FileDecoder.decode(&path, TextFormat::Plain);

        match result {
            Err(DecodeError::InvalidEncoding { encoding, .. }) => {
                assert!(encoding.contains("byte 2"), "got {encoding}");
            }
            other => panic!("expected InvalidEncoding, got {other:?}"),
        }
    }

    #[test]
    fn decodes_rich_text() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.rtf", br"{\rtf1\ansi{\fonttbl\f0 Helvetica;}\f0 Hello\par World}");

        let text = FileDecoder.decode(&path, TextFormat::Rtf).unwrap();

        assert_eq!(text, "Hello\nWorld");
    }

    #[test]
    fn malformed_rich_text_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.rtf", b"not rich text");

        let result = FileDecoder.decode(&path, TextFormat::Rtf);

        assert!(matches!(result, Err(DecodeError::Rtf { .. })));
    }

    #[test]
    fn missing_file_is_not_found() {
        let result = FileDecoder.decode(Path::new("/nonexistent/a.txt"), TextFormat::Plain);
        assert!(matches!(
            result,
            Err(DecodeError::Fs(FsError::NotFound { .. }))
        ));
    }
}
