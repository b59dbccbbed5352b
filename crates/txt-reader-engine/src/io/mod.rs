use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read a novel from disk and decode it to text
pub fn read_novel(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    Ok(decode_text(&bytes).into_owned())
}

/// Decode raw bytes: UTF-8 (BOM stripped) when valid, GB18030 otherwise.
///
/// GB18030 is a superset of GBK and GB2312, the usual encodings of Chinese
/// `.txt` novels.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (text, _, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return text;
    }

    log::debug!("input is not UTF-8, decoding as GB18030");
    let (text, _, _) = encoding_rs::GB18030.decode(bytes);
    text
}
