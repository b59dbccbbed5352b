use std::path::{Path, PathBuf};

/// A novel on disk with a display-friendly name
#[derive(Debug, Clone, PartialEq)]
pub struct NovelFile {
    path: PathBuf,
    display_name: String,
}

impl NovelFile {
    pub fn new(path: PathBuf) -> Self {
        let display_name = Self::extract_display_name(&path);
        Self { path, display_name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without its `.txt` extension
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Title to show for a document: its own title if it has one, otherwise
    /// the display name.
    pub fn title_for<'a>(&'a self, doc_title: Option<&'a str>) -> &'a str {
        doc_title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.display_name)
    }

    fn extract_display_name(path: &Path) -> String {
        path.file_name()
            .and_then(|name| name.to_str())
            .map(|name| {
                name.strip_suffix(".txt")
                    .or_else(|| name.strip_suffix(".TXT"))
                    .unwrap_or(name)
            })
            .unwrap_or("Untitled")
            .to_string()
    }
}

impl From<PathBuf> for NovelFile {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&str> for NovelFile {
    fn from(path: &str) -> Self {
        Self::new(PathBuf::from(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("books/凡人修仙传.txt", "凡人修仙传")]
    #[case("SHOUT.TXT", "SHOUT")]
    #[case("notes.md", "notes.md")]
    #[case("no_extension", "no_extension")]
    #[case("/", "Untitled")]
    fn display_name_drops_txt_extension(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(NovelFile::from(path).display_name(), expected);
    }

    #[test]
    fn title_prefers_document_title() {
        let file = NovelFile::from("a/仙逆.txt");
        assert_eq!(file.title_for(Some("仙逆全集")), "仙逆全集");
        assert_eq!(file.title_for(Some("  ")), "仙逆");
        assert_eq!(file.title_for(None), "仙逆");
    }
}
