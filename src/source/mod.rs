//! Boundary to the extraction collaborator: something that can hand the
//! pipeline an ordered list of raw text lines per page. The pipeline never
//! sees the source document itself.

use std::fs;
use std::path::{Path, PathBuf};
use log::{debug, info};

use crate::error::{Error, Result};

pub trait PageSource: Sync + Send {
    /// Number of pages the underlying document actually has.
    fn page_count(&self) -> usize;

    /// Raw lines of the pages in the 1-based inclusive range
    /// `start_page..=end_page`, clamped to the document. A page with no
    /// readable text contributes an empty group, never an error.
    fn read_pages(&self, start_page: usize, end_page: usize) -> Result<Vec<Vec<String>>>;
}

/// Page source over a pre-extracted UTF-8 text file with form-feed page
/// separators, the layout pdftotext and friends produce.
pub struct TextPageSource {
    path: PathBuf,
    pages: Vec<String>,
}

impl TextPageSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = fs::read_to_string(&path).map_err(|e| {
            Error::source(format!("Cannot read source text {:?}: {}", path, e))
        })?;

        let pages: Vec<String> = content.split('\u{c}').map(str::to_string).collect();
        info!("Opened {:?}: {} pages", path, pages.len());

        Ok(Self { path, pages })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PageSource for TextPageSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn read_pages(&self, start_page: usize, end_page: usize) -> Result<Vec<Vec<String>>> {
        if start_page == 0 || end_page < start_page {
            return Err(Error::source(format!(
                "Invalid page range {}-{}", start_page, end_page
            )));
        }

        let first = start_page - 1;
        if first >= self.pages.len() {
            debug!("Page range {}-{} lies past the document ({} pages)",
                start_page, end_page, self.pages.len());
            return Ok(Vec::new());
        }
        let last = end_page.min(self.pages.len());

        let groups = self.pages[first..last]
            .iter()
            .map(|page| page.lines().map(str::to_string).collect())
            .collect();
        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn source_with(content: &str) -> TextPageSource {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        TextPageSource::open(file.path()).unwrap()
    }

    #[test]
    fn splits_pages_on_form_feed() {
        let source = source_with("first page\nline two\u{c}second page\u{c}third");
        assert_eq!(source.page_count(), 3);

        let pages = source.read_pages(1, 3).unwrap();
        assert_eq!(pages[0], vec!["first page", "line two"]);
        assert_eq!(pages[1], vec!["second page"]);
        assert_eq!(pages[2], vec!["third"]);
    }

    #[test]
    fn range_is_clamped_to_document() {
        let source = source_with("a\u{c}b");
        let pages = source.read_pages(2, 10).unwrap();
        assert_eq!(pages, vec![vec!["b".to_string()]]);

        assert!(source.read_pages(5, 10).unwrap().is_empty());
    }

    #[test]
    fn empty_page_yields_zero_lines() {
        let source = source_with("a\u{c}\u{c}c");
        let pages = source.read_pages(1, 3).unwrap();
        assert!(pages[1].is_empty());
    }

    #[test]
    fn missing_file_is_fatal() {
        assert!(TextPageSource::open("no/such/file.txt").is_err());
    }
}
