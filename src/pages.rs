//! Page content for the carousel binary.
//!
//! A pages file is plain UTF-8 text. Pages are separated by lines consisting
//! of `---`; a first line starting with `# ` becomes the page title.

use std::path::Path;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::error::{CarouselError, Result};

const PAGE_SEPARATOR: &str = "---";
const TITLE_PREFIX: &str = "# ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: Option<String>,
    pub body: String,
}

impl Page {
    pub fn new(title: Option<String>, body: impl Into<String>) -> Self {
        Self {
            title,
            body: body.into(),
        }
    }

    fn parse(chunk: &str) -> Option<Self> {
        let chunk = chunk.trim_matches('\n');
        if chunk.trim().is_empty() {
            return None;
        }

        let mut lines = chunk.lines();
        let first = lines.next().unwrap_or_default();
        match first.strip_prefix(TITLE_PREFIX) {
            Some(title) => {
                let body = lines.collect::<Vec<_>>().join("\n");
                Some(Self::new(Some(title.trim().to_string()), body.trim_matches('\n')))
            }
            None => Some(Self::new(None, chunk)),
        }
    }
}

impl Widget for Page {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::default().borders(Borders::ALL);
        if let Some(title) = self.title {
            block = block
                .title(format!(" {} ", title))
                .title_style(Style::default().add_modifier(Modifier::BOLD));
        }

        Paragraph::new(self.body)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

pub fn parse_pages(content: &str) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut chunk = String::new();

    for line in content.lines() {
        if line.trim_end() == PAGE_SEPARATOR {
            pages.extend(Page::parse(&chunk));
            chunk.clear();
        } else {
            chunk.push_str(line);
            chunk.push('\n');
        }
    }
    pages.extend(Page::parse(&chunk));
    pages
}

pub fn load_pages(path: &Path) -> Result<Vec<Page>> {
    let content = std::fs::read_to_string(path)?;
    let pages = parse_pages(&content);
    if pages.is_empty() {
        return Err(CarouselError::EmptyPages);
    }

    tracing::info!("Loaded {} pages from {}", pages.len(), path.display());
    Ok(pages)
}

pub fn demo_pages() -> Vec<Page> {
    vec![
        Page::new(
            Some("Welcome".to_string()),
            "This carousel cycles through a fixed sequence of pages.\n\nPress n or → to advance.",
        ),
        Page::new(
            Some("Auto-advance".to_string()),
            "Run with --automatic to turn pages on a timer.\n--interval sets the period in milliseconds.",
        ),
        Page::new(
            Some("Progress dots".to_string()),
            "With --clickable, click a dot (or press 1-9) to jump to that page.\nAuto-advance pauses for one interval after a jump.",
        ),
        Page::new(
            Some("Finish".to_string()),
            "With --quit-on-finish the last page offers a finish button instead of wrapping around.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_parse_titles_and_bodies() {
        let pages = parse_pages("# One\nfirst body\n---\n# Two\nsecond\nbody\n");
        assert_eq!(
            pages,
            vec![
                Page::new(Some("One".to_string()), "first body"),
                Page::new(Some("Two".to_string()), "second\nbody"),
            ]
        );
    }

    #[test]
    fn test_parse_untitled_and_blank_chunks() {
        let pages = parse_pages("---\nplain text\n---\n\n   \n---\n");
        assert_eq!(pages, vec![Page::new(None, "plain text")]);
    }

    #[test]
    fn test_separator_must_be_whole_line() {
        let pages = parse_pages("a --- b\n----\n");
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_load_pages_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deck.txt");
        std::fs::write(&path, "# A\nalpha\n---\n# B\nbeta\n").unwrap();

        let pages = load_pages(&path).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].title.as_deref(), Some("B"));
    }

    #[test]
    fn test_load_empty_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, "\n---\n").unwrap();
        assert!(matches!(load_pages(&path), Err(CarouselError::EmptyPages)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_pages(Path::new("/nonexistent/deck.txt")).unwrap_err();
        assert!(matches!(err, CarouselError::Io(_)));
    }

    #[test]
    fn test_page_renders_title_and_body() {
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        Page::new(Some("Hi".to_string()), "hello").render(area, &mut buf);

        let top: String = (0..20).map(|x| buf[(x, 0)].symbol()).collect();
        let body: String = (0..20).map(|x| buf[(x, 1)].symbol()).collect();
        assert!(top.contains(" Hi "));
        assert!(body.contains("hello"));
    }

    #[test]
    fn test_demo_pages_not_empty() {
        assert!(!demo_pages().is_empty());
    }
}
