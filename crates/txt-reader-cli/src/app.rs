use std::collections::HashSet;

use crossterm::event::KeyCode;
use ratatui::{text::Span, widgets::ListState};
use txt_reader_engine::{IndexId, IndexTree, NovelFile, ParagraphKind, ProcessedNovel};

/// Body paragraphs are indented by two ideographic spaces.
const BODY_INDENT: &str = "\u{3000}\u{3000}";
const PAGE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Index,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Heading(usize),
    Body,
    Blank,
}

/// One display line of the text panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub text: String,
    pub style: LineStyle,
}

/// A visible row of the index panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRow {
    pub id: IndexId,
    pub level: usize,
    pub has_children: bool,
    pub expanded: bool,
}

pub struct App {
    pub file: NovelFile,
    pub novel: ProcessedNovel,
    pub focus: Focus,
    pub index_state: ListState,
    pub rows: Vec<IndexRow>,
    collapsed: HashSet<IndexId>,
    pub lines: Vec<TextLine>,
    /// First display line of each paragraph.
    paragraph_lines: Vec<usize>,
    wrap_width: usize,
    pub scroll: usize,
}

impl App {
    pub fn new(file: NovelFile, novel: ProcessedNovel) -> Self {
        let mut app = Self {
            file,
            novel,
            focus: Focus::Index,
            index_state: ListState::default(),
            rows: vec![],
            collapsed: HashSet::new(),
            lines: vec![],
            paragraph_lines: vec![],
            wrap_width: 0,
            scroll: 0,
        };
        app.refresh_rows();
        if app.rows.is_empty() {
            app.focus = Focus::Text;
        } else {
            app.index_state.select(Some(0));
        }
        app
    }

    pub fn title(&self) -> &str {
        self.file.title_for(self.novel.doc.title())
    }

    /// Handles a key press. Returns `false` when the app should exit.
    pub fn on_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Tab | KeyCode::BackTab => self.toggle_focus(),
            _ => match self.focus {
                Focus::Index => self.on_index_key(code),
                Focus::Text => self.on_text_key(code),
            },
        }
        true
    }

    fn on_index_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Enter => self.jump_to_selected(),
            KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Right | KeyCode::Char('l') => self.set_selected_expanded(true),
            KeyCode::Left | KeyCode::Char('h') => self.set_selected_expanded(false),
            _ => {}
        }
    }

    fn on_text_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_back(1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(PAGE),
            KeyCode::PageUp => self.scroll_back(PAGE),
            KeyCode::Home | KeyCode::Char('g') => self.scroll = 0,
            KeyCode::End | KeyCode::Char('G') => self.scroll = self.last_line(),
            _ => {}
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Text if !self.rows.is_empty() => Focus::Index,
            _ => Focus::Text,
        };
    }

    fn select_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.index_state.selected() {
            Some(i) => (i + 1) % self.rows.len(),
            None => 0,
        };
        self.index_state.select(Some(i));
    }

    fn select_previous(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.index_state.selected() {
            Some(0) | None => self.rows.len() - 1,
            Some(i) => i - 1,
        };
        self.index_state.select(Some(i));
    }

    fn selected_row(&self) -> Option<IndexRow> {
        self.index_state
            .selected()
            .and_then(|i| self.rows.get(i))
            .copied()
    }

    /// Scrolls the text panel to the selected heading.
    pub fn jump_to_selected(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        if let Some(anchor) = self.novel.doc.index.get(row.id).anchor
            && let Some(&line) = self.paragraph_lines.get(anchor)
        {
            log::debug!("jumping to paragraph {anchor} at line {line}");
            self.scroll = line;
        }
    }

    fn toggle_selected(&mut self) {
        if let Some(row) = self.selected_row() {
            self.set_expanded(row.id, !row.expanded);
        }
    }

    fn set_selected_expanded(&mut self, expanded: bool) {
        if let Some(row) = self.selected_row() {
            self.set_expanded(row.id, expanded);
        }
    }

    fn set_expanded(&mut self, id: IndexId, expanded: bool) {
        if expanded {
            self.collapsed.remove(&id);
        } else if !self.novel.doc.index.children(id).is_empty() {
            self.collapsed.insert(id);
        }
        self.refresh_rows();
        if let Some(i) = self.rows.iter().position(|r| r.id == id) {
            self.index_state.select(Some(i));
        }
    }

    /// Rebuilds the visible index rows, skipping collapsed subtrees.
    fn refresh_rows(&mut self) {
        let index = &self.novel.doc.index;
        let mut rows = vec![];
        let mut stack: Vec<IndexId> = index
            .children(IndexTree::ROOT)
            .iter()
            .rev()
            .copied()
            .collect();
        while let Some(id) = stack.pop() {
            let node = index.get(id);
            let expanded = !self.collapsed.contains(&id);
            rows.push(IndexRow {
                id,
                level: usize::try_from(node.level).unwrap_or(0),
                has_children: !node.children.is_empty(),
                expanded,
            });
            if expanded {
                stack.extend(node.children.iter().rev());
            }
        }
        self.rows = rows;
    }

    fn scroll_by(&mut self, n: usize) {
        self.scroll = (self.scroll + n).min(self.last_line());
    }

    fn scroll_back(&mut self, n: usize) {
        self.scroll = self.scroll.saturating_sub(n);
    }

    fn last_line(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    /// Re-wraps the text for a panel of `width` columns, keeping the
    /// paragraph at the top of the view in place.
    pub fn set_wrap_width(&mut self, width: usize) {
        let width = width.max(2);
        if width == self.wrap_width {
            return;
        }
        let top_paragraph = self.paragraph_lines.partition_point(|&l| l <= self.scroll);

        self.wrap_width = width;
        self.lines.clear();
        self.paragraph_lines.clear();
        for p in &self.novel.doc.paragraphs {
            self.paragraph_lines.push(self.lines.len());
            let (style, text) = match p.kind {
                ParagraphKind::Title => (LineStyle::Title, p.display_text().to_string()),
                ParagraphKind::Paragraph => (LineStyle::Body, format!("{BODY_INDENT}{}", p.text)),
                _ => (LineStyle::Heading(p.level.unwrap_or(0)), p.text.clone()),
            };
            for piece in wrap(&text, width) {
                self.lines.push(TextLine { text: piece, style });
            }
            self.lines.push(TextLine {
                text: String::new(),
                style: LineStyle::Blank,
            });
        }

        self.scroll = top_paragraph
            .checked_sub(1)
            .and_then(|p| self.paragraph_lines.get(p).copied())
            .unwrap_or(0);
    }
}

/// Display width of a character as the terminal renders it.
fn char_width(c: char) -> usize {
    let mut buf = [0u8; 4];
    Span::raw(&*c.encode_utf8(&mut buf)).width()
}

/// Breaks `text` into lines of at most `width` display columns.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = vec![];
    let mut line = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = char_width(c);
        if used + w > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            used = 0;
        }
        line.push(c);
        used += w;
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}
