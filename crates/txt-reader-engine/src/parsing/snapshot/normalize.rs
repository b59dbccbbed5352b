use std::fmt::Write;

use serde::Serialize;

use crate::parsing::{
    ParsedDoc,
    index::{IndexId, IndexTree},
    span::preview,
    types::ParagraphKind,
};

/// Serializable view of a parsed document.
///
/// Used for `--json` output and for structural assertions in tests.
#[derive(Debug, Serialize)]
pub struct Snap {
    pub title: Option<String>,
    pub keywords: Vec<String>,
    pub index: Vec<IndexSnap>,
    pub paragraphs: Vec<ParagraphSnap>,
}

/// One index node with its subtree.
#[derive(Debug, Serialize)]
pub struct IndexSnap {
    pub name: String,
    pub level: i32,
    /// Position of the heading in `paragraphs`.
    pub anchor: Option<usize>,
    pub path: String,
    pub children: Vec<IndexSnap>,
}

#[derive(Debug, Serialize)]
pub struct ParagraphSnap {
    pub kind: ParagraphKind,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<usize>,
    /// Display path of the owning section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub span: (usize, usize),
}

pub fn normalize(doc: &ParsedDoc) -> Snap {
    let paragraphs = doc
        .paragraphs
        .iter()
        .map(|p| ParagraphSnap {
            kind: p.kind,
            text: p.text.clone(),
            keyword: p.keyword,
            level: p.level,
            section: p.section.map(|id| doc.index.get(id).path.clone()),
            span: (p.span.start, p.span.end),
        })
        .collect();

    Snap {
        title: doc.title().map(str::to_string),
        keywords: doc.keywords.iter().map(char::to_string).collect(),
        index: subtree(&doc.index, IndexTree::ROOT),
        paragraphs,
    }
}

fn subtree(tree: &IndexTree, id: IndexId) -> Vec<IndexSnap> {
    tree.children(id)
        .iter()
        .map(|&child| {
            let node = tree.get(child);
            IndexSnap {
                name: node.name.clone(),
                level: node.level,
                anchor: node.anchor,
                path: node.path.clone(),
                children: subtree(tree, child),
            }
        })
        .collect()
}

/// Plain-text rendering of a document for file snapshots.
///
/// Lines never start with whitespace: index depth is drawn with `. `.
pub fn render(source: &str, doc: &ParsedDoc) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "title: {}", doc.title().unwrap_or("(none)"));
    let _ = writeln!(
        out,
        "keywords: {}",
        doc.keywords.iter().map(char::to_string).collect::<Vec<_>>().join(" ")
    );

    out.push_str("index:\n");
    for (id, depth) in doc.index.walk() {
        let node = doc.index.get(id);
        let marker = if node.children.is_empty() { '•' } else { '▶' };
        let _ = writeln!(
            out,
            "{}{marker} {} (level {}, #{})",
            ". ".repeat(depth),
            node.name,
            node.level,
            node.anchor.unwrap_or(0)
        );
    }

    out.push_str("paragraphs:\n");
    for (i, p) in doc.paragraphs.iter().enumerate() {
        let kind = match (p.kind, p.level) {
            (ParagraphKind::Title, _) => "title".to_string(),
            (ParagraphKind::Paragraph, _) => "text".to_string(),
            (kind, Some(level)) => format!("{}{level}", heading_label(kind)),
            (kind, None) => heading_label(kind).to_string(),
        };
        let _ = writeln!(out, "#{i} {kind}: {}", preview(source, p.span, 24));
    }

    if !doc.tail.is_empty() {
        let _ = writeln!(out, "tail: {} bytes", doc.tail.len());
    }
    out
}

fn heading_label(kind: ParagraphKind) -> &'static str {
    match kind {
        ParagraphKind::PrefaceHeading => "preface",
        ParagraphKind::PostscriptHeading => "postscript",
        _ => "section",
    }
}

/// Sum of every span a document consumed.
pub fn consumed(doc: &ParsedDoc) -> usize {
    doc.paragraphs
        .iter()
        .map(|p| p.leading.len() + p.span.len() + p.trailing.len())
        .sum::<usize>()
        + doc.tail.len()
}

/// Concatenation of all consumed spans, which must equal the source.
pub fn reassemble(source: &str, doc: &ParsedDoc) -> String {
    let mut out = String::with_capacity(source.len());
    for p in &doc.paragraphs {
        for sp in [p.leading, p.span, p.trailing] {
            out.push_str(sp.slice(source));
        }
    }
    out.push_str(doc.tail.slice(source));
    out
}
