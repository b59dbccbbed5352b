//! Document-level tests for the parsing module.
//!
//! Fixture snapshots live in the crate's `tests/` directory; these cover
//! the structural properties directly.

use pretty_assertions::assert_eq;

use crate::parsing::{
    IndexTree, ParagraphKind, parse_document,
    snapshot::{self, normalize},
};

const VOLUMES: &str = "第一卷 潜龙\n第一章 少年\n他醒了。\n第二章 出山\n他走了。\n第二卷 在渊\n第三章 归来\n";

#[test]
fn volumes_then_chapters_nest_by_first_appearance() {
    let doc = parse_document(VOLUMES);
    snapshot::invariants(VOLUMES, &doc);

    assert_eq!(doc.keywords, vec!['卷', '章']);
    assert_eq!(doc.index.outline(), "▶ 第一卷 潜龙\n  • 第一章 少年\n  • 第二章 出山\n▶ 第二卷 在渊\n  • 第三章 归来");
}

#[test]
fn title_is_recognised_once() {
    let text = "《仙逆》\n《仙逆》\n正文\n";
    let doc = parse_document(text);
    snapshot::invariants(text, &doc);

    let kinds: Vec<_> = doc.paragraphs.iter().map(|p| p.kind).collect();
    assert_eq!(
        kinds,
        vec![ParagraphKind::Title, ParagraphKind::Paragraph, ParagraphKind::Paragraph]
    );
    assert_eq!(doc.title(), Some("仙逆"));
    assert!(doc.index.is_empty());
}

#[test]
fn round_trip_reproduces_input() {
    let text = "　　《书》\r\n\r\n序　言\n  内容  \n\t第1.2节 小节\r\n\n\n后 记\n结束。 \u{3000}\n\n";
    let doc = parse_document(text);
    snapshot::invariants(text, &doc);

    assert_eq!(snapshot::consumed(&doc), text.len());
    assert_eq!(snapshot::reassemble(text, &doc), text);
}

#[test]
fn document_without_trailing_line_break() {
    let text = "第一章\n最后一句";
    let doc = parse_document(text);
    snapshot::invariants(text, &doc);

    assert_eq!(doc.paragraphs.len(), 2);
    assert!(doc.tail.is_empty());
}

#[test]
fn empty_document() {
    let doc = parse_document("");
    assert!(doc.is_empty());
    assert!(doc.index.is_empty());
    assert_eq!(doc.title(), None);
}

#[test]
fn blank_lines_only() {
    let text = "\n \n\u{3000}\r\n";
    let doc = parse_document(text);
    snapshot::invariants(text, &doc);

    assert!(doc.is_empty());
    assert_eq!(doc.tail.len(), text.len());
}

#[test]
fn section_paragraphs_are_direct_members() {
    let doc = parse_document(VOLUMES);
    let volume = doc.index.children(IndexTree::ROOT)[0];
    let chapter = doc.index.children(volume)[0];

    let texts: Vec<_> = doc
        .section_paragraphs(chapter)
        .map(|p| p.text.as_str())
        .collect();
    assert_eq!(texts, vec!["第一章 少年", "他醒了。"]);

    let volume_texts: Vec<_> = doc
        .section_paragraphs(volume)
        .map(|p| p.text.as_str())
        .collect();
    assert_eq!(volume_texts, vec!["第一卷 潜龙"]);
    assert_eq!(doc.heading(chapter).map(|p| p.level), Some(Some(1)));
}

#[test]
fn normalize_carries_section_paths() {
    let doc = parse_document(VOLUMES);
    let snap = normalize(&doc);

    assert_eq!(snap.keywords, vec!["卷", "章"]);
    assert_eq!(snap.index.len(), 2);
    assert_eq!(snap.index[0].children.len(), 2);
    assert_eq!(
        snap.paragraphs[2].section.as_deref(),
        Some("第一卷 潜龙 -> 第一章 少年")
    );
    assert_eq!(snap.paragraphs[2].level, None);
}
