use crate::parsing::{
    ParsedDoc,
    classify::{BOUNDARY_CHARS, LINE_BREAK_CHARS},
    index::IndexTree,
    span::Span,
};

/// Validates parser output invariants.
///
/// Asserts that:
/// - all spans are within the source and in document order
/// - leading/trailing spans and the tail hold only boundary characters
/// - paragraphs plus boundaries reproduce the whole input
/// - every index node anchors a heading paragraph at its own level
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(source: &str, doc: &ParsedDoc) {
    let n = source.len();
    let mut cursor = 0;

    for (i, p) in doc.paragraphs.iter().enumerate() {
        for (label, sp) in [("leading", p.leading), ("text", p.span), ("trailing", p.trailing)] {
            assert!(
                sp.start <= sp.end && sp.end <= n,
                "paragraph {i} {label} span out of bounds: {sp:?} (len: {n})"
            );
            assert_eq!(
                sp.start, cursor,
                "paragraph {i} {label} span {sp:?} does not continue at {cursor}"
            );
            cursor = sp.end;
        }
        assert_eq!(p.span.slice(source), p.text, "paragraph {i} text mismatch");
        assert_boundary(source, p.leading, i);
        assert_boundary(source, p.trailing, i);
    }

    assert_eq!(doc.tail.start, cursor, "tail does not continue at {cursor}");
    assert_eq!(doc.tail.end, n, "tail does not reach end of input");
    assert_boundary(source, doc.tail, doc.paragraphs.len());

    for (id, _) in doc.index.walk() {
        let node = doc.index.get(id);
        let anchor = node
            .anchor
            .unwrap_or_else(|| panic!("index node {:?} has no anchor", node.name));
        let heading = &doc.paragraphs[anchor];
        assert!(heading.kind.is_heading(), "index node {:?} anchors {:?}", node.name, heading.kind);
        assert_eq!(heading.section, Some(id), "heading {anchor} not owned by its node");
        assert_eq!(
            heading.level.and_then(|l| i32::try_from(l).ok()),
            Some(node.level),
            "heading {anchor} level differs from its node"
        );
        if let Some(parent) = doc.index.parent(id).filter(|&p| p != IndexTree::ROOT) {
            assert!(
                doc.index.get(parent).level < node.level,
                "index node {:?} not deeper than its parent",
                node.name
            );
        }
    }
}

fn assert_boundary(source: &str, sp: Span, at: usize) {
    let text = sp.slice(source);
    assert!(
        text.chars()
            .all(|c| BOUNDARY_CHARS.contains(&c) || LINE_BREAK_CHARS.contains(&c)),
        "non-boundary characters around paragraph {at}: {text:?}"
    );
}
