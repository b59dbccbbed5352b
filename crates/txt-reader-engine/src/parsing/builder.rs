use super::{
    index::{IndexId, IndexTree},
    types::{Paragraph, ParagraphKind, Unit},
};

/// Folds classified units into the paragraph list and the index tree.
///
/// Section levels are assigned by first appearance of their keyword: the
/// first keyword seen is level 0, the next distinct one level 1, and so on.
pub struct IndexBuilder {
    tree: IndexTree,
    cursor: IndexId,
    keyword_order: Vec<char>,
    paragraphs: Vec<Paragraph>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self {
            tree: IndexTree::new(),
            cursor: IndexTree::ROOT,
            keyword_order: vec![],
            paragraphs: vec![],
        }
    }

    pub fn push(&mut self, unit: &Unit<'_>) {
        let anchor = self.paragraphs.len();
        let (level, section) = match unit.kind {
            ParagraphKind::Title => (None, None),
            ParagraphKind::PrefaceHeading | ParagraphKind::PostscriptHeading => {
                self.cursor = self.tree.attach(IndexTree::ROOT, unit.text, 0, anchor);
                (Some(0), Some(self.cursor))
            }
            ParagraphKind::SectionHeading => {
                let level = unit.keyword.map_or(0, |k| self.level_of(k));
                self.open_section(unit.text, level, anchor);
                (Some(level), Some(self.cursor))
            }
            ParagraphKind::Paragraph => (None, self.current_section()),
        };

        self.paragraphs.push(Paragraph {
            kind: unit.kind,
            text: unit.text.to_string(),
            keyword: unit.keyword,
            span: unit.span,
            leading: unit.leading,
            trailing: unit.trailing,
            level,
            section,
        });
    }

    pub fn finish(self) -> (Vec<Paragraph>, IndexTree) {
        (self.paragraphs, self.tree)
    }

    /// Keywords in order of first appearance.
    pub fn keyword_order(&self) -> &[char] {
        &self.keyword_order
    }

    fn level_of(&mut self, keyword: char) -> usize {
        match self.keyword_order.iter().position(|&k| k == keyword) {
            Some(level) => level,
            None => {
                self.keyword_order.push(keyword);
                self.keyword_order.len() - 1
            }
        }
    }

    fn open_section(&mut self, name: &str, level: usize, anchor: usize) {
        let level = i32::try_from(level).unwrap_or(i32::MAX);
        // The root sits at -1, so this always stops.
        while self.tree.get(self.cursor).level >= level {
            match self.tree.parent(self.cursor) {
                Some(parent) => self.cursor = parent,
                None => break,
            }
        }
        self.cursor = self.tree.attach(self.cursor, name, level, anchor);
    }

    fn current_section(&self) -> Option<IndexId> {
        (self.cursor != IndexTree::ROOT).then_some(self.cursor)
    }
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::classify::ParagraphClassifier;
    use pretty_assertions::assert_eq;

    fn build(text: &str) -> (Vec<Paragraph>, IndexTree) {
        let mut builder = IndexBuilder::new();
        for unit in ParagraphClassifier::new(text) {
            builder.push(&unit);
        }
        builder.finish()
    }

    fn names(tree: &IndexTree, ids: &[IndexId]) -> Vec<String> {
        ids.iter().map(|&id| tree.get(id).name.clone()).collect()
    }

    #[test]
    fn levels_follow_first_keyword_appearance() {
        let (_, tree) = build("第一卷 潜龙\n第一章 开端\n正文\n第二章 风波\n第二卷 飞龙\n第三章 再起\n");

        let top = tree.children(IndexTree::ROOT).to_vec();
        assert_eq!(names(&tree, &top), vec!["第一卷 潜龙", "第二卷 飞龙"]);
        assert_eq!(
            names(&tree, tree.children(top[0])),
            vec!["第一章 开端", "第二章 风波"]
        );
        assert_eq!(names(&tree, tree.children(top[1])), vec!["第三章 再起"]);
        assert_eq!(tree.get(top[1]).level, 0);
        assert_eq!(tree.get(tree.children(top[1])[0]).level, 1);
        assert_eq!(tree.get(tree.children(top[1])[0]).path, "第二卷 飞龙 -> 第三章 再起");
    }

    #[test]
    fn first_keyword_wins_level_zero_regardless_of_rank() {
        let (paragraphs, tree) = build("第一章\n第一卷\n第二章\n");

        let top = tree.children(IndexTree::ROOT).to_vec();
        assert_eq!(names(&tree, &top), vec!["第一章", "第二章"]);
        assert_eq!(names(&tree, tree.children(top[0])), vec!["第一卷"]);
        let levels: Vec<_> = paragraphs.iter().map(|p| p.level).collect();
        assert_eq!(levels, vec![Some(0), Some(1), Some(0)]);
    }

    #[test]
    fn depth_matches_distinct_keywords() {
        let (_, tree) = build("第一卷\n第一章\n第一节\n第二节\n第二章\n");
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn preface_and_postscript_sit_under_the_root() {
        let (paragraphs, tree) = build("《凡人》\n楔子\n往事\n第一卷\n第一章\n后记\n完\n");

        assert_eq!(
            names(&tree, tree.children(IndexTree::ROOT)),
            vec!["楔子", "第一卷", "后记"]
        );
        assert_eq!(paragraphs[0].kind, ParagraphKind::Title);
        assert_eq!(paragraphs[0].section, None);
        assert_eq!(paragraphs[1].level, Some(0));

        let postscript = tree.children(IndexTree::ROOT)[2];
        assert_eq!(paragraphs.last().map(|p| p.section), Some(Some(postscript)));
    }

    #[test]
    fn section_after_postscript_restarts_from_root() {
        let (_, tree) = build("第一章\n后记\n第二章\n");
        assert_eq!(
            names(&tree, tree.children(IndexTree::ROOT)),
            vec!["第一章", "后记", "第二章"]
        );
    }

    #[test]
    fn paragraphs_record_their_section() {
        let (paragraphs, tree) = build("开篇语\n第一章\n内容\n");

        let chapter = tree.children(IndexTree::ROOT)[0];
        assert_eq!(paragraphs[0].section, None);
        assert_eq!(paragraphs[1].section, Some(chapter));
        assert_eq!(paragraphs[2].section, Some(chapter));
        assert_eq!(tree.get(chapter).anchor, Some(1));
    }

    #[test]
    fn keyword_order_is_tracked() {
        let mut builder = IndexBuilder::new();
        for unit in ParagraphClassifier::new("第一卷\n第一章\n第二卷\n第一节\n") {
            builder.push(&unit);
        }
        assert_eq!(builder.keyword_order(), &['卷', '章', '节']);
    }
}
