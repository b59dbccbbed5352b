use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::{
    span::Span,
    types::{ParagraphKind, Unit},
};

/// Horizontal boundary characters: space, ideographic space, tab.
pub const BOUNDARY_CHARS: [char; 3] = ['\u{0020}', '\u{3000}', '\t'];
/// Line breaks ending a unit.
pub const LINE_BREAK_CHARS: [char; 2] = ['\n', '\r'];
/// Keywords naming a structural division.
pub const SECTION_KEYWORDS: [char; 8] = ['章', '节', '回', '卷', '折', '篇', '幕', '集'];
/// Digits accepted in a section number besides ASCII.
pub const CHINESE_NUMERALS: &str =
    "〇零一壹二贰三叁四肆五伍六陆七柒八捌九玖十拾百佰千仟万亿萬億廿卅卌";
/// Most characters allowed after a section keyword on the heading line,
/// not counting trailing boundary characters.
pub const MAX_HEADING_TAIL: usize = 50;

const SPACE: &str = r"[\x{20}\x{3000}\t]";

fn unit_regex() -> &'static Regex {
    static UNIT_REGEX: OnceLock<Regex> = OnceLock::new();
    UNIT_REGEX.get_or_init(|| {
        let sp = SPACE;
        let preface = [
            "序".to_string(),
            format!("序{sp}*章"),
            format!("序{sp}*言"),
            format!("前{sp}*言"),
            format!("引{sp}*言"),
            format!("引{sp}*子"),
            format!("摘{sp}*要"),
            format!("楔{sp}*子"),
            "背景简介".to_string(),
            "内容简介".to_string(),
        ]
        .join("|");
        let postscript = [
            format!("后{sp}*记"),
            format!("附{sp}*言"),
            format!("结{sp}*语"),
        ]
        .join("|");
        let keywords: String = SECTION_KEYWORDS.iter().collect();
        let section = format!(
            r"(?:第{sp}*)?(?:[0-9]+(?:\.[0-9]+)?|[{CHINESE_NUMERALS}]+){sp}*(?P<keyword>[{keywords}])(?:[^\n\r]{{0,{tail}}}[^\x{{20}}\x{{3000}}\t\n\r])?",
            tail = MAX_HEADING_TAIL - 1
        );
        let pattern = format!(
            r"^(?P<leading>[\x{{20}}\x{{3000}}\t\n\r]*)(?:(?P<title>《[^\n\r]+》)|(?P<preface>{preface})|(?P<section>{section})|(?P<postscript>{postscript})|(?P<paragraph>[^\x{{20}}\x{{3000}}\t\n\r](?:[^\n\r]*[^\x{{20}}\x{{3000}}\t\n\r])?))(?P<trailing>{sp}*(?:\r\n|[\n\r]|$))"
        );
        Regex::new(&pattern).expect("Invalid paragraph regex")
    })
}

/// Splits text into classified units, one per call to `next`.
///
/// Grammar alternatives are tried in priority order: title, preface
/// heading, section heading, postscript heading, plain paragraph. A title is
/// only recognised as the very first unit; later bracketed text is a plain
/// paragraph.
pub struct ParagraphClassifier<'a> {
    source: &'a str,
    pos: usize,
    allow_title: bool,
}

impl<'a> ParagraphClassifier<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            allow_title: true,
        }
    }

    /// Unconsumed input. After the iterator is exhausted this holds only
    /// boundary characters.
    pub fn remaining(&self) -> Span {
        Span::new(self.pos, self.source.len())
    }

    fn classify(&mut self, caps: &Captures<'a>) -> Option<(ParagraphKind, &'static str)> {
        let found = if caps.name("title").is_some() {
            if self.allow_title {
                (ParagraphKind::Title, "title")
            } else {
                (ParagraphKind::Paragraph, "title")
            }
        } else if caps.name("preface").is_some() {
            (ParagraphKind::PrefaceHeading, "preface")
        } else if caps.name("section").is_some() {
            (ParagraphKind::SectionHeading, "section")
        } else if caps.name("postscript").is_some() {
            (ParagraphKind::PostscriptHeading, "postscript")
        } else if caps.name("paragraph").is_some() {
            (ParagraphKind::Paragraph, "paragraph")
        } else {
            return None;
        };
        self.allow_title = false;
        Some(found)
    }
}

impl<'a> Iterator for ParagraphClassifier<'a> {
    type Item = Unit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let source = self.source;
        let rest = &source[self.pos..];
        let caps = unit_regex().captures(rest)?;
        let (kind, group) = self.classify(&caps)?;

        let base = self.pos;
        let span_of = |name: &str| {
            caps.name(name)
                .map(|m| Span::new(m.start(), m.end()).offset(base))
                .unwrap_or_default()
        };
        let text = caps.name(group)?;
        let keyword = caps
            .name("keyword")
            .and_then(|m| m.as_str().chars().next());

        let unit = Unit {
            kind,
            text: text.as_str(),
            keyword,
            span: span_of(group),
            leading: span_of("leading"),
            trailing: span_of("trailing"),
        };
        self.pos = base + caps.get(0)?.end();
        Some(unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn kinds(text: &str) -> Vec<(ParagraphKind, &str, Option<char>)> {
        ParagraphClassifier::new(text)
            .map(|u| (u.kind, u.text, u.keyword))
            .collect()
    }

    fn single(text: &str) -> (ParagraphKind, String, Option<char>) {
        let u = ParagraphClassifier::new(text).next().expect("one unit");
        (u.kind, u.text.to_string(), u.keyword)
    }

    #[rstest]
    #[case("序\n", ParagraphKind::PrefaceHeading)]
    #[case("序章\n", ParagraphKind::PrefaceHeading)]
    #[case("序　言\n", ParagraphKind::PrefaceHeading)]
    #[case("前 言\n", ParagraphKind::PrefaceHeading)]
    #[case("引子\n", ParagraphKind::PrefaceHeading)]
    #[case("楔子\n", ParagraphKind::PrefaceHeading)]
    #[case("摘要\n", ParagraphKind::PrefaceHeading)]
    #[case("内容简介\n", ParagraphKind::PrefaceHeading)]
    #[case("背景简介\n", ParagraphKind::PrefaceHeading)]
    #[case("后记\n", ParagraphKind::PostscriptHeading)]
    #[case("附 言\n", ParagraphKind::PostscriptHeading)]
    #[case("结　语\n", ParagraphKind::PostscriptHeading)]
    #[case("序幕拉开了\n", ParagraphKind::Paragraph)]
    #[case("后记得\n", ParagraphKind::Paragraph)]
    #[case("他笑了。\n", ParagraphKind::Paragraph)]
    fn whole_unit_keywords(#[case] text: &str, #[case] expected: ParagraphKind) {
        assert_eq!(single(text).0, expected);
    }

    #[rstest]
    #[case("第一章 风起云涌\n", "第一章 风起云涌", '章')]
    #[case("第 十二 回\n", "第 十二 回", '回')]
    #[case("第3卷 终局\n", "第3卷 终局", '卷')]
    #[case("1.2节 细节\n", "1.2节 细节", '节')]
    #[case("二十一章\n", "二十一章", '章')]
    #[case("第廿幕\n", "第廿幕", '幕')]
    #[case("第壹佰零捌集 完\n", "第壹佰零捌集 完", '集')]
    #[case("第一章 开始  \n", "第一章 开始", '章')]
    #[case("第二章 风起　　\r\n", "第二章 风起", '章')]
    #[case("第三章\t\n", "第三章", '章')]
    fn section_headings(#[case] text: &str, #[case] heading: &str, #[case] keyword: char) {
        assert_eq!(
            single(text),
            (
                ParagraphKind::SectionHeading,
                heading.to_string(),
                Some(keyword)
            )
        );
    }

    #[test]
    fn section_heading_tail_is_bounded() {
        let long = format!("第一章 {}\n", "长".repeat(MAX_HEADING_TAIL + 1));
        assert_eq!(single(&long).0, ParagraphKind::Paragraph);

        let fits = format!("第一章{}\n", "长".repeat(MAX_HEADING_TAIL));
        assert_eq!(single(&fits).0, ParagraphKind::SectionHeading);
    }

    #[test]
    fn heading_trailing_spaces_go_to_the_boundary() {
        let text = "第一章 开始  \n正文。  \n";
        let units: Vec<_> = ParagraphClassifier::new(text).collect();

        assert_eq!(units[0].kind, ParagraphKind::SectionHeading);
        assert_eq!(units[0].text, "第一章 开始");
        assert_eq!(units[0].trailing.slice(text), "  \n");
        assert_eq!(units[1].text, "正文。");
        assert_eq!(units[1].trailing.slice(text), "  \n");

        let padded = format!("第一章{}　　 \n", "长".repeat(MAX_HEADING_TAIL));
        assert_eq!(single(&padded).0, ParagraphKind::SectionHeading);
    }

    #[test]
    fn number_without_keyword_is_a_paragraph() {
        assert_eq!(single("第一次见面\n").0, ParagraphKind::Paragraph);
        assert_eq!(single("2024年\n").0, ParagraphKind::Paragraph);
    }

    #[test]
    fn title_only_once() {
        let units = kinds("《斗破》\n《斗破》\n");
        assert_eq!(
            units,
            vec![
                (ParagraphKind::Title, "《斗破》", None),
                (ParagraphKind::Paragraph, "《斗破》", None),
            ]
        );
    }

    #[test]
    fn title_after_other_unit_is_a_paragraph() {
        let units = kinds("本书由某站整理\n《斗破》\n");
        assert_eq!(units[1], (ParagraphKind::Paragraph, "《斗破》", None));
    }

    #[test]
    fn title_must_cover_the_whole_line() {
        let units = kinds("《斗破》第一部\n");
        assert_eq!(units, vec![(ParagraphKind::Paragraph, "《斗破》第一部", None)]);
    }

    #[test]
    fn boundaries_are_stripped_from_units() {
        let text = "\n\n　　少年站在山巅。  \r\n\t第一章 开始\n\n";
        let units: Vec<_> = ParagraphClassifier::new(text).collect();

        assert_eq!(units.len(), 2);
        assert_eq!(units[0].text, "少年站在山巅。");
        assert_eq!(units[0].leading.slice(text), "\n\n　　");
        assert_eq!(units[0].trailing.slice(text), "  \r\n");
        assert_eq!(units[1].text, "第一章 开始");
        assert_eq!(units[1].leading.slice(text), "\t");
        assert_eq!(units[1].trailing.slice(text), "\n");
    }

    #[test]
    fn last_unit_without_line_break() {
        let units = kinds("第一段\n最后一段");
        assert_eq!(
            units,
            vec![
                (ParagraphKind::Paragraph, "第一段", None),
                (ParagraphKind::Paragraph, "最后一段", None),
            ]
        );
    }

    #[test]
    fn boundary_only_input_yields_nothing() {
        let text = " \n\u{3000}\t\r\n  ";
        let mut units = ParagraphClassifier::new(text);
        assert!(units.next().is_none());
        assert_eq!(units.remaining(), Span::new(0, text.len()));
        assert!(kinds("").is_empty());
    }

    #[test]
    fn interior_spacing_is_kept() {
        let units = kinds("他说：  “走吧。”\n");
        assert_eq!(units[0].1, "他说：  “走吧。”");
    }
}
