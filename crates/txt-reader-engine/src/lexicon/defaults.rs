/// Built-in repair rules for the most common filtered vocabulary.
///
/// Pinyin stand-ins map back to the character they replace; the context
/// rules disambiguate roots that are also ordinary words (`yu` next to
/// `碧` is 玉, elsewhere 欲) or restore idioms whose middle was masked.
pub fn default_rules() -> &'static [&'static str] {
    DEFAULT_RULES
}

const DEFAULT_RULES: &[&str] = &[
    // escaped markup
    "&gt; => >",
    "&lt; => <",
    // pinyin
    "bàng => 棒",
    "bào => 爆",
    "bī => 逼",
    "bō => 波",
    "cāo => 操",
    "cǎo => 草",
    "cào => 操",
    "chā => 插",
    "chāng => 娼",
    "cháo => 潮",
    "chōu => 抽",
    "chuáng => 床",
    "chūn => 春",
    "cuō => 搓",
    "cū => 粗",
    "dàn => 弹",
    "dǎng => 党",
    "dàng => 荡",
    "diao => 屌",
    "dòng => 洞",
    "fǎ => 法",
    "fù => 妇",
    "guān => 官",
    "hán => 含",
    "jing => 精",
    "jī => 激",
    "jiān => 奸",
    "jiāng => 江",
    "jiāo => 交",
    "jìn => 禁",
    "jīng => 精",
    "jǐng => 警",
    "jū => 拘",
    "kù => 裤",
    "làng => 浪",
    "liáo => 撩",
    "luàn => 乱",
    "lún => 伦",
    "luǒ => 裸",
    "lù => 露",
    "máo => 毛",
    "mí => 迷",
    "mō => 摸",
    "pào => 炮",
    "piàn => 片",
    "qiāng => 枪",
    "qíng => 情",
    "ri => 日",
    "rì => 日",
    "rǔ => 乳",
    "se => 色",
    "sāo => 骚",
    "sè => 色",
    "shā => 杀",
    "shēn => 呻",
    "shén => 神",
    "shè => 射",
    "shǐ => 屎",
    "shǔn => 吮",
    "sǐ => 死",
    "sū => 酥",
    "ting => 挺",
    "tài => 态",
    "tān => 贪",
    "tǐ => 体",
    "tiǎn => 舔",
    "tiáo => 调",
    "tǐng => 挺",
    "tǒng => 捅",
    "tōu => 偷",
    "tuǐ => 腿",
    "tūn => 吞",
    "tún => 臀",
    "wēn => 温",
    "wěn => 吻",
    "xing => 性",
    "xī => 吸",
    "xí => 习",
    "xìng => 性",
    "xiōng => 胸",
    "xué => 穴",
    "yu => 欲",
    "yàn => 艳",
    "yāng => 央",
    "yào => 药",
    "yín => 淫",
    "yòu => 诱",
    "yù => 欲",
    "zàng => 藏",
    "zhà => 炸",
    "zhèng => 政",
    "zhōng => 中",
    "zuì => 罪",
    "zuò => 做",
    // context-gated
    "德(xing) => 行",
    "碧(yu) => 玉",
    "美(yu) => 玉",
    "(yu)石 => 玉",
    "十之(**) => 八九",
    "十有(**) => 八九",
    "(**)不离十 => 八九",
    "赤身(**) => 裸体",
    "感(**)彩 => 情色",
    "本(*)难移 => 性",
    "(dang)然无存 => 荡",
];
