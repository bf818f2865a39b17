//! 切分规则用到的静态表。

pub const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

/// 前缀（从左侧剥离，取最长匹配）。
pub static PREFIXES: &[&str] = &[
    "anti", "auto", "com", "con", "de", "dis", "fore", "inter", "mid", "mis", "non", "over",
    "post", "pre", "pro", "re", "semi", "sub", "super", "trans", "un", "under",
];

/// 后缀（从右侧剥离，取最长匹配）。
pub static SUFFIXES: &[&str] = &[
    "able", "al", "ance", "ant", "ary", "ate", "ed", "ence", "ent", "ery", "ess", "est", "ful",
    "ible", "ify", "ing", "ise", "ish", "ism", "ist", "ity", "ive", "ize", "less", "ly", "ment",
    "ness", "ous", "ship", "sion", "tion", "ty",
];

/// 复合词：整词 -> 两个组成部分。
pub static COMPOUND_WORDS: &[(&str, &str, &str)] = &[
    ("airport", "air", "port"),
    ("bedroom", "bed", "room"),
    ("birthday", "birth", "day"),
    ("blackboard", "black", "board"),
    ("cupboard", "cup", "board"),
    ("daylight", "day", "light"),
    ("earthquake", "earth", "quake"),
    ("football", "foot", "ball"),
    ("footpath", "foot", "path"),
    ("handbag", "hand", "bag"),
    ("homework", "home", "work"),
    ("keyboard", "key", "board"),
    ("moonlight", "moon", "light"),
    ("rainbow", "rain", "bow"),
    ("sunflower", "sun", "flower"),
    ("sunshine", "sun", "shine"),
    ("toothbrush", "tooth", "brush"),
    ("weekend", "week", "end"),
];

pub static L_BLENDS: &[&str] = &["bl", "cl", "fl", "gl", "pl", "sl"];

pub static R_BLENDS: &[&str] = &["br", "cr", "dr", "fr", "gr", "pr", "tr", "wr"];

pub static S_BLENDS: &[&str] = &["sc", "sk", "sm", "sn", "sp", "st", "sw"];

pub static OTHER_BLENDS: &[&str] = &["dw", "tw"];

pub static CONSONANT_DIGRAPHS: &[&str] = &["ch", "ck", "gh", "gn", "kn", "ph", "sh", "th", "wh"];

pub static FINAL_DIGRAPHS: &[&str] = &["ff", "ll", "ss", "zz"];

pub static VOWEL_DIGRAPHS: &[&str] = &[
    "ai", "au", "aw", "ay", "ea", "ee", "ei", "eu", "ew", "ey", "ie", "oa", "oe", "oi", "oo",
    "ou", "ow", "oy", "ue", "ui",
];

/// 粘连音：与前一音节绑在一起，不参与默认切分。
pub static GLUED_SOUNDS: &[&str] = &["nk", "ng"];

pub static TRIGRAPHS: &[&str] = &[
    "air", "are", "dge", "ear", "eer", "igh", "ire", "ore", "tch", "ure",
];

pub static QUADGRAPHS: &[&str] = &["aigh", "augh", "eigh", "ough"];
