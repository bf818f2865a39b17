//! 词根的单元化与元音/辅音形状识别。
//!
//! 约定：
//! - 单元（`Unit`）记录在原词根中的字节区间，切分位置始终落回原文
//! - 连续的相同字母合并成一个单元，除非这一对字母本身是表里的组合（如 `ss`、`ee`）
//! - `y` 在词根首位按辅音处理，其余位置按元音处理
//! - 形状按最左位置取胜；`Le` 恒在位置 0，总是优先

use crate::constants::{
    CONSONANT_DIGRAPHS, FINAL_DIGRAPHS, GLUED_SOUNDS, L_BLENDS, OTHER_BLENDS, QUADGRAPHS,
    R_BLENDS, S_BLENDS, TRIGRAPHS, VOWEL_DIGRAPHS, VOWELS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Vowel,
    Consonant,
    /// 连字符等，打断任何形状
    Other,
}

impl Class {
    pub fn of(ch: char, first: bool) -> Self {
        if VOWELS.contains(&ch) {
            Class::Vowel
        } else if ch == 'y' {
            if first { Class::Consonant } else { Class::Vowel }
        } else if ch.is_ascii_lowercase() {
            Class::Consonant
        } else {
            Class::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    pub start: usize,
    pub end: usize,
    pub class: Class,
}

impl Unit {
    /// 合并过的双写字母（`bb`、`mm` ...）。
    pub fn is_merged(&self) -> bool {
        self.end - self.start > 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// 辅音 + `le` 结尾
    Le,
    Vccccv,
    Vcccv,
    Vccv,
    Vcv,
    Vv,
}

impl Shape {
    fn between(consonants: usize) -> Option<Self> {
        match consonants {
            0 => Some(Shape::Vv),
            1 => Some(Shape::Vcv),
            2 => Some(Shape::Vccv),
            3 => Some(Shape::Vcccv),
            4 => Some(Shape::Vccccv),
            _ => None,
        }
    }
}

/// 一次形状命中；`vowel`/`next` 是两端元音的单元下标（`Le` 时都为 0）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub shape: Shape,
    pub vowel: usize,
    pub next: usize,
}

impl Match {
    pub fn consonants(&self) -> usize {
        self.next.saturating_sub(self.vowel + 1)
    }
}

fn in_any(pair: &str) -> bool {
    [
        CONSONANT_DIGRAPHS,
        FINAL_DIGRAPHS,
        VOWEL_DIGRAPHS,
        L_BLENDS,
        R_BLENDS,
        S_BLENDS,
        OTHER_BLENDS,
        GLUED_SOUNDS,
    ]
    .iter()
    .any(|table| table.contains(&pair))
}

pub fn tokenize(root: &str) -> Vec<Unit> {
    let mut units: Vec<Unit> = Vec::new();
    let mut prev: Option<char> = None;

    for (i, ch) in root.char_indices() {
        let end = i + ch.len_utf8();
        if prev == Some(ch) && ch.is_ascii_lowercase() && !in_any(&format!("{ch}{ch}")) {
            if let Some(last) = units.last_mut() {
                last.end = end;
                continue;
            }
        }
        units.push(Unit {
            start: i,
            end,
            class: Class::of(ch, i == 0),
        });
        prev = Some(ch);
    }
    units
}

fn ends_with_le(root: &str, units: &[Unit]) -> bool {
    let n = units.len();
    n >= 3
        && root.ends_with("le")
        && units[n - 1].start == root.len() - 1
        && units[n - 2].start == root.len() - 2
        && units[n - 3].class == Class::Consonant
}

pub fn find(root: &str, units: &[Unit]) -> Option<Match> {
    if ends_with_le(root, units) {
        return Some(Match {
            shape: Shape::Le,
            vowel: 0,
            next: 0,
        });
    }

    for (i, unit) in units.iter().enumerate() {
        if unit.class != Class::Vowel {
            continue;
        }
        let consonants = units[i + 1..]
            .iter()
            .take_while(|u| u.class == Class::Consonant)
            .count();
        let next = i + 1 + consonants;
        if units.get(next).map(|u| u.class) != Some(Class::Vowel) {
            continue;
        }
        if let Some(shape) = Shape::between(consonants) {
            return Some(Match {
                shape,
                vowel: i,
                next,
            });
        }
    }
    None
}

pub fn has_glued(text: &str) -> bool {
    GLUED_SOUNDS.iter().any(|g| text.contains(g))
}

pub fn has_r_blend(text: &str) -> bool {
    R_BLENDS.iter().any(|b| text.contains(b))
}

pub fn has_consonant_digraph(text: &str) -> bool {
    CONSONANT_DIGRAPHS.iter().any(|d| text.contains(d))
}

pub fn has_trigraph(text: &str) -> bool {
    TRIGRAPHS.iter().any(|t| text.contains(t))
}

pub fn starts_with_quadgraph(text: &str) -> bool {
    QUADGRAPHS.iter().any(|q| text.starts_with(q))
}

pub fn is_vowel_digraph(text: &str) -> bool {
    VOWEL_DIGRAPHS.contains(&text)
}
