//! 词根的递归切分。
//!
//! 每一层：长度不超过阈值的词根原样返回；命中复合词表则分别递归；
//! 否则取最左形状，按形状的规则定出切分点，头部原样输出，尾部继续递归（`Le` 相反）。
//!
//! | 形状 | 头部保留的辅音单元数 | 例外 |
//! |---|---|---|
//! | `Le` | 切在末尾辅音+`le` 之前，头部继续递归 | 无 |
//! | `Vccccv` | 2 | 无 |
//! | `Vcccv` | 2 | 含粘连音时 3 |
//! | `Vccv` | 1 | 含 R 组合时 0；含辅音二合字母时 2；含三合字母时不切 |
//! | `Vcv` | 0 | 头部连同辅音含三合字母时不切 |
//! | `Vv` | 切在两元音之间 | 四合字母开头或元音二合字母时不切 |

use tracing::debug;

use crate::constants::COMPOUND_WORDS;
use crate::patterns::{self, Match, Shape, Unit};

pub fn split(root: &str, min_length: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    split_into(root, min_length, &mut out);
    out
}

fn compound(root: &str) -> Option<(&'static str, &'static str)> {
    COMPOUND_WORDS
        .iter()
        .find(|(word, _, _)| *word == root)
        .map(|&(_, head, tail)| (head, tail))
}

fn split_into(root: &str, min_length: usize, out: &mut Vec<String>) {
    if root.is_empty() {
        return;
    }
    if root.chars().count() <= min_length {
        out.push(root.to_string());
        return;
    }
    if let Some((head, tail)) = compound(root) {
        debug!(root, head, tail, "Compound word");
        split_into(head, min_length, out);
        split_into(tail, min_length, out);
        return;
    }

    let units = patterns::tokenize(root);
    let Some(found) = patterns::find(root, &units) else {
        out.push(root.to_string());
        return;
    };
    debug!(root, shape = ?found.shape, "Pattern matched");

    // 末尾辅音+le 自成一节，头部继续切分
    if found.shape == Shape::Le {
        let at = root.len() - 3;
        split_into(&root[..at], min_length, out);
        out.push(root[at..].to_string());
        return;
    }

    let boundary = match found.shape {
        Shape::Vv => vowel_pair(root, &units, found),
        _ => consonant_run(root, &units, found),
    };

    match boundary {
        Some(at) if at > 0 && at < root.len() => {
            out.push(root[..at].to_string());
            split_into(&root[at..], min_length, out);
        }
        _ => out.push(root.to_string()),
    }
}

/// 两元音之间的切分点；`None` 表示整体保留。
fn vowel_pair(root: &str, units: &[Unit], found: Match) -> Option<usize> {
    let first = units[found.vowel];
    let second = units[found.next];
    if patterns::starts_with_quadgraph(&root[first.start..])
        || patterns::is_vowel_digraph(&root[first.start..second.end])
    {
        return None;
    }
    Some(second.start)
}

/// 辅音串上的切分点：头部保留 `keep` 个辅音单元。
fn consonant_run(root: &str, units: &[Unit], found: Match) -> Option<usize> {
    let run = &root[units[found.vowel + 1].start..units[found.next].start];
    let region = &root[units[found.vowel].start..units[found.next].end];
    // 头部连同其后的第一个辅音
    let lead = &root[..units[found.vowel + 1].end];

    let keep = match found.shape {
        Shape::Vccccv => 2,
        Shape::Vcccv if patterns::has_glued(run) => 3,
        Shape::Vcccv => 2,
        Shape::Vccv if patterns::has_r_blend(run) => 0,
        Shape::Vccv if patterns::has_consonant_digraph(run) => 2,
        Shape::Vccv if patterns::has_trigraph(region) => return None,
        Shape::Vccv => 1,
        Shape::Vcv if patterns::has_trigraph(lead) => return None,
        Shape::Vcv => 0,
        Shape::Le | Shape::Vv => return None,
    };

    // 紧跟切分点的双写辅音被拆开：一个字母归头部，一个归尾部
    let after = units[found.vowel + 1 + keep];
    if keep < found.consonants() && after.is_merged() {
        Some(after.start + 1)
    } else {
        Some(after.start)
    }
}
