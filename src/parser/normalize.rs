//! Comment body normalization: strip `*` decoration and framing rules.

use super::fields;
use regex::Regex;
use std::sync::LazyLock;

/// Optional indentation, then a single `*` that is not part of `**` or `*/`.
static RE_DECORATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*\*(?:[^*/]|$)").unwrap());

/// Split a raw comment body into lines ready for tokenizing.
///
/// The `*` line prefix is only stripped when most non-blank lines carry it,
/// so undecorated bodies keep any line that happens to start with `*`.
/// Fenced code regions sit out the vote.
/// Blank lines and `-----` dividers are trimmed from both ends; interior ones
/// are kept so descriptions survive untouched.
pub fn normalize(body: &str) -> Vec<&str> {
    let raw: Vec<&str> = body
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let (decorated, non_blank) = count_decorated(&raw);

    let mut lines: Vec<&str> = if decorated * 2 > non_blank {
        raw.into_iter()
            .map(|line| strip_decoration(line).unwrap_or(line))
            .collect()
    } else {
        raw
    };

    let start = lines
        .iter()
        .position(|l| !is_framing(l))
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !is_framing(l))
        .map_or(start, |i| i + 1);
    lines.truncate(end);
    lines.drain(..start);
    lines
}

/// Count decorated and non-blank lines outside fenced code regions.
fn count_decorated(lines: &[&str]) -> (usize, usize) {
    let mut decorated = 0;
    let mut non_blank = 0;
    let mut in_fence = false;
    for &line in lines {
        let content = strip_decoration(line).unwrap_or(line);
        if in_fence {
            in_fence = !fields::is_fence_close(content);
            continue;
        }
        if fields::fence_open(content).is_some() {
            in_fence = true;
            continue;
        }
        if !is_blank(line) {
            non_blank += 1;
            if RE_DECORATION.is_match(line) {
                decorated += 1;
            }
        }
    }
    (decorated, non_blank)
}

fn strip_decoration(line: &str) -> Option<&str> {
    let m = RE_DECORATION.find(line)?;
    let star = line[..m.end()].rfind('*')?;
    let rest = &line[star + 1..];
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn is_divider(line: &str) -> bool {
    let t = line.trim();
    !t.is_empty() && t.chars().all(|c| c == '-')
}

fn is_framing(line: &str) -> bool {
    is_blank(line) || is_divider(line)
}
