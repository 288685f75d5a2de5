// Token-agnostic span differ over two whole strings.
//
// Builds a longest-common-subsequence table over characters and turns the
// alignment into `equal` / `replace` / `delete` / `insert` opcodes with
// half-open character ranges into both inputs. Used when the two strings are
// not guaranteed to be word-aligned.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpTag {
    Equal,
    Replace,
    Delete,
    Insert,
}

/// `a[a_start..a_end]` relates to `b[b_start..b_end]` as described by `tag`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Opcode {
    pub tag: OpTag,
    pub a_start: usize,
    pub a_end: usize,
    pub b_start: usize,
    pub b_end: usize,
}

/// A span of the reference string and whether the other string agreed with it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffSegment {
    pub text: String,
    pub matched: bool,
}

/// Suffix LCS lengths, `table[i * (m + 1) + j] = lcs(a[i..], b[j..])`.
///
/// Quadratic in memory. Sized for sentences and short passages; `opcodes`
/// trims the common prefix and suffix first, so only the differing middle
/// of two long, mostly equal strings is tabulated.
struct LcsTable {
    cells: Vec<usize>,
    width: usize,
}

impl LcsTable {
    fn build(a: &[char], b: &[char]) -> Self {
        let width = b.len() + 1;
        let mut cells = vec![0; (a.len() + 1) * width];

        for i in (0..a.len()).rev() {
            for j in (0..b.len()).rev() {
                cells[i * width + j] = if a[i] == b[j] {
                    cells[(i + 1) * width + j + 1] + 1
                } else {
                    cells[(i + 1) * width + j].max(cells[i * width + j + 1])
                };
            }
        }

        Self { cells, width }
    }

    fn get(&self, i: usize, j: usize) -> usize {
        self.cells[i * self.width + j]
    }
}

fn push_equal(ops: &mut Vec<Opcode>, a_start: usize, b_start: usize, len: usize) {
    if len == 0 {
        return;
    }
    match ops.last_mut() {
        Some(last) if last.tag == OpTag::Equal && last.a_end == a_start && last.b_end == b_start => {
            last.a_end += len;
            last.b_end += len;
        }
        _ => ops.push(Opcode {
            tag: OpTag::Equal,
            a_start,
            a_end: a_start + len,
            b_start,
            b_end: b_start + len,
        }),
    }
}

fn flush_gap(ops: &mut Vec<Opcode>, a_start: usize, a_end: usize, b_start: usize, b_end: usize) {
    let tag = match (a_start < a_end, b_start < b_end) {
        (true, true) => OpTag::Replace,
        (true, false) => OpTag::Delete,
        (false, true) => OpTag::Insert,
        (false, false) => return,
    };
    ops.push(Opcode {
        tag,
        a_start,
        a_end,
        b_start,
        b_end,
    });
}

/// Walk the LCS table of `a` and `b`, both starting at `offset` in the full strings.
fn align(ops: &mut Vec<Opcode>, a: &[char], b: &[char], offset: usize) {
    let table = LcsTable::build(a, b);

    let (mut i, mut j) = (0, 0);
    let (mut gap_i, mut gap_j) = (0, 0);

    while i < a.len() || j < b.len() {
        if i < a.len() && j < b.len() && a[i] == b[j] {
            flush_gap(ops, offset + gap_i, offset + i, offset + gap_j, offset + j);
            push_equal(ops, offset + i, offset + j, 1);
            i += 1;
            j += 1;
            gap_i = i;
            gap_j = j;
        } else if j >= b.len() || (i < a.len() && table.get(i + 1, j) >= table.get(i, j + 1)) {
            i += 1;
        } else {
            j += 1;
        }
    }
    flush_gap(ops, offset + gap_i, offset + i, offset + gap_j, offset + j);
}

/// Opcodes transforming `a` into `b`, covering both strings end to end.
pub fn opcodes(a: &str, b: &str) -> Vec<Opcode> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let prefix = a.iter().zip(&b).take_while(|(x, y)| x == y).count();
    let suffix = a[prefix..]
        .iter()
        .rev()
        .zip(b[prefix..].iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    let (a_mid, b_mid) = (a.len() - suffix, b.len() - suffix);

    let mut ops: Vec<Opcode> = Vec::new();
    push_equal(&mut ops, 0, 0, prefix);
    align(&mut ops, &a[prefix..a_mid], &b[prefix..b_mid], prefix);
    push_equal(&mut ops, a_mid, b_mid, suffix);

    ops
}

/// Segments of `reference`, flagged where `compared` disagrees.
///
/// Spans present only in `compared` are dropped; only the reference is shown.
pub fn highlight_reference(reference: &str, compared: &str) -> Vec<DiffSegment> {
    let chars: Vec<char> = reference.chars().collect();

    opcodes(reference, compared)
        .into_iter()
        .filter_map(|op| {
            let text: String = chars[op.a_start..op.a_end].iter().collect();
            match op.tag {
                OpTag::Equal => Some(DiffSegment { text, matched: true }),
                OpTag::Replace | OpTag::Delete => Some(DiffSegment { text, matched: false }),
                OpTag::Insert => None,
            }
        })
        .collect()
}
