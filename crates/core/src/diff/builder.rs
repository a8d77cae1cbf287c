//! Backtracks an [`LcsTable`] into a per-token operation list.

use super::lcs::LcsTable;
use super::tokenizer::Token;
use super::DiffOp;

/// Walk the table from `(m, n)` back to `(0, 0)` and emit one op per token.
///
/// When both predecessor cells tie, the walk prefers `Insert`. The returned
/// list is in document order.
pub fn build_ops(a: &[Token<'_>], b: &[Token<'_>], table: &LcsTable) -> Vec<DiffOp> {
    let mut ops = Vec::with_capacity(a.len().max(b.len()));
    let mut i = a.len();
    let mut j = b.len();

    while i > 0 || j > 0 {
        if i > 0 && j > 0 && a[i - 1] == b[j - 1] {
            ops.push(DiffOp::Equal(a[i - 1].as_str().to_string()));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || table.get(i, j - 1) >= table.get(i - 1, j)) {
            ops.push(DiffOp::Insert(b[j - 1].as_str().to_string()));
            j -= 1;
        } else {
            ops.push(DiffOp::Delete(a[i - 1].as_str().to_string()));
            i -= 1;
        }
    }

    ops.reverse();
    ops
}
