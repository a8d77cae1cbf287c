//! Longest-common-subsequence table.

/// Dynamic-programming table of LCS lengths between two sequences.
///
/// `get(i, j)` is the LCS length of `a[..i]` and `b[..j]`. Stored row-major in
/// a single allocation of `(m + 1) * (n + 1)` cells.
#[derive(Debug, Clone)]
pub struct LcsTable {
    rows: usize,
    cols: usize,
    cells: Vec<u32>,
}

impl LcsTable {
    /// Build the table for `a` (length m) and `b` (length n) in O(m*n).
    ///
    /// Elements are compared with exact equality.
    pub fn build<T: PartialEq>(a: &[T], b: &[T]) -> Self {
        let rows = a.len() + 1;
        let cols = b.len() + 1;
        let mut cells = vec![0u32; rows * cols];

        for i in 1..rows {
            for j in 1..cols {
                let value = if a[i - 1] == b[j - 1] {
                    cells[(i - 1) * cols + (j - 1)] + 1
                } else {
                    cells[(i - 1) * cols + j].max(cells[i * cols + (j - 1)])
                };
                cells[i * cols + j] = value;
            }
        }

        Self { rows, cols, cells }
    }

    pub fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.cols + j]
    }

    /// LCS length of the full sequences.
    pub fn length(&self) -> u32 {
        self.get(self.rows - 1, self.cols - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_row_and_column_are_zero() {
        let table = LcsTable::build(&["a", "b"], &["b", "c", "a"]);
        for j in 0..4 {
            assert_eq!(table.get(0, j), 0);
        }
        for i in 0..3 {
            assert_eq!(table.get(i, 0), 0);
        }
    }

    #[test]
    fn classic_example_length() {
        let a: Vec<char> = "ABCBDAB".chars().collect();
        let b: Vec<char> = "BDCABA".chars().collect();
        assert_eq!(LcsTable::build(&a, &b).length(), 4);
    }

    #[test]
    fn identical_sequences_match_fully() {
        let a = ["x", " ", "y"];
        assert_eq!(LcsTable::build(&a, &a).length(), 3);
    }

    #[test]
    fn disjoint_sequences_have_zero_length() {
        assert_eq!(LcsTable::build(&["a", "b"], &["c", "d"]).length(), 0);
    }

    #[test]
    fn empty_side_yields_zero() {
        let empty: [&str; 0] = [];
        assert_eq!(LcsTable::build(&empty, &["a"]).length(), 0);
        assert_eq!(LcsTable::build(&["a"], &empty).length(), 0);
    }

    #[test]
    fn whitespace_differences_do_not_match() {
        assert_eq!(LcsTable::build(&[" "], &["  "]).length(), 0);
    }
}
