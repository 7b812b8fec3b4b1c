//! Bounded Levenshtein distance for spelling proximity.

/// Returned instead of a real distance when the lengths differ by more than
/// [`MAX_LENGTH_GAP`]. Callers compare against a threshold; the magnitude
/// carries no meaning beyond "not similar".
pub const DISTANCE_SENTINEL: usize = 99;

/// Length gap above which the full matrix is never computed.
pub const MAX_LENGTH_GAP: usize = 2;

/// Levenshtein distance with unit costs, measured in chars.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.len().abs_diff(b_chars.len()) > MAX_LENGTH_GAP {
        return DISTANCE_SENTINEL;
    }

    // Rows walk `b`, columns walk `a`.
    let mut matrix = vec![vec![0usize; a_chars.len() + 1]; b_chars.len() + 1];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=a_chars.len() {
        matrix[0][j] = j;
    }

    for i in 1..=b_chars.len() {
        for j in 1..=a_chars.len() {
            matrix[i][j] = if b_chars[i - 1] == a_chars[j - 1] {
                matrix[i - 1][j - 1]
            } else {
                (matrix[i - 1][j - 1] + 1) // substitution
                    .min(matrix[i][j - 1] + 1) // insertion
                    .min(matrix[i - 1][j] + 1) // deletion
            };
        }
    }

    matrix[b_chars.len()][a_chars.len()]
}
