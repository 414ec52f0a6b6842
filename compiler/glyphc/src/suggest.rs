//! "Did you mean?" suggestions.
//!
//! Fuzzy matching for word suggestions using Levenshtein edit distance.
//! When a program contains a word the language does not know, this
//! module finds the closest known word to suggest.
//!
//! The threshold scales with the input length so short words do not
//! attract unrelated suggestions.

/// Calculate Levenshtein edit distance between two strings.
///
/// The minimum number of single-character insertions, deletions or
/// substitutions required to turn one string into the other.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    // Two-row optimization instead of the full matrix
    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row: Vec<usize> = vec![0; b_len + 1];

    for (i, a_char) in a.chars().enumerate() {
        curr_row[0] = i + 1;

        for (j, b_char) in b.chars().enumerate() {
            let cost = usize::from(a_char != b_char);

            curr_row[j + 1] = (prev_row[j + 1] + 1) // deletion
                .min(curr_row[j] + 1) // insertion
                .min(prev_row[j] + cost); // substitution
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}

/// Threshold based on input length: 1 edit for very short words, up to
/// half the length (capped at 5) for long ones.
fn default_threshold(name_len: usize) -> usize {
    match name_len {
        0 => 0,
        1..=2 => 1,
        3..=5 => 2,
        6..=10 => 3,
        n => (n / 2).min(5),
    }
}

/// Find the most similar candidate within the default threshold.
///
/// Returns the candidate with the smallest edit distance, or `None`
/// when nothing is close enough.
pub fn suggest_similar<'a>(
    name: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> Option<&'a str> {
    if name.is_empty() {
        return None;
    }

    let threshold = default_threshold(name.len());
    let mut best: Option<(&str, usize)> = None;

    for candidate in candidates {
        // Skip if too different in length
        let len_diff = name.len().abs_diff(candidate.len());
        if len_diff > threshold {
            continue;
        }

        let distance = edit_distance(name, candidate);

        if distance <= threshold {
            match best {
                None => best = Some((candidate, distance)),
                Some((_, best_dist)) if distance < best_dist => {
                    best = Some((candidate, distance));
                }
                _ => {}
            }
        }
    }

    best.map(|(s, _)| s)
}
