//! Edit distance between prop names.

/// Levenshtein distance between `a` and `b`.
///
/// Unit cost for insertion, deletion and substitution, compared over
/// `char`s. Case-sensitive: `"onClick"` and `"onclick"` are one edit apart.
pub fn distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    // Keep the row as short as possible.
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return long.len();
    }

    let mut row: Vec<usize> = (0..=short.len()).collect();

    for (i, lc) in long.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;

        for (j, sc) in short.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(lc != sc);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = above;
        }
    }

    row[short.len()]
}

/// Whether `a` and `b` are within `max_distance` edits of each other.
pub fn within(a: &str, b: &str, max_distance: usize) -> bool {
    // Length difference is a lower bound on the distance.
    let (la, lb) = (a.chars().count(), b.chars().count());
    if la.abs_diff(lb) > max_distance {
        return false;
    }
    distance(a, b) <= max_distance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_is_zero() {
        assert_eq!(distance("foobar", "foobar"), 0);
        assert_eq!(distance("", ""), 0);
    }

    #[test]
    fn test_empty_against_word() {
        assert_eq!(distance("", "bang"), 4);
        assert_eq!(distance("bang", ""), 4);
    }

    #[test]
    fn test_single_insertion() {
        assert_eq!(distance("foobbar", "foobar"), 1);
        assert_eq!(distance("bangg", "bang"), 1);
    }

    #[test]
    fn test_substitution_and_transposition() {
        assert_eq!(distance("colour", "color"), 1);
        // A swap costs two edits in plain Levenshtein.
        assert_eq!(distance("lable", "label"), 2);
    }

    #[test]
    fn test_classic_pair() {
        assert_eq!(distance("kitten", "sitting"), 3);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(distance("onClick", "onclick"), 1);
    }

    #[test]
    fn test_unicode_counts_chars() {
        assert_eq!(distance("größe", "grösse"), 2);
        assert_eq!(distance("naïve", "naive"), 1);
    }

    #[test]
    fn test_within_short_circuits_on_length() {
        assert!(!within("a", "abcdef", 2));
        assert!(within("foobbar", "foobar", 2));
        assert!(within("foobar", "foobar", 0));
    }
}
