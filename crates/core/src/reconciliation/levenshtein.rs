//! Edit distance over Unicode scalar values.

/// Levenshtein distance between `a` and `b`.
///
/// Insert, delete and substitute each cost 1. Characters, not bytes, are the
/// unit, so a Hangul syllable counts once.
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rows of the DP matrix, indexed by position in `b`.
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            current[j + 1] = if ca == cb {
                previous[j]
            } else {
                1 + previous[j].min(previous[j + 1]).min(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_have_zero_distance() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("중등M 심화", "중등M 심화"), 0);
    }

    #[test]
    fn empty_side_costs_length_in_chars() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("초등반", ""), 3);
    }

    #[test]
    fn classic_examples() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
        assert_eq!(levenshtein("abc", "abd"), 1);
    }

    #[test]
    fn hangul_counts_per_syllable_not_per_byte() {
        // Each syllable is three UTF-8 bytes.
        assert_eq!(levenshtein("수학A", "수학B"), 1);
        assert_eq!(levenshtein("영어", "영어반"), 1);
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            ("kitten", "sitting"),
            ("", "중등"),
            ("M1 심화", "M2 기본"),
            ("PRE-A", "pre-a"),
        ];
        for (a, b) in pairs {
            assert_eq!(levenshtein(a, b), levenshtein(b, a), "{a} / {b}");
        }
    }
}
