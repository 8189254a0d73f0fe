//! Fuzzy name matching for "did you mean" suggestions

/// Minimum similarity a candidate needs to be suggested
pub const SUGGESTION_THRESHOLD: f64 = 0.6;

/// Levenshtein distance between two strings, counted in chars
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Single-row dynamic programming
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(ca != cb);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = above;
        }
    }
    row[b.len()]
}

/// Similarity in `[0, 1]`: `1 - distance / longer length`
pub fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - edit_distance(a, b) as f64 / longest as f64
}

/// The most similar candidate that clears [`SUGGESTION_THRESHOLD`].
///
/// Ties go to the candidate enumerated first.
///
/// # Example
/// ```
/// use eyewear_qa::similarity::best_match;
///
/// assert_eq!(best_match("fram", ["frame", "lenses", "temples"]), Some("frame"));
/// assert_eq!(best_match("xyz", ["frame", "lenses", "temples"]), None);
/// ```
pub fn best_match<'a, I>(name: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, f64)> = None;
    for candidate in candidates {
        let score = similarity(name, candidate);
        if score < SUGGESTION_THRESHOLD {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((candidate, score)),
        }
    }
    best.map(|(candidate, _)| candidate)
}
