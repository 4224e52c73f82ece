//! Spelled-out currency amounts to numbers, Indian scale (lakh/crore).

const UNITS: &[(&str, f64)] = &[
    ("zero", 0.0),
    ("one", 1.0),
    ("two", 2.0),
    ("three", 3.0),
    ("four", 4.0),
    ("five", 5.0),
    ("six", 6.0),
    ("seven", 7.0),
    ("eight", 8.0),
    ("nine", 9.0),
    ("ten", 10.0),
    ("eleven", 11.0),
    ("twelve", 12.0),
    ("thirteen", 13.0),
    ("fourteen", 14.0),
    ("fifteen", 15.0),
    ("sixteen", 16.0),
    ("seventeen", 17.0),
    ("eighteen", 18.0),
    ("nineteen", 19.0),
];

const TENS: &[(&str, f64)] = &[
    ("twenty", 20.0),
    ("thirty", 30.0),
    ("forty", 40.0),
    ("fifty", 50.0),
    ("sixty", 60.0),
    ("seventy", 70.0),
    ("eighty", 80.0),
    ("ninety", 90.0),
];

const SCALES: &[(&str, f64)] = &[
    ("hundred", 100.0),
    ("thousand", 1_000.0),
    ("lakh", 100_000.0),
    ("lakhs", 100_000.0),
    ("lacs", 100_000.0),
    ("lac", 100_000.0),
    ("crore", 10_000_000.0),
    ("crores", 10_000_000.0),
];

const FILLERS: &[&str] = &["and", "rupees", "rs", "only"];

fn lookup(table: &[(&str, f64)], word: &str) -> Option<f64> {
    table.iter().find(|(w, _)| *w == word).map(|(_, v)| *v)
}

/// Parse a spelled-out amount like "two lakh fifty" (200050). Returns `None`
/// if no numeric word was recognized at all; a recognized zero still returns
/// `Some(0.0)`, so callers can tell "parsed nothing" from "parsed zero".
pub fn words_to_number(phrase: &str) -> Option<f64> {
    let mut total = 0.0;
    let mut current = 0.0;
    let mut seen = false;

    for raw in phrase.split_whitespace() {
        let cleaned: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphabetic() || *c == '-')
            .collect::<String>()
            .to_lowercase();
        // "twenty-five" counts as two tokens
        for word in cleaned.split('-').filter(|w| !w.is_empty()) {
            if FILLERS.contains(&word) {
                continue;
            }
            if let Some(v) = lookup(UNITS, word).or_else(|| lookup(TENS, word)) {
                current += v;
                seen = true;
            } else if let Some(scale) = lookup(SCALES, word) {
                // "hundred" alone means 100
                if current == 0.0 {
                    current = 1.0;
                }
                total += current * scale;
                current = 0.0;
                seen = true;
            }
        }
    }

    if !seen {
        return None;
    }
    Some(total + current)
}
