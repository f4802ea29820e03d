// The MIT License (MIT)
//
// Copyright (c) 2016 AT&T
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

use std::cmp::{max, min};

const WINKLER_SCALE: f64 = 0.1;
const WINKLER_MAX_PREFIX: usize = 4;
const WINKLER_BOOST_THRESHOLD: f64 = 0.7;

pub fn jaro(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let window = (max(a.len(), b.len()) / 2).saturating_sub(1);
    let mut a_matched = vec![false; a.len()];
    let mut b_matched = vec![false; b.len()];
    let mut matches = 0usize;

    for i in 0..a.len() {
        let start = i.saturating_sub(window);
        let end = min(i + window + 1, b.len());
        for j in start..end {
            if b_matched[j] || a[i] != b[j] {
                continue;
            }
            a_matched[i] = true;
            b_matched[j] = true;
            matches += 1;
            break;
        }
    }

    if matches == 0 {
        return 0.0;
    }

    let mut transpositions = 0usize;
    let mut k = 0usize;
    for i in 0..a.len() {
        if !a_matched[i] {
            continue;
        }
        while !b_matched[k] {
            k += 1;
        }
        if a[i] != b[k] {
            transpositions += 1;
        }
        k += 1;
    }

    let m = matches as f64;
    let half_transpositions = (transpositions / 2) as f64;
    (m / a.len() as f64 + m / b.len() as f64 + (m - half_transpositions) / m) / 3.0
}

/// Jaro similarity boosted by the length of the common prefix, in `[0, 1]`.
pub fn jaro_winkler(a: &str, b: &str) -> f64 {
    let similarity = jaro(a, b);
    if similarity < WINKLER_BOOST_THRESHOLD {
        return similarity;
    }

    let prefix = a.chars()
        .zip(b.chars())
        .take(WINKLER_MAX_PREFIX)
        .take_while(|&(x, y)| x == y)
        .count();

    similarity + prefix as f64 * WINKLER_SCALE * (1.0 - similarity)
}

/// Counts query characters found in order in `term`, with a bonus of two
/// for every match directly following the previous one. Case-insensitive.
pub fn fuzzy_score(term: &str, query: &str) -> u32 {
    let term: Vec<char> = term.to_lowercase().chars().collect();
    let mut score = 0u32;
    let mut term_index = 0usize;
    let mut previous_match: Option<usize> = None;

    for query_char in query.to_lowercase().chars() {
        while term_index < term.len() {
            let current = term_index;
            term_index += 1;
            if term[current] == query_char {
                score += 1;
                if previous_match.map(|p| p + 1 == current).unwrap_or(false) {
                    score += 2;
                }
                previous_match = Some(current);
                break;
            }
        }
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-3
    }

    #[test]
    fn jaro_reference_values() {
        assert!(close(jaro("MARTHA", "MARHTA"), 0.944));
        assert!(close(jaro("DIXON", "DICKSONX"), 0.767));
        assert!(close(jaro("JELLYFISH", "SMELLYFISH"), 0.896));
    }

    #[test]
    fn jaro_winkler_reference_values() {
        assert!(close(jaro_winkler("MARTHA", "MARHTA"), 0.961));
        assert!(close(jaro_winkler("DWAYNE", "DUANE"), 0.840));
        assert!(close(jaro_winkler("DIXON", "DICKSONX"), 0.813));
    }

    #[test]
    fn jaro_winkler_edges() {
        assert_eq!(jaro_winkler("", ""), 1.0);
        assert_eq!(jaro_winkler("blast", ""), 0.0);
        assert_eq!(jaro_winkler("blast", "blast"), 1.0);
        assert_eq!(jaro_winkler("abc", "xyz"), 0.0);
    }

    #[test]
    fn fuzzy_score_reference_values() {
        assert_eq!(fuzzy_score("Workshop", "b"), 0);
        assert_eq!(fuzzy_score("Room", "o"), 1);
        assert_eq!(fuzzy_score("Workshop", "w"), 1);
        assert_eq!(fuzzy_score("Workshop", "ws"), 2);
        assert_eq!(fuzzy_score("Workshop", "wo"), 4);
        assert_eq!(fuzzy_score("Apache Software Foundation", "asf"), 3);
    }
}
