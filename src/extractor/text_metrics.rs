//! Plain-text measurements: readability, keyword usage, entities, read time.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Average adult reading speed used for read-time estimates.
pub const WORDS_PER_MINUTE: f64 = 200.0;

fn sentence_splitter() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+").expect("valid sentence regex"))
}

fn proper_noun() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").expect("valid entity regex")
    })
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
}

/// Rough English syllable count: vowel groups, minus a silent trailing `e`.
pub fn count_syllables(word: &str) -> usize {
    let lower: Vec<char> = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect();
    if lower.is_empty() {
        return 0;
    }
    if lower.len() <= 3 {
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut count = 0;
    let mut previous_vowel = false;
    for &c in &lower {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            count += 1;
        }
        previous_vowel = vowel;
    }

    let n = lower.len();
    if lower[n - 1] == 'e' && !(lower[n - 2] == 'l' && !is_vowel(lower[n - 3])) && count > 1 {
        count -= 1;
    }

    count.max(1)
}

/// Flesch-Kincaid grade level, floored at 0 and rounded to one decimal.
pub fn flesch_kincaid_grade(text: &str) -> f64 {
    let words: Vec<&str> = words(text).collect();
    if words.is_empty() {
        return 0.0;
    }
    let sentences = sentence_splitter()
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .count()
        .max(1);
    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();

    let word_count = words.len() as f64;
    let grade = 0.39 * (word_count / sentences as f64)
        + 11.8 * (syllables as f64 / word_count)
        - 15.59;

    (grade.max(0.0) * 10.0).round() / 10.0
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whole-phrase, case-insensitive keyword matcher; any whitespace run
/// between the keyword's words matches. Word boundaries are only required
/// on ends that are word characters, so `C++` and `.NET` still match.
pub fn keyword_pattern(keyword: &str) -> Option<Regex> {
    let parts: Vec<&str> = keyword.split_whitespace().collect();
    let (first, last) = (parts.first()?, parts.last()?);

    let lead = if first.starts_with(is_word_char) { r"\b" } else { "" };
    let tail = if last.ends_with(is_word_char) { r"\b" } else { "" };
    let body = parts
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join(r"\s+");

    Regex::new(&format!(r"(?i){}{}{}", lead, body, tail)).ok()
}

pub fn count_keyword(text: &str, keyword: &str) -> usize {
    keyword_pattern(keyword)
        .map(|re| re.find_iter(text).count())
        .unwrap_or(0)
}

pub fn contains_keyword(text: &str, keyword: &str) -> bool {
    keyword_pattern(keyword).is_some_and(|re| re.is_match(text))
}

/// Occurrences per 100 words, rounded to two decimals.
pub fn keyword_density(occurrences: usize, word_count: usize) -> f64 {
    if word_count == 0 {
        return 0.0;
    }
    let density = occurrences as f64 / word_count as f64 * 100.0;
    (density * 100.0).round() / 100.0
}

/// Distinct capitalized phrases that do not open a sentence.
pub fn count_entities(text: &str) -> usize {
    let mut seen = HashSet::new();
    for sentence in sentence_splitter().split(text) {
        let sentence = sentence.trim_start();
        for m in proper_noun().find_iter(sentence) {
            if m.start() == 0 {
                // Sentence-initial capitals say nothing about proper nouns,
                // but a following capitalized word still might.
                let rest = m.as_str().split_whitespace().skip(1).collect::<Vec<_>>();
                if !rest.is_empty() {
                    seen.insert(rest.join(" "));
                }
                continue;
            }
            seen.insert(m.as_str().split_whitespace().collect::<Vec<_>>().join(" "));
        }
    }
    seen.len()
}

pub fn read_time_minutes(word_count: usize) -> f64 {
    let minutes = word_count as f64 / WORDS_PER_MINUTE;
    (minutes * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syllables() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("running"), 2);
        assert_eq!(count_syllables("make"), 1);
        assert_eq!(count_syllables("table"), 2);
        assert_eq!(count_syllables("readability"), 5);
        assert_eq!(count_syllables("42"), 0);
    }

    #[test]
    fn test_grade_for_simple_and_dense_text() {
        let simple = "The cat sat. The dog ran. We had fun.";
        assert_eq!(flesch_kincaid_grade(simple), 0.0);

        let dense = "Comprehensive organizational documentation necessitates \
                     extraordinarily meticulous administrative consideration regarding \
                     international regulatory requirements and institutional accountability.";
        assert!(flesch_kincaid_grade(dense) > 14.0);
        assert_eq!(flesch_kincaid_grade(""), 0.0);
    }

    #[test]
    fn test_keyword_matching() {
        let text = "Trail running shoes differ from road shoes. Trail\n running   SHOES grip better.";
        assert_eq!(count_keyword(text, "trail running shoes"), 2);
        assert!(contains_keyword("Best Trail Running Shoes", "trail running shoes"));
        // whole words only
        assert_eq!(count_keyword("shoestring budget", "shoe"), 0);
        assert_eq!(count_keyword(text, "   "), 0);
        // regex metacharacters are literal
        assert_eq!(count_keyword("version 5.0 not 5x0", "5.0"), 1);
    }

    #[test]
    fn test_keyword_with_symbol_edges() {
        let text = "Learning C++ is fun. C++ templates take practice, unlike C# or .NET.";
        assert_eq!(count_keyword(text, "C++"), 2);
        assert_eq!(count_keyword(text, "c#"), 1);
        assert_eq!(count_keyword(text, ".NET"), 1);
        assert!(contains_keyword("Modern C++ Guide", "c++"));
        // word-character ends keep their boundary
        assert_eq!(count_keyword("C++ and Cpp", "C"), 1);
    }

    #[test]
    fn test_density() {
        assert_eq!(keyword_density(3, 200), 1.5);
        assert_eq!(keyword_density(1, 3), 33.33);
        assert_eq!(keyword_density(5, 0), 0.0);
    }

    #[test]
    fn test_entities_skip_sentence_starts() {
        let text = "Choosing shoes starts with grip. Brooks and Salomon both make options for Colorado routes.";
        // "Choosing" and "Brooks" open sentences
        assert_eq!(count_entities(text), 2);

        let text = "We ran in New York. Then New York again.";
        assert_eq!(count_entities(text), 1);
    }

    #[test]
    fn test_read_time() {
        assert_eq!(read_time_minutes(1500), 7.5);
        assert_eq!(read_time_minutes(0), 0.0);
        assert_eq!(read_time_minutes(350), 1.8);
    }
}
