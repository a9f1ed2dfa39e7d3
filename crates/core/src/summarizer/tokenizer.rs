//! Sentence and word splitting with per-language abbreviation handling.

use std::sync::LazyLock;

use regex::Regex;

static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['’][\p{L}\p{N}]+)*").expect("word pattern is valid")
});

const ENGLISH: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "inc", "ltd",
    "co", "corp", "fig", "approx", "dept", "est", "jan", "feb", "mar", "apr", "jun", "jul",
    "aug", "sep", "sept", "oct", "nov", "dec", "u.s", "a.m", "p.m",
];
const GERMAN: &[&str] = &[
    "z.b", "bzw", "usw", "ca", "dr", "prof", "nr", "str", "vgl", "d.h", "u.a", "evtl", "ggf",
    "inkl", "bspw",
];
const FRENCH: &[&str] = &[
    "m", "mme", "mlle", "dr", "etc", "p.ex", "env", "av", "cf", "vol", "chap",
];
const SPANISH: &[&str] = &[
    "sr", "sra", "srta", "dr", "dra", "etc", "p.ej", "ud", "uds", "núm", "pág", "aprox",
];
const PORTUGUESE: &[&str] = &["sr", "sra", "dr", "dra", "etc", "p.ex", "pág", "av"];
const ITALIAN: &[&str] = &["sig", "sig.ra", "dott", "prof", "ecc", "pag", "es"];
const RUSSIAN: &[&str] = &[
    "т.е", "т.д", "т.п", "г", "гг", "др", "им", "см", "стр", "руб", "тыс", "млн", "напр",
];

fn abbreviations_for(language: &str) -> &'static [&'static str] {
    let lang = language.trim().to_ascii_lowercase();
    let primary = lang.split(['-', '_']).next().unwrap_or_default();
    match primary {
        "de" | "german" => GERMAN,
        "fr" | "french" => FRENCH,
        "es" | "spanish" => SPANISH,
        "pt" | "portuguese" => PORTUGUESE,
        "it" | "italian" => ITALIAN,
        "ru" | "russian" => RUSSIAN,
        _ => ENGLISH,
    }
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…') || is_cjk_terminator(c)
}

fn is_cjk_terminator(c: char) -> bool {
    matches!(c, '。' | '！' | '？')
}

fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '}' | '»' | '”' | '’' | '」' | '』')
}

#[derive(Debug, Clone)]
pub struct Tokenizer {
    language: String,
    abbreviations: &'static [&'static str],
}

impl Tokenizer {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
            abbreviations: abbreviations_for(language),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Split `text` into sentences. Each one is a trimmed slice of the input;
    /// fragments without a single word are dropped.
    pub fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            let (pos, c) = chars[i];
            if !is_terminator(c) {
                i += 1;
                continue;
            }

            let mut j = i + 1;
            while j < chars.len() && (is_terminator(chars[j].1) || is_closer(chars[j].1)) {
                j += 1;
            }
            let end = chars.get(j).map_or(text.len(), |&(p, _)| p);
            let boundary = chars.get(j).is_none_or(|&(_, next)| next.is_whitespace())
                || is_cjk_terminator(c);

            if boundary && !(c == '.' && self.continues_after_period(text, start, pos, end)) {
                push_sentence(&mut sentences, &text[start..end]);
                start = end;
            }
            i = j;
        }

        push_sentence(&mut sentences, &text[start..]);
        sentences
    }

    /// Lowercased word tokens of `sentence`.
    pub fn words(&self, sentence: &str) -> Vec<String> {
        WORD.find_iter(sentence)
            .map(|m| m.as_str().to_lowercase())
            .collect()
    }

    /// Whether the period at `dot` belongs to an abbreviation or to a run of
    /// initials such as `J. R. R. Tolkien`.
    fn continues_after_period(&self, text: &str, start: usize, dot: usize, end: usize) -> bool {
        let before = &text[start..dot];
        let token = last_token(before);

        if self.abbreviations.contains(&token.to_lowercase().as_str()) {
            return true;
        }

        if !is_initial(token) {
            return false;
        }
        let previous = last_token(before[..before.len() - token.len()].trim_end());
        let next = text[end..].split_whitespace().next().unwrap_or_default();
        is_initial(previous.strip_suffix('.').unwrap_or_default())
            || next.strip_suffix('.').is_some_and(is_initial)
    }
}

fn last_token(text: &str) -> &str {
    text.rsplit(|c: char| c.is_whitespace() || c == '(' || c == '"')
        .next()
        .unwrap_or_default()
}

/// A single uppercase letter.
fn is_initial(token: &str) -> bool {
    let mut letters = token.chars();
    matches!((letters.next(), letters.next()), (Some(only), None) if only.is_uppercase())
}

fn push_sentence<'a>(sentences: &mut Vec<&'a str>, candidate: &'a str) {
    let sentence = candidate.trim();
    if WORD.is_match(sentence) {
        sentences.push(sentence);
    }
}
