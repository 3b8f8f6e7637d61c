//! Revised Romanization of Korean, syllable by syllable.
//!
//! Sound-change rules across syllable boundaries are not applied, so
//! `로그인` becomes `rogeuin` and `한국` becomes `hanguk`.

const SYLLABLE_BASE: u32 = 0xAC00;
const SYLLABLE_LAST: u32 = 0xD7A3;
const MEDIAL_COUNT: u32 = 21;
const FINAL_COUNT: u32 = 28;

const INITIALS: [&str; 19] = [
    "g", "kk", "n", "d", "tt", "r", "m", "b", "pp", "s", "ss", "", "j", "jj", "ch", "k", "t", "p",
    "h",
];

const MEDIALS: [&str; 21] = [
    "a", "ae", "ya", "yae", "eo", "e", "yeo", "ye", "o", "wa", "wae", "oe", "yo", "u", "wo", "we",
    "wi", "yu", "eu", "ui", "i",
];

const FINALS: [&str; 28] = [
    "", "k", "k", "k", "n", "n", "n", "t", "l", "k", "m", "l", "l", "l", "p", "l", "m", "p", "p",
    "t", "t", "ng", "t", "t", "k", "t", "p", "t",
];

pub fn is_hangul_syllable(c: char) -> bool {
    (SYLLABLE_BASE..=SYLLABLE_LAST).contains(&(c as u32))
}

pub fn contains_hangul(text: &str) -> bool {
    text.chars().any(is_hangul_syllable)
}

/// Latin spelling of one precomposed syllable.
fn romanize_syllable(c: char) -> Option<String> {
    if !is_hangul_syllable(c) {
        return None;
    }
    let offset = c as u32 - SYLLABLE_BASE;
    let initial = (offset / (MEDIAL_COUNT * FINAL_COUNT)) as usize;
    let medial = ((offset % (MEDIAL_COUNT * FINAL_COUNT)) / FINAL_COUNT) as usize;
    let last = (offset % FINAL_COUNT) as usize;

    Some(format!("{}{}{}", INITIALS[initial], MEDIALS[medial], FINALS[last]))
}

/// Replace every Hangul syllable in `text`; everything else is kept.
pub fn romanize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match romanize_syllable(c) {
            Some(latin) => out.push_str(&latin),
            None => out.push(c),
        }
    }
    out
}
