use crate::codegen::romanize::{contains_hangul, romanize};
use crate::errors::{GeneratorError, Result};
use regex::Regex;

/// Korean UI words mapped to identifier fragments, tried in order when
/// romanization is unavailable.
pub const KOREAN_KEYWORDS: &[(&[&str], &str)] = &[
    (&["로그인", "로인"], "login"),
    (&["비밀번호", "패스워드"], "password"),
    (&["아이디", "ID"], "userid"),
    (&["검색", "찾기"], "search"),
    (&["확인"], "confirm"),
    (&["취소"], "cancel"),
    (&["제출", "전송"], "submit"),
    (&["회원가입", "가입"], "signup"),
];

pub const FALLBACK_FRAGMENT: &str = "element";

/// Turns element labels into Python identifier fragments.
pub struct Sanitizer {
    romanize: bool,
    non_word: Regex,
    whitespace: Regex,
}

impl Sanitizer {
    pub fn new(romanize: bool) -> Result<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| GeneratorError::ConfigurationError(e.to_string()))
        };
        Ok(Self {
            romanize,
            non_word: compile(r"[^\w\s]")?,
            whitespace: compile(r"\s+")?,
        })
    }

    /// Never empty, and `sanitize(sanitize(x)) == sanitize(x)`.
    pub fn sanitize(&self, text: &str) -> String {
        let mut text = text.replace(['\n', '\r'], " ");

        if contains_hangul(&text) {
            let romanized = if self.romanize {
                Some(romanize(&text))
            } else {
                None
            };

            match romanized.filter(|r| r.chars().any(|c| c.is_ascii_alphanumeric())) {
                Some(romanized) => text = romanized,
                None => {
                    let stripped = self.non_word.replace_all(&text, "");
                    if let Some(keyword) = keyword_for(&stripped) {
                        return keyword.to_string();
                    }
                }
            }
        }

        let stripped = self.non_word.replace_all(&text, "").to_lowercase();
        let joined = self.whitespace.replace_all(stripped.trim(), "_");
        let mut fragment = joined.trim_matches('_').to_string();

        if fragment.chars().next().is_some_and(|c| c.is_numeric()) {
            fragment.insert(0, 'n');
        }

        if fragment.is_empty() {
            return FALLBACK_FRAGMENT.to_string();
        }
        fragment
    }
}

fn keyword_for(text: &str) -> Option<&'static str> {
    KOREAN_KEYWORDS
        .iter()
        .find(|(words, _)| words.iter().any(|word| text.contains(word)))
        .map(|(_, keyword)| *keyword)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitizer() -> Sanitizer {
        Sanitizer::new(true).unwrap()
    }

    #[test]
    fn test_basic_cleanup() {
        let s = sanitizer();
        assert_eq!(s.sanitize("Log In!"), "log_in");
        assert_eq!(s.sanitize("  Sign\n  up  now "), "sign_up_now");
        assert_eq!(s.sanitize("my-cart (3)"), "mycart_3");
        assert_eq!(s.sanitize("_private_"), "private");
    }

    #[test]
    fn test_leading_digit_and_empty() {
        let s = sanitizer();
        assert_eq!(s.sanitize("3 items"), "n3_items");
        assert_eq!(s.sanitize("!!!"), "element");
        assert_eq!(s.sanitize(""), "element");
    }

    #[test]
    fn test_hangul_is_romanized() {
        let s = sanitizer();
        assert_eq!(s.sanitize("로그인"), "rogeuin");
        assert_eq!(s.sanitize("회원 가입!"), "hoewon_gaip");
    }

    #[test]
    fn test_keyword_dictionary_without_romanization() {
        let s = Sanitizer::new(false).unwrap();
        assert_eq!(s.sanitize("로그인 하기"), "login");
        assert_eq!(s.sanitize("비밀번호 찾기"), "password");
        assert_eq!(s.sanitize("회원.가입"), "signup");
        // No keyword: Hangul is a word character and stays
        assert_eq!(s.sanitize("장바구니 보기"), "장바구니_보기");
    }

    #[test]
    fn test_idempotent() {
        for romanize in [true, false] {
            let s = Sanitizer::new(romanize).unwrap();
            for input in [
                "Log In!",
                "3 items",
                "!!!",
                "로그인",
                "장바구니 보기",
                "회원.가입",
                "__a__b__",
                "Déjà vu",
                "e-mail\r\naddress",
            ] {
                let once = s.sanitize(input);
                assert_eq!(s.sanitize(&once), once, "input {:?}", input);
            }
        }
    }
}
