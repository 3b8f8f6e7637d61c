use crate::types::DetectedTextRegion;

pub const BUTTON_KEYWORDS: &[&str] = &[
    "submit", "send", "login", "sign", "sign up", "sign in", "logout", "register", "cancel",
    "delete", "save", "next", "previous", "back", "continue", "apply", "search", "buy",
    "purchase", "add", "create", "제출", "보내기", "로그인", "회원가입", "가입", "등록", "취소",
    "삭제", "저장", "다음", "이전", "돌아가기", "계속", "적용", "검색", "구매", "추가", "생성",
];

/// Decides which OCR regions read like a button label.
#[derive(Debug, Clone)]
pub struct ButtonTextHeuristic {
    pub keywords: Vec<String>,
    /// Regions at most this many characters long pass without a keyword.
    pub max_short_len: usize,
}

impl Default for ButtonTextHeuristic {
    fn default() -> Self {
        Self {
            keywords: BUTTON_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            max_short_len: 15,
        }
    }
}

impl ButtonTextHeuristic {
    pub fn is_button_text(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        text.chars().count() <= self.max_short_len
            || self.keywords.iter().any(|keyword| text.contains(keyword.as_str()))
    }

    /// The largest region that passes `is_button_text`. The first one wins a tie.
    pub fn pick<'a>(&self, regions: &'a [DetectedTextRegion]) -> Option<&'a DetectedTextRegion> {
        regions
            .iter()
            .filter(|region| !region.text.trim().is_empty())
            .filter(|region| self.is_button_text(&region.text))
            .fold(None, |best: Option<&DetectedTextRegion>, region| match best {
                Some(current) if current.area() >= region.area() => Some(current),
                _ => Some(region),
            })
    }
}
