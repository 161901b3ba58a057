//! Token counting for prompt budgeting
//!
//! Counts prompt tokens with tiktoken for the configured chat model and looks
//! up that model's context limit, so oversized files can be flagged before
//! they are sent.
//!
//! - gpt-4o / o1 / o3 / gpt-4.1 families use o200k_base
//! - everything else (gpt-4, gpt-3.5-turbo, unknown names) uses cl100k_base
//! - if an encoding cannot be loaded, a character-class heuristic is used

use once_cell::sync::Lazy;
use std::fmt;
use tiktoken_rs::{cl100k_base, o200k_base, CoreBPE};
use tracing::warn;

/// Token encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// cl100k_base (GPT-4, GPT-3.5-turbo)
    #[default]
    Cl100k,
    /// o200k_base (GPT-4o and later)
    O200k,
}

impl Encoding {
    /// Encoding used by a chat model. Unknown models fall back to cl100k_base.
    pub fn for_model(model: &str) -> Self {
        let model = model.to_lowercase();
        let o200k_prefixes = ["gpt-4o", "gpt-4.1", "gpt-5", "o1", "o3", "o4"];
        if o200k_prefixes.iter().any(|p| model.starts_with(p)) {
            Encoding::O200k
        } else {
            Encoding::Cl100k
        }
    }

    fn bpe(&self) -> Option<&'static CoreBPE> {
        match self {
            Encoding::Cl100k => CL100K_BPE.as_ref().ok(),
            Encoding::O200k => O200K_BPE.as_ref().ok(),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Encoding::Cl100k => "cl100k_base",
            Encoding::O200k => "o200k_base",
        };
        write!(f, "{}", name)
    }
}

// Lazy-initialized BPE encodings (loaded once on first use)
static CL100K_BPE: Lazy<Result<CoreBPE, String>> = Lazy::new(|| {
    cl100k_base().map_err(|e| {
        warn!("Failed to load cl100k_base: {}", e);
        format!("Failed to load cl100k_base: {}", e)
    })
});

static O200K_BPE: Lazy<Result<CoreBPE, String>> = Lazy::new(|| {
    o200k_base().map_err(|e| {
        warn!("Failed to load o200k_base: {}", e);
        format!("Failed to load o200k_base: {}", e)
    })
});

/// Known context limits, in tokens
const MODEL_MAX_TOKENS: &[(&str, usize)] = &[
    ("gpt-4", 8192),
    ("gpt-4-32k", 32768),
    ("gpt-4-turbo", 128000),
    ("gpt-4-0125-preview", 128000),
    ("gpt-4o", 128000),
    ("gpt-4o-mini", 128000),
    ("gpt-3.5-turbo", 4096),
    ("gpt-3.5-turbo-16k", 16384),
    ("gpt-3.5-turbo-1106", 16384),
    ("text-davinci-003", 4097),
    ("text-curie-001", 2048),
    ("text-babbage-001", 2048),
    ("text-ada-001", 2048),
];

/// Context limit of a model, if known
pub fn max_tokens_for_model(model: &str) -> Option<usize> {
    MODEL_MAX_TOKENS
        .iter()
        .find(|(name, _)| *name == model)
        .map(|(_, max)| *max)
}

/// Count the tokens `text` costs when sent to `model`
pub fn count_tokens(text: &str, model: &str) -> usize {
    if text.is_empty() {
        return 0;
    }

    match Encoding::for_model(model).bpe() {
        Some(bpe) => bpe.encode_with_special_tokens(text).len(),
        None => estimate_tokens_heuristic(text),
    }
}

/// Token budget check for a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBudget {
    pub tokens: usize,
    pub limit: Option<usize>,
}

impl TokenBudget {
    pub fn measure(text: &str, model: &str) -> Self {
        Self {
            tokens: count_tokens(text, model),
            limit: max_tokens_for_model(model),
        }
    }

    pub fn exceeded(&self) -> bool {
        self.limit.map(|limit| self.tokens > limit).unwrap_or(false)
    }
}

/// Estimate tokens without BPE encoding
///
/// - ASCII text: ~4 characters per token
/// - Code symbols: ~2 characters per token
/// - CJK characters: ~1.5 characters per token
/// - Other Unicode: ~2 characters per token
pub fn estimate_tokens_heuristic(text: &str) -> usize {
    let mut ascii_chars = 0usize;
    let mut cjk_chars = 0usize;
    let mut other_unicode = 0usize;
    let mut code_symbols = 0usize;

    for c in text.chars() {
        if c.is_ascii() {
            if c.is_ascii_punctuation() {
                code_symbols += 1;
            } else {
                ascii_chars += 1;
            }
        } else if is_cjk_char(c) {
            cjk_chars += 1;
        } else {
            other_unicode += 1;
        }
    }

    ascii_chars.div_ceil(4)
        + code_symbols.div_ceil(2)
        + (cjk_chars * 2).div_ceil(3)
        + other_unicode.div_ceil(2)
}

#[inline]
fn is_cjk_char(c: char) -> bool {
    let cp = c as u32;
    (0x4E00..=0x9FFF).contains(&cp)
        || (0x3400..=0x4DBF).contains(&cp)
        || (0x3000..=0x303F).contains(&cp)
        || (0x3040..=0x309F).contains(&cp)
        || (0x30A0..=0x30FF).contains(&cp)
        || (0xAC00..=0xD7AF).contains(&cp)
        || (0xFF00..=0xFFEF).contains(&cp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_tokens_empty() {
        assert_eq!(count_tokens("", "gpt-4-turbo"), 0);
    }

    #[test]
    fn test_count_tokens_ascii() {
        let tokens = count_tokens("Hello, world!", "gpt-4-turbo");
        assert!(tokens > 0 && tokens < 10);
    }

    #[test]
    fn test_count_tokens_unknown_model_uses_default_encoding() {
        let text = "fn main() { println!(\"Hello\"); }";
        assert_eq!(count_tokens(text, "some-local-model"), count_tokens(text, "gpt-4"));
    }

    #[test]
    fn test_encoding_for_model() {
        assert_eq!(Encoding::for_model("gpt-4-turbo"), Encoding::Cl100k);
        assert_eq!(Encoding::for_model("gpt-3.5-turbo"), Encoding::Cl100k);
        assert_eq!(Encoding::for_model("gpt-4o-mini"), Encoding::O200k);
        assert_eq!(Encoding::for_model("GPT-4o"), Encoding::O200k);
        assert_eq!(Encoding::for_model("o1-preview"), Encoding::O200k);
        assert_eq!(Encoding::O200k.to_string(), "o200k_base");
    }

    #[test]
    fn test_max_tokens_for_model() {
        assert_eq!(max_tokens_for_model("gpt-4"), Some(8192));
        assert_eq!(max_tokens_for_model("gpt-4-turbo"), Some(128000));
        assert_eq!(max_tokens_for_model("gpt-3.5-turbo"), Some(4096));
        assert_eq!(max_tokens_for_model("mystery"), None);
    }

    #[test]
    fn test_budget_exceeded() {
        let long = "word ".repeat(5000);
        let budget = TokenBudget::measure(&long, "gpt-3.5-turbo");
        assert!(budget.exceeded());

        let short = TokenBudget::measure("hello", "gpt-3.5-turbo");
        assert!(!short.exceeded());

        let unknown = TokenBudget::measure(&long, "mystery");
        assert_eq!(unknown.limit, None);
        assert!(!unknown.exceeded());
    }

    #[test]
    fn test_heuristic() {
        assert_eq!(estimate_tokens_heuristic(""), 0);
        let tokens = estimate_tokens_heuristic("Hello world, this is a test.");
        assert!((5..=12).contains(&tokens));
        let cjk = estimate_tokens_heuristic("这是一个测试文档");
        assert!((4..=8).contains(&cjk));
    }
}
