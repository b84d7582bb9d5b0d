//! Keyword normalization and case-insensitive OR matching.

/// A non-empty, de-duplicated list of lowercased keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keywords(Vec<String>);

impl Keywords {
    /// Trim, lowercase and de-duplicate `raw`, keeping first-seen order.
    /// Returns `None` when nothing usable remains.
    pub fn parse<S: AsRef<str>>(raw: &[S]) -> Option<Self> {
        let mut keywords: Vec<String> = Vec::with_capacity(raw.len());
        for kw in raw {
            let kw = kw.as_ref().trim().to_lowercase();
            if !kw.is_empty() && !keywords.contains(&kw) {
                keywords.push(kw);
            }
        }
        (!keywords.is_empty()).then_some(Self(keywords))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of distinct keywords found in at least one of `fields`.
    pub fn hits(&self, fields: &[&str]) -> usize {
        let folded: Vec<String> = fields.iter().map(|f| f.to_lowercase()).collect();
        self.0
            .iter()
            .filter(|kw| folded.iter().any(|field| field.contains(kw.as_str())))
            .count()
    }
}

/// The first `max_chars` characters of `content`, with `…` appended when cut.
pub fn preview(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &content[..cut]),
        None => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_and_dedupes() {
        let kw = Keywords::parse(&["  Rust ", "rust", "", "SQLite"]).unwrap();
        assert_eq!(kw.as_slice(), &["rust".to_string(), "sqlite".to_string()]);
    }

    #[test]
    fn parse_rejects_blank_only_lists() {
        assert!(Keywords::parse::<&str>(&[]).is_none());
        assert!(Keywords::parse(&["", "   "]).is_none());
    }

    #[test]
    fn hits_count_each_keyword_once() {
        let kw = Keywords::parse(&["test", "message", "absent"]).unwrap();
        assert_eq!(kw.hits(&["This is a TEST message", "test title"]), 2);
        assert_eq!(kw.hits(&["nothing here"]), 0);
    }

    #[test]
    fn hits_fold_non_ascii() {
        let kw = Keywords::parse(&["ÜBER"]).unwrap();
        assert_eq!(kw.hits(&["notes über alles"]), 1);
    }

    #[test]
    fn preview_respects_char_boundaries() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("héllo wörld", 5), "héllo…");
        assert_eq!(preview("exact", 5), "exact");
    }
}
