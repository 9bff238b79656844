//! Whole-word, case-insensitive skill matching.

use regex::{Regex, RegexBuilder};

/// Compiled form of one search's keyword list. Built once per search and shared
/// read-only by every worker.
#[derive(Debug)]
pub struct SkillMatcher {
    skills: Vec<(String, Option<Regex>)>,
}

impl SkillMatcher {
    pub fn new(keywords: &[String]) -> Self {
        let skills = keywords
            .iter()
            .map(|kw| (kw.clone(), compile_keyword(kw)))
            .collect();
        Self { skills }
    }

    /// Returns the keywords present in `text`, in keyword-list order.
    pub fn matches(&self, text: &str) -> Vec<String> {
        self.skills
            .iter()
            .filter(|(_, re)| re.as_ref().is_some_and(|re| re.is_match(text)))
            .map(|(kw, _)| kw.clone())
            .collect()
    }
}

/// Builds `\bKEYWORD\b`, placing each boundary only where the keyword edge is a word
/// character so that skills like "C++" or ".NET" can still match. Blank keywords
/// never match.
fn compile_keyword(keyword: &str) -> Option<Regex> {
    let trimmed = keyword.trim();
    let first = trimmed.chars().next()?;
    let last = trimmed.chars().next_back()?;

    let mut pattern = String::new();
    if is_word_char(first) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(trimmed));
    if is_word_char(last) {
        pattern.push_str(r"\b");
    }

    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .ok()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kws(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn match_skills(text: &str, keywords: &[String]) -> Vec<String> {
        SkillMatcher::new(keywords).matches(text)
    }

    #[test]
    fn test_go_is_whole_word_only() {
        let keywords = kws(&["Go"]);
        assert!(match_skills("Going to the park", &keywords).is_empty());
        assert!(match_skills("Built with Django", &keywords).is_empty());
        assert_eq!(match_skills("I use Go daily.", &keywords), keywords);
    }

    #[test]
    fn test_java_does_not_match_javascript() {
        assert!(match_skills("Expert in JavaScript", &kws(&["Java"])).is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(match_skills("python and sql", &kws(&["Python"])), kws(&["Python"]));
    }

    #[test]
    fn test_output_follows_keyword_order() {
        let text = "SQL first, then Python";
        assert_eq!(
            match_skills(text, &kws(&["Python", "SQL"])),
            kws(&["Python", "SQL"])
        );
    }

    #[test]
    fn test_python_and_sql_scenario() {
        let text = "I know Python and SQL well";
        assert_eq!(
            match_skills(text, &kws(&["Python", "SQL"])),
            kws(&["Python", "SQL"])
        );
    }

    #[test]
    fn test_symbol_edged_skills() {
        let text = "Shipped services in C++ and .NET";
        assert_eq!(
            match_skills(text, &kws(&["C++", ".NET", "C"])),
            kws(&["C++", ".NET", "C"])
        );
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        assert!(match_skills("node.js", &kws(&["node?js"])).is_empty());
    }

    #[test]
    fn test_blank_keyword_never_matches() {
        assert!(match_skills("anything at all", &kws(&["", "   "])).is_empty());
    }

    #[test]
    fn test_multi_word_skill() {
        let text = "Background in Machine Learning systems";
        assert_eq!(
            match_skills(text, &kws(&["machine learning"])),
            kws(&["machine learning"])
        );
    }
}
