// Leetspeak normalization used by the profanity rule.
//
// Input is expected to be lowercased already. Tokens are maximal runs of
// `[a-z0-9@!$*+\-_]`; everything else separates tokens.

/// Characters that can appear inside a token.
fn is_token_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '@' | '!' | '$' | '*' | '+' | '-' | '_')
}

/// Split lowercased text into candidate tokens.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !is_token_char(c))
        .filter(|token| !token.is_empty())
}

/// Map a single character through the substitution table.
///
/// `None` means the character is dropped.
fn substitute(c: char) -> Option<char> {
    match c {
        '@' | '4' => Some('a'),
        '3' => Some('e'),
        '1' | '!' => Some('i'),
        '0' => Some('o'),
        '5' | '$' => Some('s'),
        '7' | '+' => Some('t'),
        '*' | '-' | '_' | '.' | ',' | ' ' => None,
        other => Some(other),
    }
}

/// Normalize one token: substitute, keep only letters, collapse repeats.
///
/// `"b4d"` -> `"bad"`, `"baaad"` -> `"bad"`, `"c-o-o-l"` -> `"col"`.
pub fn normalize_token(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut last = None;

    for c in token.chars().filter_map(substitute) {
        if !c.is_ascii_lowercase() {
            continue;
        }
        if last == Some(c) {
            continue;
        }
        out.push(c);
        last = Some(c);
    }

    out
}

/// Normalized form of every token in the text.
pub fn normalized_tokens(text: &str) -> Vec<String> {
    tokenize(text)
        .map(normalize_token)
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_on_non_token_chars() {
        let tokens: Vec<&str> = tokenize("hey, b4d w0rd! what's up").collect();
        assert_eq!(tokens, vec!["hey", "b4d", "w0rd!", "what", "s", "up"]);
    }

    #[test]
    fn substitutions_map_back_to_letters() {
        assert_eq!(normalize_token("b4d"), "bad");
        assert_eq!(normalize_token("@$$"), "as");
        assert_eq!(normalize_token("7+0p"), "top");
        assert_eq!(normalize_token("h1!"), "hi");
        assert_eq!(normalize_token("s3x"), "sex");
    }

    #[test]
    fn separators_are_deleted() {
        assert_eq!(normalize_token("b*a-d_"), "bad");
    }

    #[test]
    fn repeats_collapse_to_a_single_letter() {
        assert_eq!(normalize_token("baaad"), "bad");
        assert_eq!(normalize_token("coooool"), "col");
        // only immediate repeats collapse
        assert_eq!(normalize_token("banana"), "banana");
    }

    #[test]
    fn unmapped_digits_are_stripped() {
        assert_eq!(normalize_token("b2a9d"), "bad");
        assert_eq!(normalize_token("2689"), "");
    }

    #[test]
    fn substitution_can_create_a_repeat() {
        // "4a" becomes "aa" before the collapse runs
        assert_eq!(normalize_token("b4ad"), "bad");
    }

    #[test]
    fn empty_tokens_are_dropped() {
        assert!(normalized_tokens("  2 __ 9 ").is_empty());
    }
}
