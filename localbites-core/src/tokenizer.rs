//! Split free text into lowercase ASCII alphanumeric tokens.

use std::collections::HashSet;

/// Lowercase `text` and return its maximal runs of ASCII letters and digits.
///
/// Every other character, including whitespace, punctuation and non-ASCII
/// symbols, acts as a separator. Tokens keep their order of appearance and
/// duplicates are retained.
///
/// # Examples
/// ```
/// use localbites_core::tokenize;
///
/// assert_eq!(tokenize("Tex-Mex!"), vec!["tex", "mex"]);
/// assert_eq!(tokenize("taco TACO"), vec!["taco", "taco"]);
/// assert!(tokenize("").is_empty());
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Tokenize an optional text; `None` yields no tokens.
#[must_use]
pub fn tokenize_optional(text: Option<&str>) -> Vec<String> {
    text.map(tokenize).unwrap_or_default()
}

/// Distinct tokens of `text`, for membership tests.
pub(crate) fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Tex-Mex!", &["tex", "mex"])]
    #[case("  Taco   House ", &["taco", "house"])]
    #[case("Pho 99 / Noodles", &["pho", "99", "noodles"])]
    #[case("coffee_shop;bakery", &["coffee", "shop", "bakery"])]
    #[case("Café Crêpe", &["caf", "cr", "pe"])]
    #[case("sushi sushi", &["sushi", "sushi"])]
    #[case("!!!", &[])]
    #[case("", &[])]
    fn splits_into_expected_tokens(#[case] input: &str, #[case] expected: &[&str]) {
        assert_eq!(tokenize(input), expected);
    }

    #[rstest]
    fn missing_text_has_no_tokens() {
        assert!(tokenize_optional(None).is_empty());
        assert_eq!(tokenize_optional(Some("Ramen")), vec!["ramen"]);
    }

    #[rstest]
    fn retokenizing_is_stable() {
        let once = tokenize("Joe's BBQ & Grill #2");
        let twice = tokenize(&once.join(" "));
        assert_eq!(once, twice);
    }

    #[rstest]
    #[case("ÀÉÎ Öl Straße")]
    #[case("Ⅻ 日本料理 ０１２")]
    #[case("MiXeD_case-99\tTabs")]
    fn tokens_are_lowercase_ascii_alphanumerics(#[case] input: &str) {
        let tokens = tokenize(input);
        let all_ascii = tokens
            .iter()
            .all(|token| token.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert!(all_ascii, "unexpected tokens {tokens:?}");
    }

    #[rstest]
    fn token_set_drops_duplicates() {
        let set = token_set("Taco Taco Loco");
        assert_eq!(set.len(), 2);
        assert!(set.contains("taco"));
        assert!(set.contains("loco"));
    }
}
