// src/load/trimming.rs

/// Keep only the ASCII letters and digits of a header token, in order.
/// Everything else (quotes, spaces, punctuation) is dropped, not replaced,
/// so `"!!!"` comes back as an empty label.
pub fn trim_token(token: &str) -> String {
    token.chars().filter(char::is_ascii_alphanumeric).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_quotes_and_punctuation() {
        assert_eq!(trim_token("\"sepal_length\""), "sepallength");
        assert_eq!(trim_token("abc!@123"), "abc123");
        assert_eq!(trim_token(" width (cm)\n"), "widthcm");
    }

    #[test]
    fn all_punctuation_is_empty() {
        assert_eq!(trim_token("!!!"), "");
        assert_eq!(trim_token(""), "");
    }

    proptest! {
        #[test]
        fn trimming_is_idempotent(s in ".*") {
            let once = trim_token(&s);
            prop_assert_eq!(trim_token(&once), once);
        }

        #[test]
        fn never_longer_and_no_new_chars(s in ".*") {
            let out = trim_token(&s);
            prop_assert!(out.len() <= s.len());
            prop_assert!(out.chars().all(|c| s.contains(c)));
        }
    }
}
