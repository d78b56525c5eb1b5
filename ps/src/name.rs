//! Prompt name sanitization

use std::sync::LazyLock;

use regex::Regex;

static INVALID_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9 \-\r\n]").unwrap());
static WHITESPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s\r\n]+").unwrap());

/// Sanitize a raw prompt name into its canonical form.
///
/// Strips characters outside `[A-Za-z0-9 \-\r\n]`, collapses whitespace runs
/// into a single hyphen, trims leading and trailing hyphens, and lowercases.
/// Total and idempotent; rejecting an empty result is the caller's job.
pub fn clean_name(raw: &str) -> String {
    let stripped = INVALID_CHARS.replace_all(raw, "");
    let hyphenated = WHITESPACE_RUNS.replace_all(&stripped, "-");
    hyphenated.trim_matches('-').to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clean_name() {
        let tests = [
            ("windows-newlines", "clean\r\n\r\nthis name", "clean-this-name"),
            ("valid-name", "do-not-clean", "do-not-clean"),
            ("mixed-case", "My COOL nAMe", "my-cool-name"),
            ("invalid-characters", "this <is .pretty> un*cl()ean", "this-is-pretty-unclean"),
            ("only-invalid", "++ -- ()", ""),
            ("surrounding-hyphens", "--keep the middle--", "keep-the-middle"),
        ];

        for (name, input, expected) in tests {
            assert_eq!(clean_name(input), expected, "case: {name}");
        }
    }

    proptest! {
        #[test]
        fn clean_name_is_idempotent(raw in ".*") {
            let once = clean_name(&raw);
            prop_assert_eq!(clean_name(&once), once);
        }
    }
}
