//! Placeholder substitution on rendered template text.

use std::{
    collections::{BTreeSet, HashMap},
    sync::LazyLock,
};

use regex::{Captures, Regex};

/// Matches `${key}` where the key has no `$`, `{` or `}`; extraction never
/// emits keys containing those characters.
static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^${}]+)\}").unwrap());

/// Output of [`fill`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filled {
    pub text: String,
    /// Keys of placeholders left in `text` because no value was given.
    pub unresolved: BTreeSet<String>,
}

impl Filled {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Replace each `${key}` in `template` with `values[key]`.
///
/// Keys are looked up literally and inserted values are not scanned again,
/// so the result does not depend on map order. Placeholders without a value
/// stay verbatim and are listed in [`Filled::unresolved`].
pub fn fill<S: AsRef<str>>(template: &str, values: &HashMap<String, S>) -> Filled {
    let mut unresolved = BTreeSet::new();
    let text = PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures| match values.get(&caps[1]) {
            Some(value) => value.as_ref().to_string(),
            None => {
                unresolved.insert(caps[1].to_string());
                caps[0].to_string()
            }
        })
        .into_owned();

    Filled { text, unresolved }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    const PAGE_TEMPLATE: &str = "<PAGE>\n    <TITLE>${PAGE.TITLE}</TITLE>\n    <BTN_LBL>${PAGE.BTN_LBL}</BTN_LBL>\n</PAGE>\n";

    #[test]
    fn test_fill_page_scenario() {
        let filled = fill(
            PAGE_TEMPLATE,
            &values(&[("PAGE.TITLE", "歡迎"), ("PAGE.BTN_LBL", "前往")]),
        );

        assert!(filled.is_complete());
        assert_snapshot!(filled.text, @r"
        <PAGE>
            <TITLE>歡迎</TITLE>
            <BTN_LBL>前往</BTN_LBL>
        </PAGE>
        ");
    }

    #[test]
    fn test_unmapped_placeholders_are_kept_and_reported() {
        let filled = fill(PAGE_TEMPLATE, &values(&[("PAGE.TITLE", "Welcome")]));

        assert!(filled.text.contains("<TITLE>Welcome</TITLE>"));
        assert!(filled.text.contains("${PAGE.BTN_LBL}"));
        assert_eq!(
            filled.unresolved.into_iter().collect::<Vec<_>>(),
            vec!["PAGE.BTN_LBL".to_string()]
        );
    }

    #[test]
    fn test_fill_is_idempotent() {
        let map = values(&[("PAGE.TITLE", "Welcome"), ("PAGE.BTN_LBL", "Go")]);
        let once = fill(PAGE_TEMPLATE, &map);
        let twice = fill(&once.text, &map);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_inserted_values_are_not_rescanned() {
        let map = values(&[("A", "${B}"), ("B", "b")]);
        let filled = fill("${A}|${B}", &map);
        assert_eq!(filled.text, "${B}|b");
    }

    #[test]
    fn test_repeated_placeholder_and_prefix_keys() {
        let map = values(&[("A", "1"), ("A.B", "2")]);
        let filled = fill("${A} ${A.B} ${A}", &map);
        assert_eq!(filled.text, "1 2 1");
    }

    #[test]
    fn test_extra_values_are_ignored() {
        let filled = fill("plain text", &values(&[("X", "y")]));
        assert_eq!(filled.text, "plain text");
        assert!(filled.is_complete());
    }

    #[test]
    fn test_malformed_placeholders_are_left_alone() {
        let filled = fill("$a {c} ${} ${x{y} ${a}", &values(&[("a", "1"), ("x{y", "2")]));
        assert_eq!(filled.text, "$a {c} ${} ${x{y} 1");
        assert!(filled.is_complete());
    }
}
