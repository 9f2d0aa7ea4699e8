/// No suggestion list produced anywhere in the workspace holds more than this many entries.
pub const MAX_SUGGESTIONS: usize = 100;

/// Keeps the candidates which start with `prefix`, in their original order,
/// stopping once [`MAX_SUGGESTIONS`] have been found.
pub fn filter_prefixed<I, S>(candidates: I, prefix: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .filter(|candidate| candidate.as_ref().starts_with(prefix))
        .take(MAX_SUGGESTIONS)
        .map(|candidate| candidate.as_ref().to_owned())
        .collect()
}

/// Extension for iterators of strings, see [`filter_prefixed`].
pub trait PrefixFilter: Iterator + Sized
where
    Self::Item: AsRef<str>,
{
    fn starting_with(self, prefix: &str) -> Vec<String> {
        filter_prefixed(self, prefix)
    }
}

impl<I> PrefixFilter for I
where
    I: Iterator,
    I::Item: AsRef<str>,
{}


#[cfg(test)]
mod tests {
    use super::*;


    #[test]
    fn keeps_order_and_filters() {
        let found = ["help", "hello", "kill", "he"].into_iter().starting_with("he");
        assert_eq!(found, ["help", "hello", "he"]);
    }

    #[test]
    fn empty_prefix_matches_everything() {
        assert_eq!(filter_prefixed(["a", "b"], "").len(), 2);
    }

    #[test]
    fn capped() {
        let many = (0..500).map(|n| format!("n{n}"));
        assert_eq!(many.starting_with("n").len(), MAX_SUGGESTIONS);
    }
}
