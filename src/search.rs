//! Card search filter
//!
//! Shows or hides cards by case-insensitive substring match against
//! their title and description. Only visibility changes; card order never does.

/// Lowercased search text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn new(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if the term occurs in the lowercased title or description
    pub fn matches(&self, title: &str, description: &str) -> bool {
        if self.is_empty() {
            return true;
        }
        title.to_lowercase().contains(&self.0) || description.to_lowercase().contains(&self.0)
    }
}

/// A filterable card
pub trait Card {
    fn title(&self) -> String;
    fn description(&self) -> String;
    fn set_visible(&mut self, visible: bool);
}

/// Result of filtering one container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSummary {
    pub shown: usize,
    pub hidden: usize,
}

impl FilterSummary {
    pub fn total(&self) -> usize {
        self.shown + self.hidden
    }
}

/// Set each card's visibility from the term
pub fn filter_cards<'a, C, I>(cards: I, term: &SearchTerm) -> FilterSummary
where
    C: Card + 'a,
    I: IntoIterator<Item = &'a mut C>,
{
    let mut summary = FilterSummary::default();
    for card in cards {
        let visible = term.matches(&card.title(), &card.description());
        card.set_visible(visible);
        if visible {
            summary.shown += 1;
        } else {
            summary.hidden += 1;
        }
    }
    summary
}

/// Filter a container that may not be on the page; absent is a no-op
pub fn filter_container<C: Card>(
    container: Option<&mut [C]>,
    term: &SearchTerm,
) -> Option<FilterSummary> {
    container.map(|cards| filter_cards(cards.iter_mut(), term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    struct TestCard {
        title: String,
        description: String,
        visible: bool,
    }

    impl TestCard {
        fn new(title: &str, description: &str) -> Self {
            Self {
                title: title.to_string(),
                description: description.to_string(),
                visible: true,
            }
        }
    }

    impl Card for TestCard {
        fn title(&self) -> String {
            self.title.clone()
        }
        fn description(&self) -> String {
            self.description.clone()
        }
        fn set_visible(&mut self, visible: bool) {
            self.visible = visible;
        }
    }

    fn sample_cards() -> Vec<TestCard> {
        vec![
            TestCard::new("Math Tutor", "Helps with algebra"),
            TestCard::new("Chef Bot", "Suggests RECIPES for dinner"),
            TestCard::new("Travel Guide", "Plans trips abroad"),
        ]
    }

    fn visibility(cards: &[TestCard]) -> Vec<bool> {
        cards.iter().map(|c| c.visible).collect()
    }

    #[test]
    fn test_term_is_lowercased() {
        assert_eq!(SearchTerm::new("ChEf").as_str(), "chef");
    }

    #[test]
    fn test_matches_title_or_description() {
        let mut cards = sample_cards();
        let summary = filter_cards(cards.iter_mut(), &SearchTerm::new("recipes"));
        assert_eq!(visibility(&cards), vec![false, true, false]);
        assert_eq!(summary, FilterSummary { shown: 1, hidden: 2 });

        let summary = filter_cards(cards.iter_mut(), &SearchTerm::new("TUTOR"));
        assert_eq!(visibility(&cards), vec![true, false, false]);
        assert_eq!(summary.total(), 3);
    }

    #[test]
    fn test_empty_term_shows_everything() {
        let mut cards = sample_cards();
        filter_cards(cards.iter_mut(), &SearchTerm::new("zzz"));
        assert_eq!(visibility(&cards), vec![false, false, false]);

        let summary = filter_cards(cards.iter_mut(), &SearchTerm::new(""));
        assert_eq!(visibility(&cards), vec![true, true, true]);
        assert_eq!(summary.hidden, 0);
    }

    #[test]
    fn test_absent_container_is_noop() {
        assert_eq!(filter_container::<TestCard>(None, &SearchTerm::new("x")), None);
    }

    #[test]
    fn test_containers_are_independent() {
        let mut system = sample_cards();
        let mut user = vec![TestCard::new("Poet", "Writes haiku")];

        filter_container(Some(&mut system[..]), &SearchTerm::new("poet"));
        assert_eq!(visibility(&system), vec![false, false, false]);
        assert_eq!(visibility(&user), vec![true]);

        filter_container(Some(&mut user[..]), &SearchTerm::new("math"));
        assert_eq!(visibility(&user), vec![false]);
        assert_eq!(visibility(&system), vec![false, false, false]);
    }

    proptest! {
        #[test]
        fn prop_visible_iff_substring(
            title in "[a-zA-Z ]{0,12}",
            description in "[a-zA-Z ]{0,20}",
            raw in "[a-zA-Z]{0,3}",
        ) {
            let term = SearchTerm::new(&raw);
            let mut cards = vec![TestCard::new(&title, &description)];
            filter_cards(cards.iter_mut(), &term);
            let needle = raw.to_lowercase();
            let expected = title.to_lowercase().contains(&needle)
                || description.to_lowercase().contains(&needle);
            prop_assert_eq!(cards[0].visible, expected);
        }

        #[test]
        fn prop_title_substring_always_shown(title in "[a-zA-Z]{1,12}", start in 0usize..12, len in 0usize..12) {
            let start = start.min(title.len());
            let end = (start + len).min(title.len());
            let term = SearchTerm::new(&title[start..end].to_uppercase());
            prop_assert!(term.matches(&title, ""));
        }
    }
}
