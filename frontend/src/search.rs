//! Recherche d'utilisateurs de la barre de navigation.

use std::rc::Rc;

use yew::Reducible;

use crate::api::SocialApi;
use crate::models::SearchHit;

/// En dessous, la liste est vidée sans appel réseau.
pub const MIN_SEARCH_LEN: usize = 2;

#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    Cleared,
    Results(Vec<SearchHit>),
    Failed(String),
}

/// Le terme envoyé est la saisie brute ; seule la longueur est jugée sur la
/// saisie sans espaces de bord, en unités UTF-16 comme `value.length` côté DOM.
pub fn search_term(input: &str) -> Option<&str> {
    (input.trim().encode_utf16().count() >= MIN_SEARCH_LEN).then_some(input)
}

/* ---------------- état de la boîte de recherche ---------------- */

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchBox {
    pub hits:    Vec<SearchHit>,
    pub loading: bool,
    pub show:    bool,
    pub error:   Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SearchEvent {
    /// Nouvelle saisie ; la recherche précédente est déjà abandonnée.
    Typed(String),
    Finished(SearchOutcome),
    Shown(bool),
}

impl Reducible for SearchBox {
    type Action = SearchEvent;

    fn reduce(self: Rc<Self>, event: SearchEvent) -> Rc<Self> {
        let mut next = (*self).clone();
        match event {
            SearchEvent::Typed(input) => {
                next.error = None;
                next.loading = search_term(&input).is_some();
                if !next.loading {
                    next.hits.clear();
                    next.show = false;
                }
            }
            SearchEvent::Finished(outcome) => {
                next.loading = false;
                match outcome {
                    SearchOutcome::Results(hits) => {
                        next.hits = hits;
                        next.show = true;
                    }
                    SearchOutcome::Failed(msg) => {
                        next.error = Some(msg);
                        next.hits.clear();
                    }
                    SearchOutcome::Cleared => {
                        next.hits.clear();
                        next.show = false;
                    }
                }
            }
            SearchEvent::Shown(show) => next.show = show,
        }
        Rc::new(next)
    }
}

pub async fn run_search<A: SocialApi + ?Sized>(api: &A, token: &str, input: &str) -> SearchOutcome {
    let Some(term) = search_term(input) else {
        return SearchOutcome::Cleared;
    };
    match api.search_users(token, term).await {
        Ok(hits) => SearchOutcome::Results(hits),
        Err(e) => {
            log::warn!("recherche « {term} » : {e}");
            SearchOutcome::Failed("Erreur lors de la recherche d'utilisateurs.".into())
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::api::fake::FakeApi;

    #[test]
    fn single_char_clears_without_call() {
        let api = FakeApi::default();
        assert_eq!(block_on(run_search(&api, "t1", "a")), SearchOutcome::Cleared);
        assert_eq!(block_on(run_search(&api, "t1", " a  ")), SearchOutcome::Cleared);
        assert!(api.calls().is_empty());
    }

    #[test]
    fn two_chars_issue_exactly_one_call() {
        let api = FakeApi {
            hits: vec![SearchHit { id: 4, username: "abel".into() }],
            ..FakeApi::default()
        };
        let out = block_on(run_search(&api, "t1", "ab"));
        assert_eq!(out, SearchOutcome::Results(vec![SearchHit { id: 4, username: "abel".into() }]));
        assert_eq!(api.calls(), vec!["GET /search-users?searchTerm=ab [t1]"]);
    }

    #[test]
    fn failure_stays_local() {
        let api = FakeApi { fail_all: true, ..FakeApi::default() };
        assert!(matches!(block_on(run_search(&api, "t1", "abc")), SearchOutcome::Failed(_)));
    }

    #[test]
    fn term_keeps_raw_input() {
        assert_eq!(search_term(" ab"), Some(" ab"));
        assert_eq!(search_term("é"), None);
    }

    #[test]
    fn length_counts_utf16_units() {
        // hors BMP : une paire de substitution, donc deux unités
        assert_eq!(search_term("😀"), Some("😀"));
        assert_eq!(search_term(" 😀 "), Some(" 😀 "));
        assert_eq!(search_term("ü"), None);
    }

    fn step(state: SearchBox, event: SearchEvent) -> SearchBox {
        (*Rc::new(state).reduce(event)).clone()
    }

    #[test]
    fn short_keystroke_ends_pending_search() {
        let s = step(SearchBox::default(), SearchEvent::Typed("ab".into()));
        assert!(s.loading);

        let s = step(s, SearchEvent::Typed("a".into()));
        assert!(!s.loading);
        assert!(!s.show);
        assert!(s.hits.is_empty());
    }

    #[test]
    fn results_then_failure_in_the_box() {
        let hit = SearchHit { id: 3, username: "abel".into() };
        let s = step(SearchBox::default(), SearchEvent::Typed("ab".into()));
        let s = step(s, SearchEvent::Finished(SearchOutcome::Results(vec![hit.clone()])));
        assert_eq!(s, SearchBox { hits: vec![hit], loading: false, show: true, error: None });

        let s = step(s, SearchEvent::Typed("abx".into()));
        assert!(s.loading);
        let s = step(s, SearchEvent::Finished(SearchOutcome::Failed("oups".into())));
        assert_eq!(s.error.as_deref(), Some("oups"));
        assert!(s.hits.is_empty());
        assert!(!s.loading);
    }
}
