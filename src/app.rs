use std::io::{self, BufRead, Write};

use crate::api::{PlaceQuery, PlaceSource};
use crate::prompt::{Prompter, parse_count};
use crate::render::Console;

/// How a run ended. Every variant is a normal exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InvalidCount,
    Rendered(usize),
}

/// Prompt, validate, look up, render. Lookup failures are shown and then
/// rendered as an empty result; only console I/O errors escape.
pub fn run<R, W, S>(
    input: R,
    console: &mut Console<W>,
    source: &S,
    preset_username: Option<&str>,
) -> io::Result<Outcome>
where
    R: BufRead,
    W: Write,
    S: PlaceSource + ?Sized,
{
    let mut prompter = Prompter::new(input);
    let session = prompter.collect(console, preset_username)?;
    drop(prompter);

    console.loading()?;

    let count = match parse_count(&session.count) {
        Ok(count) => count,
        Err(e) => {
            log::debug!("rejected count: {e}");
            console.invalid_count()?;
            return Ok(Outcome::InvalidCount);
        }
    };

    let query = PlaceQuery::new(&session.country, count, &session.username);
    let names = match source.place_names(&query) {
        Ok(names) => names,
        Err(e) => {
            log::debug!("place lookup for {} failed: {e:?}", query.country());
            console.lookup_failed(&e)?;
            Vec::new()
        }
    };

    console.places(query.country(), &names)?;
    Ok(Outcome::Rendered(names.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::LookupError;
    use std::cell::RefCell;
    use std::io::Cursor;

    /// Hands out one canned answer and remembers what it was asked.
    struct FakeSource {
        answer: RefCell<Option<Result<Vec<String>, LookupError>>>,
        asked: RefCell<Vec<PlaceQuery>>,
    }

    impl FakeSource {
        fn new(answer: Result<Vec<String>, LookupError>) -> Self {
            FakeSource {
                answer: RefCell::new(Some(answer)),
                asked: RefCell::new(Vec::new()),
            }
        }

        fn names(names: &[&str]) -> Self {
            Self::new(Ok(names.iter().map(|n| n.to_string()).collect()))
        }
    }

    impl PlaceSource for FakeSource {
        fn place_names(&self, query: &PlaceQuery) -> Result<Vec<String>, LookupError> {
            self.asked.borrow_mut().push(query.clone());
            self.answer
                .borrow_mut()
                .take()
                .expect("lookup called more than once")
        }
    }

    fn run_with(typed: &str, source: &FakeSource) -> (Outcome, String) {
        let mut console = Console::new(Vec::new(), false);
        let outcome = run(Cursor::new(typed.to_string()), &mut console, source, None).unwrap();
        (outcome, String::from_utf8(console.into_inner()).unwrap())
    }

    #[test]
    fn france_example_prints_header_and_numbered_names() {
        let source = FakeSource::names(&["Paris", "Lyon", "Marseille"]);
        let (outcome, out) = run_with("fr\n3\ndemo\n", &source);

        assert_eq!(outcome, Outcome::Rendered(3));
        assert!(out.ends_with("\nGénéré(s) (3) pour FR :\n1. Paris\n2. Lyon\n3. Marseille\n"));

        let asked = source.asked.borrow();
        assert_eq!(asked.len(), 1);
        assert_eq!(asked[0].country(), "FR");
        assert_eq!(asked[0].max_rows().get(), 3);
        assert_eq!(asked[0].query_pairs()[3].1, "demo");
    }

    #[test]
    fn country_is_uppercased_for_request_and_header() {
        let source = FakeSource::names(&["Tokyo"]);
        let (_, out) = run_with("jp\n1\ndemo\n", &source);

        assert_eq!(source.asked.borrow()[0].country(), "JP");
        assert!(out.contains("pour JP :"));
    }

    #[test]
    fn invalid_counts_never_reach_the_network() {
        for count in ["-5", "0", "abc", ""] {
            let source = FakeSource::names(&["Paris"]);
            let (outcome, out) = run_with(&format!("fr\n{count}\ndemo\n"), &source);

            assert_eq!(outcome, Outcome::InvalidCount, "{count:?}");
            assert!(out.contains("Pas de nom négatif ou nul"));
            assert!(!out.contains("Généré(s)"));
            assert!(source.asked.borrow().is_empty());
        }
    }

    #[test]
    fn large_count_is_passed_to_the_lookup() {
        let source = FakeSource::names(&["Paris"]);
        let (outcome, _) = run_with("fr\n5000000000\ndemo\n", &source);

        assert_eq!(outcome, Outcome::Rendered(1));
        assert_eq!(source.asked.borrow()[0].query_pairs()[2].1, "5000000000");
    }

    #[test]
    fn username_with_latin1_bytes_still_renders() {
        let source = FakeSource::names(&["Paris"]);
        let mut console = Console::new(Vec::new(), false);
        let typed: &[u8] = b"fr\n1\njos\xe9\n";
        let outcome = run(Cursor::new(typed), &mut console, &source, None).unwrap();

        assert_eq!(outcome, Outcome::Rendered(1));
        assert_eq!(source.asked.borrow()[0].query_pairs()[3].1, "jos\u{fffd}");
        let out = String::from_utf8(console.into_inner()).unwrap();
        assert!(out.ends_with("\n1. Paris\n"));
    }

    #[test]
    fn zero_results_render_nothing_to_display() {
        let source = FakeSource::names(&[]);
        let (outcome, out) = run_with("fr\n3\ndemo\n", &source);

        assert_eq!(outcome, Outcome::Rendered(0));
        assert!(out.ends_with("\nRien à afficher...\n"));
    }

    #[test]
    fn bad_status_is_reported_before_empty_result() {
        let source = FakeSource::new(Err(LookupError::Status(401)));
        let (outcome, out) = run_with("fr\n3\ndemo\n", &source);

        assert_eq!(outcome, Outcome::Rendered(0));
        let status_at = out.find("401\n").unwrap();
        let empty_at = out.find("Rien à afficher...").unwrap();
        assert!(status_at < empty_at);
    }

    #[test]
    fn transport_failure_message_is_reported_before_empty_result() {
        let refused = io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused");
        let source = FakeSource::new(Err(LookupError::Transport(ureq::Error::Io(refused))));
        let (outcome, out) = run_with("fr\n3\ndemo\n", &source);

        assert_eq!(outcome, Outcome::Rendered(0));
        let failure_at = out.find("connection refused").unwrap();
        let empty_at = out.find("Rien à afficher...").unwrap();
        assert!(failure_at < empty_at);
    }

    #[test]
    fn loading_notice_follows_the_prompts() {
        let source = FakeSource::names(&["Paris"]);
        let (_, out) = run_with("fr\n1\ndemo\n", &source);

        let last_prompt = out.find("compte) : ").unwrap();
        let loading = out.find("\nChargement...\n").unwrap();
        assert!(last_prompt < loading);
    }
}
