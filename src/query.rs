//! Interactive query loops
//!
//! A [`QueryLoop`] walks `Prompt → Filter → (Empty → Prompt | NonEmpty →
//! Present → Done)` over one borrowed dataset. The domain-specific parts
//! (questions, criteria, notices, ordering) live behind [`QueryDomain`].

use tracing::{debug, info, warn};

use crate::models::{ArtRecord, Dataset, EventRecord, RestaurantRecord};
use crate::predicate::{ArtCriteria, ArtSearchMode, EventCriteria, Predicate, RestaurantCriteria};
use crate::present::{PresentMode, Presentable, Presenter, View};
use crate::prompt::{Prompted, Prompter};
use crate::{CityScoutError, Result};

/// How a query loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopOutcome {
    /// Results were handed to the presenter
    Presented(usize),
    /// The user backed out before any results were shown
    Cancelled,
}

/// Per-domain behavior of a query loop
pub trait QueryDomain {
    type Record: Presentable;

    const MODE: PresentMode;
    const TITLE: &'static str;
    /// Shown when a search matches nothing
    const NO_RESULTS: &'static str;

    /// Ask for criteria and build the predicate. Unparseable answers are
    /// [`CityScoutError::InputFormat`]; the loop reports them and asks again.
    fn build_predicate(
        &mut self,
        prompter: &mut dyn Prompter,
    ) -> Result<Prompted<Predicate<Self::Record>>>;

    /// Order matches before presentation
    fn arrange(&self, _matches: &mut Vec<&Self::Record>) {}
}

enum LoopState<'a, T> {
    Prompt,
    Filter(Predicate<T>),
    Empty,
    Present(Vec<&'a T>),
    Done(LoopOutcome),
}

/// One run of a domain query over a dataset
pub struct QueryLoop<'a, D: QueryDomain> {
    domain: D,
    dataset: &'a Dataset<D::Record>,
}

impl<'a, D: QueryDomain> QueryLoop<'a, D> {
    pub fn new(domain: D, dataset: &'a Dataset<D::Record>) -> Self {
        Self { domain, dataset }
    }

    /// Drive the state machine until results are presented or the user cancels
    pub fn run(
        mut self,
        prompter: &mut dyn Prompter,
        presenter: &mut dyn Presenter,
    ) -> Result<LoopOutcome> {
        let mut state = LoopState::Prompt;

        loop {
            state = match state {
                LoopState::Prompt => match self.domain.build_predicate(prompter) {
                    Ok(Prompted::Value(predicate)) => LoopState::Filter(predicate),
                    Ok(Prompted::Cancelled) => LoopState::Done(LoopOutcome::Cancelled),
                    Err(e @ CityScoutError::InputFormat { .. }) => {
                        debug!("Rejected query input: {}", e);
                        prompter.say(&e.user_message())?;
                        LoopState::Prompt
                    }
                    Err(e) => return Err(e),
                },
                LoopState::Filter(predicate) => {
                    let matches = self.dataset.filter(&predicate);
                    debug!("{} of {} records match", matches.len(), self.dataset.len());
                    if matches.is_empty() {
                        LoopState::Empty
                    } else {
                        LoopState::Present(matches)
                    }
                }
                LoopState::Empty => {
                    prompter.say(D::NO_RESULTS)?;
                    LoopState::Prompt
                }
                LoopState::Present(mut matches) => {
                    self.domain.arrange(&mut matches);
                    let view = View::from_records(D::MODE, D::TITLE, &matches);
                    if let Err(e) = presenter.present(&view) {
                        warn!("Failed to present {} results: {}", matches.len(), e);
                        prompter.say(&format!("Could not show the results: {}", e.user_message()))?;
                    }
                    info!("Presented {} results for '{}'", matches.len(), D::TITLE);
                    LoopState::Done(LoopOutcome::Presented(matches.len()))
                }
                LoopState::Done(outcome) => return Ok(outcome),
            };
        }
    }
}

/// Price tier, minimum rating, minimum review count
#[derive(Debug, Default)]
pub struct RestaurantQuery;

impl QueryDomain for RestaurantQuery {
    type Record = RestaurantRecord;

    const MODE: PresentMode = PresentMode::Map;
    const TITLE: &'static str = "Restaurants";
    const NO_RESULTS: &'static str =
        "\nSorry, there are no restaurants matching your search criteria. Please search again.";

    fn build_predicate(
        &mut self,
        prompter: &mut dyn Prompter,
    ) -> Result<Prompted<Predicate<RestaurantRecord>>> {
        prompter.say("\nWhat types of restaurants are you looking for? ('back' for the menu)")?;

        let Prompted::Value(price) = prompter.ask("\nEnter Price: $, $$, $$$, or $$$$: ")? else {
            return Ok(Prompted::Cancelled);
        };
        let Prompted::Value(rating) = prompter.ask(
            "\nEnter lowest desired rating (ex. 4.5 for restaurants rated 4.5 or higher): ",
        )?
        else {
            return Ok(Prompted::Cancelled);
        };
        let Prompted::Value(reviews) = prompter.ask(
            "\nEnter lowest desired review count (ex. 100 for at least 100 reviews): ",
        )?
        else {
            return Ok(Prompted::Cancelled);
        };

        let criteria = RestaurantCriteria::parse(&price, &rating, &reviews)?;
        Ok(Prompted::Value(criteria.predicate()))
    }
}

/// Art search with its own sub-menu
#[derive(Debug, Default)]
pub struct ArtQuery;

const ART_MENU: &str = "\nPlease enter the category number to search by
1. Name of Neighborhood
2. Name of Artist
3. Name of Art Installation
4. Show all art installations
0. Back to the main menu";

impl ArtQuery {
    fn ask_mode(prompter: &mut dyn Prompter) -> Result<Prompted<ArtSearchMode>> {
        loop {
            prompter.say(ART_MENU)?;
            let Prompted::Value(choice) = prompter.ask("Input the required number field: ")? else {
                return Ok(Prompted::Cancelled);
            };
            if choice == "0" {
                return Ok(Prompted::Cancelled);
            }
            match ArtSearchMode::from_choice(&choice) {
                Some(mode) => return Ok(Prompted::Value(mode)),
                None => prompter.say("Choose 1, 2, 3, or 4 only")?,
            }
        }
    }
}

impl QueryDomain for ArtQuery {
    type Record = ArtRecord;

    const MODE: PresentMode = PresentMode::Map;
    const TITLE: &'static str = "Public Art";
    const NO_RESULTS: &'static str =
        "\nSorry, no art installations match your search. Please search again.";

    fn build_predicate(
        &mut self,
        prompter: &mut dyn Prompter,
    ) -> Result<Prompted<Predicate<ArtRecord>>> {
        let Prompted::Value(mode) = Self::ask_mode(prompter)? else {
            return Ok(Prompted::Cancelled);
        };

        let text = match mode.question() {
            Some(question) => match prompter.ask(question)? {
                Prompted::Value(text) => text,
                Prompted::Cancelled => return Ok(Prompted::Cancelled),
            },
            None => String::new(),
        };

        Ok(Prompted::Value(ArtCriteria::new(mode, &text).predicate()))
    }
}

/// Events running on one date, listed by category
#[derive(Debug, Default)]
pub struct EventQuery;

impl QueryDomain for EventQuery {
    type Record = EventRecord;

    const MODE: PresentMode = PresentMode::Table;
    const TITLE: &'static str = "Events matching search";
    const NO_RESULTS: &'static str =
        "\nSorry, there are no events on that date. Please search again.";

    fn build_predicate(
        &mut self,
        prompter: &mut dyn Prompter,
    ) -> Result<Prompted<Predicate<EventRecord>>> {
        prompter.say("\nWhat event are you looking for? (type 'back' to return to the menu)")?;
        let Prompted::Value(date) =
            prompter.ask("\nEnter a date (YYYY-MM-DD) on which you would like to explore events: ")?
        else {
            return Ok(Prompted::Cancelled);
        };
        Ok(Prompted::Value(EventCriteria::parse(&date)?.predicate()))
    }

    fn arrange(&self, matches: &mut Vec<&EventRecord>) {
        // stable, so listing order is kept within a category
        matches.sort_by(|a, b| a.categories().cmp(b.categories()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, NOT_AVAILABLE};
    use chrono::NaiveDate;
    use std::collections::VecDeque;

    /// Answers questions from a script and records everything shown
    #[derive(Default)]
    struct Script {
        answers: VecDeque<&'static str>,
        asked: Vec<String>,
        said: Vec<String>,
    }

    impl Script {
        fn new(answers: &[&'static str]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    impl Prompter for Script {
        fn ask(&mut self, question: &str) -> Result<Prompted<String>> {
            self.asked.push(question.to_string());
            match self.answers.pop_front() {
                Some(a) if a.eq_ignore_ascii_case("back") => Ok(Prompted::Cancelled),
                Some(a) => Ok(Prompted::Value(a.to_string())),
                None => Err(CityScoutError::InputClosed),
            }
        }

        fn say(&mut self, text: &str) -> Result<()> {
            self.said.push(text.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct Recorder {
        views: Vec<View>,
        fail: bool,
    }

    impl Presenter for Recorder {
        fn present(&mut self, view: &View) -> Result<()> {
            if self.fail {
                return Err(std::io::Error::other("disk full").into());
            }
            self.views.push(view.clone());
            Ok(())
        }
    }

    fn restaurants() -> Dataset<RestaurantRecord> {
        Dataset::new(vec![RestaurantRecord {
            name: "Fig & Ash".to_string(),
            is_closed: false,
            review_count: 120,
            cuisine: "American (New)".to_string(),
            rating: 4.6,
            price: Some("$$".to_string()),
            address: vec!["514 E Ohio St".to_string(), "Pittsburgh, PA 15212".to_string()],
            latitude: 40.45,
            longitude: -79.99,
        }])
    }

    fn event(name: &str, category: &str, start: (u32, u32), end: (u32, u32)) -> EventRecord {
        EventRecord::new(
            name.to_string(),
            vec![category.to_string()],
            NaiveDate::from_ymd_opt(2024, start.0, start.1).unwrap(),
            NaiveDate::from_ymd_opt(2024, end.0, end.1).unwrap(),
            "10am-5pm".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_restaurant_match_is_presented() {
        let dataset = restaurants();
        let mut script = Script::new(&["$$", "4.5", "100"]);
        let mut recorder = Recorder::default();

        let outcome = QueryLoop::new(RestaurantQuery, &dataset)
            .run(&mut script, &mut recorder)
            .unwrap();

        assert_eq!(outcome, LoopOutcome::Presented(1));
        assert_eq!(recorder.views.len(), 1);
        assert_eq!(recorder.views[0].mode, PresentMode::Map);
        assert_eq!(recorder.views[0].rows[0].label, "Fig & Ash");
    }

    #[test]
    fn test_empty_result_reprompts() {
        let dataset = restaurants();
        let mut script = Script::new(&["$$$", "4.5", "100", "$$", "4.5", "100"]);
        let mut recorder = Recorder::default();

        let outcome = QueryLoop::new(RestaurantQuery, &dataset)
            .run(&mut script, &mut recorder)
            .unwrap();

        assert_eq!(outcome, LoopOutcome::Presented(1));
        assert_eq!(script.asked.len(), 6);
        assert!(script.said.iter().any(|s| s == RestaurantQuery::NO_RESULTS));
    }

    #[test]
    fn test_bad_input_reprompts_until_valid() {
        let dataset = restaurants();
        let mut script = Script::new(&[
            "$$", "great", "100", "$$", "4.5", "many", "$$", "4.5", "100",
        ]);
        let mut recorder = Recorder::default();

        let outcome = QueryLoop::new(RestaurantQuery, &dataset)
            .run(&mut script, &mut recorder)
            .unwrap();

        assert_eq!(outcome, LoopOutcome::Presented(1));
        let rejections = script.said.iter().filter(|s| s.starts_with("Invalid input")).count();
        assert_eq!(rejections, 2);
    }

    #[test]
    fn test_back_cancels_mid_query() {
        let dataset = restaurants();
        let mut script = Script::new(&["$$", "back"]);
        let mut recorder = Recorder::default();

        let outcome = QueryLoop::new(RestaurantQuery, &dataset)
            .run(&mut script, &mut recorder)
            .unwrap();

        assert_eq!(outcome, LoopOutcome::Cancelled);
        assert!(recorder.views.is_empty());
    }

    #[test]
    fn test_end_of_input_propagates() {
        let dataset = restaurants();
        let mut script = Script::new(&["$$"]);
        let result =
            QueryLoop::new(RestaurantQuery, &dataset).run(&mut script, &mut Recorder::default());
        assert!(matches!(result, Err(CityScoutError::InputClosed)));
    }

    #[test]
    fn test_presenter_failure_still_finishes() {
        let dataset = restaurants();
        let mut script = Script::new(&["$$", "4.5", "100"]);
        let mut recorder = Recorder {
            fail: true,
            ..Recorder::default()
        };

        let outcome = QueryLoop::new(RestaurantQuery, &dataset)
            .run(&mut script, &mut recorder)
            .unwrap();

        assert_eq!(outcome, LoopOutcome::Presented(1));
        assert!(script.said.iter().any(|s| s.starts_with("Could not show the results")));
    }

    #[test]
    fn test_art_submenu() {
        let dataset = Dataset::new(vec![ArtRecord {
            title: "Tribute To Children".to_string(),
            artist_name: "Robert Berks".to_string(),
            art_type: NOT_AVAILABLE.to_string(),
            neighborhood: "North Shore".to_string(),
            latitude: Coordinate::Known(40.45),
            longitude: Coordinate::Known(-80.01),
        }]);
        let mut script = Script::new(&["7", "1", "north shore"]);
        let mut recorder = Recorder::default();

        let outcome = QueryLoop::new(ArtQuery, &dataset)
            .run(&mut script, &mut recorder)
            .unwrap();

        assert_eq!(outcome, LoopOutcome::Presented(1));
        assert!(script.said.iter().any(|s| s == "Choose 1, 2, 3, or 4 only"));
        assert_eq!(script.asked.last().map(String::as_str), Some("Enter neighborhood: "));
    }

    #[test]
    fn test_art_zero_returns_to_menu() {
        let dataset = Dataset::new(Vec::<ArtRecord>::new());
        let mut script = Script::new(&["0"]);
        let outcome = QueryLoop::new(ArtQuery, &dataset)
            .run(&mut script, &mut Recorder::default())
            .unwrap();
        assert_eq!(outcome, LoopOutcome::Cancelled);
    }

    #[test]
    fn test_events_inclusive_and_sorted_by_category() {
        let dataset = Dataset::new(vec![
            event("Jazz Night", "Music", (6, 2), (6, 2)),
            event("Arts Festival", "Arts", (6, 1), (6, 3)),
            event("Brass Band", "Music", (6, 1), (6, 5)),
            event("Later Thing", "Arts", (6, 10), (6, 12)),
        ]);
        let mut script = Script::new(&["2024-06-02"]);
        let mut recorder = Recorder::default();

        let outcome = QueryLoop::new(EventQuery, &dataset)
            .run(&mut script, &mut recorder)
            .unwrap();

        assert_eq!(outcome, LoopOutcome::Presented(3));
        let view = &recorder.views[0];
        assert_eq!(view.mode, PresentMode::Table);
        let names: Vec<&str> = view.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(names, vec!["Arts Festival", "Jazz Night", "Brass Band"]);
    }
}
