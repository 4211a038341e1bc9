//! Top-level menu and per-selection dispatch

use chrono::{Datelike, Local};
use tracing::{error, info, instrument};

use crate::config::{CityScoutConfig, MalformedPolicy};
use crate::normalize::{normalize_art, normalize_events, normalize_restaurants};
use crate::present::Presenter;
use crate::prompt::{Prompted, Prompter};
use crate::query::{ArtQuery, EventQuery, LoopOutcome, QueryLoop, RestaurantQuery};
use crate::sources::{
    ArtSource, CsvArtSource, EventSource, HtmlEventSource, HttpClient, RestaurantSource, YelpSource,
};
use crate::Result;

const MAIN_MENU: &str = "\nHello! Welcome to Pittsburgh! What are you looking for?
Please choose one of the options below:
Option 1: Search for Restaurants
Option 2: Search for Art Installations
Option 3: Search for Events
0: To exit the search";

/// Entry of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Restaurants,
    Art,
    Events,
    Exit,
}

impl MenuChoice {
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Restaurants),
            "2" => Some(Self::Art),
            "3" => Some(Self::Events),
            "0" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Where each domain's raw data comes from
pub struct Sources {
    pub restaurants: Box<dyn RestaurantSource>,
    pub art: Box<dyn ArtSource>,
    pub events: Box<dyn EventSource>,
}

impl Sources {
    /// Network and file sources built from configuration
    pub fn from_config(config: &CityScoutConfig) -> Result<Self> {
        let http = HttpClient::new(&config.http)?;
        Ok(Self {
            restaurants: Box::new(YelpSource::new(http.clone(), &config.restaurants)),
            art: Box::new(CsvArtSource::new(&config.art.csv_path)),
            events: Box::new(HtmlEventSource::new(http, config.events.url.clone())),
        })
    }
}

/// Interactive session: menu, fetch, normalize, query, repeat
pub struct Session<P, V> {
    sources: Sources,
    policy: MalformedPolicy,
    reference_year: i32,
    prompter: P,
    presenter: V,
}

impl<P: Prompter, V: Presenter> Session<P, V> {
    pub fn new(
        sources: Sources,
        policy: MalformedPolicy,
        reference_year: i32,
        prompter: P,
        presenter: V,
    ) -> Self {
        Self {
            sources,
            policy,
            reference_year,
            prompter,
            presenter,
        }
    }

    pub fn from_config(config: &CityScoutConfig, prompter: P, presenter: V) -> Result<Self> {
        let reference_year = config
            .events
            .reference_year
            .unwrap_or_else(|| Local::now().year());

        Ok(Self::new(
            Sources::from_config(config)?,
            config.restaurants.on_malformed,
            reference_year,
            prompter,
            presenter,
        ))
    }

    /// Give back the prompter and presenter
    pub fn into_io(self) -> (P, V) {
        (self.prompter, self.presenter)
    }

    /// Run until the user exits. Only end of input and terminal failures escape.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some(choice) = self.ask_menu()? else {
                info!("Session ended by user");
                return Ok(());
            };

            match self.run_selection(choice) {
                Ok(outcome) => info!("{:?} selection finished: {:?}", choice, outcome),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    error!("{:?} selection failed: {}", choice, e);
                    self.prompter.say(&e.user_message())?;
                }
            }
        }
    }

    /// Next domain to search, `None` to exit
    fn ask_menu(&mut self) -> Result<Option<MenuChoice>> {
        self.prompter.say(MAIN_MENU)?;

        loop {
            let answer = match self.prompter.ask("\nChoose an option: ")? {
                Prompted::Value(answer) => answer,
                Prompted::Cancelled => return Ok(None),
            };

            match MenuChoice::parse(&answer) {
                Some(MenuChoice::Exit) => return Ok(None),
                Some(choice) => return Ok(Some(choice)),
                None => self.prompter.say("\nInvalid choice! Please choose again.")?,
            }
        }
    }

    #[instrument(skip(self))]
    fn run_selection(&mut self, choice: MenuChoice) -> Result<LoopOutcome> {
        let prompter: &mut dyn Prompter = &mut self.prompter;
        let presenter: &mut dyn Presenter = &mut self.presenter;

        match choice {
            MenuChoice::Restaurants => {
                let raw = self.sources.restaurants.fetch_businesses()?;
                let dataset = normalize_restaurants(raw, self.policy)?;
                info!("Restaurant dataset holds {} records", dataset.len());
                QueryLoop::new(RestaurantQuery, &dataset).run(prompter, presenter)
            }
            MenuChoice::Art => {
                let raw = self.sources.art.fetch_table()?;
                let dataset = normalize_art(raw)?;
                info!("Art dataset holds {} records", dataset.len());
                QueryLoop::new(ArtQuery, &dataset).run(prompter, presenter)
            }
            MenuChoice::Events => {
                let raw = self.sources.events.fetch_items()?;
                let dataset = normalize_events(raw, self.reference_year);
                info!("Event dataset holds {} records", dataset.len());
                QueryLoop::new(EventQuery, &dataset).run(prompter, presenter)
            }
            MenuChoice::Exit => Ok(LoopOutcome::Cancelled),
        }
    }
}
