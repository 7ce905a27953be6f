//! Reference entities (genres, countries, directors, actors) and the picker
//! options derived from them.

use serde::Serialize;

use reelview_common::{Actor, Country, Director, Genre};

use crate::query::Collation;

/// A `{value, label}` pair for a select/multi-select input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: i64,
    pub label: String,
}

/// The four reference lists, always replaced together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub genres: Vec<Genre>,
    pub countries: Vec<Country>,
    pub directors: Vec<Director>,
    pub actors: Vec<Actor>,
}

impl ReferenceData {
    pub fn genre_options(&self) -> Vec<SelectOption> {
        sorted_options(self.genres.iter().map(|g| (g.id.get(), g.name.clone())))
    }

    pub fn director_options(&self) -> Vec<SelectOption> {
        sorted_options(self.directors.iter().map(|d| (d.id.get(), d.name.clone())))
    }

    pub fn actor_options(&self) -> Vec<SelectOption> {
        sorted_options(self.actors.iter().map(|a| (a.id.get(), a.name.clone())))
    }

    /// Countries are ordered by name, then labelled with their flag.
    pub fn country_options(&self) -> Vec<SelectOption> {
        let collation = Collation::new();
        let mut countries: Vec<&Country> = self.countries.iter().collect();
        countries.sort_by(|a, b| collation.compare(&a.name, &b.name));
        countries
            .into_iter()
            .map(|c| SelectOption {
                value: c.id.get(),
                label: format!("{} {}", c.flag_emoji, c.name),
            })
            .collect()
    }
}

fn sorted_options(entries: impl Iterator<Item = (i64, String)>) -> Vec<SelectOption> {
    let collation = Collation::new();
    let mut options: Vec<SelectOption> = entries
        .map(|(value, label)| SelectOption { value, label })
        .collect();
    options.sort_by(|a, b| collation.compare(&a.label, &b.label));
    options
}
