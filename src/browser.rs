use std::path::Path;

use chrono::Utc;
use colored::Colorize as _;
use serde::Serialize;
use serde_json::Value;

use crate::{
    catalog::{Catalog, FilterSelection, SortKey, Vocabulary},
    error::{LoadError, Result},
    job::{Job, RawJob},
};

/// Owns the loaded catalog and the user's current filter and sort choices.
#[derive(Default, Debug)]
pub struct Browser {
    catalog: Catalog,
    selection: FilterSelection,
    sort: SortKey,
    /// Generation of the most recently started load.
    latest_load: u64,
}

/// Identifies one started load, so a late completion can be recognized.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[must_use]
pub struct LoadTicket(u64);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LoadOutcome {
    /// The catalog was replaced with this many jobs.
    Loaded(usize),
    /// A newer load was started first, so this one was dropped.
    Stale,
}

/// What a front end should display right now.
#[derive(Serialize, Debug)]
pub struct View<'a> {
    pub jobs: Vec<&'a Job>,
    pub vocabulary: Vocabulary<'a>,
}

impl Browser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    /// Starts a load. Only the most recently started load may finish.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_load += 1;
        LoadTicket(self.latest_load)
    }

    /// Replaces the catalog with the jobs in `payload`, unless a newer load has
    /// been started since `ticket` was issued.
    pub fn finish_load(&mut self, ticket: LoadTicket, payload: &str) -> Result<LoadOutcome> {
        if ticket.0 != self.latest_load {
            log::debug!(
                "Dropping load #{} (latest is #{})",
                ticket.0,
                self.latest_load,
            );
            return Ok(LoadOutcome::Stale);
        }

        let catalog = parse_catalog(payload).inspect_err(|e| log::warn!("{}", e))?;
        log::info!("Loaded {} jobs (load #{})", catalog.len(), ticket.0);
        let len = catalog.len();
        self.catalog = catalog;
        // Filters go back to "All" on every load.
        self.selection = FilterSelection::default();
        Ok(LoadOutcome::Loaded(len))
    }

    pub fn load(&mut self, payload: &str) -> Result<View<'_>> {
        let ticket = self.begin_load();
        self.finish_load(ticket, payload)?;
        Ok(self.view())
    }

    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<View<'_>> {
        let path = path.as_ref();
        log::debug!("Reading {}", path.display());
        let payload = std::fs::read_to_string(path).inspect_err(|e| {
            log::warn!("Failed to read {}: {}", path.display(), e);
        })?;
        self.load(&payload)
    }

    pub fn set_filter(&mut self, selection: FilterSelection) -> View<'_> {
        log::debug!("Filter: {:?}", selection);
        self.selection = selection;
        self.view()
    }

    pub fn set_sort(&mut self, sort: SortKey) -> View<'_> {
        log::debug!("Sort: {:?}", sort);
        self.sort = sort;
        self.view()
    }

    pub fn view(&self) -> View<'_> {
        View {
            jobs: self.catalog.view(&self.selection, self.sort),
            vocabulary: self.catalog.vocabulary(),
        }
    }
}

fn parse_catalog(payload: &str) -> Result<Catalog> {
    let raw_jobs = match serde_json::from_str(payload)? {
        Value::Array(values) => values.into_iter().map(RawJob::from).collect::<Vec<_>>(),
        Value::Null => return Err(LoadError::NotAnArray("null")),
        Value::Bool(_) => return Err(LoadError::NotAnArray("a boolean")),
        Value::Number(_) => return Err(LoadError::NotAnArray("a number")),
        Value::String(_) => return Err(LoadError::NotAnArray("a string")),
        Value::Object(_) => return Err(LoadError::NotAnArray("an object")),
    };
    Ok(Catalog::from_raw(&raw_jobs))
}

impl View<'_> {
    pub fn print(&self, details: bool) {
        let now = Utc::now();
        for job in &self.jobs {
            if details {
                println!("{}\n", job.details_at(now));
                continue;
            }
            println!(
                "{} {} {} {} {}",
                job.age_label(),
                format!("{:10}", job.level.chars().take(10).collect::<String>()),
                format!("{:12}", job.kind.chars().take(12).collect::<String>()),
                format!("{:48}", job.to_string().chars().take(48).collect::<String>())
                    .color(job.age_color()),
                format!("({})", job.link).italic().black(),
            );
        }
    }

    pub fn print_vocabulary(&self) {
        for (name, values) in [
            ("Level", &self.vocabulary.levels),
            ("Type", &self.vocabulary.types),
            ("Skill", &self.vocabulary.skills),
        ] {
            let values = values.iter().copied().collect::<Vec<_>>();
            println!("{}: All, {}", name.bold(), values.join(", "));
        }
    }
}
