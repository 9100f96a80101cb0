use std::{collections::BTreeSet, fmt::Display, str::FromStr};

use feruca::{Collator, Locale, Tailoring};
use serde::Serialize;

use crate::job::{Job, RawJob};

/// Every job from the most recent successful load, in file order.
#[derive(Default, Debug, Clone)]
pub struct Catalog {
    jobs: Vec<Job>,
}

impl FromIterator<Job> for Catalog {
    fn from_iter<T: IntoIterator<Item = Job>>(iter: T) -> Self {
        Self {
            jobs: iter.into_iter().collect(),
        }
    }
}

impl Catalog {
    pub fn from_raw<'a>(raw_jobs: impl IntoIterator<Item = &'a RawJob>) -> Self {
        raw_jobs.into_iter().map(Job::from).collect()
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// The distinct values of each filterable field.
    pub fn vocabulary(&self) -> Vocabulary<'_> {
        let mut vocabulary = Vocabulary::default();
        for job in &self.jobs {
            vocabulary.levels.insert(&job.level);
            vocabulary.types.insert(&job.kind);
            vocabulary.skills.insert(&job.skill);
        }
        vocabulary
    }

    /// The jobs that pass `selection`, ordered by `sort`.
    pub fn view(&self, selection: &FilterSelection, sort: SortKey) -> Vec<&Job> {
        let mut jobs = self
            .jobs
            .iter()
            .filter(|job| selection.matches(job))
            .collect::<Vec<_>>();
        sort.sort(&mut jobs);
        jobs
    }
}

/// Exact-match constraints on the filterable fields. `None` or an empty string
/// matches anything.
#[derive(Default, Clone, PartialEq, Eq, Debug)]
pub struct FilterSelection {
    pub level: Option<String>,
    pub kind: Option<String>,
    pub skill: Option<String>,
}

impl FilterSelection {
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skill = Some(skill.into());
        self
    }

    pub fn matches(&self, job: &Job) -> bool {
        fn allows(wanted: &Option<String>, actual: &str) -> bool {
            match wanted.as_deref() {
                None | Some("") => true,
                Some(wanted) => wanted == actual,
            }
        }

        allows(&self.level, &job.level)
            && allows(&self.kind, &job.kind)
            && allows(&self.skill, &job.skill)
    }
}

/// How to order a view.
///
/// The time keys compare elapsed minutes: `TimeOldest` sorts ascending and
/// `TimeNewest` descending, matching the names used by existing front ends.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum SortKey {
    TitleAsc,
    TitleDesc,
    TimeOldest,
    TimeNewest,
    #[default]
    Unsorted,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::TitleAsc,
        SortKey::TitleDesc,
        SortKey::TimeOldest,
        SortKey::TimeNewest,
        SortKey::Unsorted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::TitleAsc => "title-asc",
            SortKey::TitleDesc => "title-desc",
            SortKey::TimeOldest => "time-oldest",
            SortKey::TimeNewest => "time-newest",
            SortKey::Unsorted => "",
        }
    }

    /// Stable, so ties keep their relative order.
    pub fn sort(self, jobs: &mut [&Job]) {
        match self {
            SortKey::TitleAsc => {
                let mut collator = title_collator();
                jobs.sort_by(|a, b| collator.collate(a.title.as_str(), b.title.as_str()));
            }
            SortKey::TitleDesc => {
                let mut collator = title_collator();
                jobs.sort_by(|a, b| collator.collate(b.title.as_str(), a.title.as_str()));
            }
            SortKey::TimeOldest => jobs.sort_by(|a, b| a.posted.cmp(&b.posted)),
            SortKey::TimeNewest => jobs.sort_by(|a, b| b.posted.cmp(&a.posted)),
            SortKey::Unsorted => {}
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = std::convert::Infallible;

    /// Unrecognized keys leave the order alone.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .unwrap_or_default())
    }
}

/// CLDR root-locale ordering, with punctuation significant at the first level
/// the way browsers compare strings.
fn title_collator() -> Collator {
    Collator::new(Tailoring::Cldr(Locale::Root), false, true)
}

/// Which filterable field a vocabulary entry belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Field {
    Level,
    Kind,
    Skill,
}

/// The distinct values seen for each filterable field.
#[derive(Serialize, Default, PartialEq, Eq, Debug)]
pub struct Vocabulary<'a> {
    pub levels: BTreeSet<&'a str>,
    pub types: BTreeSet<&'a str>,
    pub skills: BTreeSet<&'a str>,
}

impl<'a> Vocabulary<'a> {
    pub fn values(&self, field: Field) -> &BTreeSet<&'a str> {
        match field {
            Field::Level => &self.levels,
            Field::Kind => &self.types,
            Field::Skill => &self.skills,
        }
    }

    /// `(value, label)` pairs for a dropdown, led by the "All" wildcard.
    pub fn options(&self, field: Field) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        std::iter::once(("", "All")).chain(self.values(field).iter().map(|&v| (v, v)))
    }
}
