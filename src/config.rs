use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use crate::error::{Result, WrestleStatError};
use crate::model::TeamRef;

const EMAIL_VAR: &str = "WRESTLESTAT_EMAIL";
const PASSWORD_VAR: &str = "WRESTLESTAT_PASSWORD";

/// WrestleStat account credentials, supplied out-of-band via environment.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Read `WRESTLESTAT_EMAIL` and `WRESTLESTAT_PASSWORD`. A missing
    /// variable is a fatal configuration error, caught before any fetch.
    pub fn from_env() -> Result<Self> {
        let email = env::var(EMAIL_VAR)
            .map_err(|_| WrestleStatError::MissingCredential { name: EMAIL_VAR })?;
        let password = env::var(PASSWORD_VAR).map_err(|_| WrestleStatError::MissingCredential {
            name: PASSWORD_VAR,
        })?;
        Ok(Self { email, password })
    }
}

/// Seasons during which each exceptional team held D1 status.
///
/// The table only records exceptions; a slug absent from it is assumed
/// active in every requested season. This is operator-maintained data, not
/// a discovered property: the live rankings listing only reflects current
/// status, so historical joins and departures have to be written down here.
#[derive(Debug, Clone, Default)]
pub struct ActivityWindows {
    windows: BTreeMap<String, BTreeSet<u16>>,
}

impl ActivityWindows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `slug` was active for every season in `seasons`.
    /// Repeated calls for the same slug union the windows, so
    /// non-contiguous activity is expressible.
    pub fn insert(&mut self, slug: impl Into<String>, seasons: RangeInclusive<u16>) {
        self.windows.entry(slug.into()).or_default().extend(seasons);
    }

    /// Whether `slug` should be crawled for `season`.
    pub fn is_active(&self, slug: &str, season: u16) -> bool {
        match self.windows.get(slug) {
            Some(seasons) => seasons.contains(&season),
            None => true,
        }
    }
}

/// Manually maintained corrections to the live team directory.
#[derive(Debug, Clone)]
pub struct TeamCorrections {
    /// Teams that left D1 before the current rankings snapshot and therefore
    /// never appear in the live listing.
    pub legacy_teams: Vec<TeamRef>,
    pub activity: ActivityWindows,
}

impl Default for TeamCorrections {
    fn default() -> Self {
        let legacy_teams = vec![
            TeamRef::new(9, "boston-u"),
            TeamRef::new(8, "boise-state"),
            TeamRef::new(25, "eastern-michigan"),
            TeamRef::new(58, "old-dominion"),
            TeamRef::new(829, "fresno-state"),
        ];

        let mut activity = ActivityWindows::new();
        // Programs that moved up to D1.
        activity.insert("little-rock", 2020..=2026);
        activity.insert("liu", 2020..=2026);
        activity.insert("presbyterian", 2020..=2026);
        activity.insert("cal-baptist", 2023..=2026);
        activity.insert("morgan-state", 2024..=2026);
        activity.insert("bellarmine", 2025..=2026);
        // Programs that moved down from D1.
        activity.insert("boston-u", 2014..=2014);
        activity.insert("boise-state", 2014..=2017);
        activity.insert("eastern-michigan", 2014..=2018);
        activity.insert("old-dominion", 2014..=2020);
        // Programs that were added and then removed.
        activity.insert("fresno-state", 2018..=2021);

        Self {
            legacy_teams,
            activity,
        }
    }
}

/// Parameters for one crawl run.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Seasons to crawl, identified by the year the season ends in.
    pub seasons: RangeInclusive<u16>,
    /// Restrict the crawl to a single team slug.
    pub team: Option<String>,
    /// Directory the CSV datasets are written under.
    pub out_dir: PathBuf,
    /// Maximum sustained request rate against the source; clamped to at
    /// least one request per minute.
    pub requests_per_minute: u32,
    pub corrections: TeamCorrections,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seasons: 2014..=2026,
            team: None,
            out_dir: PathBuf::from("."),
            requests_per_minute: 30,
            corrections: TeamCorrections::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_slug_is_always_active() {
        let corrections = TeamCorrections::default();
        assert!(corrections.activity.is_active("penn-state", 2014));
        assert!(corrections.activity.is_active("penn-state", 2026));
    }

    #[test]
    fn test_windows_bound_exceptional_teams() {
        let corrections = TeamCorrections::default();
        let activity = &corrections.activity;

        assert!(!activity.is_active("fresno-state", 2017));
        assert!(activity.is_active("fresno-state", 2018));
        assert!(activity.is_active("fresno-state", 2021));
        assert!(!activity.is_active("fresno-state", 2022));

        assert!(activity.is_active("boston-u", 2014));
        assert!(!activity.is_active("boston-u", 2015));

        assert!(!activity.is_active("bellarmine", 2024));
        assert!(activity.is_active("bellarmine", 2025));
    }

    #[test]
    fn test_non_contiguous_windows() {
        let mut activity = ActivityWindows::new();
        activity.insert("comeback-u", 2014..=2015);
        activity.insert("comeback-u", 2020..=2021);

        assert!(activity.is_active("comeback-u", 2015));
        assert!(!activity.is_active("comeback-u", 2017));
        assert!(activity.is_active("comeback-u", 2020));
    }
}
