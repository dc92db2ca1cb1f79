use std::num::NonZeroU32;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use tracing::{info, instrument, warn};

use crate::client::WrestleStatClient;
use crate::config::{CrawlConfig, Credentials};
use crate::error::Result;
use crate::export;
use crate::model::{MatchRecord, RankingStyle, RosterEntry, TeamRef};

/// Totals from a finished crawl run.
#[derive(Debug, Clone, Copy)]
pub struct CrawlSummary {
    pub seasons: usize,
    pub total_matches: usize,
}

/// Drives the season x team x wrestler traversal.
///
/// One page is fetched and fully processed before the next is requested;
/// every crawl fetch first acquires the rate limiter, which caps the
/// sustained request rate against the source. Failures are contained at the
/// smallest enclosing unit: a failed wrestler or team is logged, counted as
/// zero matches, and its siblings proceed.
pub struct Crawler {
    client: WrestleStatClient,
    config: CrawlConfig,
    limiter: DefaultDirectRateLimiter,
}

impl Crawler {
    pub fn new(client: WrestleStatClient, config: CrawlConfig) -> Self {
        let rate = NonZeroU32::new(config.requests_per_minute).unwrap_or(NonZeroU32::MIN);
        let limiter = RateLimiter::direct(Quota::per_minute(rate));
        Self {
            client,
            config,
            limiter,
        }
    }

    /// Run the full crawl: authenticate, resolve the team directory, walk
    /// every configured season, and persist datasets at the team, season,
    /// and full-history boundaries.
    pub async fn run(&self, credentials: &Credentials) -> Result<CrawlSummary> {
        self.client.login(credentials).await?;

        let teams = self.resolve_teams().await?;
        info!(count = teams.len(), "resolved team directory");

        let mut all_matches: Vec<Vec<MatchRecord>> = Vec::new();
        let mut seasons = 0usize;

        for season in self.config.seasons.clone() {
            info!(season, "scraping season");
            seasons += 1;
            let mut season_matches: Vec<Vec<MatchRecord>> = Vec::new();

            for team in &teams {
                if !self.config.corrections.activity.is_active(&team.slug, season) {
                    info!(team = %team.slug, season, "skipping inactive team");
                    continue;
                }

                match self.scrape_team(team, season).await {
                    Ok(matches) if matches.is_empty() => {
                        info!(team = %team.slug, season, "no match data for team");
                    }
                    Ok(matches) => {
                        let path =
                            export::team_results_path(&self.config.out_dir, &team.slug, season);
                        export::write_matches(&path, &matches)?;
                        info!(
                            team = %team.slug,
                            season,
                            count = matches.len(),
                            path = %path.display(),
                            "saved team dataset"
                        );
                        season_matches.push(matches);
                    }
                    Err(e) => {
                        warn!(team = %team.slug, season, error = %e, "team scrape failed");
                    }
                }
            }

            let season_matches = export::combine(season_matches);
            let path = export::season_results_path(&self.config.out_dir, season);
            if export::write_matches(&path, &season_matches)? {
                info!(
                    season,
                    count = season_matches.len(),
                    path = %path.display(),
                    "saved season dataset"
                );
            } else {
                info!(season, "no match data collected for season");
            }
            all_matches.push(season_matches);
        }

        let all_matches = export::combine(all_matches);
        let total_matches = all_matches.len();
        let path = export::full_results_path(&self.config.out_dir);
        if export::write_matches(&path, &all_matches)? {
            info!(
                total = total_matches,
                path = %path.display(),
                "saved full-history dataset"
            );
        } else {
            warn!("no match data collected");
        }

        Ok(CrawlSummary {
            seasons,
            total_matches,
        })
    }

    /// Resolve the full team directory: the live rankings listing, unioned
    /// with the configured legacy teams that left D1 before the current
    /// snapshot, optionally narrowed to a single requested slug.
    async fn resolve_teams(&self) -> Result<Vec<TeamRef>> {
        self.limiter.until_ready().await;
        let mut teams = self.client.get_d1_teams(RankingStyle::default()).await?;
        teams.extend(self.config.corrections.legacy_teams.iter().cloned());
        if let Some(only) = &self.config.team {
            teams.retain(|team| &team.slug == only);
            if teams.is_empty() {
                warn!(team = %only, "requested team not found in directory");
            }
        }
        Ok(teams)
    }

    /// Scrape one team for one season: roster, then every wrestler's
    /// matches, stamped with the team's school name.
    #[instrument(skip(self, team), fields(team = %team.slug, season))]
    async fn scrape_team(&self, team: &TeamRef, season: u16) -> Result<Vec<MatchRecord>> {
        let roster = self.fetch_roster(team, season).await?;
        info!(count = roster.len(), "found roster");

        let school = team.school_name();
        let mut team_matches: Vec<Vec<MatchRecord>> = Vec::new();

        for wrestler in &roster {
            match self.fetch_matches(wrestler, season).await {
                Ok(mut matches) => {
                    for record in &mut matches {
                        record.wrestler_school = Some(school.clone());
                    }
                    team_matches.push(matches);
                }
                Err(e) => {
                    warn!(
                        wrestler_id = wrestler.id,
                        error = %e,
                        "wrestler scrape failed"
                    );
                }
            }
        }

        Ok(export::combine(team_matches))
    }

    /// Rate-limited roster fetch with retry-once-then-skip semantics: the
    /// second failure propagates and the caller skips the unit.
    async fn fetch_roster(&self, team: &TeamRef, season: u16) -> Result<Vec<RosterEntry>> {
        self.limiter.until_ready().await;
        match self.client.get_team_roster(team, season).await {
            Ok(roster) => Ok(roster),
            Err(e) => {
                warn!(team = %team.slug, season, error = %e, "roster fetch failed, retrying once");
                self.limiter.until_ready().await;
                self.client.get_team_roster(team, season).await
            }
        }
    }

    /// Rate-limited match-history fetch with retry-once-then-skip semantics.
    async fn fetch_matches(
        &self,
        wrestler: &RosterEntry,
        season: u16,
    ) -> Result<Vec<MatchRecord>> {
        self.limiter.until_ready().await;
        match self.client.get_wrestler_matches(wrestler, Some(season)).await {
            Ok(matches) => Ok(matches),
            Err(e) => {
                warn!(
                    wrestler_id = wrestler.id,
                    error = %e,
                    "match fetch failed, retrying once"
                );
                self.limiter.until_ready().await;
                self.client.get_wrestler_matches(wrestler, Some(season)).await
            }
        }
    }
}
