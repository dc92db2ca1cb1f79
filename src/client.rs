use std::time::Duration;

use tracing::instrument;

use crate::config::Credentials;
use crate::error::{Result, WrestleStatError};
use crate::model::{MatchRecord, RankingStyle, RosterEntry, TeamRef};
use crate::scraper;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The main entry point for interacting with WrestleStat.
///
/// `WrestleStatClient` wraps a [`reqwest::Client`] with a cookie store (the
/// login session is cookie-based) and exposes methods to resolve the team
/// directory, fetch season rosters, and fetch wrestler match histories.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> wrestlestat_scraper::Result<()> {
/// use wrestlestat_scraper::{Credentials, WrestleStatClient};
/// use wrestlestat_scraper::model::RankingStyle;
///
/// let client = WrestleStatClient::new()?;
/// client.login(&Credentials::from_env()?).await?;
/// let teams = client.get_d1_teams(RankingStyle::Dual).await?;
/// println!("Found {} teams", teams.len());
/// # Ok(())
/// # }
/// ```
pub struct WrestleStatClient {
    http: reqwest::Client,
}

impl WrestleStatClient {
    /// Create a client with a cookie store and a bounded request timeout.
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(WrestleStatError::ClientBuild)?;
        Ok(Self { http })
    }

    /// Create a client using the provided [`reqwest::Client`].
    ///
    /// The client must have a cookie store enabled for the login session to
    /// survive across requests. Use this to configure proxies, headers, or a
    /// different timeout.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { http: client }
    }

    /// Establish an authenticated session. Fatal on failure; a credential
    /// rejection will not self-resolve, so no retry is attempted.
    #[instrument(skip(self, credentials))]
    pub async fn login(&self, credentials: &Credentials) -> Result<()> {
        scraper::session::login(&self.http, credentials).await
    }

    /// Resolve the current D1 team directory from a rankings listing.
    #[instrument(skip(self))]
    pub async fn get_d1_teams(&self, style: RankingStyle) -> Result<Vec<TeamRef>> {
        scraper::teams::get_d1_teams(&self.http, style).await
    }

    /// Fetch the roster a team fielded in a given season.
    #[instrument(skip(self, team), fields(team = %team.slug))]
    pub async fn get_team_roster(&self, team: &TeamRef, season: u16) -> Result<Vec<RosterEntry>> {
        scraper::roster::get_team_roster(&self.http, team, season).await
    }

    /// Fetch a wrestler's match history, filtered to `season` when given.
    #[instrument(skip(self, wrestler), fields(wrestler = %wrestler.slug))]
    pub async fn get_wrestler_matches(
        &self,
        wrestler: &RosterEntry,
        season: Option<u16>,
    ) -> Result<Vec<MatchRecord>> {
        scraper::matches::get_wrestler_matches(&self.http, wrestler, season).await
    }
}
