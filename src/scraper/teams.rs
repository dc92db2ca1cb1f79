use std::collections::BTreeSet;

use ::scraper::Selector;
use itertools::Itertools;
use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::model::{RankingStyle, TeamRef};
use crate::scraper::{self, BASE_URL};

/// Resolve the current D1 team directory from a rankings listing page.
///
/// Returns the deduplicated set of (id, slug) pairs found in team profile
/// links. A page with no parseable links yields an empty set and a warning,
/// never an error; downstream stages simply process nothing.
#[instrument(skip(client))]
pub(crate) async fn get_d1_teams(
    client: &reqwest::Client,
    style: RankingStyle,
) -> Result<Vec<TeamRef>> {
    let url = format!("{BASE_URL}/d1/rankings/{style}");
    let document = scraper::get_document(client, &url).await?;
    let teams = parse_teams(&document)?;
    if teams.is_empty() {
        warn!(%style, "no team links parsed from rankings page");
    }
    debug!(count = teams.len(), "parsed team directory");
    Ok(teams)
}

pub(crate) fn parse_teams(document: &scraper::Html) -> Result<Vec<TeamRef>> {
    let link_selector = Selector::parse(r#"td a[href^="/team/"]"#)?;

    let teams: BTreeSet<TeamRef> = document
        .select(&link_selector)
        .filter_map(|link| link.value().attr("href"))
        .filter(|href| href.contains("/profile"))
        .filter_map(parse_team_href)
        .collect();

    Ok(teams.into_iter().collect())
}

/// Parse `/team/{id}/{slug}/profile` into a `TeamRef`.
fn parse_team_href(href: &str) -> Option<TeamRef> {
    let (id, slug, _) = href
        .strip_prefix("/team/")?
        .split('/')
        .collect_tuple::<(&str, &str, &str)>()?;
    let id = id.parse().ok()?;
    Some(TeamRef::new(id, slug))
}
