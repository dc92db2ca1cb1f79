use ::scraper::{ElementRef, Selector};
use tracing::{debug, instrument, warn};

use crate::error::{Result, WrestleStatError};
use crate::model::{RosterEntry, TeamRef};
use crate::scraper::{self, cell_text, normalize_name, BASE_URL};

/// Fetch the roster a team fielded in a given season.
///
/// Rows without a profile link (placeholder or summary rows) are skipped
/// silently; rows whose link cannot be parsed are logged and excluded.
/// A partial roster is an accepted outcome, never a fatal one.
#[instrument(skip(client), fields(team = %team.slug))]
pub(crate) async fn get_team_roster(
    client: &reqwest::Client,
    team: &TeamRef,
    season: u16,
) -> Result<Vec<RosterEntry>> {
    let url = format!(
        "{BASE_URL}/season/{season}/team/{}/{}/profile",
        team.id, team.slug
    );
    let document = scraper::get_document(client, &url).await?;
    let roster = parse_roster(&document)?;
    debug!(count = roster.len(), season, "parsed roster");
    Ok(roster)
}

pub(crate) fn parse_roster(document: &scraper::Html) -> Result<Vec<RosterEntry>> {
    let table_selector =
        Selector::parse("div#roster table.table.table-sm.table-hover.table-striped")?;
    let row_selector = Selector::parse("tbody tr")?;
    let cell_selector = Selector::parse("td")?;
    let link_selector = Selector::parse("a[href]")?;

    let Some(table) = document.select(&table_selector).next() else {
        warn!("roster table not found");
        return Ok(Vec::new());
    };

    let mut roster = Vec::new();
    // The first tbody row is a header.
    for row in table.select(&row_selector).skip(1) {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        if cells.is_empty() {
            continue;
        }
        let Some(link) = cells.get(1).and_then(|c| c.select(&link_selector).next()) else {
            continue;
        };
        match parse_roster_link(&link) {
            Ok(entry) => roster.push(entry),
            Err(e) => warn!(error = %e, "skipping unparsable roster row"),
        }
    }

    Ok(roster)
}

/// Parse a roster profile link into a `RosterEntry`.
///
/// Current-season links look like `/wrestler/{id}/{slug}/…`; past-season
/// links are prefixed with `/season/{year}`.
fn parse_roster_link(link: &ElementRef) -> Result<RosterEntry> {
    let href = link
        .value()
        .attr("href")
        .ok_or(WrestleStatError::ElementNotFound {
            context: "roster profile href",
        })?;

    let segments: Vec<&str> = href.trim_matches('/').split('/').collect();
    let (id, slug) = if segments.contains(&"season") {
        (segments.get(3), segments.get(4))
    } else {
        (segments.get(1), segments.get(2))
    };

    let (Some(id), Some(slug)) = (id, slug) else {
        return Err(WrestleStatError::ElementNotFound {
            context: "roster profile path segments",
        });
    };

    Ok(RosterEntry {
        id: id.parse()?,
        name: normalize_name(&cell_text(link)),
        slug: (*slug).to_string(),
    })
}
