use std::collections::HashSet;

use ::scraper::{CaseSensitivity, ElementRef, Selector};
use tracing::{debug, instrument, warn};

use crate::error::{Result, WrestleStatError};
use crate::model::{MatchRecord, RosterEntry};
use crate::scraper::{self, cell_text, clean_school, normalize_name, select_text, BASE_URL};

/// Number of `td` cells in a well-formed match row. Rows with any other
/// count are separators or unrelated tables and are skipped outright.
const MATCH_COLUMNS: usize = 9;

/// Fetch and parse a wrestler's full match history, filtered to `season`
/// when one is given.
#[instrument(skip(client), fields(wrestler = %wrestler.slug))]
pub(crate) async fn get_wrestler_matches(
    client: &reqwest::Client,
    wrestler: &RosterEntry,
    season: Option<u16>,
) -> Result<Vec<MatchRecord>> {
    let url = format!(
        "{BASE_URL}/wrestler/{}/{}/profile",
        wrestler.id, wrestler.slug
    );
    let document = scraper::get_document(client, &url).await?;
    let matches = parse_match_history(&document, wrestler, season)?;
    debug!(count = matches.len(), "parsed match history");
    Ok(matches)
}

/// Parse every season block on a wrestler profile page.
///
/// Each block is headed by an `h2` whose leading token is the season year,
/// with the match table in the next sibling row container. Rows are parsed
/// before the season filter is applied; the filter discards mismatches
/// rather than coercing them.
pub(crate) fn parse_match_history(
    document: &scraper::Html,
    wrestler: &RosterEntry,
    season: Option<u16>,
) -> Result<Vec<MatchRecord>> {
    let block_selector = Selector::parse("div.row.mt-1")?;
    let heading_selector = Selector::parse("h2")?;
    let table_selector = Selector::parse("table.table")?;
    let row_selector = Selector::parse("tr")?;
    let cell_selector = Selector::parse("td")?;
    let link_selector = Selector::parse("a[href]")?;

    let mut matches = Vec::new();

    for block in document.select(&block_selector) {
        let heading_text = select_text(&block, &heading_selector);
        let Some(block_season) = heading_text.split(' ').next().filter(|s| !s.is_empty()) else {
            continue;
        };

        let Some(table) = block
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|el| {
                el.value()
                    .has_class("row", CaseSensitivity::CaseSensitive)
            })
            .and_then(|row_div| row_div.select(&table_selector).next())
        else {
            continue;
        };

        for row in table.select(&row_selector) {
            let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
            if cells.len() != MATCH_COLUMNS {
                continue;
            }
            let Some(opponent_link) = cells[1].select(&link_selector).next() else {
                continue;
            };
            match parse_match_row(&cells, &opponent_link, block_season, wrestler) {
                Ok(record) => matches.push(record),
                Err(e) => warn!(
                    wrestler_id = wrestler.id,
                    error = %e,
                    "skipping unparsable match row"
                ),
            }
        }
    }

    if let Some(year) = season {
        let wanted = year.to_string();
        matches.retain(|m| m.season == wanted);
    }

    let matches = dedup_matches(matches);
    let matches = drop_incomplete(matches);
    Ok(matches)
}

fn parse_match_row(
    cells: &[ElementRef],
    opponent_link: &ElementRef,
    season: &str,
    wrestler: &RosterEntry,
) -> Result<MatchRecord> {
    let href = opponent_link
        .value()
        .attr("href")
        .ok_or(WrestleStatError::ElementNotFound {
            context: "opponent profile href",
        })?;
    let opponent_id = href
        .trim_matches('/')
        .split('/')
        .nth(1)
        .ok_or(WrestleStatError::ElementNotFound {
            context: "opponent profile path segments",
        })?
        .parse()?;

    let record_selector = Selector::parse("small")?;
    let opponent_record = cells[1]
        .select(&record_selector)
        .next()
        .map(|small| {
            cell_text(&small)
                .trim_matches(|c: char| c == ' ' || c == '(' || c == ')')
                .to_string()
        })
        .unwrap_or_else(|| "Unlisted".to_string());

    Ok(MatchRecord {
        season: season.to_string(),
        date: cell_text(&cells[3]),
        event: cell_text(&cells[4]),
        weight_class: cell_text(&cells[5]),
        result: cell_text(&cells[6]),
        result_type: cell_text(&cells[7]),
        score: cell_text(&cells[8]),
        opponent: normalize_name(&cell_text(opponent_link)),
        opponent_id,
        opponent_record,
        opponent_school: clean_school(&cell_text(&cells[2])),
        wrestler: wrestler.name.clone(),
        wrestler_id: wrestler.id,
        wrestler_school: None,
    })
}

/// Collapse exact-duplicate records, preserving first occurrence order.
pub(crate) fn dedup_matches(records: Vec<MatchRecord>) -> Vec<MatchRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.clone()))
        .collect()
}

/// Drop records with an empty string in any field.
pub(crate) fn drop_incomplete(records: Vec<MatchRecord>) -> Vec<MatchRecord> {
    records
        .into_iter()
        .filter(MatchRecord::is_complete)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::scraper::Html;

    fn starocci() -> RosterEntry {
        RosterEntry {
            id: 131567,
            name: "Carter Starocci".to_string(),
            slug: "starocci-carter".to_string(),
        }
    }

    fn match_row(opponent: &str, school: &str, score: &str) -> String {
        format!(
            r##"<tr>
                <td>1</td>
                <td><a href="/wrestler/102183/kharchla-carson/profile">{opponent}</a> <small>(10-2)</small></td>
                <td>{school}</td>
                <td>01/20/2024</td>
                <td>Dual Meet</td>
                <td>174</td>
                <td>W</td>
                <td>Dec</td>
                <td>{score}</td>
            </tr>"##
        )
    }

    fn profile_page(blocks: &[(u16, &str)]) -> String {
        let blocks: String = blocks
            .iter()
            .map(|(year, rows)| {
                format!(
                    r##"<div class="row mt-1"><div class="col"><h2>{year} Season</h2></div></div>
                        <div class="row"><table class="table"><tbody>
                            <tr><th>W</th><th>Opponent</th><th>School</th><th>Date</th><th>Event</th><th>Wt</th><th>Res</th><th>Type</th><th>Score</th></tr>
                            {rows}
                        </tbody></table></div>"##
                )
            })
            .collect();
        format!("<html><body><div class=\"container\">{blocks}</div></body></html>")
    }

    #[test]
    fn test_parse_match_history_single_block() {
        let row = match_row("#2 Kharchla, Carson", "#3 Ohio State (OH)", "7-2");
        let html = profile_page(&[(2024, &row)]);
        let document = Html::parse_document(&html);

        let matches = parse_match_history(&document, &starocci(), Some(2024)).unwrap();

        assert_eq!(matches.len(), 1);
        let record = &matches[0];
        assert_eq!(record.season, "2024");
        assert_eq!(record.date, "01/20/2024");
        assert_eq!(record.event, "Dual Meet");
        assert_eq!(record.weight_class, "174");
        assert_eq!(record.result, "W");
        assert_eq!(record.result_type, "Dec");
        assert_eq!(record.score, "7-2");
        assert_eq!(record.opponent, "Carson Kharchla");
        assert_eq!(record.opponent_id, 102183);
        assert_eq!(record.opponent_record, "10-2");
        assert_eq!(record.opponent_school, "Ohio State");
        assert_eq!(record.wrestler, "Carter Starocci");
        assert_eq!(record.wrestler_id, 131567);
        assert_eq!(record.wrestler_school, None);
    }

    #[test]
    fn test_season_filter_excludes_other_blocks() {
        let row_2024 = match_row("Kharchla, Carson", "Ohio State", "7-2");
        let row_2023 = match_row("Lewis, Mekhi", "Virginia Tech", "4-3");
        let html = profile_page(&[(2024, &row_2024), (2023, &row_2023)]);
        let document = Html::parse_document(&html);

        let matches = parse_match_history(&document, &starocci(), Some(2023)).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].season, "2023");
        assert_eq!(matches[0].opponent, "Mekhi Lewis");

        let matches = parse_match_history(&document, &starocci(), None).unwrap();
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_requesting_absent_season_yields_nothing() {
        let row = match_row("Kharchla, Carson", "Ohio State", "7-2");
        let html = profile_page(&[(2024, &row)]);
        let document = Html::parse_document(&html);

        let matches = parse_match_history(&document, &starocci(), Some(2019)).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let rows = format!(
            r##"{}
            <tr><td colspan="9">Postseason</td></tr>
            <tr>
                <td>2</td><td>Forfeit</td><td></td><td>02/01/2024</td>
                <td>Dual Meet</td><td>174</td><td>W</td><td>FFT</td><td>-</td>
            </tr>"##,
            match_row("Kharchla, Carson", "Ohio State", "7-2")
        );
        let html = profile_page(&[(2024, &rows)]);
        let document = Html::parse_document(&html);

        // The separator row has the wrong column count and the forfeit row
        // has no opponent link; only the real bout survives.
        let matches = parse_match_history(&document, &starocci(), Some(2024)).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].opponent, "Carson Kharchla");
    }

    #[test]
    fn test_duplicates_collapse_and_empty_fields_drop() {
        let rows = format!(
            "{}{}{}",
            match_row("Kharchla, Carson", "Ohio State", "7-2"),
            match_row("Kharchla, Carson", "Ohio State", "7-2"),
            match_row("Lewis, Mekhi", "Virginia Tech", ""),
        );
        let html = profile_page(&[(2024, &rows)]);
        let document = Html::parse_document(&html);

        let matches = parse_match_history(&document, &starocci(), Some(2024)).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].opponent, "Carson Kharchla");
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let row = match_row("Kharchla, Carson", "Ohio State", "7-2");
        let html = profile_page(&[(2024, &row)]);
        let document = Html::parse_document(&html);
        let matches = parse_match_history(&document, &starocci(), None).unwrap();

        let once = dedup_matches(matches.clone());
        let twice = dedup_matches(once.clone());
        assert_eq!(once, twice);
    }
}
