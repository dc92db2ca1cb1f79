pub(crate) mod matches;
pub(crate) mod roster;
pub(crate) mod session;
pub(crate) mod teams;

pub(crate) use ::scraper::Html;
use ::scraper::{ElementRef, Selector};
use tracing::debug;

use crate::error::{Result, WrestleStatError};

pub(crate) const BASE_URL: &str = "https://www.wrestlestat.com";

/// Fetch a URL and parse the response body as an HTML document.
pub(crate) async fn get_document(client: &reqwest::Client, url: &str) -> Result<Html> {
    debug!(url, "fetching page");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| WrestleStatError::Http {
            url: url.to_owned(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(WrestleStatError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| WrestleStatError::ResponseBody {
            url: url.to_owned(),
            source: e,
        })?;

    Ok(Html::parse_document(&body))
}

/// Extract trimmed text content from the first element matching `selector`
/// inside `element`. Returns an empty string if nothing matches.
pub(crate) fn select_text(element: &ElementRef, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .and_then(|d| d.text().map(|t| t.trim()).find(|t| !t.is_empty()))
        .unwrap_or_default()
        .trim()
        .replace(['\n', '\t'], "")
        .to_string()
}

/// Extract trimmed text from an element, joining nested text nodes.
pub(crate) fn cell_text(el: &ElementRef) -> String {
    el.text()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip a leading `#<digits>` rank token. Text without one passes through.
pub(crate) fn strip_rank(text: &str) -> &str {
    let trimmed = text.trim();
    if let Some(rest) = trimmed.strip_prefix('#') {
        let after_digits = rest.trim_start_matches(|c: char| c.is_ascii_digit());
        if after_digits.len() < rest.len() {
            return after_digits.trim_start();
        }
    }
    trimmed
}

/// Normalize a scraped wrestler name: drop any leading rank token and turn
/// "Last, First" into "First Last". Names without a comma pass through.
pub(crate) fn normalize_name(raw: &str) -> String {
    let name = strip_rank(raw);
    match name.split_once(',') {
        Some((last, first)) => format!("{} {}", first.trim(), last.trim()),
        None => name.to_string(),
    }
}

/// Clean a school cell: drop parenthetical annotations and rank tokens.
pub(crate) fn clean_school(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '(' => {
                for inner in chars.by_ref() {
                    if inner == ')' {
                        break;
                    }
                }
            }
            '#' => {
                let mut had_digit = false;
                while matches!(chars.peek(), Some(d) if d.is_ascii_digit()) {
                    chars.next();
                    had_digit = true;
                }
                if had_digit {
                    while matches!(chars.peek(), Some(w) if w.is_whitespace()) {
                        chars.next();
                    }
                } else {
                    out.push('#');
                }
            }
            _ => out.push(c),
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_ranked() {
        assert_eq!(normalize_name("#3 Starocci, Carter"), "Carter Starocci");
        assert_eq!(normalize_name("#13 Camacho, Jakob"), "Jakob Camacho");
    }

    #[test]
    fn test_normalize_name_unranked() {
        assert_eq!(normalize_name("Brooks, Aaron"), "Aaron Brooks");
    }

    #[test]
    fn test_normalize_name_without_comma_passes_through() {
        assert_eq!(normalize_name("Aaron Brooks"), "Aaron Brooks");
        assert_eq!(normalize_name("#5 Forfeit"), "Forfeit");
    }

    #[test]
    fn test_strip_rank_requires_digits() {
        assert_eq!(strip_rank("#HC Smith, John"), "#HC Smith, John");
        assert_eq!(strip_rank("#12Smith, John"), "Smith, John");
    }

    #[test]
    fn test_clean_school() {
        assert_eq!(clean_school("#5 Penn State (PA)"), "Penn State");
        assert_eq!(clean_school("Iowa"), "Iowa");
        assert_eq!(clean_school("Virginia Tech (redshirt)"), "Virginia Tech");
    }
}
