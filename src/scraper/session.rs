use ::scraper::Selector;
use tracing::{debug, instrument};

use crate::config::Credentials;
use crate::error::{Result, WrestleStatError};
use crate::scraper::{self, BASE_URL};

/// Log in to WrestleStat and leave the session cookie in the client's jar.
///
/// Unauthenticated sessions only see public match histories, so the whole
/// crawl depends on this succeeding. A landing page other than the site root
/// means the credentials were rejected; that is fatal and never retried.
#[instrument(skip(client, credentials))]
pub(crate) async fn login(client: &reqwest::Client, credentials: &Credentials) -> Result<()> {
    let url = format!("{BASE_URL}/account/login");

    // The login form carries a hidden antiforgery token that must be echoed
    // back with the credentials.
    let token = {
        let document = scraper::get_document(client, &url).await?;
        let token_selector = Selector::parse(r#"input[name="__RequestVerificationToken"]"#)?;
        document
            .select(&token_selector)
            .next()
            .and_then(|input| input.value().attr("value"))
            .map(str::to_owned)
    };

    let mut form = vec![
        ("Username", credentials.email.as_str()),
        ("Password", credentials.password.as_str()),
    ];
    if let Some(token) = token.as_deref() {
        form.push(("__RequestVerificationToken", token));
    }

    let response = client
        .post(&url)
        .form(&form)
        .send()
        .await
        .map_err(|e| WrestleStatError::Http {
            url: url.clone(),
            source: e,
        })?;

    let landed = response.url().clone();
    if landed.as_str().trim_end_matches('/') != BASE_URL {
        return Err(WrestleStatError::Authentication {
            location: landed.to_string(),
        });
    }

    debug!("authenticated session established");
    Ok(())
}
