//! Redirect URL construction for authorization responses.

use url::Url;

/// Overlay `params` onto the query of `redirect_uri` and return the resulting URL.
///
/// Existing parameters are kept in order; any existing parameter whose key appears in
/// `params` is dropped in favor of the new value. The fragment, if any, is untouched.
pub fn build_redirect_url(
    redirect_uri: &str,
    params: &[(&str, &str)],
) -> Result<String, url::ParseError> {
    let mut url = Url::parse(redirect_uri)?;

    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !params.iter().any(|(new_key, _)| key == new_key))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    pairs.extend(
        params
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string())),
    );

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    Ok(url.to_string())
}
