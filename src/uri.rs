//! BitID challenge URI construction and inspection.
//!
//! A challenge URI carries the callback's authority and path under the
//! `bitid:` scheme, with the nonce in the `x` query parameter:
//!
//! ```text
//! bitid://localhost:3000/callback?x=fe32e61882a71074
//! bitid://localhost:3000/callback?x=fe32e61882a71074&u=1
//! ```

use onlyerror::Error;
use url::Url;

use crate::protocol::{PARAM_NONCE, PARAM_UNSECURE, SCHEME};

/// Errors that can occur while building a challenge URI
#[derive(Debug, Error)]
pub enum Error {
    /// Callback URL has no host to copy into the challenge URI
    MissingHost,

    /// Failed to parse the assembled challenge URI
    Parse(#[from] url::ParseError),
}

/// Build a challenge URI from a callback URL.
///
/// The callback's host, port, and path are copied under the `bitid` scheme.
/// The query is written fresh: the nonce under `x` and, when `unsecure` is
/// set, the marker `u=1`. Query parameters carried by the callback itself do
/// not survive into the challenge URI.
pub fn build_uri(callback: &Url, nonce: &str, unsecure: bool) -> Result<Url, Error> {
    let host = callback.host_str().ok_or(Error::MissingHost)?;
    let authority = match callback.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };

    let mut uri = Url::parse(&format!("{SCHEME}://{authority}{}", callback.path()))?;
    {
        let mut query = uri.query_pairs_mut();
        query.append_pair(PARAM_NONCE, nonce);
        if unsecure {
            query.append_pair(PARAM_UNSECURE, "1");
        }
    }

    Ok(uri)
}

/// Extract the decoded nonce (`x`) query parameter, if present.
pub fn nonce_param(uri: &Url) -> Option<String> {
    uri.query_pairs()
        .find(|(key, _)| key == PARAM_NONCE)
        .map(|(_, value)| value.into_owned())
}
