//! The BitID challenge value object.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::protocol::{QRCODE_ENDPOINT, SCHEME};
use crate::{uri, verification};

/// Parameters for constructing a [`BitidChallenge`].
///
/// Matches the wire shape of a BitID exchange: a server issuing a fresh
/// challenge fills in `nonce` and `callback`; a server validating a wallet's
/// response fills in `uri`, `signature`, and `address` from the POST body.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChallengeParams {
    /// Server-issued nonce. Uniqueness and freshness are the caller's
    /// responsibility.
    #[serde(default)]
    pub nonce: Option<String>,

    /// URL the signed response must be delivered to.
    #[serde(default)]
    pub callback: String,

    /// An existing challenge URI. When absent, one is built from the
    /// callback and nonce.
    #[serde(default)]
    pub uri: Option<String>,

    /// Base64 signature over the challenge URI string.
    #[serde(default)]
    pub signature: Option<String>,

    /// Bitcoin address claimed to have produced the signature.
    #[serde(default)]
    pub address: Option<String>,

    /// When set, the built URI carries the `u=1` marker telling the wallet
    /// the callback does not require an encrypted transport.
    #[serde(default)]
    pub unsecure: bool,
}

/// A BitID authentication challenge.
///
/// Immutable once constructed. Construction never fails: malformed callback
/// or URI strings are stored as absent and surface through
/// [`uri_valid`](Self::uri_valid) returning `false`, matching the protocol's
/// contract that validation is a separate step from construction.
///
/// ```rust
/// use bitid::{BitidChallenge, ChallengeParams};
///
/// let challenge = BitidChallenge::new(ChallengeParams {
///     nonce: Some("fe32e61882a71074".to_string()),
///     callback: "http://localhost:3000/callback".to_string(),
///     ..Default::default()
/// });
///
/// assert_eq!(
///     challenge.uri(),
///     Some("bitid://localhost:3000/callback?x=fe32e61882a71074"),
/// );
/// assert!(challenge.uri_valid());
/// ```
#[derive(Clone, Debug)]
pub struct BitidChallenge {
    callback: Option<Url>,
    uri: Option<Url>,
    signature: Option<String>,
    address: Option<String>,
}

impl BitidChallenge {
    /// Construct a challenge from caller-supplied parameters.
    ///
    /// If `params.uri` is supplied it is parsed and stored as-is, without
    /// validation or merging. Otherwise a URI is built from the callback's
    /// host and path, the nonce, and the unsecure flag; any query parameters
    /// on the callback itself are discarded from the built URI.
    pub fn new(params: ChallengeParams) -> Self {
        let callback = Url::parse(&params.callback).ok();

        let uri = match params.uri {
            Some(uri) => Url::parse(&uri).ok(),
            None => match (&callback, &params.nonce) {
                (Some(callback), Some(nonce)) => {
                    uri::build_uri(callback, nonce, params.unsecure).ok()
                }
                _ => None,
            },
        };

        Self {
            callback,
            uri,
            signature: params.signature,
            address: params.address,
        }
    }

    /// Canonical string form of the challenge URI, or `None` when neither a
    /// URI could be built nor a parseable one was supplied.
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_ref().map(Url::as_str)
    }

    /// Nonce extracted from the stored URI's `x` query parameter.
    ///
    /// This reads the URI, not the constructor input, so a challenge built
    /// from a supplied `uri` string reports that URI's nonce.
    pub fn nonce(&self) -> Option<String> {
        self.uri.as_ref().and_then(uri::nonce_param)
    }

    /// Chart-service URL rendering the challenge URI as a 300x300 QR code.
    pub fn qrcode(&self) -> Option<String> {
        self.uri()
            .map(|uri| format!("{QRCODE_ENDPOINT}{}", urlencoding::encode(uri)))
    }

    /// Check the structural validity of the challenge URI.
    ///
    /// True iff the URI exists, its scheme is `bitid`, its host and path
    /// equal the callback's, and it carries a non-empty nonce. Never panics.
    pub fn uri_valid(&self) -> bool {
        let (uri, callback) = match (&self.uri, &self.callback) {
            (Some(uri), Some(callback)) => (uri, callback),
            _ => return false,
        };

        uri.scheme() == SCHEME
            && uri.host_str() == callback.host_str()
            && uri.path() == callback.path()
            && self.nonce().is_some_and(|nonce| !nonce.is_empty())
    }

    /// Check that the stored signature was produced by the private key of
    /// the claimed address over the canonical URI string.
    ///
    /// Missing fields, malformed base64, a bad address, and a genuine
    /// signature mismatch all come back as `false`; callers needing the
    /// distinction can use [`verification::verify_message`] directly.
    pub fn signature_valid(&self) -> bool {
        let (uri, signature, address) = match (self.uri(), &self.signature, &self.address) {
            (Some(uri), Some(signature), Some(address)) => (uri, signature, address),
            _ => return false,
        };

        verification::verify_message(address, signature, uri).unwrap_or(false)
    }
}
