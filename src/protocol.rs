//! Protocol constants shared across the crate.

/// URI scheme for BitID challenges (without the trailing colon)
pub const SCHEME: &str = "bitid";

/// Query parameter key carrying the server-issued nonce
pub const PARAM_NONCE: &str = "x";

/// Query parameter key marking an unsecure (non-TLS) callback
pub const PARAM_UNSECURE: &str = "u";

/// Chart service endpoint used to render a challenge as a QR code.
/// The URL-escaped challenge URI is appended to this prefix.
pub const QRCODE_ENDPOINT: &str =
    "http://chart.apis.google.com/chart?cht=qr&chs=300x300&chl=";
