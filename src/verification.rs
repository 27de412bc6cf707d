//! Bitcoin signed-message verification.
//!
//! BitID proves address ownership with the legacy message-signing scheme:
//! the magic-prefixed message is double-SHA256 hashed, the public key is
//! recovered from the compact ECDSA signature, and the derived P2PKH address
//! is compared against the claimed one. All of that lives in the `bitcoin`
//! crate; this module maps its failure modes onto a local error taxonomy.

use base64::prelude::{Engine as _, BASE64_STANDARD};
use bitcoin::address::{Address, NetworkUnchecked};
use bitcoin::secp256k1::Secp256k1;
use bitcoin::sign_message::{signed_msg_hash, MessageSignature, MessageSignatureError};
use onlyerror::Error;

/// Errors that can occur during signature verification.
///
/// `BitidChallenge::signature_valid` collapses all of these to `false`;
/// they stay distinguishable here for callers that want to know.
#[derive(Debug, Error)]
pub enum Error {
    /// Signature is not valid base64
    SignatureBase64(#[from] base64::DecodeError),

    /// Signature bytes do not form a recoverable message signature
    MalformedSignature(#[source] MessageSignatureError),

    /// Claimed address could not be parsed
    InvalidAddress(#[from] bitcoin::address::ParseError),

    /// Public key recovery failed
    Recovery(#[source] MessageSignatureError),
}

/// Verify a base64 message signature against a claimed address.
///
/// Returns `Ok(true)` only when the signature was produced by the private
/// key of `address` over exactly `message`. A structurally valid signature
/// from the wrong key or over a different message yields `Ok(false)`.
pub fn verify_message(address: &str, signature: &str, message: &str) -> Result<bool, Error> {
    let address: Address<NetworkUnchecked> = address.parse()?;
    // Network is irrelevant here: verification only compares pubkey hashes.
    let address = address.assume_checked();

    let bytes = BASE64_STANDARD.decode(signature)?;
    let signature = MessageSignature::from_slice(&bytes).map_err(Error::MalformedSignature)?;

    let msg_hash = signed_msg_hash(message);
    let secp = Secp256k1::verification_only();

    signature
        .is_signed_by_address(&secp, &address, msg_hash)
        .map_err(Error::Recovery)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::hashes::Hash;
    use bitcoin::secp256k1::{Message, SecretKey};
    use bitcoin::{Network, PublicKey};

    const MESSAGE: &str = "bitid://localhost:3000/callback?x=fe32e61882a71074";

    // Deterministic key pair so signatures can be produced locally.
    fn test_signer() -> (SecretKey, Address) {
        let secp = Secp256k1::new();
        let secret_key = SecretKey::from_slice(&[0x11; 32]).unwrap();
        let public_key = PublicKey::new(secret_key.public_key(&secp));
        let address = Address::p2pkh(&public_key, Network::Bitcoin);
        (secret_key, address)
    }

    fn sign(secret_key: &SecretKey, message: &str) -> String {
        let secp = Secp256k1::new();
        let msg_hash = signed_msg_hash(message);
        let msg = Message::from_digest(msg_hash.to_byte_array());
        let signature = secp.sign_ecdsa_recoverable(&msg, secret_key);
        BASE64_STANDARD.encode(MessageSignature::new(signature, true).serialize())
    }

    #[test]
    fn test_sign_then_verify() {
        let (secret_key, address) = test_signer();
        let signature = sign(&secret_key, MESSAGE);

        assert!(verify_message(&address.to_string(), &signature, MESSAGE).unwrap());
    }

    #[test]
    fn test_wrong_message() {
        let (secret_key, address) = test_signer();
        let signature = sign(&secret_key, MESSAGE);

        let other = "bitid://localhost:3000/callback?x=0000000000000000";
        assert!(!verify_message(&address.to_string(), &signature, other).unwrap_or(false));
    }

    #[test]
    fn test_wrong_address() {
        let (secret_key, _) = test_signer();
        let signature = sign(&secret_key, MESSAGE);

        let other = "1HpE8571PFRwge5coHiFdSCLcwa7qetcn";
        assert!(!verify_message(other, &signature, MESSAGE).unwrap_or(false));
    }

    #[test]
    fn test_bit_flipped_signature() {
        let (secret_key, address) = test_signer();
        let signature = sign(&secret_key, MESSAGE);

        let mut bytes = BASE64_STANDARD.decode(&signature).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        let flipped = BASE64_STANDARD.encode(&bytes);

        assert!(!verify_message(&address.to_string(), &flipped, MESSAGE).unwrap_or(false));
    }

    #[test]
    fn test_garbage_signature() {
        let (_, address) = test_signer();
        let result = verify_message(&address.to_string(), "garbage", MESSAGE);

        assert!(matches!(result, Err(Error::SignatureBase64(_))));
    }

    #[test]
    fn test_truncated_signature() {
        let (_, address) = test_signer();
        // Valid base64, wrong length for a recoverable signature.
        let result = verify_message(&address.to_string(), "AAAA", MESSAGE);

        assert!(matches!(result, Err(Error::MalformedSignature(_))));
    }

    #[test]
    fn test_malformed_address() {
        let (secret_key, _) = test_signer();
        let signature = sign(&secret_key, MESSAGE);
        let result = verify_message("not-an-address", &signature, MESSAGE);

        assert!(matches!(result, Err(Error::InvalidAddress(_))));
    }
}
