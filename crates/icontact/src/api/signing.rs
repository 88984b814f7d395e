//! Request signatures.
//!
//! A signature is the lowercase hex MD5 of the shared secret, the call path
//! and every parameter as `name` + `value`, sorted by name, with no
//! delimiters. A PUT body takes part under the name `api_put`; `api_sig`
//! itself never does.

use std::collections::BTreeMap;

use md5::{Digest, Md5};

/// Parameter carrying the signature.
pub(crate) const SIGNATURE_PARAM: &str = "api_sig";

/// Name under which a PUT body is signed.
pub(crate) const BODY_PARAM: &str = "api_put";

/// Compute `api_sig` for a call.
pub(crate) fn sign(
    shared_secret: &str,
    call_path: &str,
    params: &BTreeMap<String, String>,
) -> String {
    let mut hasher = Md5::new();
    hasher.update(shared_secret.as_bytes());
    hasher.update(call_path.as_bytes());
    for (name, value) in params.iter().filter(|(name, _)| *name != SIGNATURE_PARAM) {
        hasher.update(name.as_bytes());
        hasher.update(value.as_bytes());
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn md5_hex(s: &str) -> String {
        hex::encode(Md5::digest(s.as_bytes()))
    }

    #[test]
    fn signs_secret_path_and_sorted_params() {
        let sig = sign(
            "SECRET",
            "contacts",
            &params(&[("email", "*@x.com"), ("api_key", "KEY"), ("api_seq", "1")]),
        );
        assert_eq!(
            sig,
            md5_hex("SECRETcontactsapi_keyKEYapi_seq1email*@x.com")
        );
    }

    #[test]
    fn existing_signature_is_ignored() {
        let without = sign("s", "lists", &params(&[("api_key", "k")]));
        let with = sign("s", "lists", &params(&[("api_key", "k"), ("api_sig", "stale")]));
        assert_eq!(without, with);
    }

    #[test]
    fn body_changes_signature() {
        let a = sign("s", "contact", &params(&[("api_put", "{\"contact\":{}}")]));
        let b = sign("s", "contact", &params(&[("api_put", "{\"contact\":{\"email\":\"x\"}}")]));
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
    }
}
