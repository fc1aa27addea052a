//! Cache keys for choice listings

use sha2::{Digest, Sha256};

/// Hex SHA-256 over filter items, independent of their order
///
/// Items are sorted by key (then value) and each part is fed to the hasher
/// with its length in front, so the digest is stable across processes and
/// `("a", "b=c")` never collides with `("a=b", "c")`.
///
/// # Examples
///
/// ```
/// use remote_forms_cache::filter_signature;
///
/// let a = filter_signature(&[("state".into(), "BA".into()), ("kind".into(), "city".into())]);
/// let b = filter_signature(&[("kind".into(), "city".into()), ("state".into(), "BA".into())]);
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 64);
/// ```
pub fn filter_signature(items: &[(String, String)]) -> String {
	let mut sorted: Vec<&(String, String)> = items.iter().collect();
	sorted.sort();

	let mut hasher = Sha256::new();
	for (key, value) in sorted {
		for part in [key, value] {
			hasher.update((part.len() as u64).to_le_bytes());
			hasher.update(part.as_bytes());
		}
	}
	hex::encode(hasher.finalize())
}

/// `"{model}_choices_{signature}"`
pub fn choices_cache_key(model: &str, items: &[(String, String)]) -> String {
	format!("{}_choices_{}", model, filter_signature(items))
}
