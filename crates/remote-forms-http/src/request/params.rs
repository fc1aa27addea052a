use super::Request;
use hyper::Uri;
use percent_encoding::percent_decode_str;
use std::collections::HashMap;

impl Request {
	/// Parse and percent-decode query parameters from the URI
	pub(super) fn parse_query_params(uri: &Uri) -> HashMap<String, String> {
		uri.query()
			.map(|q| {
				q.split('&')
					.filter(|pair| !pair.is_empty())
					.filter_map(|pair| {
						// Split on first '=' only to preserve '=' in values
						let mut parts = pair.splitn(2, '=');
						let key = Self::decode_component(parts.next()?);
						let value = Self::decode_component(parts.next().unwrap_or(""));
						Some((key, value))
					})
					.collect()
			})
			.unwrap_or_default()
	}

	fn decode_component(raw: &str) -> String {
		let spaced = raw.replace('+', " ");
		percent_decode_str(&spaced).decode_utf8_lossy().to_string()
	}

	/// Get the request path
	///
	/// # Examples
	///
	/// ```
	/// use remote_forms_http::Request;
	///
	/// let request = Request::builder().uri("/api/users?active=1").build().unwrap();
	/// assert_eq!(request.path(), "/api/users");
	/// ```
	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// Get a single query parameter
	pub fn query_param(&self, key: &str) -> Option<&str> {
		self.query_params.get(key).map(String::as_str)
	}
}
