use url::Url;

use crate::Error;

pub const DEFAULT_BUCKET: &str = "medical-images";

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`
    pub url: Url,
    pub anon_key: String,
    pub bucket: String,
    pub request_timeout_secs: u64,
}

impl SupabaseConfig {
    pub fn new(url: &str, anon_key: impl Into<String>) -> Result<Self, Error> {
        Ok(Self {
            url: Url::parse(url.trim_end_matches('/'))?,
            anon_key: anon_key.into(),
            bucket: DEFAULT_BUCKET.to_string(),
            request_timeout_secs: 30,
        })
    }

    /// `Some` only when both URL and key are present and non-blank.
    pub fn from_parts(url: Option<&str>, anon_key: Option<&str>) -> Result<Option<Self>, Error> {
        match (
            url.map(str::trim).filter(|s| !s.is_empty()),
            anon_key.map(str::trim).filter(|s| !s.is_empty()),
        ) {
            (Some(url), Some(key)) => Ok(Some(Self::new(url, key)?)),
            _ => Ok(None),
        }
    }

    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    /// Base URL without a trailing slash.
    pub fn base(&self) -> String {
        self.url.as_str().trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_parts_are_required() {
        assert!(SupabaseConfig::from_parts(None, Some("k")).unwrap().is_none());
        assert!(SupabaseConfig::from_parts(Some("https://x.supabase.co"), Some(" ")).unwrap().is_none());
        let cfg = SupabaseConfig::from_parts(Some("https://x.supabase.co/"), Some("k"))
            .unwrap()
            .unwrap();
        assert_eq!(cfg.base(), "https://x.supabase.co");
        assert_eq!(cfg.bucket, DEFAULT_BUCKET);
    }

    #[test]
    fn rejects_garbage_url() {
        assert!(SupabaseConfig::from_parts(Some("not a url"), Some("k")).is_err());
    }
}
