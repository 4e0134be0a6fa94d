//! API Configuration
//!
//! A CSR bundle has no runtime environment, so overrides are read at build time.

pub const DEFAULT_BASE_URL: &str = "https://mate.academy/students-api";
pub const DEFAULT_USER_ID: u32 = 471;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Origin of the todo collection, without trailing slash
    pub base_url: String,
    /// Every list request is scoped to this user
    pub user_id: u32,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, user_id: u32) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, user_id }
    }

    /// Build from `TODOS_API_URL` / `TODOS_USER_ID` captured at compile time
    pub fn from_build_env() -> Self {
        Self::from_overrides(option_env!("TODOS_API_URL"), option_env!("TODOS_USER_ID"))
    }

    fn from_overrides(base_url: Option<&str>, user_id: Option<&str>) -> Self {
        let base_url = base_url.filter(|u| !u.trim().is_empty()).unwrap_or(DEFAULT_BASE_URL);
        let user_id = match user_id.map(str::trim) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("ignoring invalid TODOS_USER_ID {:?}", raw);
                DEFAULT_USER_ID
            }),
            None => DEFAULT_USER_ID,
        };
        Self::new(base_url, user_id)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_USER_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_overrides(None, None);
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.user_id, 471);
    }

    #[test]
    fn test_overrides_trim_trailing_slash() {
        let config = ApiConfig::from_overrides(Some("http://localhost:3000/"), Some("12"));
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.user_id, 12);
    }

    #[test]
    fn test_invalid_user_id_falls_back() {
        let config = ApiConfig::from_overrides(Some(""), Some("abc"));
        assert_eq!(config, ApiConfig::default());
    }
}
