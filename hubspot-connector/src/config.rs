//! HubSpot service configuration: endpoint constants and the access token
//! from the environment.

use anyhow::{Context, Result};

pub const BASE_URL: &str = "https://api.hubapi.com/";

/// CRM API version; all object endpoints live under `crm/v3/`.
pub const API_VERSION: &str = "3";

/// Standard objects every HubSpot portal has.
pub const STANDARD_CRM_OBJECTS: [&str; 4] = ["contacts", "companies", "deals", "tickets"];

pub const REQUEST_TIMEOUT_SECS: u64 = 30;

pub const ACCESS_TOKEN_ENV: &str = "HUBSPOT_ACCESS_TOKEN";

/// Reads the private-app access token from the environment.
pub fn access_token_from_env() -> Result<String> {
    std::env::var(ACCESS_TOKEN_ENV)
        .context("HUBSPOT_ACCESS_TOKEN environment variable not set")
}

/// REST URL of a single CRM object.
pub fn object_url(base_url: &str, object_type: &str, record_id: &str) -> String {
    format!(
        "{}crm/v{}/objects/{}/{}",
        base_url, API_VERSION, object_type, record_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_access_token_missing() {
        std::env::remove_var(ACCESS_TOKEN_ENV);

        let result = access_token_from_env();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("HUBSPOT_ACCESS_TOKEN"));
    }

    #[test]
    #[serial]
    fn test_access_token_present() {
        std::env::set_var(ACCESS_TOKEN_ENV, "pat-na1-test");

        assert_eq!(access_token_from_env().unwrap(), "pat-na1-test");

        std::env::remove_var(ACCESS_TOKEN_ENV);
    }

    #[test]
    fn test_object_url() {
        assert_eq!(
            object_url(BASE_URL, "companies", "512"),
            "https://api.hubapi.com/crm/v3/objects/companies/512"
        );
    }
}
