//! Process-wide configuration.
//!
//! All site-level defaults (notification number, country code, pricing
//! constants) live here and are loaded once at startup from an optional
//! YAML file plus `GS__`-prefixed environment variables. There is no
//! configuration row in the database.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Site-wide defaults consumed by the intake and notification flows.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Public site name, used in log lines only.
    pub name: String,
    /// Fallback WhatsApp number when neither service nor category carry one.
    #[serde(default)]
    pub default_whatsapp: Option<String>,
    /// Country code prepended while normalizing phone numbers.
    pub default_country_code: String,
    /// Base charge applied to every quotation.
    pub booking_charge: f64,
    /// Surcharge applied when the job is inside the congestion zone.
    pub cc_zone_charge: f64,
    /// VAT rate applied to the quotation subtotal.
    pub vat_rate: f64,
    /// Directory where request attachments are stored.
    pub media_root: String,
}

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database_url: String,
    pub site: SiteConfig,
}

impl AppConfig {
    /// Load configuration from `config.yaml` (optional) and the environment.
    ///
    /// Environment variables use the `GS` prefix with `__` separators, e.g.
    /// `GS__SITE__DEFAULT_WHATSAPP=+447700900123`.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("database_url", "golden_services.db")?
            .set_default("site.name", "Golden Section")?
            .set_default("site.default_country_code", "971")?
            .set_default("site.booking_charge", 42.0)?
            .set_default("site.cc_zone_charge", 15.0)?
            .set_default("site.vat_rate", 0.2)?
            .set_default("site.media_root", "media")?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("GS").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete() {
        let config = AppConfig::load().expect("defaults should satisfy the schema");
        assert_eq!(config.site.default_country_code, "971");
        assert_eq!(config.site.vat_rate, 0.2);
        assert_eq!(config.server.port, 8080);
    }
}
