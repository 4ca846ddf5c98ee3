//! Site configuration for this page.

use novel_reader::SiteConfig;
use once_cell::sync::OnceCell;
use tracing::{info, warn};

use crate::dom;

/// Element carrying a JSON [`SiteConfig`] override.
const CONFIG_ELEMENT_ID: &str = "site-config";

static SITE_CONFIG: OnceCell<SiteConfig> = OnceCell::new();

/// The page's configuration, read on first use.
pub fn site() -> &'static SiteConfig {
    SITE_CONFIG.get_or_init(|| {
        let Some(raw) = dom::element_by_id(CONFIG_ELEMENT_ID).and_then(|el| el.text_content())
        else {
            return SiteConfig::default();
        };
        match SiteConfig::from_json(&raw) {
            Ok(config) => {
                info!("Using site configuration from #{}", CONFIG_ELEMENT_ID);
                config
            }
            Err(e) => {
                warn!(error = %e, "Ignoring invalid site configuration");
                SiteConfig::default()
            }
        }
    })
}
