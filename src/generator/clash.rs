use log::{debug, error};

use crate::constants::{DNS_CONFIG, PROXY_GROUPS, RULES, RULE_PROVIDERS};
use crate::error::ConvertError;
use crate::models::ClashConfig;

/// Extend a configuration with the fixed DNS policy, rule providers, proxy
/// groups and rules, overwriting whatever those fields held before.
///
/// The configuration must have at least one proxy or one proxy provider;
/// otherwise it is left untouched and [`ConvertError::NoProxies`] is
/// returned. Every other field passes through unmodified. Applying this
/// twice gives the same result as applying it once.
pub fn extend_common_config(config: &mut ClashConfig) -> Result<(), ConvertError> {
    if !config.has_proxy_source() {
        error!("No proxies or proxy providers in configuration");
        return Err(ConvertError::NoProxies);
    }

    debug!(
        "Extending configuration with {} proxies and {} proxy providers",
        config.proxy_count(),
        config.proxy_provider_count()
    );

    config.dns = Some(DNS_CONFIG.clone());
    config.proxy_groups = Some(PROXY_GROUPS.clone());
    config.rule_providers = Some(RULE_PROVIDERS.clone());
    config.rules = Some(RULES.clone());

    Ok(())
}
