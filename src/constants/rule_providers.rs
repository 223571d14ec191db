use linked_hash_map::LinkedHashMap;
use once_cell::sync::Lazy;
use serde_yaml::Mapping;

use crate::models::{RuleBehavior, RuleFormat, RuleProvider, RuleProviderType};

const LOYALSOLDIER_BASE: &str = "https://fastly.jsdelivr.net/gh/Loyalsoldier/clash-rules@release";
const OPENAI_URL: &str =
    "https://fastly.jsdelivr.net/gh/blackmatrix7/ios_rule_script@master/rule/Clash/OpenAI/OpenAI.yaml";

/// Refresh interval of every provider, in seconds.
pub const RULE_PROVIDER_INTERVAL: u32 = 86_400;

const LOYALSOLDIER_SETS: &[(&str, RuleBehavior)] = &[
    ("reject", RuleBehavior::Domain),
    ("icloud", RuleBehavior::Domain),
    ("apple", RuleBehavior::Domain),
    ("google", RuleBehavior::Domain),
    ("proxy", RuleBehavior::Domain),
    ("direct", RuleBehavior::Domain),
    ("private", RuleBehavior::Domain),
    ("gfw", RuleBehavior::Domain),
    ("tld-not-cn", RuleBehavior::Domain),
    ("telegramcidr", RuleBehavior::Ipcidr),
    ("cncidr", RuleBehavior::Ipcidr),
    ("lancidr", RuleBehavior::Ipcidr),
    ("applications", RuleBehavior::Classical),
];

fn http_provider(behavior: RuleBehavior, url: String, path: String) -> RuleProvider {
    RuleProvider {
        provider_type: RuleProviderType::Http,
        behavior,
        format: Some(RuleFormat::Yaml),
        interval: Some(RULE_PROVIDER_INTERVAL),
        url: Some(url),
        path: Some(path),
        extra: Mapping::new(),
    }
}

pub static RULE_PROVIDERS: Lazy<LinkedHashMap<String, RuleProvider>> = Lazy::new(|| {
    let mut providers = LinkedHashMap::new();
    for (name, behavior) in LOYALSOLDIER_SETS {
        providers.insert(
            name.to_string(),
            http_provider(
                *behavior,
                format!("{}/{}.txt", LOYALSOLDIER_BASE, name),
                format!("./ruleset/loyalsoldier/{}.yaml", name),
            ),
        );
    }
    providers.insert(
        "openai".to_string(),
        http_provider(
            RuleBehavior::Classical,
            OPENAI_URL.to_string(),
            "./ruleset/blackmatrix7/openai.yaml".to_string(),
        ),
    );
    providers
});
