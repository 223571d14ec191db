use regex::Regex;

use clash_subconverter::constants::{group_names, PROXY_GROUPS, RULES, RULE_PROVIDERS};
use clash_subconverter::models::{ProxyGroupType, RuleKind};

fn group(name: &str) -> &'static clash_subconverter::models::ProxyGroup {
    PROXY_GROUPS
        .iter()
        .find(|g| g.name == name)
        .unwrap_or_else(|| panic!("missing group {}", name))
}

#[cfg(test)]
mod catalog_tests {
    use super::*;

    #[test]
    fn test_region_filters_match_node_names() {
        let cases = [
            (group_names::HONG_KONG, "🇭🇰 香港 IPLC 01", "🇯🇵 Tokyo 01"),
            (group_names::TAIWAN, "Taiwan Hinet", "🇸🇬 SG 02"),
            (group_names::JAPAN, "JP Osaka", "US Seattle"),
            (group_names::SINGAPORE, "新加坡 03", "香港 03"),
            (group_names::UNITED_STATES, "🇺🇸 Los Angeles", "日本 01"),
        ];
        for (name, hit, miss) in cases {
            let filter = group(name).filter.as_deref().unwrap();
            let re = Regex::new(filter).unwrap();
            assert!(re.is_match(hit), "{} should match {}", name, hit);
            assert!(!re.is_match(miss), "{} should not match {}", name, miss);
        }
    }

    #[test]
    fn test_chatgpt_group_probes_chatgpt() {
        let chatgpt = group(group_names::CHATGPT);
        assert_eq!(chatgpt.url.as_deref(), Some("https://chatgpt.com"));
        assert_eq!(chatgpt.expected_status.as_deref(), Some("200"));
        let re = Regex::new(chatgpt.filter.as_deref().unwrap()).unwrap();
        assert!(re.is_match("🇸🇬 Singapore 01"));
        assert!(!re.is_match("🇩🇪 Frankfurt"));
    }

    #[test]
    fn test_url_test_group_tolerance() {
        let url_test = group(group_names::URL_TEST);
        assert_eq!(url_test.group_type, ProxyGroupType::URLTest);
        assert_eq!(url_test.tolerance, Some(100));
        assert_eq!(
            url_test.url.as_deref(),
            Some("https://www.google.com/generate_204")
        );
    }

    #[test]
    fn test_rules_reference_known_targets() {
        let names: Vec<&str> = PROXY_GROUPS.iter().map(|g| g.name.as_str()).collect();
        for rule in RULES.iter() {
            assert!(
                names.contains(&rule.target.as_str())
                    || rule.target == group_names::DIRECT
                    || rule.target == group_names::REJECT,
                "unknown target in {}",
                rule
            );
            if rule.kind == RuleKind::RuleSet {
                let set = rule.payload.as_deref().unwrap();
                assert!(RULE_PROVIDERS.contains_key(set), "unknown rule set {}", set);
            }
        }
    }
}
