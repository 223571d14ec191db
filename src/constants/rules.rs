use once_cell::sync::Lazy;

use super::group_names::*;
use crate::models::{Rule, RuleKind};

/// Rule-set references in evaluation order. The last flag marks IP-based
/// sets that must not trigger DNS resolution.
const RULE_SET_TARGETS: &[(&str, &str, bool)] = &[
    ("openai", CHATGPT, false),
    ("applications", GLOBAL_DIRECT, false),
    ("private", GLOBAL_DIRECT, false),
    ("reject", AD_BLOCK, false),
    ("icloud", MICROSOFT, false),
    ("apple", APPLE, false),
    ("google", GOOGLE, false),
    ("proxy", NODE_SELECT, false),
    ("gfw", NODE_SELECT, false),
    ("tld-not-cn", NODE_SELECT, false),
    ("direct", GLOBAL_DIRECT, false),
    ("lancidr", GLOBAL_DIRECT, true),
    ("cncidr", GLOBAL_DIRECT, true),
    ("telegramcidr", TELEGRAM, true),
];

pub static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    let mut rules = vec![
        Rule::new(RuleKind::DomainSuffix, "googleapis.cn", NODE_SELECT),
        Rule::new(RuleKind::DomainSuffix, "gstatic.com", NODE_SELECT),
        // google play downloads
        Rule::new(RuleKind::DomainSuffix, "xn--ngstr-lra8j.com", NODE_SELECT),
        Rule::new(RuleKind::DomainSuffix, "github.io", NODE_SELECT),
        Rule::new(RuleKind::Domain, "v2rayse.com", NODE_SELECT),
        Rule::new(RuleKind::DomainSuffix, "generativelanguage.googleapis.com", GOOGLE_AI),
        Rule::new(RuleKind::DomainSuffix, "gemini.google.com", GOOGLE_AI),
        Rule::new(RuleKind::DomainSuffix, "notebooklm.google", GOOGLE_AI),
        Rule::new(RuleKind::DomainSuffix, "notebooklm.google.com", GOOGLE_AI),
    ];

    for (set, target, no_resolve) in RULE_SET_TARGETS {
        let rule = Rule::new(RuleKind::RuleSet, set, target);
        rules.push(if *no_resolve { rule.no_resolve() } else { rule });
    }

    rules.push(Rule::new(RuleKind::GeoIp, "LAN", GLOBAL_DIRECT).no_resolve());
    rules.push(Rule::new(RuleKind::GeoIp, "CN", GLOBAL_DIRECT).no_resolve());
    rules.push(Rule::final_match(FINAL));
    rules
});
