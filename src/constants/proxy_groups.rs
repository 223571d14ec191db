use once_cell::sync::Lazy;

use super::group_names::*;
use super::regions::{region_filter, Region};
use crate::models::{BalanceStrategy, HealthCheck, ProxyGroup, ProxyGroupType};

const ICON_BASE: &str =
    "https://fastly.jsdelivr.net/gh/clash-verge-rev/clash-verge-rev.github.io@main/docs/assets/icons";

pub const GROUP_HEALTH_CHECK: HealthCheck = HealthCheck {
    url: "https://www.google.com/generate_204",
    interval: 300,
    timeout: 3000,
    lazy: true,
    max_failed_times: 3,
    hidden: false,
};

const CHATGPT_PROBE_URL: &str = "https://chatgpt.com";

/// Strategy groups offered as choices by most service groups.
const STRATEGY_GROUPS: &[&str] = &[
    NODE_SELECT,
    URL_TEST,
    FALLBACK,
    LOAD_BALANCE_HASH,
    LOAD_BALANCE_ROUND_ROBIN,
];

fn icon(name: &str) -> String {
    format!("{}/{}.svg", ICON_BASE, name)
}

fn group(name: &str, group_type: ProxyGroupType) -> ProxyGroup {
    ProxyGroup::new(name, group_type).health_check(&GROUP_HEALTH_CHECK)
}

fn region_group(name: &str, region: Region, flag: &str) -> ProxyGroup {
    group(name, ProxyGroupType::Select)
        .include_all()
        .filter(region_filter(&[region]))
        .icon(icon(&format!("flags/{}", flag)))
}

/// Service group offering the strategy groups followed by direct access.
fn service_group(name: &str, icon_name: &str) -> ProxyGroup {
    group(name, ProxyGroupType::Select)
        .proxies(STRATEGY_GROUPS.iter().copied().chain([GLOBAL_DIRECT]))
        .include_all()
        .icon(icon(icon_name))
}

/// Service group that prefers direct access over the strategy groups.
fn direct_first_group(name: &str, first: &str, icon_name: &str) -> ProxyGroup {
    group(name, ProxyGroupType::Select)
        .proxies(std::iter::once(first).chain(STRATEGY_GROUPS.iter().copied()))
        .include_all()
        .icon(icon(icon_name))
}

pub static PROXY_GROUPS: Lazy<Vec<ProxyGroup>> = Lazy::new(|| {
    vec![
        group(NODE_SELECT, ProxyGroupType::Select)
            .proxies([
                HONG_KONG,
                TAIWAN,
                JAPAN,
                SINGAPORE,
                UNITED_STATES,
                URL_TEST,
                FALLBACK,
                LOAD_BALANCE_HASH,
                LOAD_BALANCE_ROUND_ROBIN,
            ])
            .include_all()
            .icon(icon("adjust")),
        region_group(HONG_KONG, Region::HongKong, "hk"),
        region_group(TAIWAN, Region::Taiwan, "tw"),
        region_group(JAPAN, Region::Japan, "jp"),
        region_group(SINGAPORE, Region::Singapore, "sg"),
        region_group(UNITED_STATES, Region::UnitedStates, "us"),
        group(URL_TEST, ProxyGroupType::URLTest)
            .tolerance(100)
            .include_all()
            .icon(icon("speed")),
        group(FALLBACK, ProxyGroupType::Fallback)
            .include_all()
            .icon(icon("ambulance")),
        group(LOAD_BALANCE_HASH, ProxyGroupType::LoadBalance)
            .strategy(BalanceStrategy::ConsistentHashing)
            .include_all()
            .icon(icon("merry_go")),
        group(LOAD_BALANCE_ROUND_ROBIN, ProxyGroupType::LoadBalance)
            .strategy(BalanceStrategy::RoundRobin)
            .include_all()
            .icon(icon("balance")),
        service_group(GOOGLE, "google"),
        service_group(FOREIGN_MEDIA, "youtube"),
        service_group(TELEGRAM, "telegram"),
        group(CHATGPT, ProxyGroupType::Select)
            .probe_url(CHATGPT_PROBE_URL)
            .expected_status("200")
            .include_all()
            .filter(region_filter(&[
                Region::HongKong,
                Region::Taiwan,
                Region::Singapore,
                Region::Japan,
                Region::UnitedStates,
            ]))
            .icon(icon("chatgpt")),
        group(GOOGLE_AI, ProxyGroupType::Select)
            .proxies([TAIWAN, JAPAN, HONG_KONG, SINGAPORE, UNITED_STATES])
            .include_all()
            .icon(icon("google")),
        direct_first_group(MICROSOFT, GLOBAL_DIRECT, "microsoft"),
        service_group(APPLE, "apple"),
        group(AD_BLOCK, ProxyGroupType::Select)
            .proxies([REJECT, DIRECT])
            .icon(icon("bug")),
        direct_first_group(GLOBAL_DIRECT, DIRECT, "link"),
        group(GLOBAL_REJECT, ProxyGroupType::Select)
            .proxies([REJECT, DIRECT])
            .icon(icon("block")),
        service_group(FINAL, "fish"),
    ]
});
