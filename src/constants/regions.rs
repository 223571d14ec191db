/// Regions a node name can be matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    HongKong,
    Taiwan,
    Singapore,
    Japan,
    UnitedStates,
    Malaysia,
    Indonesia,
    Philippines,
}

impl Region {
    /// Keywords (flag emoji, code, names) that identify the region in a node name.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Region::HongKong => &["🇭🇰", "HK", "Hong Kong", "HongKong", "香港"],
            Region::Taiwan => &["🇹🇼", "TW", "Taiwan", "台湾"],
            Region::Singapore => &["🇸🇬", "SG", "Singapore", "新加坡"],
            Region::Japan => &["🇯🇵", "JP", "Japan", "日本"],
            Region::UnitedStates => &["🇺🇸", "US", "United States", "UnitedStates", "美国"],
            Region::Malaysia => &["🇲🇾", "MY", "Malaysia", "马来西亚"],
            Region::Indonesia => &["🇮🇩", "ID", "Indonesia", "印尼"],
            Region::Philippines => &["🇵🇭", "PH", "Philippines", "菲律宾"],
        }
    }
}

/// Regex alternation matching any keyword of the given regions.
pub fn region_filter(regions: &[Region]) -> String {
    regions
        .iter()
        .flat_map(|region| region.keywords().iter().copied())
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_filter() {
        assert_eq!(
            region_filter(&[Region::HongKong]),
            "🇭🇰|HK|Hong Kong|HongKong|香港"
        );
        assert_eq!(
            region_filter(&[Region::Japan, Region::UnitedStates]),
            "🇯🇵|JP|Japan|日本|🇺🇸|US|United States|UnitedStates|美国"
        );
    }
}
