use crate::error::ConvertError;
use crate::models::ClashConfig;

/// Render a configuration as a YAML document.
pub fn render_yaml(config: &ClashConfig) -> Result<String, ConvertError> {
    Ok(serde_yaml::to_string(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::extend_common_config;
    use crate::parser::parse_clash_config;
    use serde_yaml::Value;

    #[test]
    fn test_rendered_document_reads_back() {
        let mut config = parse_clash_config(
            "mixed-port: 7890\nproxies:\n  - {name: a, type: ss, server: 1.2.3.4, port: 8388, cipher: aes-128-gcm, password: p}\n",
        );
        extend_common_config(&mut config).unwrap();
        let yaml = render_yaml(&config).unwrap();

        let doc: Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(doc["mixed-port"], Value::from(7890));
        assert_eq!(doc["dns"]["enhanced-mode"], Value::from("fake-ip"));
        assert_eq!(doc["rules"][25], Value::from("MATCH,漏网之鱼"));
        assert_eq!(doc["proxy-groups"][0]["name"], Value::from("节点选择"));
        assert_eq!(doc["rule-providers"]["openai"]["behavior"], Value::from("classical"));
    }
}
