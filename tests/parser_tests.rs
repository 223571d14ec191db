use serde_yaml::Value;

use clash_subconverter::interfaces::convert_subscription_text;
use clash_subconverter::models::ClashProxy;
use clash_subconverter::parser::parse_clash_config;
use clash_subconverter::utils::base64::base64_encode;

#[cfg(test)]
mod parser_tests {
    use super::*;

    fn vmess_link(json: &str) -> String {
        format!("vmess://{}", base64_encode(json))
    }

    fn ss_link(user_info: &str, name: &str) -> String {
        format!("ss://{}@1.2.3.4:8388#{}", base64_encode(user_info), name)
    }

    #[test]
    fn test_vmess_ws_tls_link() {
        let link = vmess_link(
            r#"{"ps":"HK-01","add":"a.com","port":"443","id":"U","aid":"0","net":"ws","path":"/ws","host":"cdn.a.com","tls":"tls"}"#,
        );
        let config = parse_clash_config(&link);
        let proxies = config.proxies.unwrap();
        assert_eq!(proxies.len(), 1);

        let ClashProxy::VMess(node) = &proxies[0] else {
            panic!("expected vmess, got {:?}", proxies[0]);
        };
        assert_eq!(node.name, "HK-01");
        assert_eq!(node.server.as_deref(), Some("a.com"));
        assert_eq!(node.port, Some(443));
        assert_eq!(node.uuid.as_deref(), Some("U"));
        assert_eq!(node.alter_id, Some(0));
        assert_eq!(node.cipher.as_deref(), Some("auto"));
        assert_eq!(node.network.as_deref(), Some("ws"));
        assert_eq!(node.tls, Some(true));
        assert_eq!(node.servername.as_deref(), Some("cdn.a.com"));
        let ws = node.ws_opts.as_ref().unwrap();
        assert_eq!(ws.path.as_deref(), Some("/ws"));
        assert_eq!(
            ws.headers.as_ref().unwrap().get("Host").map(String::as_str),
            Some("cdn.a.com")
        );
    }

    #[test]
    fn test_trojan_link_with_sni() {
        let config = parse_clash_config("trojan://pw@h.com:8443?sni=s.com#My%20Node");
        let proxies = config.proxies.unwrap();
        let ClashProxy::Trojan(node) = &proxies[0] else {
            panic!("expected trojan, got {:?}", proxies[0]);
        };
        assert_eq!(node.name, "My Node");
        assert_eq!(node.server.as_deref(), Some("h.com"));
        assert_eq!(node.port, Some(8443));
        assert_eq!(node.password.as_deref(), Some("pw"));
        assert_eq!(node.sni.as_deref(), Some("s.com"));
        assert_eq!(node.skip_cert_verify, Some(false));
    }

    #[test]
    fn test_ss_base64_user_info() {
        let config = parse_clash_config(&ss_link("aes-256-gcm:pass", "N"));
        let proxies = config.proxies.unwrap();
        let ClashProxy::Shadowsocks(node) = &proxies[0] else {
            panic!("expected ss, got {:?}", proxies[0]);
        };
        assert_eq!(node.name, "N");
        assert_eq!(node.server.as_deref(), Some("1.2.3.4"));
        assert_eq!(node.port, Some(8388));
        assert_eq!(node.cipher.as_deref(), Some("aes-256-gcm"));
        assert_eq!(node.password.as_deref(), Some("pass"));
    }

    #[test]
    fn test_ss_plus_garbage_yields_one_node() {
        let text = format!("{}\ngarbage-line\n", ss_link("aes-256-gcm:pass", "N"));
        let config = parse_clash_config(&text);
        assert_eq!(config.proxy_count(), 1);
    }

    #[test]
    fn test_node_count_matches_well_formed_lines() {
        let lines = [
            ss_link("aes-256-gcm:pass", "a"),
            "trojan://pw@h.com:443#b".to_string(),
            "vless://unsupported@h.com:443".to_string(),
            vmess_link(r#"{"add":"c.com","port":"not-a-port","id":"U"}"#),
            "ssr://%%%".to_string(),
            "hy2://pw@d.com:443#d".to_string(),
            String::new(),
            "   ".to_string(),
        ];
        let config = parse_clash_config(&lines.join("\n"));
        let names: Vec<_> = config
            .proxies
            .as_ref()
            .unwrap()
            .iter()
            .map(|p| p.name().unwrap_or_default().to_string())
            .collect();
        assert_eq!(names, vec!["a", "b", "d"]);
    }

    #[test]
    fn test_parser_is_total() {
        let inputs = [
            "",
            "\n\n",
            "42",
            "- just\n- a list\n",
            "{{{{ not yaml",
            "key: [unclosed",
            "ss://",
            "vmess://",
        ];
        for input in inputs {
            let config = parse_clash_config(input);
            assert_eq!(config.proxy_count(), 0, "input {:?}", input);
        }
    }

    #[test]
    fn test_mistyped_top_level_scalars_keep_the_document() {
        let proxies = "proxies:\n  - {name: a, type: ss, server: 1.2.3.4, port: 8388, cipher: aes-128-gcm, password: p}\n";
        for head in [
            "secret: 123456\n",
            "allow-lan: \"true\"\n",
            "routing-mark: \"6666\"\n",
            "log-level: 1\n",
        ] {
            let text = format!("{}{}", head, proxies);
            let config = parse_clash_config(&text);
            assert_eq!(config.proxy_count(), 1, "document with {:?} lost its proxies", head);

            let yaml = convert_subscription_text(&text).unwrap();
            let doc: Value = serde_yaml::from_str(&yaml).unwrap();
            let expected: Value = serde_yaml::from_str(head).unwrap();
            let (key, value) = expected.as_mapping().unwrap().iter().next().unwrap();
            assert_eq!(&doc[key], value);
        }
    }

    #[test]
    fn test_structured_document_is_returned_unmodified() {
        let yaml = r#"
port: 7890
mode: rule
tun:
  enable: true
proxies:
  - name: jp
    type: trojan
    server: jp.example.com
    port: 443
    password: pw
    udp: true
  - name: odd
    type: mieru
    server: m.example.com
    port: 2999
    transport: TCP
proxy-groups:
  - name: Proxy
    type: select
    proxies: [jp, odd]
rules:
  - MATCH,Proxy
"#;
        let config = parse_clash_config(yaml);
        assert_eq!(config.port, Some(Value::from(7890)));
        assert_eq!(config.mode, Some(Value::from("rule")));
        assert!(config.extra.contains_key("tun"));
        assert_eq!(config.proxy_groups.as_ref().unwrap().len(), 1);
        assert_eq!(config.rules.as_ref().unwrap()[0].to_string(), "MATCH,Proxy");

        let proxies = config.proxies.unwrap();
        assert!(matches!(proxies[0], ClashProxy::Trojan(_)));
        assert!(matches!(proxies[1], ClashProxy::Other(_)));
        assert_eq!(proxies[1].type_name(), "mieru");
    }

    #[test]
    fn test_empty_proxy_list_document() {
        let config = parse_clash_config("proxies: []\n");
        assert_eq!(config.proxies, Some(Vec::new()));
    }
}
