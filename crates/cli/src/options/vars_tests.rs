// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use proptest::prelude::*;
use serde_json::json;

#[test]
fn renders_bool_and_string() {
    let mut vars = Vars::new();
    vars.insert("is_enabled".to_string(), json!(true));
    vars.insert("name".to_string(), json!("github-actions"));

    assert_eq!(
        var_args(&vars),
        ["-var", "is_enabled=true", "-var", "name=github-actions"]
    );
}

#[test]
fn empty_vars_render_nothing() {
    assert!(var_args(&Vars::new()).is_empty());
}

#[test]
fn renders_list_as_hcl() {
    assert_eq!(
        render_value(&json!(["repo:org/app:*", "repo:org/infra:ref:refs/heads/main"])),
        r#"["repo:org/app:*", "repo:org/infra:ref:refs/heads/main"]"#
    );
}

#[test]
fn renders_map_as_hcl() {
    assert_eq!(
        render_value(&json!({"Environment": "test", "Owner": "platform"})),
        r#"{"Environment" = "test", "Owner" = "platform"}"#
    );
}

#[test]
fn renders_nested_values() {
    assert_eq!(
        render_value(&json!({"thumbprints": ["abc", 1, null, false]})),
        r#"{"thumbprints" = ["abc", 1, null, false]}"#
    );
}

#[test]
fn escapes_quotes_and_templates_in_nested_strings() {
    assert_eq!(render_hcl(&json!("say \"hi\" ${var.x}")), r#""say \"hi\" $${var.x}""#);
    assert_eq!(render_hcl(&json!("%{ if true }")), r#""%%{ if true }""#);
}

#[test]
fn top_level_string_is_raw() {
    assert_eq!(render_value(&json!("a \"b\"")), "a \"b\"");
}

#[test]
fn validates_identifiers() {
    assert!(is_valid_name("is_enabled"));
    assert!(is_valid_name("_private"));
    assert!(is_valid_name("oidc-provider"));
    assert!(!is_valid_name(""));
    assert!(!is_valid_name("1st"));
    assert!(!is_valid_name("has space"));
    assert!(!is_valid_name("a=b"));
}

proptest! {
    #[test]
    fn every_key_rendered_exactly_once(
        vars in prop::collection::btree_map("[a-z_][a-z0-9_]{0,12}", any::<i64>(), 0..16)
    ) {
        let vars: Vars = vars.into_iter().map(|(k, v)| (k, json!(v))).collect();
        let args = var_args(&vars);

        prop_assert_eq!(args.len(), vars.len() * 2);
        for pair in args.chunks(2) {
            prop_assert_eq!(pair[0].as_str(), "-var");
        }
        for key in vars.keys() {
            let prefix = format!("{key}=");
            let count = args.iter().filter(|a| a.starts_with(&prefix)).count();
            prop_assert_eq!(count, 1);
        }
    }
}
