//! TypeScript declarations for emitted variable names.

use crate::declarations::declarations;
use crate::GENERATED_HEADER;
use swatch_core::{ExportError, ResolvedSet, Tier};

/// Emit a `.d.ts` module with one string-literal union per tier.
pub fn emit_dts(set: &ResolvedSet, prefix: &str) -> Result<String, ExportError> {
    let decls = declarations(set, prefix)?;

    let mut dts = String::new();
    dts.push_str(&format!("// {}\n", GENERATED_HEADER));

    for tier in Tier::ALL {
        let names = decls
            .iter()
            .filter(|d| d.token.tier == tier)
            .map(|d| d.name.as_str());
        push_union(&mut dts, &format!("{}TokenName", tier.label()), names);
    }

    let all: Vec<String> = Tier::ALL
        .iter()
        .map(|tier| format!("{}TokenName", tier.label()))
        .collect();
    dts.push_str(&format!("\nexport type TokenName = {};\n", all.join(" | ")));

    let deprecated = decls
        .iter()
        .filter(|d| d.token.deprecation.deprecated)
        .map(|d| d.name.as_str());
    push_union(&mut dts, "DeprecatedTokenName", deprecated);

    dts.push_str("\nexport type TokenVar = `var(${TokenName})`;\n");

    Ok(dts)
}

fn push_union<'a>(dts: &mut String, type_name: &str, names: impl Iterator<Item = &'a str>) {
    let members: Vec<String> = names.map(|n| format!("  | {}", ts_string(n))).collect();
    if members.is_empty() {
        dts.push_str(&format!("\nexport type {} = never;\n", type_name));
    } else {
        dts.push_str(&format!("\nexport type {} =\n{};\n", type_name, members.join("\n")));
    }
}

/// A single-quoted TypeScript string literal.
fn ts_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{resolved, set};
    use serde_json::json;
    use swatch_core::{Deprecation, TokenPath, TokenType};

    #[test]
    fn test_emit_dts() {
        let mut old = resolved(Tier::Semantic, "text-old", TokenType::Color, json!("#000"));
        old.deprecation = Deprecation {
            deprecated: true,
            replaced_by: Some(TokenPath::from_dotted("text-new")),
        };
        let set = set(vec![
            resolved(Tier::Primitive, "grey.100", TokenType::Color, json!("#f0f0f0")),
            resolved(Tier::Primitive, "space.4", TokenType::Spacing, json!(16)),
            old,
            resolved(Tier::Semantic, "text-new", TokenType::Color, json!("#000")),
        ]);

        let dts = emit_dts(&set, "token").unwrap();
        insta::assert_snapshot!(dts, @r###"
        // Generated by swatch. Do not edit.

        export type PrimitiveTokenName =
          | '--token-primitive-grey-100'
          | '--token-primitive-space-4';

        export type SemanticTokenName =
          | '--token-semantic-text-old'
          | '--token-semantic-text-new';

        export type ComponentTokenName = never;

        export type TokenName = PrimitiveTokenName | SemanticTokenName | ComponentTokenName;

        export type DeprecatedTokenName =
          | '--token-semantic-text-old';

        export type TokenVar = `var(${TokenName})`;
        "###);
    }

    #[test]
    fn test_emit_dts_is_stable() {
        let set = set(vec![resolved(Tier::Component, "button.bg", TokenType::Color, json!("#fff"))]);
        let first = emit_dts(&set, "token").unwrap();
        let second = emit_dts(&set, "token").unwrap();
        assert_eq!(first, second);
        assert!(first.contains("export type PrimitiveTokenName = never;"));
        assert!(first.contains("  | '--token-component-button-bg';"));
    }

    #[test]
    fn test_ts_string_escapes_quotes_and_backslashes() {
        assert_eq!(ts_string("--token-a"), "'--token-a'");
        assert_eq!(ts_string("it's"), r"'it\'s'");
        assert_eq!(ts_string(r"a\b"), r"'a\\b'");
    }

    #[test]
    fn test_emit_dts_escapes_names() {
        let set = set(vec![resolved(Tier::Primitive, "brand's", TokenType::Color, json!("#000"))]);
        let dts = emit_dts(&set, "token").unwrap();
        assert!(dts.contains(r"  | '--token-primitive-brand\'s';"));
    }
}
