//! Storybook MDX documentation pages, one per tier.

use crate::declarations::declarations;
use crate::GENERATED_HEADER;
use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde::Serialize;
use swatch_core::{ExportError, ResolvedSet, Tier, TokenType};

const PAGE_TEMPLATE: &str = r#"import { Meta } from '@storybook/blocks';

<Meta title="Design Tokens/{{label}}" />

{/* {{header}} */}

# {{label}} tokens

{{#if rows}}
| Variable | Value | Type | Description | Deprecation |
| --- | --- | --- | --- | --- |
{{#each rows}}
| `{{name}}` | {{#if swatch}}{{swatch}} {{/if}}`{{cell value}}` | {{token_type}} | {{cell description}} | {{cell deprecation}} |
{{/each}}
{{else}}
No {{tier}} tokens are defined.
{{/if}}
"#;

/// One generated documentation file.
#[derive(Debug, Clone, PartialEq)]
pub struct DocPage {
    /// File name relative to the docs directory, e.g. `primitive-tokens.mdx`.
    pub file_name: String,
    pub content: String,
}

#[derive(Serialize)]
struct PageData {
    header: &'static str,
    tier: &'static str,
    label: &'static str,
    rows: Vec<RowData>,
}

#[derive(Serialize)]
struct RowData {
    name: String,
    value: String,
    token_type: &'static str,
    description: String,
    deprecation: String,
    swatch: Option<String>,
}

/// Render one MDX page per tier from the resolved tokens.
pub fn emit_docs(set: &ResolvedSet, prefix: &str) -> Result<Vec<DocPage>, ExportError> {
    let renderer = DocRenderer::new()?;
    let decls = declarations(set, prefix)?;

    let mut pages = Vec::with_capacity(Tier::ALL.len());
    for tier in Tier::ALL {
        let rows = decls
            .iter()
            .filter(|d| d.token.tier == tier)
            .map(|d| RowData {
                name: d.name.clone(),
                value: d.value.clone(),
                token_type: d.token.token_type.as_str(),
                description: d.token.description.clone().unwrap_or_default(),
                deprecation: deprecation_note(d.token.deprecation.deprecated, d.replacement.as_deref()),
                swatch: (d.token.token_type == TokenType::Color).then(|| color_swatch(&d.value)),
            })
            .collect();

        let data = PageData {
            header: GENERATED_HEADER,
            tier: tier.css_name(),
            label: tier.label(),
            rows,
        };
        pages.push(DocPage {
            file_name: format!("{}-tokens.mdx", tier.css_name()),
            content: renderer.render(&data)?,
        });
    }

    tracing::debug!(pages = pages.len(), "rendered docs");
    Ok(pages)
}

fn deprecation_note(deprecated: bool, replacement: Option<&str>) -> String {
    match (deprecated, replacement) {
        (false, _) => String::new(),
        (true, Some(name)) => format!("Deprecated, use `{}`", name),
        (true, None) => "Deprecated".to_string(),
    }
}

fn color_swatch(color: &str) -> String {
    format!(
        "<span style={{{{ display: 'inline-block', width: '1em', height: '1em', background: '{}' }}}} />",
        color.replace('\'', "\\'")
    )
}

/// Escape a value for a Markdown table cell.
fn table_cell(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}

struct DocRenderer<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> DocRenderer<'a> {
    fn new() -> Result<Self, ExportError> {
        let mut handlebars = Handlebars::new();
        // MDX, not HTML: values are written as-is.
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_helper(
            "cell",
            Box::new(
                |h: &Helper,
                 _r: &Handlebars,
                 _ctx: &Context,
                 _rc: &mut RenderContext,
                 out: &mut dyn Output|
                 -> HelperResult {
                    let text = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
                    out.write(&table_cell(text))?;
                    Ok(())
                },
            ),
        );
        handlebars
            .register_template_string("page", PAGE_TEMPLATE)
            .map_err(|e| ExportError::Template(e.to_string()))?;
        Ok(Self { handlebars })
    }

    fn render(&self, data: &PageData) -> Result<String, ExportError> {
        self.handlebars
            .render("page", data)
            .map_err(|e| ExportError::Template(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{resolved, set};
    use serde_json::json;
    use swatch_core::{Deprecation, TokenPath};

    fn page<'a>(pages: &'a [DocPage], name: &str) -> &'a DocPage {
        pages.iter().find(|p| p.file_name == name).unwrap()
    }

    #[test]
    fn test_one_page_per_tier() {
        let set = set(vec![resolved(Tier::Primitive, "grey.100", TokenType::Color, json!("#f0f0f0"))]);
        let pages = emit_docs(&set, "token").unwrap();

        let names: Vec<&str> = pages.iter().map(|p| p.file_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["primitive-tokens.mdx", "semantic-tokens.mdx", "component-tokens.mdx"]
        );
        assert!(page(&pages, "semantic-tokens.mdx")
            .content
            .contains("No semantic tokens are defined."));
    }

    #[test]
    fn test_rows_render_values_and_swatches() {
        let mut spacing = resolved(Tier::Primitive, "space.4", TokenType::Spacing, json!(16));
        spacing.description = Some("Default gap | between items\nin stacks".to_string());
        let set = set(vec![
            resolved(Tier::Primitive, "grey.100", TokenType::Color, json!("#f0f0f0")),
            spacing,
        ]);

        let pages = emit_docs(&set, "token").unwrap();
        let content = &page(&pages, "primitive-tokens.mdx").content;

        assert!(content.starts_with("import { Meta } from '@storybook/blocks';"));
        assert!(content.contains(r#"<Meta title="Design Tokens/Primitive" />"#));
        assert!(content.contains(
            "| `--token-primitive-grey-100` | <span style={{ display: 'inline-block', width: '1em', height: '1em', background: '#f0f0f0' }} /> `#f0f0f0` | color |  |  |"
        ));
        assert!(content.contains(
            "| `--token-primitive-space-4` | `16px` | spacing | Default gap \\| between items in stacks |  |"
        ));
    }

    #[test]
    fn test_deprecation_note_names_replacement() {
        let mut old = resolved(Tier::Semantic, "text-old", TokenType::Other, json!("x"));
        old.deprecation = Deprecation {
            deprecated: true,
            replaced_by: Some(TokenPath::from_dotted("text-new")),
        };
        let set = set(vec![old, resolved(Tier::Semantic, "text-new", TokenType::Other, json!("x"))]);

        let pages = emit_docs(&set, "token").unwrap();
        assert!(page(&pages, "semantic-tokens.mdx")
            .content
            .contains("Deprecated, use `--token-semantic-text-new`"));
    }

    #[test]
    fn test_table_cell_escaping() {
        assert_eq!(table_cell("a | b"), "a \\| b");
        assert_eq!(table_cell("line one\n  line two"), "line one line two");
    }
}
