//! Template syntax tree consumed by the extractor.
//!
//! The tree only keeps what requirement extraction needs: interpolated paths,
//! block helpers with their subject path and branches, and an opaque marker for
//! everything else. Parsing itself is delegated to `handlebars`.

use crate::error::Result;
use handlebars::template::{HelperTemplate, Parameter, Template, TemplateElement};

/// An ordered list of statements (a template body or one branch of a block).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `{{path}}` or `{{{path}}}`.
    Interpolation { path: String },
    /// `{{#helper subject}} ... {{else}} ... {{/helper}}`.
    Block(Block),
    /// Raw text, comments, partials, helper calls and anything else that does
    /// not reference payload data by itself.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Helper keyword, e.g. `if`, `unless`, `each`, `with`.
    pub helper: String,
    /// First parameter when it is a plain path. `None` for literals,
    /// sub-expressions and data variables.
    pub subject: Option<String>,
    /// Primary branch.
    pub program: Option<Program>,
    /// Alternate (`{{else}}`) branch.
    pub inverse: Option<Program>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

impl Statement {
    pub fn interpolation(path: impl Into<String>) -> Self {
        Statement::Interpolation { path: path.into() }
    }

    pub fn block(
        helper: impl Into<String>,
        subject: impl Into<String>,
        program: Vec<Statement>,
        inverse: Option<Vec<Statement>>,
    ) -> Self {
        Statement::Block(Block {
            helper: helper.into(),
            subject: Some(subject.into()),
            program: Some(Program::new(program)),
            inverse: inverse.map(Program::new),
        })
    }
}

/// Parses handlebars source into a [`Program`].
pub fn parse(source: &str) -> Result<Program> {
    let template = Template::compile(source)?;
    Ok(lower_template(&template))
}

fn lower_template(template: &Template) -> Program {
    Program::new(template.elements.iter().map(lower_element).collect())
}

fn lower_element(element: &TemplateElement) -> Statement {
    match element {
        TemplateElement::Expression(helper) | TemplateElement::HtmlExpression(helper) => {
            lower_expression(helper)
        }
        TemplateElement::HelperBlock(helper) => lower_block(helper),
        _ => Statement::Other,
    }
}

fn lower_expression(helper: &HelperTemplate) -> Statement {
    // `{{helper arg}}` is a call, not a lookup of `helper`.
    if !helper.params.is_empty() || !helper.hash.is_empty() {
        return Statement::Other;
    }
    match parameter_path(&helper.name) {
        Some(path) => Statement::Interpolation { path },
        None => Statement::Other,
    }
}

fn lower_block(helper: &HelperTemplate) -> Statement {
    let Some(name) = helper.name.as_name() else {
        return Statement::Other;
    };
    Statement::Block(Block {
        helper: name.to_string(),
        subject: helper.params.first().and_then(parameter_path),
        program: helper.template.as_ref().map(lower_template),
        inverse: helper.inverse.as_ref().map(lower_template),
    })
}

fn parameter_path(param: &Parameter) -> Option<String> {
    match param {
        Parameter::Name(_) | Parameter::Path(_) => param.as_name().and_then(normalize_path),
        _ => None,
    }
}

/// Normalizes a raw path expression into a payload path.
///
/// Returns `None` for data variables (`@index`, `@root.x`), which never live in
/// the payload.
pub fn normalize_path(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with('@') {
        return None;
    }
    let path = raw
        .strip_prefix("this.")
        .or_else(|| raw.strip_prefix("./"))
        .unwrap_or(raw);
    if path.is_empty() {
        return None;
    }
    Some(path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(statement: &Statement) -> &Block {
        match statement {
            Statement::Block(block) => block,
            other => panic!("expected block, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_interpolations() {
        let program = parse("Hi {{name}}, {{{user.bio}}}!").unwrap();
        let paths: Vec<_> = program
            .statements
            .iter()
            .filter_map(|s| match s {
                Statement::Interpolation { path } => Some(path.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(paths, vec!["name", "user.bio"]);
    }

    #[test]
    fn test_parse_helper_call_is_not_interpolation() {
        let program = parse("{{json payload}}").unwrap();
        assert_eq!(program.statements, vec![Statement::Other]);
    }

    #[test]
    fn test_parse_each_with_else() {
        let program = parse("{{#each items}}{{this}}{{else}}{{empty}}{{/each}}").unwrap();
        let each = block(&program.statements[0]);
        assert_eq!(each.helper, "each");
        assert_eq!(each.subject.as_deref(), Some("items"));
        assert_eq!(
            each.program.as_ref().unwrap().statements,
            vec![Statement::interpolation("this")]
        );
        assert_eq!(
            each.inverse.as_ref().unwrap().statements,
            vec![Statement::interpolation("empty")]
        );
    }

    #[test]
    fn test_parse_subexpression_subject() {
        let program = parse(r#"{{#if (eq role "user")}}{{name}}{{/if}}"#).unwrap();
        let cond = block(&program.statements[0]);
        assert_eq!(cond.helper, "if");
        assert_eq!(cond.subject, None);
    }

    #[test]
    fn test_parse_rejects_unclosed_block() {
        assert!(parse("{{#if foo}}never closed").is_err());
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("this.name").as_deref(), Some("name"));
        assert_eq!(normalize_path("./name").as_deref(), Some("name"));
        assert_eq!(normalize_path("this").as_deref(), Some("this"));
        assert_eq!(normalize_path("../title").as_deref(), Some("../title"));
        assert_eq!(normalize_path("@index"), None);
        assert_eq!(normalize_path("@root.title"), None);
    }
}
