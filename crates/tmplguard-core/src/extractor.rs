//! Derives a [`RequirementSpec`] from a template syntax tree.
//!
//! Each program level is scanned into three families which are merged in this
//! order and deduplicated by first occurrence:
//!
//! 1. plain interpolations at this level,
//! 2. conditional test paths, followed by everything found inside conditional
//!    branches (and inside loop `{{else}}` branches),
//! 3. one loop requirement per iteration block.
//!
//! Conditionals do not introduce structure: the variables they gate are needed
//! for whichever branch renders. Loops do, because their bodies are evaluated
//! against each array element.

use crate::config::AnalyzerConfig;
use crate::requirements::{LoopRequirement, Requirement, RequirementSpec};
use crate::syntax::{Block, Program, Statement};

/// Prefix of a path that escapes the current loop element.
const PARENT_SCOPE: &str = "../";

pub struct Extractor<'a> {
    config: &'a AnalyzerConfig,
}

#[derive(Default)]
struct Families {
    top_level: Vec<Requirement>,
    condition_tests: Vec<Requirement>,
    nested: Vec<Requirement>,
    loops: Vec<Requirement>,
}

impl<'a> Extractor<'a> {
    pub fn new(config: &'a AnalyzerConfig) -> Self {
        Self { config }
    }

    #[tracing::instrument(skip_all)]
    pub fn extract(&self, program: &Program) -> RequirementSpec {
        let spec = self.extract_program(Some(program));
        tracing::debug!(requirements = spec.len(), "extracted template requirements");
        spec
    }

    fn extract_program(&self, program: Option<&Program>) -> RequirementSpec {
        let Some(program) = program else {
            return RequirementSpec::new();
        };

        let mut families = Families::default();
        for statement in &program.statements {
            match statement {
                Statement::Interpolation { path } => {
                    families.top_level.push(Requirement::field(path.as_str()));
                }
                Statement::Block(block) if self.config.is_conditional(&block.helper) => {
                    self.collect_conditional(block, &mut families);
                }
                Statement::Block(block) if self.config.is_iteration(&block.helper) => {
                    self.collect_iteration(block, &mut families);
                }
                Statement::Block(block) => {
                    tracing::trace!(helper = %block.helper, "ignoring unsupported block helper");
                }
                Statement::Other => {}
            }
        }

        let Families {
            top_level,
            condition_tests,
            nested,
            loops,
        } = families;
        top_level
            .into_iter()
            .chain(condition_tests)
            .chain(nested)
            .chain(loops)
            .collect()
    }

    fn collect_conditional(&self, block: &Block, families: &mut Families) {
        if let Some(subject) = &block.subject {
            families
                .condition_tests
                .push(Requirement::field(subject.as_str()));
        }
        families
            .nested
            .extend(self.extract_program(block.program.as_ref()));
        families
            .nested
            .extend(self.extract_program(block.inverse.as_ref()));
    }

    fn collect_iteration(&self, block: &Block, families: &mut Families) {
        let body = self.extract_program(block.program.as_ref());
        // The else branch renders against the enclosing scope.
        families
            .nested
            .extend(self.extract_program(block.inverse.as_ref()));

        let mut properties = Vec::with_capacity(body.len());
        for requirement in body {
            match requirement {
                Requirement::Field(path) if path == self.config.self_reference => {}
                Requirement::Field(path) if path.starts_with(PARENT_SCOPE) => {
                    let outer = &path[PARENT_SCOPE.len()..];
                    families.nested.push(Requirement::field(outer));
                }
                other => properties.push(other),
            }
        }

        match &block.subject {
            Some(subject) => families.loops.push(Requirement::Loop(LoopRequirement {
                loop_variable: subject.clone(),
                properties: properties.into_iter().collect(),
            })),
            None => {
                tracing::trace!(helper = %block.helper, "iteration without a path subject");
            }
        }
    }
}
