//! Batch driver: rule files in, rendered rewrite table out.
//!
//! The driver owns the three append-only accumulators (unconditional
//! tuples, conditional tuples, rule identifiers) for the duration of one
//! run; nothing else in the pipeline carries state across rules. Skipped
//! rules are reported on the diagnostic stream via `tracing` and leave no
//! trace in the accumulators, so the rendered output reflects exactly the
//! rules that compiled.

use crate::error::Result;
use crate::rare::parse_rules;
use crate::rule::{Rule, RuleOutcome, compile_rule};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Output-shaping options for one driver run.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Wrap tuples in `REWRITE(...)` / `REWRITE_COND(...)` macros.
    pub macro_wrap: bool,
    /// Emit the trailing identifier-enumeration block.
    pub emit_enum_variants: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            macro_wrap: true,
            emit_enum_variants: true,
        }
    }
}

/// The three output accumulators of one run.
#[derive(Debug, Default)]
struct Buckets {
    unconditional: Vec<String>,
    conditional: Vec<String>,
    enum_variants: Vec<String>,
}

/// Compile one parsed rule sequence into the accumulators, in order.
fn compile_rule_set(rules: &[Rule], buckets: &mut Buckets) -> Result<()> {
    for rule in rules {
        match compile_rule(rule)? {
            RuleOutcome::Compiled { tuple, conditional } => {
                if conditional {
                    buckets.conditional.push(tuple);
                } else {
                    buckets.unconditional.push(tuple);
                }
                buckets.enum_variants.push(rule.enum_id());
            }
            RuleOutcome::Skipped(reason) => {
                warn!("skipping rule {}: {reason}", rule.name);
            }
        }
    }
    Ok(())
}

/// Render the accumulated rules as the final table text.
fn render(sources: &str, buckets: &Buckets, options: &CompileOptions) -> String {
    let mut out = String::new();

    if !buckets.unconditional.is_empty() {
        out.push_str(&format!("// Rewrite Rules from: {sources}\n"));
        for tuple in &buckets.unconditional {
            if options.macro_wrap {
                out.push_str(&format!("REWRITE{tuple};\n"));
            } else {
                out.push_str(&format!("{tuple}\n"));
            }
        }
    }

    if !buckets.conditional.is_empty() {
        out.push_str(&format!("// Conditional Rewrite Rules from: {sources}\n"));
        for tuple in &buckets.conditional {
            if options.macro_wrap {
                out.push_str(&format!("REWRITE_COND{tuple};\n"));
            } else {
                out.push_str(&format!("{tuple}\n"));
            }
        }
    }

    if !buckets.enum_variants.is_empty() && options.emit_enum_variants {
        out.push('\n');
        out.push_str(&buckets.enum_variants.join(",\n"));
        out.push('\n');
    }

    out
}

/// Compile a set of rule-source files into the rendered table.
///
/// Files are processed in argument order, rules in file order; the two
/// buckets keep those orders independently. The result is byte-stable
/// across reruns on the same inputs.
pub fn compile_files(paths: &[PathBuf], options: &CompileOptions) -> Result<String> {
    let mut buckets = Buckets::default();
    for path in paths {
        let text = fs::read_to_string(path)?;
        let rules = parse_rules(&text)?;
        debug!("parsed {} rule(s) from {}", rules.len(), path.display());
        compile_rule_set(&rules, &mut buckets)?;
    }
    let sources = paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Ok(render(&sources, &buckets, options))
}
