//! Variable usage analysis over built lines.

use nsd_ir::{ExprKind, Expression, Operator};
use rustc_hash::FxHashSet;

use crate::line::{Line, LineKind};


/// Names collected from one or more lines.
#[derive(Clone, Debug, Default)]
pub struct VariableSets {
    /// Targets of assignments, loops and input.
    pub assigned: FxHashSet<String>,
    /// Names introduced by declarations, constants and parameters.
    pub declared: FxHashSet<String>,
    /// Names read as values.
    pub used: FxHashSet<String>,
    /// Findings such as `declaration.duplicate: x`.
    pub problems: Vec<String>,
}

impl VariableSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorted copy of a set, for stable output.
    pub fn sorted(set: &FxHashSet<String>) -> Vec<&str> {
        let mut names: Vec<&str> = set.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn declare(&mut self, name: &str) {
        if !self.declared.insert(name.to_owned()) {
            self.problems.push(format!("declaration.duplicate: {name}"));
        }
    }
}

impl Line {
    /// Add the names this line assigns, declares and reads to `sets`.
    ///
    /// Returns `false` if the line is an error line or its expressions do
    /// not have the shape its kind requires.
    pub fn gather_variables(&self, sets: &mut VariableSets) -> bool {
        let expressions: Vec<&Expression> = self.expressions.iter().flatten().collect();
        match self.kind {
            LineKind::Assignment | LineKind::RoutineCall | LineKind::Condition | LineKind::Case => {
                let [expression] = expressions.as_slice() else {
                    return false;
                };
                gather(expression, sets, false);
            }
            LineKind::Catch => {
                let [variable] = expressions.as_slice() else {
                    return false;
                };
                gather(variable, sets, true);
                if let Some(name) = variable.as_identifier() {
                    sets.declare(name);
                }
            }
            LineKind::Return
            | LineKind::Exit
            | LineKind::Leave
            | LineKind::Throw
            | LineKind::Output
            | LineKind::Selector => {
                for expression in expressions {
                    gather(expression, sets, false);
                }
            }
            LineKind::ForLoop | LineKind::ForeachLoop => {
                if expressions.len() < 2 {
                    return false;
                }
                let is_foreach = self.kind == LineKind::ForeachLoop;
                for (i, expression) in expressions.into_iter().enumerate() {
                    gather(expression, sets, i == 0 && is_foreach);
                }
            }
            LineKind::Input => {
                // Slot 0 is the prompt.
                for expression in self.expressions.iter().skip(1).flatten() {
                    gather(expression, sets, true);
                }
            }
            LineKind::VarInit | LineKind::ConstDef => {
                let Some((Operator::Assign, [target, value])) = expressions.first().and_then(|e| e.as_operator())
                else {
                    return false;
                };
                let mut targets = VariableSets::new();
                gather(target, &mut targets, true);
                gather(value, sets, false);
                sets.used.extend(targets.used);
                for name in targets.assigned {
                    sets.declare(&name);
                    sets.assigned.insert(name);
                }
            }
            LineKind::VarDecl => {
                for name in expressions.iter().filter_map(|e| e.as_identifier()) {
                    sets.declared.insert(name.to_owned());
                }
            }
            LineKind::Routine => {
                if let Some(ExprKind::Declaration { items, .. }) = expressions.get(1).map(|e| &e.kind) {
                    for item in items {
                        sets.declare(&item.name);
                        if let Some(default) = &item.default {
                            gather(default, sets, false);
                        }
                    }
                }
            }
            LineKind::TypeDef | LineKind::Default => {}
            LineKind::Raw => return false,
        }
        true
    }
}

/// Walk `expression`; names in target position go to `assigned`, the
/// rest to `used`.
fn gather(expression: &Expression, sets: &mut VariableSets, is_target: bool) {
    match &expression.kind {
        ExprKind::Identifier(name) => {
            let set = if is_target { &mut sets.assigned } else { &mut sets.used };
            set.insert(name.clone());
        }
        ExprKind::Operator { op, operands } => match (op, operands.as_slice()) {
            (Operator::Assign, [target, value]) => {
                gather(target, sets, true);
                gather(value, sets, false);
            }
            (Operator::Index, [array, indices @ ..]) => {
                gather(array, sets, is_target);
                for index in indices {
                    gather(index, sets, false);
                }
            }
            // The selected component is not a variable.
            (Operator::Field, [record, _]) => gather(record, sets, is_target),
            (Operator::PreInc | Operator::PreDec | Operator::PostInc | Operator::PostDec, [operand]) => {
                gather(operand, sets, true);
                gather(operand, sets, false);
            }
            (_, operands) => {
                for operand in operands {
                    gather(operand, sets, false);
                }
            }
        },
        ExprKind::Function { args, .. } => {
            for arg in args {
                gather(arg, sets, false);
            }
        }
        ExprKind::Method { receiver, args, .. } => {
            gather(receiver, sets, false);
            for arg in args {
                gather(arg, sets, false);
            }
        }
        ExprKind::Component { value, .. } => gather(value, sets, false),
        ExprKind::Declaration { items, .. } => {
            for item in items {
                sets.declare(&item.name);
                if let Some(default) = &item.default {
                    gather(default, sets, false);
                }
            }
        }
        ExprKind::Literal { .. }
        | ExprKind::ArrayInitializer(_)
        | ExprKind::RecordInitializer { .. }
        | ExprKind::Ternary { .. } => {
            for child in expression.children() {
                gather(child, sets, false);
            }
        }
    }
}
