//! Expression nodes.

use std::fmt;

use crate::decl::{DeclRules, Declarator};
use crate::operators::{Fixity, Operator};

#[cfg(test)]
mod tests;

/// Lexical category of a literal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LiteralKind {
    Integer,
    Float,
    Boolean,
    Char,
    String,
    Null,
}

/// A node of an expression tree.
///
/// `pos` is the index of the node's first token in the normalized token
/// stream; operator nodes written between their operands (binary, ternary)
/// point at the operator token instead.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Expression {
    pub kind: ExprKind,
    pub pos: usize,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum ExprKind {
    /// Literal as written, quotes and suffixes included.
    Literal { kind: LiteralKind, text: String },
    Identifier(String),
    Operator {
        op: Operator,
        operands: Vec<Expression>,
    },
    /// Call of a plain routine `name(args)`.
    Function { name: String, args: Vec<Expression> },
    /// Call of a routine selected from a value, `receiver.name(args)`.
    Method {
        receiver: Box<Expression>,
        name: String,
        args: Vec<Expression>,
    },
    ArrayInitializer(Vec<Expression>),
    /// `Name{...}`; items are [`ExprKind::Component`]s for named values
    /// and plain expressions for positional ones.
    RecordInitializer {
        type_name: String,
        components: Vec<Expression>,
    },
    Component {
        name: String,
        value: Box<Expression>,
    },
    Ternary {
        cond: Box<Expression>,
        then: Box<Expression>,
        otherwise: Box<Expression>,
    },
    Declaration {
        rule: DeclRules,
        items: Vec<Declarator>,
        is_constant: bool,
    },
}

const TERNARY_PRECEDENCE: u8 = 13;

impl Expression {
    pub fn new(kind: ExprKind, pos: usize) -> Self {
        Expression { kind, pos }
    }

    pub fn literal(kind: LiteralKind, text: impl Into<String>, pos: usize) -> Self {
        Self::new(
            ExprKind::Literal {
                kind,
                text: text.into(),
            },
            pos,
        )
    }

    pub fn identifier(name: impl Into<String>, pos: usize) -> Self {
        Self::new(ExprKind::Identifier(name.into()), pos)
    }

    pub fn operator(op: Operator, operands: Vec<Expression>, pos: usize) -> Self {
        Self::new(ExprKind::Operator { op, operands }, pos)
    }

    pub fn binary(op: Operator, lhs: Expression, rhs: Expression, pos: usize) -> Self {
        Self::operator(op, vec![lhs, rhs], pos)
    }

    pub fn unary(op: Operator, operand: Expression, pos: usize) -> Self {
        Self::operator(op, vec![operand], pos)
    }

    /// The name if this is a bare identifier.
    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_operator(&self) -> Option<(Operator, &[Expression])> {
        match &self.kind {
            ExprKind::Operator { op, operands } => Some((*op, operands)),
            _ => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind, ExprKind::Literal { .. })
    }

    /// Whether the node can be assigned to: a variable, an indexed
    /// element or a record field.
    pub fn is_lvalue(&self) -> bool {
        match &self.kind {
            ExprKind::Identifier(_) => true,
            ExprKind::Operator { op, .. } => op.is_access(),
            _ => false,
        }
    }

    /// The variable an lvalue ultimately writes to, e.g. `a` for
    /// `a[i].b`.
    pub fn base_variable(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Identifier(name) => Some(name),
            ExprKind::Operator { op, operands } if op.is_access() => {
                operands.first().and_then(Expression::base_variable)
            }
            _ => None,
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&Expression> {
        match &self.kind {
            ExprKind::Literal { .. } | ExprKind::Identifier(_) => Vec::new(),
            ExprKind::Operator { operands, .. } => operands.iter().collect(),
            ExprKind::Function { args, .. } => args.iter().collect(),
            ExprKind::Method { receiver, args, .. } => {
                std::iter::once(receiver.as_ref()).chain(args).collect()
            }
            ExprKind::ArrayInitializer(items) => items.iter().collect(),
            ExprKind::RecordInitializer { components, .. } => components.iter().collect(),
            ExprKind::Component { value, .. } => vec![value.as_ref()],
            ExprKind::Ternary {
                cond,
                then,
                otherwise,
            } => vec![cond.as_ref(), then.as_ref(), otherwise.as_ref()],
            ExprKind::Declaration { items, .. } => {
                items.iter().filter_map(|item| item.default.as_ref()).collect()
            }
        }
    }

    /// Visit this node and all descendants in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Expression)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Binding strength of the node's outermost construct, on the scale
    /// of [`Operator::precedence`]. Atoms bind tightest.
    pub fn precedence(&self) -> u8 {
        match &self.kind {
            ExprKind::Operator { op, .. } => op.precedence(),
            ExprKind::Ternary { .. } => TERNARY_PRECEDENCE,
            _ => 0,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, parenthesize: bool) -> fmt::Result {
        if parenthesize {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expression]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Renders the tree as pseudocode with the fewest parentheses that keep
/// its structure.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Literal { text, .. } => f.write_str(text),
            ExprKind::Identifier(name) => f.write_str(name),
            ExprKind::Operator { op, operands } => fmt_operator(f, *op, operands),
            ExprKind::Function { name, args } => {
                write!(f, "{name}(")?;
                write_list(f, args)?;
                f.write_str(")")
            }
            ExprKind::Method {
                receiver,
                name,
                args,
            } => {
                receiver.fmt_operand(f, receiver.precedence() > 1)?;
                write!(f, ".{name}(")?;
                write_list(f, args)?;
                f.write_str(")")
            }
            ExprKind::ArrayInitializer(items) => {
                f.write_str("{")?;
                write_list(f, items)?;
                f.write_str("}")
            }
            ExprKind::RecordInitializer {
                type_name,
                components,
            } => {
                write!(f, "{type_name}{{")?;
                write_list(f, components)?;
                f.write_str("}")
            }
            ExprKind::Component { name, value } => write!(f, "{name}: {value}"),
            ExprKind::Ternary {
                cond,
                then,
                otherwise,
            } => {
                cond.fmt_operand(f, cond.precedence() >= TERNARY_PRECEDENCE)?;
                write!(f, " ? {then} : ")?;
                otherwise.fmt_operand(f, otherwise.precedence() > TERNARY_PRECEDENCE)
            }
            ExprKind::Declaration {
                rule,
                items,
                is_constant,
            } => {
                if *is_constant {
                    f.write_str("const ")?;
                }
                let separator = if rule.contains(DeclRules::GROUPS) { "; " } else { ", " };
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(separator)?;
                    }
                    item.fmt_with(f, *rule)?;
                }
                Ok(())
            }
        }
    }
}

fn fmt_operator(f: &mut fmt::Formatter<'_>, op: Operator, operands: &[Expression]) -> fmt::Result {
    let prec = op.precedence();
    match (op, operands) {
        (Operator::Index, [array, indices @ ..]) => {
            array.fmt_operand(f, array.precedence() > prec)?;
            f.write_str("[")?;
            write_list(f, indices)?;
            f.write_str("]")
        }
        (Operator::Field, [record, field]) => {
            record.fmt_operand(f, record.precedence() > prec)?;
            write!(f, ".{field}")
        }
        (_, [operand]) if op.fixity() == Fixity::Prefix => {
            f.write_str(op.as_symbol())?;
            // `- -a` must not render as `--a`.
            let nested_sign = matches!(
                operand.as_operator(),
                Some((inner, _)) if inner.fixity() == Fixity::Prefix
                    && inner.as_symbol().starts_with(op.as_symbol())
            );
            if nested_sign {
                f.write_str(" ")?;
            }
            operand.fmt_operand(f, operand.precedence() > prec)
        }
        (_, [operand]) => {
            operand.fmt_operand(f, operand.precedence() > prec)?;
            f.write_str(op.as_symbol())
        }
        (_, [lhs, rhs]) => {
            lhs.fmt_operand(f, lhs.precedence() > prec)?;
            write!(f, " {} ", op.as_symbol())?;
            rhs.fmt_operand(f, rhs.precedence() >= prec)
        }
        _ => {
            write!(f, "{}(", op.as_symbol())?;
            write_list(f, operands)?;
            f.write_str(")")
        }
    }
}
