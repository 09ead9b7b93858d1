//! Building [`Line`]s and expression trees from parse trees.
//!
//! The builder walks the tree left to right and keeps a running token
//! position, so every terminal is met exactly where the classifier put
//! it. Shape checks that the grammar cannot express (indexing a literal,
//! selecting a field of an initializer) are reported as semantic errors.

use nsd_grammar::line::{Prod, Term};
use nsd_grammar::{parse_line, Lexeme, Node};
use nsd_ir::{DeclRules, ExprKind, Expression, Extent, LiteralKind, Operator, TypeSpec};
use nsd_lexer_core::TokenList;
use nsd_types::{EnumItem, EnumType, RecordType, RedirType, Type, TypeRegistry};
use tracing::trace;

use crate::classify::classify;
use crate::declaration::parse_declaration;
use crate::error::ParseError;
use crate::line::{Line, LineKind};
use crate::stack::ensure_sufficient_stack;
use crate::types::{literal_type, named, resolve_spec, type_error, with_dimensions};

#[cfg(test)]
mod tests;

type BuildResult<T> = Result<T, ParseError>;

pub(crate) struct Builder<'a> {
    tokens: &'a TokenList,
    registry: &'a TypeRegistry,
    /// Index of the next token the walk expects.
    position: usize,
}

fn binary_operator(prod: Prod) -> Option<Operator> {
    let op = match prod {
        Prod::MulTimes => Operator::Mul,
        Prod::MulSlash => Operator::Div,
        Prod::MulDiv => Operator::IntDiv,
        Prod::MulMod | Prod::MulPercent => Operator::Mod,
        Prod::AddPlus => Operator::Add,
        Prod::AddMinus => Operator::Sub,
        Prod::ShiftLeft | Prod::ShiftShl => Operator::Shl,
        Prod::ShiftRight | Prod::ShiftShr => Operator::Shr,
        Prod::ShiftRightUnsigned => Operator::UShr,
        Prod::RelLt => Operator::Lt,
        Prod::RelGt => Operator::Gt,
        Prod::RelLtEq => Operator::LtEq,
        Prod::RelGtEq => Operator::GtEq,
        Prod::EqualsDouble | Prod::EqualsSingle => Operator::Eq,
        Prod::EqNotEq | Prod::EqLtGt => Operator::NotEq,
        Prod::AndAmp => Operator::BitAnd,
        Prod::XorCaret | Prod::XorWord => Operator::BitXor,
        Prod::IorPipe => Operator::BitOr,
        Prod::CondAndAmpAmp | Prod::CondAndWord => Operator::And,
        Prod::CondOrPipePipe | Prod::CondOrWord => Operator::Or,
        _ => return None,
    };
    Some(op)
}

fn prefix_operator(prod: Prod) -> Option<Operator> {
    let op = match prod {
        Prod::UnaryPlus => Operator::Plus,
        Prod::UnaryMinus => Operator::Neg,
        Prod::PreIncrement => Operator::PreInc,
        Prod::PreDecrement => Operator::PreDec,
        Prod::UnaryComplement => Operator::BitNot,
        Prod::UnaryBang | Prod::UnaryNot => Operator::Not,
        _ => return None,
    };
    Some(op)
}

fn literal_kind(term: Term) -> Option<LiteralKind> {
    let kind = match term {
        Term::DecLiteral | Term::HexLiteral | Term::OctLiteral | Term::BinLiteral => LiteralKind::Integer,
        Term::FloatLiteral => LiteralKind::Float,
        Term::BooleanLiteral => LiteralKind::Boolean,
        Term::CharLiteral => LiteralKind::Char,
        Term::StringLiteral => LiteralKind::String,
        Term::NullLiteral => LiteralKind::Null,
        _ => return None,
    };
    Some(kind)
}

/// Values that can be neither indexed nor have fields selected.
fn is_plain_value(expression: &Expression) -> bool {
    matches!(
        expression.kind,
        ExprKind::Literal { .. } | ExprKind::ArrayInitializer(_) | ExprKind::RecordInitializer { .. }
    )
}

impl<'a> Builder<'a> {
    pub(crate) fn new(tokens: &'a TokenList, registry: &'a TypeRegistry, start: usize) -> Self {
        Builder {
            tokens,
            registry,
            position: start,
        }
    }

    fn unexpected(&self, what: &str) -> ParseError {
        ParseError::semantic(format!("unexpected {what} in parse tree"), self.position)
    }

    fn production<'n>(&self, node: &'n Node) -> BuildResult<(Prod, &'n [Node])> {
        match node {
            Node::Reduction { production, children } => Ok((*production, children.as_slice())),
            Node::Terminal(_) => Err(self.unexpected("terminal")),
        }
    }

    /// Consume a terminal, returning its symbol, position and text.
    fn terminal(&mut self, node: &Node) -> BuildResult<(Term, usize, &'a str)> {
        let Node::Terminal(Lexeme { term, token, width }) = *node else {
            return Err(self.unexpected("reduction"));
        };
        if token != self.position {
            return Err(ParseError::semantic(
                format!("token position drifted: expected {}, found {token}", self.position),
                token,
            ));
        }
        self.position = token + width;
        let text = if width == 0 {
            ""
        } else {
            self.tokens.get(token).unwrap_or_default()
        };
        Ok((term, token, text))
    }

    fn identifier(&mut self, node: &Node) -> BuildResult<(String, usize)> {
        match self.terminal(node)? {
            (Term::Identifier, pos, text) => Ok((text.to_owned(), pos)),
            (_, pos, text) => Err(ParseError::semantic(format!("`{text}` is not a name"), pos)),
        }
    }

    // Lines

    pub(crate) fn line(&mut self, root: &Node) -> BuildResult<Line> {
        let (prod, children) = self.production(root)?;
        let [inner] = children else {
            return Err(self.unexpected("line shape"));
        };
        let line = match prod {
            Prod::LineAssignment => Line::new(LineKind::Assignment, vec![self.assignment(inner)?]),
            Prod::LineVarInit => self.var_init(inner)?,
            Prod::LineInput => self.input(inner)?,
            Prod::LineOutput => {
                let (_, parts) = self.production(inner)?;
                let values = match parts {
                    [key] => {
                        self.terminal(key)?;
                        Vec::new()
                    }
                    [key, list] => {
                        self.terminal(key)?;
                        self.expression_list(list)?
                    }
                    _ => return Err(self.unexpected("output shape")),
                };
                Line::new(LineKind::Output, values)
            }
            Prod::LineVarDecl => {
                let (name, spec) = self.var_declaration(inner)?;
                let ty = resolve_spec(&spec, self.registry).map_err(|e| type_error(&e, name.pos))?;
                Line::new(LineKind::VarDecl, vec![name]).with_type(Some(ty))
            }
            Prod::LineConst => self.constant(inner)?,
            Prod::LineType => self.type_definition(inner)?,
            Prod::LineCondition => {
                let (_, parts) = self.production(inner)?;
                let [key, condition] = parts else {
                    return Err(self.unexpected("condition shape"));
                };
                self.terminal(key)?;
                Line::new(LineKind::Condition, vec![self.expression(condition)?])
            }
            Prod::LineFor => self.for_header(inner)?,
            Prod::LineForIn => {
                let (_, parts) = self.production(inner)?;
                let [key, var, in_key, values] = parts else {
                    return Err(self.unexpected("foreach shape"));
                };
                self.terminal(key)?;
                let (name, pos) = self.identifier(var)?;
                self.terminal(in_key)?;
                let collection = self.expression(values)?;
                Line::new(
                    LineKind::ForeachLoop,
                    vec![Expression::identifier(name, pos), collection],
                )
            }
            Prod::LineJump => self.jump(inner)?,
            Prod::LineCall => self.call(inner)?,
            Prod::LineCatch => self.catch(inner)?,
            Prod::LineCaseDiscriminator => {
                let (_, parts) = self.production(inner)?;
                let [key, value] = parts else {
                    return Err(self.unexpected("case shape"));
                };
                self.terminal(key)?;
                Line::new(LineKind::Case, vec![self.expression(value)?])
            }
            Prod::LineCaseSelectors => {
                let (_, parts) = self.production(inner)?;
                let [key, list] = parts else {
                    return Err(self.unexpected("selector shape"));
                };
                self.terminal(key)?;
                Line::new(LineKind::Selector, self.expression_list(list)?)
            }
            Prod::LineCaseDefault => {
                self.terminal(inner)?;
                Line::new(LineKind::Default, Vec::new())
            }
            _ => return Err(self.unexpected("line production")),
        };
        trace!(%line, "line built");
        Ok(line)
    }

    /// `lhs <- value` from an `Assignment` node.
    fn assignment(&mut self, node: &Node) -> BuildResult<Expression> {
        let (_, parts) = self.production(node)?;
        let [target, op, value] = parts else {
            return Err(self.unexpected("assignment shape"));
        };
        let target = self.expression(target)?;
        let pos = self.assignment_operator(op)?;
        let value = self.expression(value)?;
        Ok(Expression::binary(Operator::Assign, target, value, pos))
    }

    fn assignment_operator(&mut self, node: &Node) -> BuildResult<usize> {
        let (_, parts) = self.production(node)?;
        let [op] = parts else {
            return Err(self.unexpected("assignment operator"));
        };
        Ok(self.terminal(op)?.1)
    }

    fn var_init(&mut self, node: &Node) -> BuildResult<Line> {
        let (prod, parts) = self.production(node)?;
        match (prod, parts) {
            (Prod::VarInitDeclared, [declaration, op, value]) => {
                let (name, spec) = self.var_declaration(declaration)?;
                let ty = resolve_spec(&spec, self.registry).map_err(|e| type_error(&e, name.pos))?;
                let pos = self.assignment_operator(op)?;
                let value = self.expression(value)?;
                Ok(Line::new(LineKind::VarInit, vec![Expression::binary(Operator::Assign, name, value, pos)])
                    .with_type(Some(ty)))
            }
            (Prod::VarInitTyped, [description, array_decl, op, value]) => {
                let spec = self.type_description(description)?;
                let base = resolve_spec(&spec, self.registry)
                    .map_err(|e| type_error(&e, node.first_token().unwrap_or(self.position)))?;
                let (target, dimensions) = self.array_declarator(array_decl)?;
                let ty = with_dimensions(base, &dimensions).map_err(|e| type_error(&e, target.pos))?;
                let pos = self.assignment_operator(op)?;
                let value = self.expression(value)?;
                Ok(Line::new(LineKind::VarInit, vec![Expression::binary(Operator::Assign, target, value, pos)])
                    .with_type(Some(ty)))
            }
            _ => Err(self.unexpected("initialisation shape")),
        }
    }

    /// `name[d1][d2]`: the target expression and the dimension sizes.
    fn array_declarator(&mut self, node: &Node) -> BuildResult<(Expression, Vec<Expression>)> {
        let (_, parts) = self.production(node)?;
        let [name, list] = parts else {
            return Err(self.unexpected("array declarator"));
        };
        let (name, pos) = self.identifier(name)?;
        let mut dimensions = Vec::new();
        self.dimensions(list, &mut dimensions)?;
        let target = Expression::identifier(name, pos);
        if dimensions.is_empty() {
            return Ok((target, dimensions));
        }
        let mut operands = Vec::with_capacity(dimensions.len() + 1);
        operands.push(target);
        operands.extend(dimensions.iter().cloned());
        Ok((Expression::operator(Operator::Index, operands, pos), dimensions))
    }

    fn dimensions(&mut self, node: &Node, out: &mut Vec<Expression>) -> BuildResult<()> {
        let (prod, parts) = self.production(node)?;
        match (prod, parts) {
            (Prod::DimensionsNone, []) => Ok(()),
            (Prod::DimensionsMore, [rest, dimension]) => {
                self.dimensions(rest, out)?;
                let (_, inner) = self.production(dimension)?;
                let [open, size, close] = inner else {
                    return Err(self.unexpected("dimension"));
                };
                self.terminal(open)?;
                out.push(self.expression(size)?);
                self.terminal(close)?;
                Ok(())
            }
            _ => Err(self.unexpected("dimension list")),
        }
    }

    /// `var x: T` or `dim x as T`.
    fn var_declaration(&mut self, node: &Node) -> BuildResult<(Expression, TypeSpec)> {
        let (_, parts) = self.production(node)?;
        let [key, name, separator, description] = parts else {
            return Err(self.unexpected("declaration shape"));
        };
        self.terminal(key)?;
        let (name, pos) = self.identifier(name)?;
        self.terminal(separator)?;
        let spec = self.type_description(description)?;
        Ok((Expression::identifier(name, pos), spec))
    }

    fn constant(&mut self, node: &Node) -> BuildResult<Line> {
        let (_, parts) = self.production(node)?;
        let (key, name, spec, op, value) = match parts {
            [key, name, op, value] => (key, name, None, op, value),
            [key, name, separator, description, op, value] => (key, name, Some((separator, description)), op, value),
            _ => return Err(self.unexpected("constant shape")),
        };
        self.terminal(key)?;
        let (name, pos) = self.identifier(name)?;
        let declared = match spec {
            Some((separator, description)) => {
                self.terminal(separator)?;
                let spec = self.type_description(description)?;
                Some(resolve_spec(&spec, self.registry).map_err(|e| type_error(&e, pos))?)
            }
            None => None,
        };
        let assign = self.assignment_operator(op)?;
        let value = self.expression(value)?;
        let ty = declared.or_else(|| literal_type(&value));
        Ok(Line::new(
            LineKind::ConstDef,
            vec![Expression::binary(Operator::Assign, Expression::identifier(name, pos), value, assign)],
        )
        .with_type(ty))
    }

    // Type definitions

    fn type_definition(&mut self, node: &Node) -> BuildResult<Line> {
        let (_, parts) = self.production(node)?;
        let [key, name, eq, construction] = parts else {
            return Err(self.unexpected("type definition shape"));
        };
        self.terminal(key)?;
        let (name, pos) = self.identifier(name)?;
        self.terminal(eq)?;
        let identifier = Expression::identifier(name.clone(), pos);

        let (prod, parts) = self.production(construction)?;
        match (prod, parts) {
            (Prod::ConstructAlias, [description]) => {
                let spec = self.type_description(description)?;
                let ty = match &spec {
                    TypeSpec::Named { name: target, dims: 0 } => {
                        RedirType::new(&name, target, self.registry).map(Type::Redirect)
                    }
                    _ => resolve_spec(&spec, self.registry).and_then(|ty| named(&name, ty)),
                }
                .map_err(|e| type_error(&e, pos))?;
                Ok(Line::new(LineKind::TypeDef, vec![identifier]).with_type(Some(ty)))
            }
            (Prod::ConstructRecord, [record, open, components, close]) => {
                self.terminal(record)?;
                let (_, from, _) = self.terminal(open)?;
                // The components are re-read as a declaration so records
                // share one representation with parameter lists.
                self.skip(components);
                let (_, to, _) = self.terminal(close)?;
                let declaration = parse_declaration(
                    self.tokens,
                    from + 1,
                    to,
                    DeclRules::PASCAL_TYPED | DeclRules::BASIC_TYPED | DeclRules::GROUPS | DeclRules::LISTS,
                    self.registry,
                )?;
                let ExprKind::Declaration { items, .. } = &declaration.kind else {
                    return Err(self.unexpected("record components"));
                };
                let mut fields = Vec::with_capacity(items.len());
                for item in items {
                    let ty = match &item.type_spec {
                        Some(spec) => resolve_spec(spec, self.registry).map_err(|e| type_error(&e, item.pos))?,
                        None => Type::Dummy,
                    };
                    fields.push((item.name.clone(), ty));
                }
                let record = RecordType::new(Some(&name), fields).map_err(|e| type_error(&e, pos))?;
                Ok(Line::new(LineKind::TypeDef, vec![identifier, declaration]).with_type(Some(Type::Record(record))))
            }
            (Prod::ConstructEnum, [key, open, list, close]) => {
                self.terminal(key)?;
                self.terminal(open)?;
                let mut items = Vec::new();
                self.enum_items(list, &mut items)?;
                self.terminal(close)?;
                let ty = EnumType::new(Some(&name), items).map_err(|e| type_error(&e, pos))?;
                Ok(Line::new(LineKind::TypeDef, vec![identifier]).with_type(Some(Type::Enum(ty))))
            }
            _ => Err(self.unexpected("type construction")),
        }
    }

    fn enum_items(&mut self, node: &Node, out: &mut Vec<EnumItem>) -> BuildResult<()> {
        let (prod, parts) = self.production(node)?;
        match (prod, parts) {
            (Prod::EnumsOne, [item]) => self.enum_item(item, out),
            (Prod::EnumsMore, [rest, comma, item]) => {
                self.enum_items(rest, out)?;
                self.terminal(comma)?;
                self.enum_item(item, out)
            }
            _ => Err(self.unexpected("enum list")),
        }
    }

    fn enum_item(&mut self, node: &Node, out: &mut Vec<EnumItem>) -> BuildResult<()> {
        let (_, parts) = self.production(node)?;
        let (name, value) = match parts {
            [name] => (self.identifier(name)?, None),
            [name, eq, value] => {
                let name = self.identifier(name)?;
                self.terminal(eq)?;
                (name, Some(self.expression(value)?))
            }
            _ => return Err(self.unexpected("enum item")),
        };
        if out.iter().any(|item| item.name == name.0) {
            return Err(ParseError::semantic(format!("duplicate enum item `{}`", name.0), name.1));
        }
        out.push(EnumItem { name: name.0, value });
        Ok(())
    }

    /// Advance past every terminal under `node` without building anything.
    fn skip(&mut self, node: &Node) {
        match node {
            Node::Terminal(lexeme) => self.position = lexeme.token + lexeme.width,
            Node::Reduction { children, .. } => children.iter().for_each(|child| self.skip(child)),
        }
    }

    pub(crate) fn type_description(&mut self, node: &Node) -> BuildResult<TypeSpec> {
        let (prod, parts) = self.production(node)?;
        match (prod, parts) {
            (Prod::DescribeNamed, [name, dims]) => {
                let (name, _) = self.identifier(name)?;
                let dims = self.bracket_pairs(dims)?;
                Ok(TypeSpec::Named { name, dims })
            }
            (Prod::DescribeArrayOf, [array_of, element]) => {
                let extents = self.array_of(array_of)?;
                let element = self.type_description(element)?;
                Ok(element.array_of(extents))
            }
            _ => Err(self.unexpected("type description")),
        }
    }

    fn bracket_pairs(&mut self, node: &Node) -> BuildResult<usize> {
        let (prod, parts) = self.production(node)?;
        match (prod, parts) {
            (Prod::DimsNone, []) => Ok(0),
            (Prod::DimsMore, [rest, brackets]) => {
                let count = self.bracket_pairs(rest)?;
                self.terminal(brackets)?;
                Ok(count + 1)
            }
            _ => Err(self.unexpected("bracket pairs")),
        }
    }

    fn array_of(&mut self, node: &Node) -> BuildResult<Vec<Extent>> {
        let (prod, parts) = self.production(node)?;
        match (prod, parts) {
            (Prod::ArrayOfPlain, [array, of]) => {
                self.terminal(array)?;
                self.terminal(of)?;
                Ok(Vec::new())
            }
            (Prod::ArrayOfRanged, [array, open, ranges, close, of]) => {
                self.terminal(array)?;
                self.terminal(open)?;
                let mut extents = Vec::new();
                self.ranges(ranges, &mut extents)?;
                self.terminal(close)?;
                self.terminal(of)?;
                Ok(extents)
            }
            _ => Err(self.unexpected("array description")),
        }
    }

    fn ranges(&mut self, node: &Node, out: &mut Vec<Extent>) -> BuildResult<()> {
        let (prod, parts) = self.production(node)?;
        let range = match (prod, parts) {
            (Prod::RangesOne, [range]) => range,
            (Prod::RangesMore, [rest, comma, range]) => {
                self.ranges(rest, out)?;
                self.terminal(comma)?;
                range
            }
            _ => return Err(self.unexpected("range list")),
        };
        let (prod, parts) = self.production(range)?;
        let extent = match (prod, parts) {
            (Prod::RangeSize, [size]) => Extent::Size(self.expression(size)?),
            (Prod::RangeBounds, [low, dots, high]) => {
                let low = self.expression(low)?;
                self.terminal(dots)?;
                Extent::Range(low, self.expression(high)?)
            }
            _ => return Err(self.unexpected("range")),
        };
        out.push(extent);
        Ok(())
    }

    // Element headers

    fn input(&mut self, node: &Node) -> BuildResult<Line> {
        let (prod, parts) = self.production(node)?;
        match (prod, parts) {
            (Prod::InputBare, [key]) => {
                self.terminal(key)?;
                Ok(Line {
                    expressions: vec![None],
                    ..Line::new(LineKind::Input, Vec::new())
                })
            }
            (Prod::InputTargets | Prod::InputUnprompted, [key, rest @ ..]) => {
                self.terminal(key)?;
                let (prompt, targets) = match rest {
                    [prompt, targets] => (Some(self.prompt(prompt)?), targets),
                    [targets] => (None, targets),
                    _ => return Err(self.unexpected("input shape")),
                };
                let mut expressions = vec![prompt];
                let mut list = Vec::new();
                self.target_list(targets, &mut list)?;
                expressions.extend(list.into_iter().map(Some));
                Ok(Line {
                    expressions,
                    ..Line::new(LineKind::Input, Vec::new())
                })
            }
            _ => Err(self.unexpected("input shape")),
        }
    }

    fn prompt(&mut self, node: &Node) -> BuildResult<Expression> {
        let (_, parts) = self.production(node)?;
        let [text, rest @ ..] = parts else {
            return Err(self.unexpected("prompt"));
        };
        let (_, pos, text) = self.terminal(text)?;
        for comma in rest {
            self.terminal(comma)?;
        }
        Ok(Expression::literal(LiteralKind::String, text, pos))
    }

    fn target_list(&mut self, node: &Node, out: &mut Vec<Expression>) -> BuildResult<()> {
        let (prod, parts) = self.production(node)?;
        match (prod, parts) {
            (Prod::TargetsOne, [target]) => {
                out.push(self.expression(target)?);
                Ok(())
            }
            (Prod::TargetsMore, [rest, comma, target]) => {
                self.target_list(rest, out)?;
                self.terminal(comma)?;
                out.push(self.expression(target)?);
                Ok(())
            }
            _ => Err(self.unexpected("target list")),
        }
    }

    fn for_header(&mut self, node: &Node) -> BuildResult<Line> {
        let (_, parts) = self.production(node)?;
        let [key, var, op, start, to, end, step] = parts else {
            return Err(self.unexpected("for shape"));
        };
        self.terminal(key)?;
        let (name, pos) = self.identifier(var)?;
        let assign = self.assignment_operator(op)?;
        let start = self.expression(start)?;
        self.terminal(to)?;
        let end = self.expression(end)?;
        let step = self.step(step)?;
        Ok(Line::new(
            LineKind::ForLoop,
            vec![
                Expression::binary(Operator::Assign, Expression::identifier(name, pos), start, assign),
                end,
                step,
            ],
        ))
    }

    /// The step width as a signed literal; `1` when omitted.
    fn step(&mut self, node: &Node) -> BuildResult<Expression> {
        let (prod, parts) = self.production(node)?;
        let (sign, pos, literal) = match (prod, parts) {
            (Prod::StepNone, []) => return Ok(Expression::literal(LiteralKind::Integer, "1", self.position)),
            (Prod::StepPlain, [key, literal]) => {
                self.terminal(key)?;
                ("", None, literal)
            }
            (Prod::StepNegative | Prod::StepPositive, [key, sign, literal]) => {
                self.terminal(key)?;
                let (_, pos, text) = self.terminal(sign)?;
                (if text == "-" { "-" } else { "" }, Some(pos), literal)
            }
            _ => return Err(self.unexpected("step clause")),
        };
        let value = self.expression(literal)?;
        let text = format!("{sign}{value}");
        Ok(Expression::literal(LiteralKind::Integer, text, pos.unwrap_or(value.pos)))
    }

    fn jump(&mut self, node: &Node) -> BuildResult<Line> {
        let (prod, parts) = self.production(node)?;
        let kind = match prod {
            Prod::ReturnBare | Prod::ReturnValue => LineKind::Return,
            Prod::ExitBare | Prod::ExitValue => LineKind::Exit,
            Prod::LeaveBare | Prod::LeaveLevels => LineKind::Leave,
            Prod::Throw => LineKind::Throw,
            _ => return Err(self.unexpected("jump")),
        };
        let (key, value) = match parts {
            [key] => (key, None),
            [key, value] => (key, Some(value)),
            _ => return Err(self.unexpected("jump shape")),
        };
        self.terminal(key)?;
        let expressions = match value {
            Some(value) => vec![self.expression(value)?],
            None => Vec::new(),
        };
        Ok(Line::new(kind, expressions))
    }

    fn call(&mut self, node: &Node) -> BuildResult<Line> {
        let (prod, parts) = self.production(node)?;
        let expression = match (prod, parts) {
            (Prod::CallRoutine, [key, invocation]) => {
                self.terminal(key)?;
                self.expression(invocation)?
            }
            (Prod::CallAssigned, [key, target, op, invocation]) => {
                self.terminal(key)?;
                let target = self.expression(target)?;
                let pos = self.assignment_operator(op)?;
                let call = self.expression(invocation)?;
                Expression::binary(Operator::Assign, target, call, pos)
            }
            _ => return Err(self.unexpected("call shape")),
        };
        Ok(Line::new(LineKind::RoutineCall, vec![expression]))
    }

    fn catch(&mut self, node: &Node) -> BuildResult<Line> {
        let (prod, parts) = self.production(node)?;
        let (variable, spec) = match (prod, parts) {
            (Prod::CatchName, [key, name]) => {
                self.terminal(key)?;
                (self.identifier(name)?, None)
            }
            (Prod::CatchColon | Prod::CatchAs, [key, name, separator, description]) => {
                self.terminal(key)?;
                let name = self.identifier(name)?;
                self.terminal(separator)?;
                (name, Some(self.type_description(description)?))
            }
            (Prod::CatchTyped, [key, description, name]) => {
                self.terminal(key)?;
                let spec = self.type_description(description)?;
                (self.identifier(name)?, Some(spec))
            }
            _ => return Err(self.unexpected("catch shape")),
        };
        let (name, pos) = variable;
        let ty = spec
            .map(|spec| resolve_spec(&spec, self.registry))
            .transpose()
            .map_err(|e| type_error(&e, pos))?;
        Ok(Line::new(LineKind::Catch, vec![Expression::identifier(name, pos)]).with_type(ty))
    }

    // Expressions

    /// Flatten a left-recursive `ExpressionList`.
    pub(crate) fn expression_list(&mut self, node: &Node) -> BuildResult<Vec<Expression>> {
        let mut items = Vec::new();
        self.collect_list(node, &mut items)?;
        Ok(items)
    }

    fn collect_list(&mut self, node: &Node, out: &mut Vec<Expression>) -> BuildResult<()> {
        let (prod, parts) = self.production(node)?;
        match (prod, parts) {
            (Prod::ExpressionListOne, [item]) => out.push(self.expression(item)?),
            (Prod::ExpressionListMore, [rest, comma, item]) => {
                ensure_sufficient_stack(|| self.collect_list(rest, out))?;
                self.terminal(comma)?;
                out.push(self.expression(item)?);
            }
            _ => return Err(self.unexpected("expression list")),
        }
        Ok(())
    }

    pub(crate) fn expression(&mut self, node: &Node) -> BuildResult<Expression> {
        ensure_sufficient_stack(|| self.expression_inner(node))
    }

    fn expression_inner(&mut self, node: &Node) -> BuildResult<Expression> {
        if let Node::Terminal(_) = node {
            return self.atom(node);
        }
        let (prod, parts) = self.production(node)?;

        if let Some(op) = binary_operator(prod) {
            let [lhs, symbol, rhs] = parts else {
                return Err(self.unexpected("binary shape"));
            };
            let lhs = self.expression(lhs)?;
            let (_, pos, _) = self.terminal(symbol)?;
            let rhs = self.expression(rhs)?;
            return Ok(Expression::binary(op, lhs, rhs, pos));
        }
        if let Some(op) = prefix_operator(prod) {
            let [symbol, operand] = parts else {
                return Err(self.unexpected("prefix shape"));
            };
            let (_, pos, _) = self.terminal(symbol)?;
            return Ok(Expression::unary(op, self.expression(operand)?, pos));
        }

        match (prod, parts) {
            (Prod::PostIncrement | Prod::PostDecrement, [operand_node, symbol]) => {
                let operand = self.expression(operand_node)?;
                self.terminal(symbol)?;
                let op = if prod == Prod::PostIncrement {
                    Operator::PostInc
                } else {
                    Operator::PostDec
                };
                let pos = operand_node.first_token().unwrap_or(operand.pos);
                Ok(Expression::unary(op, operand, pos))
            }
            (Prod::PrimaryParens, [open, inner, close]) => {
                self.terminal(open)?;
                let inner = self.expression(inner)?;
                self.terminal(close)?;
                Ok(inner)
            }
            (Prod::QualifiedName | Prod::FieldAccess, [record, dot, field]) => {
                let record = self.expression(record)?;
                if is_plain_value(&record) {
                    return Err(ParseError::semantic(
                        format!("cannot select a field of `{record}`"),
                        record.pos,
                    ));
                }
                let (_, pos, _) = self.terminal(dot)?;
                let (field, field_pos) = self.identifier(field)?;
                Ok(Expression::binary(
                    Operator::Field,
                    record,
                    Expression::identifier(field, field_pos),
                    pos,
                ))
            }
            (Prod::IndexName | Prod::IndexPrimary, [array, open, indices, close]) => {
                let array = self.expression(array)?;
                if is_plain_value(&array) {
                    return Err(ParseError::semantic(format!("cannot index into `{array}`"), array.pos));
                }
                let (_, pos, _) = self.terminal(open)?;
                let indices = self.expression_list(indices)?;
                self.terminal(close)?;
                let mut operands = Vec::with_capacity(indices.len() + 1);
                operands.push(array);
                operands.extend(indices);
                Ok(Expression::operator(Operator::Index, operands, pos))
            }
            (Prod::RoutineArgs | Prod::RoutineNoArgs, [callee_node, open, rest @ ..]) => {
                let callee = self.expression(callee_node)?;
                let pos = callee_node.first_token().unwrap_or(callee.pos);
                let args = self.arguments(open, rest)?;
                match callee.kind {
                    ExprKind::Identifier(name) => Ok(Expression::new(ExprKind::Function { name, args }, pos)),
                    ExprKind::Operator {
                        op: Operator::Field,
                        operands,
                    } => {
                        let [receiver, method]: [Expression; 2] = operands
                            .try_into()
                            .map_err(|_| self.unexpected("qualified name"))?;
                        let name = method.as_identifier().unwrap_or_default().to_owned();
                        Ok(Expression::new(
                            ExprKind::Method {
                                receiver: Box::new(receiver),
                                name,
                                args,
                            },
                            pos,
                        ))
                    }
                    _ => Err(self.unexpected("routine name")),
                }
            }
            (Prod::MethodArgs | Prod::MethodNoArgs, [receiver_node, dot, name, open, rest @ ..]) => {
                let receiver = self.expression(receiver_node)?;
                let pos = receiver_node.first_token().unwrap_or(receiver.pos);
                self.terminal(dot)?;
                let (name, _) = self.identifier(name)?;
                let args = self.arguments(open, rest)?;
                Ok(Expression::new(
                    ExprKind::Method {
                        receiver: Box::new(receiver),
                        name,
                        args,
                    },
                    pos,
                ))
            }
            (Prod::ArrayInitList | Prod::ArrayInitEmpty, [open, rest @ ..]) => {
                let (_, pos, _) = self.terminal(open)?;
                let items = match rest {
                    [list, close] => {
                        let items = self.expression_list(list)?;
                        self.terminal(close)?;
                        items
                    }
                    [close] => {
                        self.terminal(close)?;
                        Vec::new()
                    }
                    _ => return Err(self.unexpected("array initializer")),
                };
                Ok(Expression::new(ExprKind::ArrayInitializer(items), pos))
            }
            (Prod::RecordInitComponents | Prod::RecordInitEmpty, [name, open, rest @ ..]) => {
                let (type_name, pos) = self.identifier(name)?;
                self.terminal(open)?;
                let components = match rest {
                    [components, close] => {
                        let components = self.components(components)?;
                        self.terminal(close)?;
                        components
                    }
                    [close] => {
                        self.terminal(close)?;
                        Vec::new()
                    }
                    _ => return Err(self.unexpected("record initializer")),
                };
                Ok(Expression::new(ExprKind::RecordInitializer { type_name, components }, pos))
            }
            (Prod::ConditionalTernary, [cond, question, then, colon, otherwise]) => {
                let cond = self.expression(cond)?;
                let (_, pos, _) = self.terminal(question)?;
                let then = self.expression(then)?;
                self.terminal(colon)?;
                let otherwise = self.expression(otherwise)?;
                Ok(Expression::new(
                    ExprKind::Ternary {
                        cond: Box::new(cond),
                        then: Box::new(then),
                        otherwise: Box::new(otherwise),
                    },
                    pos,
                ))
            }
            (_, [only]) => self.expression(only),
            _ => Err(self.unexpected("expression production")),
        }
    }

    /// `( list? )` after a routine or method name.
    fn arguments(&mut self, open: &Node, rest: &[Node]) -> BuildResult<Vec<Expression>> {
        self.terminal(open)?;
        match rest {
            [list, close] => {
                let args = self.expression_list(list)?;
                self.terminal(close)?;
                Ok(args)
            }
            [close] => {
                self.terminal(close)?;
                Ok(Vec::new())
            }
            _ => Err(self.unexpected("argument list")),
        }
    }

    fn components(&mut self, node: &Node) -> BuildResult<Vec<Expression>> {
        let (prod, parts) = self.production(node)?;
        let mut out = Vec::new();
        match (prod, parts) {
            (Prod::ComponentsNamed, [named]) => self.named_components(named, &mut out)?,
            (Prod::ComponentsPositional, [list]) => out = self.expression_list(list)?,
            (Prod::ComponentsMixed, [list, comma, named]) => {
                out = self.expression_list(list)?;
                self.terminal(comma)?;
                self.named_components(named, &mut out)?;
            }
            _ => return Err(self.unexpected("record components")),
        }
        Ok(out)
    }

    fn named_components(&mut self, node: &Node, out: &mut Vec<Expression>) -> BuildResult<()> {
        let (prod, parts) = self.production(node)?;
        let component = match (prod, parts) {
            (Prod::ComponentInitOne, [component]) => component,
            (Prod::ComponentInitMore, [rest, comma, component]) => {
                self.named_components(rest, out)?;
                self.terminal(comma)?;
                component
            }
            _ => return Err(self.unexpected("component list")),
        };
        let (_, parts) = self.production(component)?;
        let [name, colon, value] = parts else {
            return Err(self.unexpected("component"));
        };
        let (name, pos) = self.identifier(name)?;
        self.terminal(colon)?;
        let value = self.expression(value)?;
        out.push(Expression::new(
            ExprKind::Component {
                name,
                value: Box::new(value),
            },
            pos,
        ));
        Ok(())
    }

    fn atom(&mut self, node: &Node) -> BuildResult<Expression> {
        let (term, pos, text) = self.terminal(node)?;
        if term == Term::Identifier {
            return Ok(Expression::identifier(text, pos));
        }
        match literal_kind(term) {
            Some(kind) => Ok(Expression::literal(kind, text, pos)),
            None => Err(ParseError::semantic(format!("unexpected `{text}`"), pos)),
        }
    }
}

/// Lexemes for reading `from..to` as a bare expression list.
///
/// A zero-width output marker in front lets the line grammar accept the
/// list through its output production.
pub(crate) fn expression_lexemes(tokens: &TokenList, from: usize, to: usize) -> Vec<Lexeme> {
    let mut lexemes = vec![Lexeme::new(Term::OutputKey, from).with_width(0)];
    lexemes.extend(classify(tokens, from, to));
    lexemes
}

/// Build the expression list from a tree produced by [`expression_lexemes`].
pub(crate) fn build_expressions(
    tokens: &TokenList,
    registry: &TypeRegistry,
    from: usize,
    tree: &Node,
) -> BuildResult<Vec<Expression>> {
    let line = Builder::new(tokens, registry, from).line(tree)?;
    Ok(line.expressions.into_iter().flatten().collect())
}

/// Parse `from..to` as a comma-separated expression list, without a
/// rendered diagnostic on failure.
pub(crate) fn expressions_in(
    tokens: &TokenList,
    from: usize,
    to: usize,
    registry: &TypeRegistry,
) -> BuildResult<Vec<Expression>> {
    let lexemes = expression_lexemes(tokens, from, to);
    let tree = parse_line(&lexemes).map_err(|failure| {
        let position = failure.found.map_or(to, |lexeme| lexeme.token);
        ParseError::Syntax {
            message: format!("`{}` is not an expression list", tokens.sub_sequence(from, to)),
            position,
            column: tokens.column_of(position),
        }
    })?;
    build_expressions(tokens, registry, from, &tree)
}
