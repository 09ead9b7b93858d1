//! Declaration disambiguation.
//!
//! Parameter lists and record components come in several dialects:
//!
//! ```text
//! a: int; b, c: double      Pascal, grouped
//! a as int, b as double     Basic
//! int a, b[5] = {}          C, with defaults
//! a, b                      untyped
//! ```
//!
//! [`parse_declaration`] narrows the set of dialects the caller accepts by
//! looking for landmarks in a fixed order: `;` groups, then `:` or `as`
//! type separators, then `=` defaults, then `,` lists. It never
//! backtracks; the first landmark that leaves no dialect standing is the
//! error.

use nsd_ir::{DeclRules, Declarator, ExprKind, Expression, Extent, TypeSpec};
use nsd_lexer_core::{is_identifier, TokenList};
use nsd_types::TypeRegistry;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, trace};

use crate::build::expressions_in;


#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DeclarationError {
    #[error("empty declaration")]
    Empty(usize),

    #[error("unexpected `{landmark}` in declaration")]
    Landmark { landmark: String, position: usize },

    #[error("{message}")]
    Malformed { message: String, position: usize },

    #[error("bad expression in declaration: {message}")]
    Expression { message: String, position: usize },

    #[error("unknown type `{name}`")]
    UnknownType { name: String, position: usize },
}

impl DeclarationError {
    /// Token index the error refers to.
    pub fn position(&self) -> usize {
        match self {
            DeclarationError::Empty(position)
            | DeclarationError::Landmark { position, .. }
            | DeclarationError::Malformed { position, .. }
            | DeclarationError::Expression { position, .. }
            | DeclarationError::UnknownType { position, .. } => *position,
        }
    }
}

type Split = SmallVec<[usize; 8]>;

/// Parse `tokens[from..to]` as a declaration in any of the `expected`
/// dialects, producing an [`ExprKind::Declaration`].
///
/// A leading `const` marks the whole declaration constant; a `var` or
/// `dim` at the start of a group is skipped. Type names must be known to `registry`.
pub fn parse_declaration(
    tokens: &TokenList,
    from: usize,
    to: usize,
    expected: DeclRules,
    registry: &TypeRegistry,
) -> Result<Expression, DeclarationError> {
    let to = to.min(tokens.token_count());
    let mut parser = DeclParser {
        tokens,
        registry,
        rule: expected,
        used: DeclRules::empty(),
    };
    let mut start = from;
    let is_constant = parser.is_word(start, "const");
    if is_constant {
        start += 1;
    }
    if start >= to {
        return Err(DeclarationError::Empty(from));
    }

    let groups = parser.split(start, to, |t| t == ";");
    if groups.len() > 2 {
        parser.require(DeclRules::GROUPS, ";", groups[1] - 1)?;
    }

    let mut items = Vec::new();
    for window in groups.windows(2) {
        let (mut group_from, group_to) = (window[0], window[1] - 1);
        if parser.is_word(group_from, "var") || parser.is_word(group_from, "dim") {
            group_from += 1;
        }
        parser.group(group_from, group_to, &mut items)?;
    }

    let rule = (parser.rule & DeclRules::TYPE_DIALECTS) | parser.used;
    debug!(?rule, items = items.len(), "declaration parsed");
    Ok(Expression::new(
        ExprKind::Declaration {
            rule,
            items,
            is_constant,
        },
        from,
    ))
}

/// Read `tokens[from..to]` as a single type description such as
/// `int[]` or `array[1..3] of Person`.
pub(crate) fn parse_type_spec(
    tokens: &TokenList,
    from: usize,
    to: usize,
    registry: &TypeRegistry,
) -> Result<TypeSpec, DeclarationError> {
    let parser = DeclParser {
        tokens,
        registry,
        rule: DeclRules::all(),
        used: DeclRules::empty(),
    };
    parser.type_spec(from, to.min(tokens.token_count()))
}

struct DeclParser<'a> {
    tokens: &'a TokenList,
    registry: &'a TypeRegistry,
    /// Dialects still possible.
    rule: DeclRules,
    /// Structural rules actually met.
    used: DeclRules,
}

impl DeclParser<'_> {
    fn text(&self, i: usize) -> &str {
        self.tokens.get(i).unwrap_or_default()
    }

    fn is_word(&self, i: usize, word: &str) -> bool {
        self.text(i).eq_ignore_ascii_case(word)
    }

    /// Boundaries of the top-level pieces of `from..to` separated by
    /// tokens matching `is_separator`: `[from, sep1 + 1, .., to + 1]`.
    /// Each piece `k` spans `b[k]..b[k + 1] - 1`, the last one `b[k]..to`.
    fn split(&self, from: usize, to: usize, is_separator: impl Fn(&str) -> bool) -> Split {
        let mut bounds = Split::new();
        bounds.push(from);
        let mut depth = 0usize;
        for i in from..to {
            let token = self.text(i);
            match token {
                "(" | "[" | "{" => depth += 1,
                ")" | "]" | "}" => depth = depth.saturating_sub(1),
                _ if depth == 0 && is_separator(token) => bounds.push(i + 1),
                _ => {}
            }
        }
        bounds.push(to + 1);
        bounds
    }

    /// The `,`-separated items of `from..to`; more than one needs lists.
    fn pieces(&mut self, from: usize, to: usize) -> Result<Split, DeclarationError> {
        let pieces = self.split(from, to, |t| t == ",");
        if pieces.len() > 2 {
            self.require(DeclRules::LISTS, ",", pieces[1] - 1)?;
        }
        Ok(pieces)
    }

    /// First top-level token in `from..to` satisfying `pred`.
    fn find(&self, from: usize, to: usize, pred: impl Fn(&str) -> bool) -> Option<usize> {
        let bounds = self.split(from, to, pred);
        (bounds.len() > 2).then(|| bounds[1] - 1)
    }

    fn require(&mut self, rule: DeclRules, landmark: &str, position: usize) -> Result<(), DeclarationError> {
        if !self.rule.contains(rule) {
            return Err(DeclarationError::Landmark {
                landmark: landmark.to_owned(),
                position,
            });
        }
        self.used |= rule;
        Ok(())
    }

    fn narrow(&mut self, dialects: DeclRules, landmark: &str, position: usize) -> Result<(), DeclarationError> {
        let narrowed = self.rule & (dialects | !DeclRules::TYPE_DIALECTS);
        if !narrowed.intersects(DeclRules::TYPE_DIALECTS) {
            return Err(DeclarationError::Landmark {
                landmark: landmark.to_owned(),
                position,
            });
        }
        trace!(?narrowed, landmark, "dialects narrowed");
        self.rule = narrowed;
        Ok(())
    }

    fn group(&mut self, from: usize, to: usize, items: &mut Vec<Declarator>) -> Result<(), DeclarationError> {
        if from >= to {
            return Err(DeclarationError::Empty(from));
        }
        let separator = self.find(from, to, |t| t == ":" || t.eq_ignore_ascii_case("as"));
        match separator {
            Some(position) => {
                let (dialect, landmark) = if self.text(position) == ":" {
                    (DeclRules::PASCAL_TYPED, ":")
                } else {
                    (DeclRules::BASIC_TYPED, "as")
                };
                self.narrow(dialect, landmark, position)?;
                self.typed_items(from, to, items)
            }
            None => {
                let first = self.text(from).to_owned();
                self.narrow(DeclRules::C_STYLE | DeclRules::IMPLICIT, &first, from)?;
                self.c_items(from, to, items)
            }
        }
    }

    /// `a, b: T = d, c: U` and the `as` variant: names without a type
    /// take the type of the next item that has one.
    fn typed_items(&mut self, from: usize, to: usize, items: &mut Vec<Declarator>) -> Result<(), DeclarationError> {
        let mut pending: Vec<Declarator> = Vec::new();
        let pieces = self.pieces(from, to)?;
        for window in pieces.windows(2) {
            let (piece_from, piece_to) = (window[0], window[1] - 1);
            let Some(separator) = self.find(piece_from, piece_to, |t| t == ":" || t.eq_ignore_ascii_case("as"))
            else {
                pending.push(self.name(piece_from, piece_to)?);
                continue;
            };
            let landmark = if self.text(separator) == ":" { ":" } else { "as" };
            let dialect = if landmark == ":" {
                DeclRules::PASCAL_TYPED
            } else {
                DeclRules::BASIC_TYPED
            };
            self.narrow(dialect, landmark, separator)?;

            let declarator = self.name(piece_from, separator)?;
            let (type_to, default) = self.default(separator + 1, piece_to)?;
            let spec = self.type_spec(separator + 1, type_to)?;
            for shared in pending.drain(..) {
                items.push(shared.with_type(spec.clone()));
            }
            let mut declarator = declarator.with_type(spec);
            declarator.default = default;
            items.push(declarator);
        }
        if let Some(untyped) = pending.first() {
            return Err(DeclarationError::Malformed {
                message: format!("`{}` has no type", untyped.name),
                position: untyped.pos,
            });
        }
        Ok(())
    }

    /// `T a, b[3] = d` or untyped `a, b`: a name on its own shares the
    /// type of the previous item.
    fn c_items(&mut self, from: usize, to: usize, items: &mut Vec<Declarator>) -> Result<(), DeclarationError> {
        let mut shared: Option<TypeSpec> = None;
        let pieces = self.pieces(from, to)?;
        for window in pieces.windows(2) {
            let (piece_from, piece_to) = (window[0], window[1] - 1);
            let (item_to, default) = self.default(piece_from, piece_to)?;
            if item_to <= piece_from {
                return Err(DeclarationError::Empty(piece_from));
            }
            let name_at = self.name_start(piece_from, item_to);
            let mut declarator = if name_at == piece_from {
                match &shared {
                    Some(spec) => share(self.declarator(piece_from, item_to)?, spec),
                    None => {
                        let declarator = self.name(piece_from, item_to)?;
                        self.narrow(DeclRules::IMPLICIT, &declarator.name, piece_from)?;
                        declarator
                    }
                }
            } else {
                let name = self.text(name_at).to_owned();
                self.narrow(DeclRules::C_STYLE, &name, name_at)?;
                let spec = self.type_spec(piece_from, name_at)?;
                let declarator = share(self.declarator(name_at, item_to)?, &spec);
                shared = Some(spec);
                declarator
            };
            declarator.default = default;
            items.push(declarator);
        }
        Ok(())
    }

    /// Index of the declared name in a C-style item: the last identifier
    /// before any trailing `[...]` dimensions.
    fn name_start(&self, from: usize, to: usize) -> usize {
        let mut end = to;
        while end > from && self.text(end - 1) == "]" {
            let mut depth = 0usize;
            let mut i = end;
            while i > from {
                i -= 1;
                match self.text(i) {
                    "]" => depth += 1,
                    "[" => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    _ => {}
                }
            }
            end = i;
        }
        end.saturating_sub(1).max(from)
    }

    /// Split off `= default` from `from..to`.
    fn default(&mut self, from: usize, to: usize) -> Result<(usize, Option<Expression>), DeclarationError> {
        let Some(eq) = self.find(from, to, |t| t == "=") else {
            return Ok((to, None));
        };
        self.require(DeclRules::DEFAULTS, "=", eq)?;
        let mut values = expressions_in(self.tokens, eq + 1, to, self.registry).map_err(|error| {
            DeclarationError::Expression {
                message: error.to_string(),
                position: error.position(),
            }
        })?;
        if values.len() != 1 {
            return Err(DeclarationError::Malformed {
                message: format!("expected one default value for `{}`", self.tokens.sub_sequence(from, eq)),
                position: eq,
            });
        }
        Ok((eq, values.pop()))
    }

    /// A plain name, as in `a` or `a[]` before a type separator.
    fn name(&self, from: usize, to: usize) -> Result<Declarator, DeclarationError> {
        let declarator = self.declarator(from, to)?;
        if declarator.type_spec.is_some() {
            return Err(DeclarationError::Malformed {
                message: format!("dimensions belong to the type of `{}`", declarator.name),
                position: from,
            });
        }
        Ok(declarator)
    }

    /// `name` with optional `[]` or `[n]` dimensions, kept as a partial
    /// type whose element is filled in by [`share`].
    fn declarator(&self, from: usize, to: usize) -> Result<Declarator, DeclarationError> {
        let name = self.text(from);
        if !is_identifier(name) {
            return Err(DeclarationError::Malformed {
                message: format!("`{name}` is not a name"),
                position: from,
            });
        }
        let declarator = Declarator::new(name, from);
        if from + 1 >= to {
            return Ok(declarator);
        }
        let (extents, empty) = self.dimensions(from + 1, to)?;
        let placeholder = TypeSpec::Named {
            name: String::new(),
            dims: empty,
        };
        Ok(declarator.with_type(if extents.is_empty() {
            placeholder
        } else {
            placeholder.array_of(extents)
        }))
    }

    /// `[][]` pairs or `[n][m]` sizes after a name.
    fn dimensions(&self, from: usize, to: usize) -> Result<(Vec<Extent>, usize), DeclarationError> {
        let mut extents = Vec::new();
        let mut empty = 0;
        let mut i = from;
        while i < to {
            if self.text(i) != "[" {
                return Err(DeclarationError::Malformed {
                    message: format!("unexpected `{}`", self.text(i)),
                    position: i,
                });
            }
            let close = self.closing(i, to)?;
            if close == i + 1 {
                empty += 1;
            } else if empty > 0 {
                return Err(DeclarationError::Malformed {
                    message: "sized dimension after `[]`".to_owned(),
                    position: i,
                });
            } else {
                extents.extend(self.extents(i + 1, close)?);
            }
            i = close + 1;
        }
        Ok((extents, empty))
    }

    fn closing(&self, open: usize, to: usize) -> Result<usize, DeclarationError> {
        let mut depth = 0usize;
        for i in open..to {
            match self.text(i) {
                "[" => depth += 1,
                "]" => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(i);
                    }
                }
                _ => {}
            }
        }
        Err(DeclarationError::Malformed {
            message: "unclosed `[`".to_owned(),
            position: open,
        })
    }

    /// `n, lo..hi` inside brackets.
    fn extents(&self, from: usize, to: usize) -> Result<Vec<Extent>, DeclarationError> {
        let pieces = self.split(from, to, |t| t == ",");
        let mut extents = Vec::with_capacity(pieces.len() - 1);
        for window in pieces.windows(2) {
            let (piece_from, piece_to) = (window[0], window[1] - 1);
            let expression = |from, to| {
                let mut values = expressions_in(self.tokens, from, to, self.registry).map_err(|error| {
                    DeclarationError::Expression {
                        message: error.to_string(),
                        position: error.position(),
                    }
                })?;
                match (values.pop(), values.is_empty()) {
                    (Some(value), true) => Ok(value),
                    _ => Err(DeclarationError::Malformed {
                        message: "expected one array bound".to_owned(),
                        position: from,
                    }),
                }
            };
            let extent = match self.find(piece_from, piece_to, |t| t == "..") {
                Some(dots) => Extent::Range(expression(piece_from, dots)?, expression(dots + 1, piece_to)?),
                None => Extent::Size(expression(piece_from, piece_to)?),
            };
            extents.push(extent);
        }
        Ok(extents)
    }

    /// `Name[]..` or `array [extents] of T` spanning exactly `from..to`.
    fn type_spec(&self, from: usize, to: usize) -> Result<TypeSpec, DeclarationError> {
        if from >= to {
            return Err(DeclarationError::Malformed {
                message: "missing type".to_owned(),
                position: from,
            });
        }
        if self.is_word(from, "array") {
            let (extents, of) = if self.text(from + 1) == "[" {
                let close = self.closing(from + 1, to)?;
                (self.extents(from + 2, close)?, close + 1)
            } else {
                (Vec::new(), from + 1)
            };
            if of >= to || !self.is_word(of, "of") {
                return Err(DeclarationError::Malformed {
                    message: "expected `of` in array type".to_owned(),
                    position: of.min(to),
                });
            }
            return Ok(self.type_spec(of + 1, to)?.array_of(extents));
        }

        let name = self.text(from);
        if !is_identifier(name) {
            return Err(DeclarationError::Malformed {
                message: format!("`{name}` is not a type"),
                position: from,
            });
        }
        if !self.registry.contains(name) {
            return Err(DeclarationError::UnknownType {
                name: name.to_owned(),
                position: from,
            });
        }
        let name = name.to_owned();
        let mut dims = 0;
        let mut i = from + 1;
        while i < to {
            if self.text(i) != "[" || self.text(i + 1) != "]" || i + 1 >= to {
                return Err(DeclarationError::Malformed {
                    message: format!("unexpected `{}` in type", self.text(i)),
                    position: i,
                });
            }
            dims += 1;
            i += 2;
        }
        Ok(TypeSpec::Named { name, dims })
    }
}

/// Complete the declarator's type with `spec` as its element type.
fn share(mut declarator: Declarator, spec: &TypeSpec) -> Declarator {
    declarator.type_spec = Some(match declarator.type_spec.take() {
        None => spec.clone(),
        Some(partial) => complete(partial, spec),
    });
    declarator
}

/// Substitute `element` for the empty placeholder name in `partial`.
fn complete(partial: TypeSpec, element: &TypeSpec) -> TypeSpec {
    match partial {
        TypeSpec::Named { name, dims } if name.is_empty() => match element {
            TypeSpec::Named { name, dims: inner } => TypeSpec::Named {
                name: name.clone(),
                dims: inner + dims,
            },
            TypeSpec::ArrayOf { .. } => (0..dims).fold(element.clone(), |spec, _| spec.array_of(Vec::new())),
        },
        TypeSpec::ArrayOf { extents, element: inner } => complete(*inner, element).array_of(extents),
        named @ TypeSpec::Named { .. } => named,
    }
}
