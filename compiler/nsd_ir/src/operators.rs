//! Operators
//!
//! Every operator that can appear in an expression tree. Textual spellings
//! (`and`, `mod`, `=`, `:=`, …) are folded into one variant per meaning
//! while the tree is built, so consumers only ever see one symbol.


/// How an operator is written relative to its operands.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Fixity {
    Prefix,
    Postfix,
    Binary,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Operator {
    // Assignment
    Assign,

    // Logical
    Or,
    And,

    // Bitwise
    BitOr,
    BitXor,
    BitAnd,

    // Comparison
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,

    // Shift
    Shl,
    Shr,
    UShr,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    IntDiv,
    Mod,

    // Prefix
    Neg,
    Plus,
    Not,
    BitNot,
    PreInc,
    PreDec,

    // Postfix
    PostInc,
    PostDec,

    // Access
    /// `a[i, j]`: operands are the array followed by the indices.
    Index,
    /// `a.b`: operands are the record and an identifier.
    Field,
}

impl Operator {
    /// Canonical symbol used when rendering trees.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Assign => "<-",
            Self::Or => "||",
            Self::And => "&&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::BitAnd => "&",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::UShr => ">>>",
            Self::Add | Self::Plus => "+",
            Self::Sub | Self::Neg => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::IntDiv => "div",
            Self::Mod => "%",
            Self::Not => "!",
            Self::BitNot => "~",
            Self::PreInc | Self::PostInc => "++",
            Self::PreDec | Self::PostDec => "--",
            Self::Index => "[]",
            Self::Field => ".",
        }
    }

    pub const fn fixity(self) -> Fixity {
        match self {
            Self::Neg | Self::Plus | Self::Not | Self::BitNot | Self::PreInc | Self::PreDec => {
                Fixity::Prefix
            }
            Self::PostInc | Self::PostDec | Self::Index | Self::Field => Fixity::Postfix,
            _ => Fixity::Binary,
        }
    }

    /// Binding strength: lower binds tighter.
    ///
    /// - 1: `[]` `.` postfix `++` `--`
    /// - 2: prefix operators
    /// - 3: `*` `/` `div` `%`
    /// - 4: `+` `-`
    /// - 5: `<<` `>>` `>>>`
    /// - 6: `<` `>` `<=` `>=`
    /// - 7: `==` `!=`
    /// - 8: `&`
    /// - 9: `^`
    /// - 10: `|`
    /// - 11: `&&`
    /// - 12: `||`
    /// - 14: `<-`
    ///
    /// The conditional `?:` sits at 13.
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Index | Self::Field | Self::PostInc | Self::PostDec => 1,
            Self::Neg | Self::Plus | Self::Not | Self::BitNot | Self::PreInc | Self::PreDec => 2,
            Self::Mul | Self::Div | Self::IntDiv | Self::Mod => 3,
            Self::Add | Self::Sub => 4,
            Self::Shl | Self::Shr | Self::UShr => 5,
            Self::Lt | Self::Gt | Self::LtEq | Self::GtEq => 6,
            Self::Eq | Self::NotEq => 7,
            Self::BitAnd => 8,
            Self::BitXor => 9,
            Self::BitOr => 10,
            Self::And => 11,
            Self::Or => 12,
            Self::Assign => 14,
        }
    }

    /// Look up a binary operator by any of its accepted spellings.
    /// Word operators match case-insensitively.
    pub fn binary_from_symbol(symbol: &str) -> Option<Operator> {
        let op = match symbol {
            "<-" | ":=" => Self::Assign,
            "||" => Self::Or,
            "&&" => Self::And,
            "|" => Self::BitOr,
            "^" => Self::BitXor,
            "&" => Self::BitAnd,
            "==" | "=" => Self::Eq,
            "!=" | "<>" => Self::NotEq,
            "<" => Self::Lt,
            ">" => Self::Gt,
            "<=" => Self::LtEq,
            ">=" => Self::GtEq,
            "<<" => Self::Shl,
            ">>" => Self::Shr,
            ">>>" => Self::UShr,
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Mod,
            word => match word.to_ascii_lowercase().as_str() {
                "or" => Self::Or,
                "and" => Self::And,
                "xor" => Self::BitXor,
                "div" => Self::IntDiv,
                "mod" => Self::Mod,
                "shl" => Self::Shl,
                "shr" => Self::Shr,
                _ => return None,
            },
        };
        Some(op)
    }

    /// Look up a prefix operator by spelling.
    pub fn prefix_from_symbol(symbol: &str) -> Option<Operator> {
        let op = match symbol {
            "-" => Self::Neg,
            "+" => Self::Plus,
            "!" => Self::Not,
            "~" => Self::BitNot,
            "++" => Self::PreInc,
            "--" => Self::PreDec,
            word if word.eq_ignore_ascii_case("not") => Self::Not,
            _ => return None,
        };
        Some(op)
    }

    /// Whether an expression of this kind may be the target of an
    /// assignment.
    pub const fn is_access(self) -> bool {
        matches!(self, Self::Index | Self::Field)
    }
}
