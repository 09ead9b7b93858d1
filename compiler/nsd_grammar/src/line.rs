//! Symbols of the element line grammar.
//!
//! The grammar itself lives in `line_grammar.lalrpop` and is compiled into
//! a parser at build time. This module names its terminals, which the
//! classifier produces and diagnostics list, and its productions, which
//! label every reduction in the parse tree.


pub const GRAMMAR_NAME: &str = "ElementLine";
pub const GRAMMAR_VERSION: &str = "2.0";

macro_rules! symbols {
    ($(#[$meta:meta])* $ty:ident { $($name:ident => $text:literal,)* }) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum $ty {
            $($name,)*
        }

        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$name,)*];

            pub const fn name(self) -> &'static str {
                match self {
                    $($ty::$name => $text,)*
                }
            }

            pub const fn id(self) -> u16 {
                self as u16
            }

            pub fn from_id(id: u16) -> Option<$ty> {
                $ty::ALL.get(usize::from(id)).copied()
            }
        }
    };
}

symbols! {
    /// Terminal symbols. Names are what syntax errors list as expected.
    Term {
        // Token classes
        Identifier => "Identifier",
        DecLiteral => "DecimalLiteral",
        HexLiteral => "HexLiteral",
        OctLiteral => "OctalLiteral",
        BinLiteral => "BinaryLiteral",
        FloatLiteral => "FloatLiteral",
        CharLiteral => "CharLiteral",
        StringLiteral => "StringLiteral",
        BooleanLiteral => "BooleanLiteral",
        NullLiteral => "null",
        Unknown => "Unknown",

        // Keywords
        VarKey => "var",
        DimKey => "dim",
        AsKey => "as",
        ConstKey => "const",
        TypeKey => "type",
        RecordKey => "record",
        EnumKey => "enum",
        ArrayKey => "array",
        OfKey => "of",
        DivOpr => "div",
        ModOpr => "mod",
        ShlOpr => "shl",
        ShrOpr => "shr",
        AndOpr => "and",
        OrOpr => "or",
        NotOpr => "not",
        XorOpr => "xor",

        // Element markers
        InputKey => "§INPUT§",
        OutputKey => "§OUTPUT§",
        CondKey => "§COND§",
        ForKey => "§FOR§",
        ToKey => "§TO§",
        StepKey => "§STEP§",
        ForInKey => "§FOREACH§",
        InKey => "§IN§",
        ReturnKey => "§RETURN§",
        ExitKey => "§EXIT§",
        LeaveKey => "§LEAVE§",
        ThrowKey => "§THROW§",
        CallKey => "§CALL§",
        CatchKey => "§CATCH§",
        CaseKey => "§CASE§",
        SelectorKey => "§SELECT§",
        DefaultKey => "§DEFAULT§",

        // Punctuation and operators
        LParen => "(",
        RParen => ")",
        LBracket => "[",
        RBracket => "]",
        Brackets => "[]",
        LBrace => "{",
        RBrace => "}",
        Comma => ",",
        Dot => ".",
        Colon => ":",
        Semicolon => ";",
        Question => "?",
        DotDot => "..",
        LArrow => "<-",
        ColonEq => ":=",
        Eq => "=",
        EqEq => "==",
        NotEq => "!=",
        LtGt => "<>",
        Lt => "<",
        Gt => ">",
        LtEq => "<=",
        GtEq => ">=",
        Plus => "+",
        Minus => "-",
        Star => "*",
        Slash => "/",
        Percent => "%",
        PlusPlus => "++",
        MinusMinus => "--",
        Tilde => "~",
        Bang => "!",
        Amp => "&",
        Pipe => "|",
        Caret => "^",
        AmpAmp => "&&",
        PipePipe => "||",
        Shl => "<<",
        Shr => ">>",
        UShr => ">>>",
    }
}

impl Term {
    /// The terminal a grammar symbol name stands for.
    pub fn from_name(name: &str) -> Option<Term> {
        Term::ALL.iter().copied().find(|term| term.name() == name)
    }
}

/// Productions of the element line grammar, grouped by the nonterminal
/// they reduce to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Prod {
    // ElementLine
    LineAssignment, LineVarInit, LineInput, LineOutput, LineVarDecl, LineConst, LineType,
    LineCondition, LineFor, LineForIn, LineJump, LineCall, LineCatch, LineCaseDiscriminator,
    LineCaseSelectors, LineCaseDefault,
    // IntegerLiteral
    IntegerDec, IntegerHex, IntegerOct, IntegerBin,
    // DecimalIntegerLiteral
    DecimalInteger,
    // Literal
    LiteralInteger, LiteralFloat, LiteralBoolean, LiteralChar, LiteralString, LiteralNull,
    // Name
    NameSimple, NameQualified,
    // SimpleName
    SimpleName,
    // QualifiedName
    QualifiedName,
    // ArrayInitializer
    ArrayInitList, ArrayInitEmpty,
    // RecordInitializer
    RecordInitComponents, RecordInitEmpty,
    // ExpressionList
    ExpressionListMore, ExpressionListOne,
    // ComponentInitializers
    ComponentsNamed, ComponentsPositional, ComponentsMixed,
    // ComponentInitializerList
    ComponentInitMore, ComponentInitOne,
    // ComponentInitializer
    ComponentInit,
    // Primary
    PrimaryLiteral, PrimaryParens, PrimaryField, PrimaryMethod, PrimaryIndex,
    // FieldAccess
    FieldAccess,
    // RoutineInvocation
    RoutineArgs, RoutineNoArgs,
    // MethodInvocation
    MethodRoutine, MethodArgs, MethodNoArgs,
    // ArrayAccess
    IndexName, IndexPrimary,
    // PostfixExpression
    PostfixPrimary, PostfixName, PostfixIncrement, PostfixDecrement,
    // PostIncrementExpression
    PostIncrement,
    // PostDecrementExpression
    PostDecrement,
    // UnaryExpression
    UnaryPreIncrement, UnaryPreDecrement, UnaryPlus, UnaryMinus, UnaryOther,
    // PreIncrementExpression
    PreIncrement,
    // PreDecrementExpression
    PreDecrement,
    // UnaryExpressionNotPlusMinus
    UnaryPostfix, UnaryComplement, UnaryBang, UnaryNot,
    // MultiplicativeExpression
    MulUnary, MulTimes, MulSlash, MulDiv, MulMod, MulPercent,
    // AdditiveExpression
    AddMul, AddPlus, AddMinus,
    // ShiftExpression
    ShiftAdd, ShiftLeft, ShiftRight, ShiftRightUnsigned, ShiftShl, ShiftShr,
    // RelationalExpression
    RelShift, RelLt, RelGt, RelLtEq, RelGtEq,
    // EqualityExpression
    EqRel, EqualsDouble, EqualsSingle, EqNotEq, EqLtGt,
    // AndExpression
    AndEq, AndAmp,
    // ExclusiveOrExpression
    XorAnd, XorCaret, XorWord,
    // InclusiveOrExpression
    IorXor, IorPipe,
    // ConditionalAndExpression
    CondAndIor, CondAndAmpAmp, CondAndWord,
    // ConditionalOrExpression
    CondOrAnd, CondOrPipePipe, CondOrWord,
    // ConditionalExpression
    ConditionalOr, ConditionalTernary,
    // AssignmentExpression
    AssignmentConditional,
    // Expression
    ExpressionAssignment, ExpressionArrayInit, ExpressionRecordInit,
    // Assignment
    Assignment,
    // LeftHandSide
    TargetName, TargetField, TargetIndex,
    // AssignmentOperator
    AssignArrow, AssignColonEq,
    // VarInitialisation
    VarInitDeclared, VarInitTyped,
    // ArrayDecl
    ArrayDecl,
    // DimensionList
    DimensionsMore, DimensionsNone,
    // Dimension
    Dimension,
    // InputInstruction
    InputBare, InputTargets, InputUnprompted,
    // TargetList
    TargetsMore, TargetsOne,
    // Prompt
    Prompt, PromptComma,
    // OutputInstruction
    OutputBare, OutputList,
    // VarDeclaration
    VarDeclColon, VarDeclDim,
    // ConstDefinition
    ConstUntyped, ConstColon, ConstAs,
    // TypeDefinition
    TypeDefinition,
    // TypeConstruction
    ConstructAlias, ConstructRecord, ConstructEnum,
    // TypeDescription
    DescribeNamed, DescribeArrayOf,
    // Dims
    DimsMore, DimsNone,
    // ArrayOf
    ArrayOfPlain, ArrayOfRanged,
    // RangeList
    RangesOne, RangesMore,
    // Range
    RangeSize, RangeBounds,
    // ComponentList
    ComponentsOne, ComponentsMore,
    // ComponentGroup
    GroupAs, GroupColon,
    // IdList
    IdsOne, IdsMore,
    // EnumList
    EnumsOne, EnumsMore,
    // EnumDef
    EnumPlain, EnumValued,
    // Condition
    Condition,
    // ForHeader
    ForHeader,
    // StepClause
    StepPlain, StepNegative, StepPositive, StepNone,
    // ForInHeader
    ForInHeader,
    // ValueList
    ValuesInitializer, ValuesPrimary, ValuesName,
    // Jump
    ReturnBare, ReturnValue, ExitBare, ExitValue, LeaveBare, LeaveLevels, Throw,
    // Call
    CallRoutine, CallAssigned,
    // CatchClause
    CatchName, CatchColon, CatchAs, CatchTyped,
    // CaseDiscriminator
    CaseDiscriminator,
    // CaseSelectors
    CaseSelectors,
}
