use std::fmt;

/// Parsed coordinate expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal.
    Num(f64),
    /// Named symbol, optionally with a single `.member` suffix.
    Symbol {
        /// Symbol name, e.g. a marker name.
        name: String,
        /// Member part of `name.member`.
        member: Option<String>,
    },
    /// Unary negation.
    Neg(Box<Expr>),
    /// Binary arithmetic.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },
    /// Built-in function call.
    Call {
        /// Function being called.
        func: Builtin,
        /// Arguments, arity already checked by the parser.
        args: Vec<Expr>,
    },
}

/// Binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
}

impl BinaryOp {
    fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }

    fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
        }
    }
}

/// Functions callable from coordinate expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// `min(a, b)`
    Min,
    /// `max(a, b)`
    Max,
    /// `abs(x)`
    Abs,
    /// `floor(x)`
    Floor,
    /// `ceil(x)`
    Ceil,
    /// `sqrt(x)`
    Sqrt,
    /// `sin(x)`, radians
    Sin,
    /// `cos(x)`, radians
    Cos,
    /// `tan(x)`, radians
    Tan,
}

impl Builtin {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "min" => Self::Min,
            "max" => Self::Max,
            "abs" => Self::Abs,
            "floor" => Self::Floor,
            "ceil" => Self::Ceil,
            "sqrt" => Self::Sqrt,
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            _ => return None,
        })
    }

    /// Name as written in expression text.
    pub fn name(self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Max => "max",
            Self::Abs => "abs",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::Sqrt => "sqrt",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
        }
    }

    /// Number of arguments the function takes.
    pub fn arity(self) -> usize {
        match self {
            Self::Min | Self::Max => 2,
            _ => 1,
        }
    }

    pub(crate) fn apply(self, args: &[f64]) -> f64 {
        match self {
            Self::Min => args[0].min(args[1]),
            Self::Max => args[0].max(args[1]),
            Self::Abs => args[0].abs(),
            Self::Floor => args[0].floor(),
            Self::Ceil => args[0].ceil(),
            Self::Sqrt => args[0].sqrt(),
            Self::Sin => args[0].sin(),
            Self::Cos => args[0].cos(),
            Self::Tan => args[0].tan(),
        }
    }
}

const PREC_UNARY: u8 = 3;
const PREC_ATOM: u8 = 4;

impl Expr {
    /// Build a symbol reference without a member part.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol {
            name: name.into(),
            member: None,
        }
    }

    /// Return `true` if evaluating this expression consults the context.
    pub fn uses_symbols(&self) -> bool {
        match self {
            Self::Num(_) => false,
            Self::Symbol { .. } => true,
            Self::Neg(e) => e.uses_symbols(),
            Self::Binary { left, right, .. } => left.uses_symbols() || right.uses_symbols(),
            Self::Call { args, .. } => args.iter().any(Expr::uses_symbols),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Self::Num(v) if !v.is_finite() => BinaryOp::Div.precedence(),
            Self::Num(v) if v.is_sign_negative() => PREC_UNARY,
            Self::Num(_) | Self::Symbol { .. } | Self::Call { .. } => PREC_ATOM,
            Self::Neg(_) => PREC_UNARY,
            Self::Binary { op, .. } => op.precedence(),
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, parens: bool) -> fmt::Result {
        if parens {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

/// Canonical text form: single spaces around binary operators and the minimal set of
/// parentheses that reproduces the same tree when parsed back. Infinite and NaN
/// literals come back as the division that folds to them.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Non-finite literals print as the quotient that produces them.
            Self::Num(v) if v.is_nan() => f.write_str("0 / 0"),
            Self::Num(v) if v.is_infinite() => {
                f.write_str(if *v > 0.0 { "1 / 0" } else { "-1 / 0" })
            }
            Self::Num(v) => write!(f, "{v}"),
            Self::Symbol { name, member } => match member {
                Some(m) => write!(f, "{name}.{m}"),
                None => f.write_str(name),
            },
            Self::Neg(e) => {
                f.write_str("-")?;
                e.fmt_operand(f, e.precedence() < PREC_UNARY)
            }
            Self::Binary { op, left, right } => {
                let p = op.precedence();
                left.fmt_operand(f, left.precedence() < p)?;
                write!(f, " {} ", op.symbol())?;
                right.fmt_operand(f, right.precedence() <= p)
            }
            Self::Call { func, args } => {
                write!(f, "{}(", func.name())?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{a}")?;
                }
                f.write_str(")")
            }
        }
    }
}
