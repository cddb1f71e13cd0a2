use std::fmt;

/// Built-in single-argument functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Exp,
    Ln,
    Sqrt,
}

impl Func {
    pub fn name(&self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Exp => "exp",
            Func::Ln => "ln",
            Func::Sqrt => "sqrt",
        }
    }

    pub fn from_name(name: &str) -> Option<Func> {
        match name {
            "sin" => Some(Func::Sin),
            "cos" => Some(Func::Cos),
            "tan" => Some(Func::Tan),
            "exp" => Some(Func::Exp),
            "ln" | "log" => Some(Func::Ln),
            "sqrt" => Some(Func::Sqrt),
            _ => None,
        }
    }

    fn apply(&self, x: f64) -> f64 {
        match self {
            Func::Sin => x.sin(),
            Func::Cos => x.cos(),
            Func::Tan => x.tan(),
            Func::Exp => x.exp(),
            Func::Ln => x.ln(),
            Func::Sqrt => x.sqrt(),
        }
    }
}

/// Symbolic expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Num(f64),
    Var(String),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Neg(Box<Expr>),
    Fun(Func, Box<Expr>),
}

/// Errors raised while numerically evaluating an expression.
#[derive(Debug)]
pub enum EvalError {
    /// A variable other than the substituted one appears in the expression.
    UnboundVariable(String),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UnboundVariable(name) => write!(f, "unbound variable: {name}"),
        }
    }
}

impl std::error::Error for EvalError {}

fn num(v: f64) -> Box<Expr> {
    Box::new(Expr::Num(v))
}

impl Expr {
    /// First derivative with respect to `var`, by the recursive rules.
    /// The result is not simplified; see [`Expr::simplify`].
    pub fn diff(&self, var: &str) -> Expr {
        match self {
            Expr::Num(_) => Expr::Num(0.0),
            Expr::Var(name) => {
                if name == var {
                    Expr::Num(1.0)
                } else {
                    Expr::Num(0.0)
                }
            }
            Expr::Add(lhs, rhs) => {
                Expr::Add(Box::new(lhs.diff(var)), Box::new(rhs.diff(var)))
            }
            Expr::Sub(lhs, rhs) => {
                Expr::Sub(Box::new(lhs.diff(var)), Box::new(rhs.diff(var)))
            }
            Expr::Mul(lhs, rhs) => Expr::Add(
                Box::new(Expr::Mul(Box::new(lhs.diff(var)), rhs.clone())),
                Box::new(Expr::Mul(lhs.clone(), Box::new(rhs.diff(var)))),
            ),
            Expr::Div(lhs, rhs) => Expr::Div(
                Box::new(Expr::Sub(
                    Box::new(Expr::Mul(Box::new(lhs.diff(var)), rhs.clone())),
                    Box::new(Expr::Mul(lhs.clone(), Box::new(rhs.diff(var)))),
                )),
                Box::new(Expr::Pow(rhs.clone(), num(2.0))),
            ),
            Expr::Pow(base, exponent) => match exponent.as_ref() {
                // Constant exponent: n * u^(n-1) * u'
                Expr::Num(n) => Expr::Mul(
                    Box::new(Expr::Mul(
                        num(*n),
                        Box::new(Expr::Pow(base.clone(), num(n - 1.0))),
                    )),
                    Box::new(base.diff(var)),
                ),
                // General case: u^v * (v' * ln(u) + v * u'/u)
                _ => Expr::Mul(
                    Box::new(self.clone()),
                    Box::new(Expr::Add(
                        Box::new(Expr::Mul(
                            Box::new(exponent.diff(var)),
                            Box::new(Expr::Fun(Func::Ln, base.clone())),
                        )),
                        Box::new(Expr::Mul(
                            exponent.clone(),
                            Box::new(Expr::Div(Box::new(base.diff(var)), base.clone())),
                        )),
                    )),
                ),
            },
            Expr::Neg(inner) => Expr::Neg(Box::new(inner.diff(var))),
            Expr::Fun(func, arg) => {
                let outer = match func {
                    Func::Sin => Expr::Fun(Func::Cos, arg.clone()),
                    Func::Cos => Expr::Neg(Box::new(Expr::Fun(Func::Sin, arg.clone()))),
                    Func::Tan => Expr::Div(
                        num(1.0),
                        Box::new(Expr::Pow(Box::new(Expr::Fun(Func::Cos, arg.clone())), num(2.0))),
                    ),
                    Func::Exp => Expr::Fun(Func::Exp, arg.clone()),
                    Func::Ln => Expr::Div(num(1.0), arg.clone()),
                    Func::Sqrt => Expr::Div(
                        num(1.0),
                        Box::new(Expr::Mul(num(2.0), Box::new(Expr::Fun(Func::Sqrt, arg.clone())))),
                    ),
                };
                Expr::Mul(Box::new(outer), Box::new(arg.diff(var)))
            }
        }
    }

    /// Structural simplification: constant folding plus the usual identity
    /// rules (x+0, x*1, x*0, x^1, x^0, double negation).
    pub fn simplify(&self) -> Expr {
        match self {
            Expr::Num(_) | Expr::Var(_) => self.clone(),
            Expr::Add(lhs, rhs) => {
                let (l, r) = (lhs.simplify(), rhs.simplify());
                match (&l, &r) {
                    (Expr::Num(a), Expr::Num(b)) => Expr::Num(a + b),
                    (Expr::Num(a), _) if *a == 0.0 => r,
                    (_, Expr::Num(b)) if *b == 0.0 => l,
                    _ => Expr::Add(Box::new(l), Box::new(r)),
                }
            }
            Expr::Sub(lhs, rhs) => {
                let (l, r) = (lhs.simplify(), rhs.simplify());
                match (&l, &r) {
                    (Expr::Num(a), Expr::Num(b)) => Expr::Num(a - b),
                    (_, Expr::Num(b)) if *b == 0.0 => l,
                    (Expr::Num(a), _) if *a == 0.0 => Expr::Neg(Box::new(r)),
                    _ if l == r => Expr::Num(0.0),
                    _ => Expr::Sub(Box::new(l), Box::new(r)),
                }
            }
            Expr::Mul(lhs, rhs) => {
                let (l, r) = (lhs.simplify(), rhs.simplify());
                match (&l, &r) {
                    (Expr::Num(a), Expr::Num(b)) => Expr::Num(a * b),
                    (Expr::Num(a), _) if *a == 0.0 => Expr::Num(0.0),
                    (_, Expr::Num(b)) if *b == 0.0 => Expr::Num(0.0),
                    (Expr::Num(a), _) if *a == 1.0 => r,
                    (_, Expr::Num(b)) if *b == 1.0 => l,
                    // Normalize constants to the left so 2*x prints as 2*x.
                    (_, Expr::Num(_)) => Expr::Mul(Box::new(r), Box::new(l)),
                    _ => Expr::Mul(Box::new(l), Box::new(r)),
                }
            }
            Expr::Div(lhs, rhs) => {
                let (l, r) = (lhs.simplify(), rhs.simplify());
                match (&l, &r) {
                    (Expr::Num(a), Expr::Num(b)) if *b != 0.0 => Expr::Num(a / b),
                    (Expr::Num(a), _) if *a == 0.0 => Expr::Num(0.0),
                    (_, Expr::Num(b)) if *b == 1.0 => l,
                    _ => Expr::Div(Box::new(l), Box::new(r)),
                }
            }
            Expr::Pow(base, exponent) => {
                let (b, e) = (base.simplify(), exponent.simplify());
                match (&b, &e) {
                    (Expr::Num(a), Expr::Num(n)) => Expr::Num(a.powf(*n)),
                    (_, Expr::Num(n)) if *n == 0.0 => Expr::Num(1.0),
                    (_, Expr::Num(n)) if *n == 1.0 => b,
                    _ => Expr::Pow(Box::new(b), Box::new(e)),
                }
            }
            Expr::Neg(inner) => {
                let i = inner.simplify();
                match i {
                    Expr::Num(v) => Expr::Num(-v),
                    Expr::Neg(original) => *original,
                    _ => Expr::Neg(Box::new(i)),
                }
            }
            Expr::Fun(func, arg) => {
                let a = arg.simplify();
                match a {
                    Expr::Num(v) => Expr::Num(func.apply(v)),
                    _ => Expr::Fun(*func, Box::new(a)),
                }
            }
        }
    }

    /// Evaluates the expression with `var` bound to `value`. Any other
    /// variable is an error; division by zero follows IEEE semantics.
    pub fn eval(&self, var: &str, value: f64) -> Result<f64, EvalError> {
        match self {
            Expr::Num(v) => Ok(*v),
            Expr::Var(name) => {
                if name == var {
                    Ok(value)
                } else {
                    Err(EvalError::UnboundVariable(name.clone()))
                }
            }
            Expr::Add(l, r) => Ok(l.eval(var, value)? + r.eval(var, value)?),
            Expr::Sub(l, r) => Ok(l.eval(var, value)? - r.eval(var, value)?),
            Expr::Mul(l, r) => Ok(l.eval(var, value)? * r.eval(var, value)?),
            Expr::Div(l, r) => Ok(l.eval(var, value)? / r.eval(var, value)?),
            Expr::Pow(b, e) => Ok(b.eval(var, value)?.powf(e.eval(var, value)?)),
            Expr::Neg(i) => Ok(-i.eval(var, value)?),
            Expr::Fun(func, arg) => Ok(func.apply(arg.eval(var, value)?)),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Add(..) | Expr::Sub(..) => 1,
            Expr::Mul(..) | Expr::Div(..) => 2,
            Expr::Neg(..) => 3,
            Expr::Pow(..) => 4,
            Expr::Num(_) | Expr::Var(_) | Expr::Fun(..) => 5,
        }
    }

    fn fmt_child(&self, f: &mut fmt::Formatter<'_>, min_prec: u8) -> fmt::Result {
        if self.precedence() < min_prec {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(v) => write!(f, "{v}"),
            Expr::Var(name) => f.write_str(name),
            Expr::Add(l, r) => {
                l.fmt_child(f, 1)?;
                f.write_str(" + ")?;
                r.fmt_child(f, 1)
            }
            Expr::Sub(l, r) => {
                l.fmt_child(f, 1)?;
                f.write_str(" - ")?;
                // Right side binds tighter: a - (b + c)
                r.fmt_child(f, 2)
            }
            Expr::Mul(l, r) => {
                l.fmt_child(f, 2)?;
                f.write_str("*")?;
                r.fmt_child(f, 2)
            }
            Expr::Div(l, r) => {
                l.fmt_child(f, 2)?;
                f.write_str("/")?;
                r.fmt_child(f, 3)
            }
            Expr::Pow(b, e) => {
                b.fmt_child(f, 5)?;
                f.write_str("^")?;
                e.fmt_child(f, 4)
            }
            Expr::Neg(inner) => {
                f.write_str("-")?;
                inner.fmt_child(f, 3)
            }
            Expr::Fun(func, arg) => write!(f, "{}({arg})", func.name()),
        }
    }
}
