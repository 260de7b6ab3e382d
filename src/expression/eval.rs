use crate::expression::ast::{BinaryOp, Expr};
use crate::expression::context::EvalContext;
use crate::foundation::error::{GeomError, GeomResult};

/// Maximum symbol indirection depth; deeper chains are treated as cycles.
pub(crate) const MAX_SYMBOL_DEPTH: usize = 64;

/// Evaluate `expr`, resolving symbols through `ctx`.
pub fn evaluate<C: EvalContext + ?Sized>(expr: &Expr, ctx: &C) -> GeomResult<f64> {
    eval_at(expr, ctx, 0)
}

fn eval_at<C: EvalContext + ?Sized>(expr: &Expr, ctx: &C, depth: usize) -> GeomResult<f64> {
    match expr {
        Expr::Num(v) => Ok(*v),
        Expr::Symbol { name, member } => {
            if depth >= MAX_SYMBOL_DEPTH {
                return Err(GeomError::evaluation(format!(
                    "symbol '{name}' nests deeper than {MAX_SYMBOL_DEPTH} levels (recursive reference?)"
                )));
            }
            let target = ctx
                .symbol_value(name, member.as_deref())
                .ok_or_else(|| GeomError::lookup(qualified(name, member.as_deref())))?;
            eval_at(&target, ctx, depth + 1)
        }
        Expr::Neg(e) => Ok(-eval_at(e, ctx, depth)?),
        Expr::Binary { op, left, right } => {
            let a = eval_at(left, ctx, depth)?;
            let b = eval_at(right, ctx, depth)?;
            Ok(match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                BinaryOp::Div => a / b,
            })
        }
        Expr::Call { func, args } => {
            if args.len() != func.arity() {
                return Err(GeomError::evaluation(format!(
                    "{}() takes {} argument(s), got {}",
                    func.name(),
                    func.arity(),
                    args.len()
                )));
            }
            let mut vals = [0.0f64; 2];
            for (slot, a) in vals.iter_mut().zip(args) {
                *slot = eval_at(a, ctx, depth)?;
            }
            Ok(func.apply(&vals[..args.len()]))
        }
    }
}

fn qualified(name: &str, member: Option<&str>) -> String {
    match member {
        Some(m) => format!("{name}.{m}"),
        None => name.to_owned(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/eval.rs"]
mod tests;
