//! Symbolic coordinates: scalar values, points, rectangles and parallelograms that
//! resolve to concrete geometry against an [`EvalContext`](crate::EvalContext).

pub(crate) mod parallelogram;
pub(crate) mod point;
pub(crate) mod rect;
pub(crate) mod value;
