//! Route construction from customer sequences and feasibility checking.

mod evaluator;

pub use evaluator::RouteEvaluator;
