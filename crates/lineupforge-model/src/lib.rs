//! LineupForge Model - Constraint model construction
//!
//! This crate turns a candidate pool and run settings into one reusable
//! binary optimization model:
//! - One decision variable per (player, eligible slot) pair, keyed by a
//!   typed [`VarKey`] rather than an encoded name string
//! - A linear objective over projections and linear (in)equality constraints
//! - A tag-keyed registry for the dynamic constraints the solver loop adds
//!   and retracts between iterations

pub mod builder;
pub mod constraint;
pub mod model;
pub mod var;

pub use constraint::{CmpOp, Constraint, ConstraintTag};
pub use model::LineupModel;
pub use var::{PlayerIx, VarId, VarKey};
