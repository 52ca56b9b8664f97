//! The plug/operator model and the operator catalog.

mod catalog;
mod operator;
mod plug;

pub use catalog::Catalog;
pub use operator::{Operator, OperatorInfo, Plug, PlugSet};
pub use plug::{Direction, Instance, InstanceKind, PlugSpec, PlugValue, ValueKind};
