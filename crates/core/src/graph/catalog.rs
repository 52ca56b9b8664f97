//! Name-keyed registry of operators.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::warn;

use super::operator::{Operator, OperatorInfo};

/// Registry of operators, looked up by catalog name.
#[derive(Clone, Default)]
pub struct Catalog {
    operators: BTreeMap<&'static str, Arc<dyn Operator>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in operator catalog.
    pub fn builtin() -> Self {
        crate::ops::builtin()
    }

    pub fn register(&mut self, operator: Arc<dyn Operator>) {
        let name = operator.info().name;
        if self.operators.insert(name, operator).is_some() {
            warn!("operator '{name}' registered twice, keeping the last one");
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Operator>> {
        self.operators.get(name).cloned()
    }

    /// Metadata of every registered operator, sorted by name.
    pub fn infos(&self) -> Vec<OperatorInfo> {
        self.operators.values().map(|op| op.info()).collect()
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_knows_its_operators() {
        let catalog = Catalog::builtin();
        assert!(catalog.get("folder.get").is_some());
        assert!(catalog.get("timeline.export").is_some());
        assert!(catalog.get("does.not.exist").is_none());
        assert_eq!(catalog.len(), 23);
    }

    #[test]
    fn infos_are_sorted_by_name() {
        let names: Vec<_> = Catalog::builtin()
            .infos()
            .iter()
            .map(|info| info.name)
            .collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }
}
