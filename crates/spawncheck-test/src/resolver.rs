//! An in-memory reference resolver backed by a map.

use std::collections::HashMap;

use spawncheck_core::{ObjectNode, ObjectRef, ReferenceResolver};

/// Resolves pointers against a fixed set of objects. Unknown pointers are
/// dangling.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    objects: HashMap<ObjectRef, ObjectNode>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, reference: ObjectRef, node: ObjectNode) {
        self.objects.insert(reference, node);
    }
}

impl ReferenceResolver for StaticResolver {
    fn resolve(&self, reference: &ObjectRef) -> Option<&ObjectNode> {
        self.objects.get(reference)
    }
}
