//! Walks the field-tree stream and populates the relational store.

use spawncheck_config::ProjectionConfig;
use spawncheck_core::{
    ColumnType, FieldData, FieldNode, ObjectNode, ProjectedField, ReferenceResolver, ScalarKind,
    Store, TypeKind, Value,
};
use tracing::{debug, info};

use crate::error::ProjectError;
use crate::mapping::{MappingRegistry, ProjectionContext};

/// Projects whitelisted record kinds from a node stream into a [`Store`].
pub struct Projector<'r> {
    config: ProjectionConfig,
    registry: MappingRegistry,
    resolver: &'r dyn ReferenceResolver,
}

impl<'r> Projector<'r> {
    /// A projector with the standard registry, extended by the configured
    /// ignore list.
    pub fn new(config: ProjectionConfig, resolver: &'r dyn ReferenceResolver) -> Self {
        Self::with_registry(config, MappingRegistry::standard(), resolver)
    }

    /// A projector with a caller-supplied registry. The configured ignore
    /// list is merged into the registry's own.
    pub fn with_registry(
        config: ProjectionConfig,
        mut registry: MappingRegistry,
        resolver: &'r dyn ReferenceResolver,
    ) -> Self {
        registry.ignore_fields(config.ignored_fields.iter().map(String::as_str));
        Self {
            config,
            registry,
            resolver,
        }
    }

    pub fn registry(&self) -> &MappingRegistry {
        &self.registry
    }

    /// Consumes the node stream and returns the populated store with primary
    /// keys assigned. Row order within each table follows stream order.
    pub fn project<I>(&self, nodes: I) -> Result<Store, ProjectError>
    where
        I: IntoIterator<Item = ObjectNode>,
    {
        let mut store = Store::new();
        let mut total_rows = 0usize;

        for node in nodes {
            if !self.config.is_whitelisted(&node.kind) {
                continue;
            }
            let fields = self.project_fields(&store, &node)?;
            if store.table(&node.kind).is_none() {
                debug!(kind = %node.kind, columns = fields.len(), "creating table");
            }
            store.get_or_create(&node.kind).insert_row(fields)?;
            total_rows += 1;
        }

        for (kind, column) in &self.config.key_columns {
            let table = store
                .table_mut(kind)
                .ok_or_else(|| ProjectError::MissingTable { kind: kind.clone() })?;
            table.set_primary_key(column)?;
            debug!(kind = %kind, key = %column, "assigned primary key");
        }

        info!(
            tables = store.table_count(),
            rows = total_rows,
            "projection complete"
        );
        Ok(store)
    }

    /// Resolves every field of one node into column values, without touching
    /// the node's table yet. Pure with respect to the store.
    fn project_fields(
        &self,
        store: &Store,
        node: &ObjectNode,
    ) -> Result<Vec<ProjectedField>, ProjectError> {
        let ctx = ProjectionContext {
            store,
            resolver: self.resolver,
        };
        let mut out = Vec::with_capacity(node.fields.len());

        for field in &node.fields {
            if self.registry.is_ignored(&field.name) {
                continue;
            }
            match &field.ty.kind {
                TypeKind::Array(element) => {
                    let Some(mapping) = self.registry.resolve(element) else {
                        return Err(coverage_gap(node, field, &element.type_name));
                    };
                    // A suppressed element mapping skips the whole field.
                    let Some(kind) = mapping.column_kind() else {
                        continue;
                    };
                    let FieldData::Elements(elements) = &field.data else {
                        return Err(malformed(node, field));
                    };
                    let mut scalars = Vec::with_capacity(elements.len());
                    for element_data in elements {
                        scalars.push(
                            mapping
                                .extract(&ctx, element_data)
                                .ok_or_else(|| malformed(node, field))?,
                        );
                    }
                    let value =
                        collect_array(kind, scalars).ok_or_else(|| malformed(node, field))?;
                    out.push(ProjectedField::new(
                        field.name.clone(),
                        ColumnType::Array(kind),
                        value,
                    ));
                }
                _ => {
                    let Some(mapping) = self.registry.resolve(&field.ty) else {
                        return Err(coverage_gap(node, field, &field.ty.type_name));
                    };
                    let Some(kind) = mapping.column_kind() else {
                        continue;
                    };
                    let value = mapping
                        .extract(&ctx, &field.data)
                        .ok_or_else(|| malformed(node, field))?;
                    out.push(ProjectedField::new(
                        field.name.clone(),
                        ColumnType::Scalar(kind),
                        value,
                    ));
                }
            }
        }
        Ok(out)
    }
}

/// Packs extracted scalars into the typed array value for a column.
///
/// A no-value inside a string array (a dangling pointer element) is dropped;
/// any other variant mismatch means the payload was malformed.
fn collect_array(kind: ScalarKind, scalars: Vec<Value>) -> Option<Value> {
    match kind {
        ScalarKind::Str => {
            let mut out = Vec::with_capacity(scalars.len());
            for value in scalars {
                match value {
                    Value::Str(v) => out.push(v),
                    Value::None => {}
                    _ => return None,
                }
            }
            Some(Value::StrArray(out))
        }
        ScalarKind::I32 => scalars
            .into_iter()
            .map(|v| v.as_i32())
            .collect::<Option<Vec<_>>>()
            .map(Value::I32Array),
        ScalarKind::F32 => scalars
            .into_iter()
            .map(|v| v.as_f32())
            .collect::<Option<Vec<_>>>()
            .map(Value::F32Array),
        ScalarKind::Bool => scalars
            .into_iter()
            .map(|v| v.as_bool())
            .collect::<Option<Vec<_>>>()
            .map(Value::BoolArray),
    }
}

fn coverage_gap(node: &ObjectNode, field: &FieldNode, type_name: &str) -> ProjectError {
    ProjectError::CoverageGap {
        kind: node.kind.to_string(),
        field: field.name.to_string(),
        type_name: type_name.to_string(),
    }
}

fn malformed(node: &ObjectNode, field: &FieldNode) -> ProjectError {
    ProjectError::MalformedField {
        kind: node.kind.to_string(),
        field: field.name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spawncheck_core::{ObjectRef, TypeDesc};
    use spawncheck_test::StaticResolver;

    fn config() -> ProjectionConfig {
        ProjectionConfig::default()
    }

    fn item_node(id: &str) -> ObjectNode {
        ObjectNode::new(
            "FVRObject",
            vec![
                FieldNode::string("ItemID", id),
                FieldNode::int("Category", 1),
                FieldNode::int_array("Eras", &[2, 3]),
                FieldNode::string("m_GameObject", "ignored payload"),
            ],
        )
    }

    #[test]
    fn test_whitelist_filters_nodes() {
        let resolver = StaticResolver::default();
        let projector = Projector::new(config(), &resolver);
        let nodes = vec![
            item_node("ak47"),
            ObjectNode::new("AudioClip", vec![FieldNode::int("Channels", 2)]),
            ObjectNode::new(
                "ObjectTableDef",
                vec![FieldNode::string("m_Name", "T_Pistols")],
            ),
            ObjectNode::new(
                "ItemSpawnerID",
                vec![FieldNode::string("ItemID", "sid_ak47")],
            ),
        ];

        let store = projector.project(nodes).unwrap();
        assert_eq!(store.table_count(), 3);
        assert!(store.table("AudioClip").is_none());
    }

    #[test]
    fn test_columns_inferred_and_ignored_fields_dropped() {
        let resolver = StaticResolver::default();
        let projector = Projector::new(config(), &resolver);
        let nodes = vec![
            item_node("ak47"),
            ObjectNode::new(
                "ObjectTableDef",
                vec![FieldNode::string("m_Name", "T_Pistols")],
            ),
            ObjectNode::new(
                "ItemSpawnerID",
                vec![FieldNode::string("ItemID", "sid_ak47")],
            ),
        ];
        let store = projector.project(nodes).unwrap();

        let table = store.table("FVRObject").unwrap();
        let names: Vec<&str> = table.columns().iter().map(|c| c.name.as_ref()).collect();
        assert_eq!(names, vec!["ItemID", "Category", "Eras"]);
        assert_eq!(
            table.columns()[2].ty,
            ColumnType::Array(ScalarKind::I32)
        );
    }

    #[test]
    fn test_unmapped_scalar_type_is_fatal() {
        let resolver = StaticResolver::default();
        let projector = Projector::new(config(), &resolver);
        let nodes = vec![ObjectNode::new(
            "FVRObject",
            vec![FieldNode::new(
                "Rotation",
                TypeDesc::object("Quaternion"),
                FieldData::F32(0.0),
            )],
        )];

        let err = projector.project(nodes).unwrap_err();
        assert!(matches!(err, ProjectError::CoverageGap { .. }));
    }

    #[test]
    fn test_unmapped_array_element_type_is_fatal() {
        let resolver = StaticResolver::default();
        let projector = Projector::new(config(), &resolver);
        let nodes = vec![ObjectNode::new(
            "FVRObject",
            vec![FieldNode::new(
                "Transforms",
                TypeDesc::array(TypeDesc::object("Quaternion")),
                FieldData::Elements(vec![]),
            )],
        )];

        let err = projector.project(nodes).unwrap_err();
        assert!(matches!(err, ProjectError::CoverageGap { .. }));
    }

    #[test]
    fn test_suppressed_pointer_fields_are_skipped() {
        let mut resolver = StaticResolver::default();
        resolver.insert(
            ObjectRef::new(1),
            ObjectNode::new("Sprite", vec![FieldNode::string("m_Name", "icon")]),
        );
        let projector = Projector::new(config(), &resolver);
        let nodes = vec![
            ObjectNode::new(
                "FVRObject",
                vec![
                    FieldNode::string("ItemID", "ak47"),
                    FieldNode::reference("Sprite", "PPtr<$Sprite>", ObjectRef::new(1)),
                ],
            ),
            ObjectNode::new(
                "ObjectTableDef",
                vec![FieldNode::string("m_Name", "T_Pistols")],
            ),
            ObjectNode::new(
                "ItemSpawnerID",
                vec![FieldNode::string("ItemID", "sid_ak47")],
            ),
        ];
        let store = projector.project(nodes).unwrap();

        let table = store.table("FVRObject").unwrap();
        assert_eq!(table.columns().len(), 1);
        assert!(table.row(0).unwrap().get("Sprite").is_none());
    }

    #[test]
    fn test_reference_columns_flatten_to_keys() {
        let mut resolver = StaticResolver::default();
        resolver.insert(
            ObjectRef::new(10),
            ObjectNode::new("FVRObject", vec![FieldNode::string("ItemID", "ak47")]),
        );
        let projector = Projector::new(config(), &resolver);
        let nodes = vec![
            item_node("ak47"),
            ObjectNode::new(
                "ObjectTableDef",
                vec![FieldNode::string("m_Name", "T_Pistols")],
            ),
            ObjectNode::new(
                "ItemSpawnerID",
                vec![
                    FieldNode::string("ItemID", "sid_ak47"),
                    FieldNode::reference("MainObject", "PPtr<$FVRObject>", ObjectRef::new(10)),
                    FieldNode::reference("Secondary", "PPtr<$FVRObject>", ObjectRef::new(999)),
                ],
            ),
        ];
        let store = projector.project(nodes).unwrap();

        let row = store.table("ItemSpawnerID").unwrap().row(0).unwrap();
        assert_eq!(row.get("MainObject").and_then(Value::as_str), Some("ak47"));
        // Dangling pointer flattens to no-value instead of failing.
        assert!(row.get("Secondary").unwrap().is_none());
    }

    #[test]
    fn test_drift_between_instances_is_fatal() {
        let resolver = StaticResolver::default();
        let projector = Projector::new(config(), &resolver);
        let nodes = vec![
            item_node("ak47"),
            ObjectNode::new("FVRObject", vec![FieldNode::string("ItemID", "m9")]),
        ];

        let err = projector.project(nodes).unwrap_err();
        assert!(matches!(
            err,
            ProjectError::Schema(spawncheck_core::SchemaError::Drift { .. })
        ));
    }

    #[test]
    fn test_missing_whitelisted_table_is_fatal() {
        let resolver = StaticResolver::default();
        let projector = Projector::new(config(), &resolver);

        let err = projector.project(vec![item_node("ak47")]).unwrap_err();
        assert!(matches!(err, ProjectError::MissingTable { .. }));
    }

    #[test]
    fn test_projection_is_idempotent() {
        let resolver = StaticResolver::default();
        let projector = Projector::new(config(), &resolver);
        let nodes = vec![
            item_node("ak47"),
            item_node("m9"),
            ObjectNode::new(
                "ObjectTableDef",
                vec![FieldNode::string("m_Name", "T_Pistols")],
            ),
            ObjectNode::new(
                "ItemSpawnerID",
                vec![FieldNode::string("ItemID", "sid_ak47")],
            ),
        ];

        let first = projector.project(nodes.clone()).unwrap();
        let second = projector.project(nodes).unwrap();
        assert_eq!(first, second);
    }
}
