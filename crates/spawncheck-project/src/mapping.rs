//! Field mappings: how a declared field type becomes a typed column value.
//!
//! Mappings form a closed set of variants rather than trait objects, so
//! resolution and extraction stay pure functions over tagged data. Lookup is
//! two-stage: primitive value kind first, then the field's declared type
//! name (pointer and structured types). An explicit ignore set of field
//! names is checked before resolution and always wins.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use spawncheck_core::{FieldData, ReferenceResolver, ScalarKind, Store, TypeDesc, TypeKind, Value};

/// Read-only handle passed into every extraction call.
///
/// Mappings never capture the projector; anything they need beyond the field
/// payload comes in through here.
pub struct ProjectionContext<'a> {
    /// Tables loaded so far.
    pub store: &'a Store,
    /// Resolves cross-record pointers back into the source object graph.
    pub resolver: &'a dyn ReferenceResolver,
}

/// How one field type is projected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldMapping {
    /// Stored as a scalar column of the given kind.
    Scalar(ScalarKind),
    /// A cross-record pointer, flattened to the referenced object's key
    /// field as a string column. Dangling pointers flatten to no-value.
    Reference { key_field: Arc<str> },
    /// Recognized but deliberately dropped; never produces a column.
    Suppressed,
}

impl FieldMapping {
    /// The scalar kind of the column this mapping produces, or `None` for a
    /// suppressed mapping.
    pub fn column_kind(&self) -> Option<ScalarKind> {
        match self {
            FieldMapping::Scalar(kind) => Some(*kind),
            FieldMapping::Reference { .. } => Some(ScalarKind::Str),
            FieldMapping::Suppressed => None,
        }
    }

    /// Extracts the column value from a field payload.
    ///
    /// Returns `None` when the payload contradicts the mapping (the caller
    /// reports that as a malformed field). A resolvable pointer yields the
    /// target's key string; a dangling one yields `Value::None`.
    pub fn extract(&self, ctx: &ProjectionContext<'_>, data: &FieldData) -> Option<Value> {
        match self {
            FieldMapping::Scalar(kind) => extract_scalar(*kind, data),
            FieldMapping::Reference { key_field } => extract_reference(ctx, key_field, data),
            // The projector skips suppressed mappings before extraction.
            FieldMapping::Suppressed => unreachable!("suppressed mappings never extract"),
        }
    }
}

fn extract_scalar(kind: ScalarKind, data: &FieldData) -> Option<Value> {
    match kind {
        ScalarKind::Str => data.as_str().map(|v| Value::Str(v.clone())),
        ScalarKind::I32 => data.as_i32().map(Value::I32),
        ScalarKind::F32 => data.as_f32().map(Value::F32),
        ScalarKind::Bool => data.as_bool().map(Value::Bool),
    }
}

fn extract_reference(
    ctx: &ProjectionContext<'_>,
    key_field: &str,
    data: &FieldData,
) -> Option<Value> {
    let reference = data.as_reference()?;
    let Some(target) = ctx.resolver.resolve(reference) else {
        // Dangling or filtered out upstream: flatten to no-value.
        return Some(Value::None);
    };
    let id = target.field(key_field)?.data.as_str()?;
    Some(Value::Str(id.clone()))
}

/// Declares, per value kind and per named type, how fields are projected.
#[derive(Debug, Clone)]
pub struct MappingRegistry {
    by_kind: HashMap<ScalarKind, FieldMapping>,
    by_type_name: HashMap<Arc<str>, FieldMapping>,
    ignored_fields: HashSet<Arc<str>>,
}

impl MappingRegistry {
    /// A registry that projects the four primitive kinds and nothing else.
    pub fn new() -> Self {
        let by_kind = HashMap::from([
            (ScalarKind::Str, FieldMapping::Scalar(ScalarKind::Str)),
            (ScalarKind::I32, FieldMapping::Scalar(ScalarKind::I32)),
            (ScalarKind::F32, FieldMapping::Scalar(ScalarKind::F32)),
            (ScalarKind::Bool, FieldMapping::Scalar(ScalarKind::Bool)),
        ]);
        Self {
            by_kind,
            by_type_name: HashMap::new(),
            ignored_fields: HashSet::new(),
        }
    }

    /// The registry covering the known source format: primitive kinds,
    /// item and spawner-id pointers flattened via `ItemID`, and the pointer
    /// types we never project (sprites, infographics).
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add_reference("PPtr<$FVRObject>", "ItemID");
        registry.add_reference("PPtr<$ItemSpawnerID>", "ItemID");
        registry.suppress("PPtr<$Sprite>");
        registry.suppress("PPtr<$ItemSpawnerControlInfographic>");
        registry
    }

    /// Registers a pointer type, flattened to the target's `key_field`.
    pub fn add_reference(
        &mut self,
        type_name: impl Into<Arc<str>>,
        key_field: impl Into<Arc<str>>,
    ) {
        self.by_type_name.insert(
            type_name.into(),
            FieldMapping::Reference {
                key_field: key_field.into(),
            },
        );
    }

    /// Registers a type as recognized-but-dropped.
    pub fn suppress(&mut self, type_name: impl Into<Arc<str>>) {
        self.by_type_name
            .insert(type_name.into(), FieldMapping::Suppressed);
    }

    /// Adds a field name to the ignore set.
    pub fn ignore_field(&mut self, name: impl Into<Arc<str>>) {
        self.ignored_fields.insert(name.into());
    }

    /// Adds several field names to the ignore set.
    pub fn ignore_fields<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        for name in names {
            self.ignore_field(name);
        }
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored_fields.contains(name)
    }

    /// Resolves the mapping for a declared type: value kind first, then the
    /// type name. `None` means the registry does not cover this type.
    pub fn resolve(&self, ty: &TypeDesc) -> Option<&FieldMapping> {
        match &ty.kind {
            TypeKind::Scalar(kind) => self
                .by_kind
                .get(kind)
                .or_else(|| self.by_type_name.get(&ty.type_name)),
            TypeKind::Array(_) | TypeKind::Object => self.by_type_name.get(&ty.type_name),
        }
    }
}

impl Default for MappingRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spawncheck_core::{FieldNode, ObjectNode, ObjectRef};
    use spawncheck_test::StaticResolver;

    fn ctx<'a>(store: &'a Store, resolver: &'a StaticResolver) -> ProjectionContext<'a> {
        ProjectionContext { store, resolver }
    }

    #[test]
    fn test_resolution_order() {
        let registry = MappingRegistry::standard();

        let mapping = registry.resolve(&TypeDesc::int()).unwrap();
        assert_eq!(mapping.column_kind(), Some(ScalarKind::I32));

        let mapping = registry.resolve(&TypeDesc::object("PPtr<$FVRObject>")).unwrap();
        assert_eq!(mapping.column_kind(), Some(ScalarKind::Str));

        let mapping = registry.resolve(&TypeDesc::object("PPtr<$Sprite>")).unwrap();
        assert!(mapping.column_kind().is_none());

        assert!(registry.resolve(&TypeDesc::object("Quaternion")).is_none());
    }

    #[test]
    fn test_ignore_set() {
        let mut registry = MappingRegistry::new();
        registry.ignore_fields(["m_Script", "m_GameObject"]);
        assert!(registry.is_ignored("m_Script"));
        assert!(!registry.is_ignored("ItemID"));
    }

    #[test]
    fn test_scalar_extraction() {
        let store = Store::new();
        let resolver = StaticResolver::default();
        let ctx = ctx(&store, &resolver);

        let mapping = FieldMapping::Scalar(ScalarKind::I32);
        assert_eq!(mapping.extract(&ctx, &FieldData::I32(5)), Some(Value::I32(5)));
        // Payload contradicting the declared kind is malformed.
        assert_eq!(mapping.extract(&ctx, &FieldData::Bool(true)), None);
    }

    #[test]
    fn test_reference_flattens_to_key() {
        let store = Store::new();
        let mut resolver = StaticResolver::default();
        resolver.insert(
            ObjectRef::new(42),
            ObjectNode::new("FVRObject", vec![FieldNode::string("ItemID", "ak47")]),
        );
        let ctx = ctx(&store, &resolver);

        let mapping = FieldMapping::Reference {
            key_field: Arc::from("ItemID"),
        };
        assert_eq!(
            mapping.extract(&ctx, &FieldData::Reference(ObjectRef::new(42))),
            Some(Value::from("ak47"))
        );
    }

    #[test]
    fn test_dangling_reference_is_no_value() {
        let store = Store::new();
        let resolver = StaticResolver::default();
        let ctx = ctx(&store, &resolver);

        let mapping = FieldMapping::Reference {
            key_field: Arc::from("ItemID"),
        };
        assert_eq!(
            mapping.extract(&ctx, &FieldData::Reference(ObjectRef::new(7))),
            Some(Value::None)
        );
    }
}
