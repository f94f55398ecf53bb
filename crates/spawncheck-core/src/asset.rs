//! Field-tree input model.
//!
//! The asset container format itself is decoded by an external collaborator;
//! this module only defines the shape that decoder hands us: one
//! [`ObjectNode`] per serialized object instance, each carrying a flat list
//! of named fields with declared type descriptors. Cross-record pointers stay
//! opaque ([`ObjectRef`]) and are resolved on demand through a
//! [`ReferenceResolver`].

use std::sync::Arc;

use crate::value::ScalarKind;

/// An opaque handle to another serialized object in the source container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    pub path_id: i64,
}

impl ObjectRef {
    pub fn new(path_id: i64) -> Self {
        Self { path_id }
    }
}

/// Declared type of a field, as reported by the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDesc {
    pub kind: TypeKind,
    /// The format's own name for the type (e.g. `int`, `PPtr<$Sprite>`).
    pub type_name: Arc<str>,
}

/// Structural shape of a declared field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Scalar(ScalarKind),
    Array(Box<TypeDesc>),
    /// Structured or pointer types, matched by `type_name` only.
    Object,
}

impl TypeDesc {
    pub fn string() -> Self {
        Self {
            kind: TypeKind::Scalar(ScalarKind::Str),
            type_name: Arc::from("string"),
        }
    }

    pub fn int() -> Self {
        Self {
            kind: TypeKind::Scalar(ScalarKind::I32),
            type_name: Arc::from("int"),
        }
    }

    pub fn float() -> Self {
        Self {
            kind: TypeKind::Scalar(ScalarKind::F32),
            type_name: Arc::from("float"),
        }
    }

    pub fn boolean() -> Self {
        Self {
            kind: TypeKind::Scalar(ScalarKind::Bool),
            type_name: Arc::from("bool"),
        }
    }

    pub fn array(element: TypeDesc) -> Self {
        Self {
            kind: TypeKind::Array(Box::new(element)),
            type_name: Arc::from("Array"),
        }
    }

    pub fn object(type_name: impl Into<Arc<str>>) -> Self {
        Self {
            kind: TypeKind::Object,
            type_name: type_name.into(),
        }
    }
}

/// Raw payload of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldData {
    Str(Arc<str>),
    I32(i32),
    F32(f32),
    Bool(bool),
    /// Element payloads of an array field, in declared order.
    Elements(Vec<FieldData>),
    /// An unresolved cross-record pointer.
    Reference(ObjectRef),
}

impl FieldData {
    pub fn as_str(&self) -> Option<&Arc<str>> {
        match self {
            FieldData::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            FieldData::I32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            FieldData::F32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldData::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&ObjectRef> {
        match self {
            FieldData::Reference(v) => Some(v),
            _ => None,
        }
    }
}

/// A named field of a serialized object instance.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldNode {
    pub name: Arc<str>,
    pub ty: TypeDesc,
    pub data: FieldData,
}

impl FieldNode {
    pub fn new(name: impl Into<Arc<str>>, ty: TypeDesc, data: FieldData) -> Self {
        Self {
            name: name.into(),
            ty,
            data,
        }
    }

    pub fn string(name: impl Into<Arc<str>>, value: impl Into<Arc<str>>) -> Self {
        Self::new(name, TypeDesc::string(), FieldData::Str(value.into()))
    }

    pub fn int(name: impl Into<Arc<str>>, value: i32) -> Self {
        Self::new(name, TypeDesc::int(), FieldData::I32(value))
    }

    pub fn float(name: impl Into<Arc<str>>, value: f32) -> Self {
        Self::new(name, TypeDesc::float(), FieldData::F32(value))
    }

    pub fn boolean(name: impl Into<Arc<str>>, value: bool) -> Self {
        Self::new(name, TypeDesc::boolean(), FieldData::Bool(value))
    }

    pub fn int_array(name: impl Into<Arc<str>>, values: &[i32]) -> Self {
        Self::new(
            name,
            TypeDesc::array(TypeDesc::int()),
            FieldData::Elements(values.iter().map(|v| FieldData::I32(*v)).collect()),
        )
    }

    pub fn string_array(name: impl Into<Arc<str>>, values: &[&str]) -> Self {
        Self::new(
            name,
            TypeDesc::array(TypeDesc::string()),
            FieldData::Elements(
                values
                    .iter()
                    .map(|v| FieldData::Str(Arc::from(*v)))
                    .collect(),
            ),
        )
    }

    pub fn reference(
        name: impl Into<Arc<str>>,
        type_name: impl Into<Arc<str>>,
        target: ObjectRef,
    ) -> Self {
        Self::new(name, TypeDesc::object(type_name), FieldData::Reference(target))
    }
}

/// One serialized object instance: a record-kind name plus its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectNode {
    /// The declared record kind (script/class name in the source container).
    pub kind: Arc<str>,
    pub fields: Vec<FieldNode>,
}

impl ObjectNode {
    pub fn new(kind: impl Into<Arc<str>>, fields: Vec<FieldNode>) -> Self {
        Self {
            kind: kind.into(),
            fields,
        }
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldNode> {
        self.fields.iter().find(|f| f.name.as_ref() == name)
    }
}

/// Resolves an opaque cross-record pointer back into the object graph.
///
/// Returns `None` when the pointer is dangling or the target was filtered
/// out upstream; callers flatten that to a no-value rather than failing.
pub trait ReferenceResolver {
    fn resolve(&self, reference: &ObjectRef) -> Option<&ObjectNode>;
}
