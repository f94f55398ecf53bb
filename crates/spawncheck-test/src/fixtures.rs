//! Synthetic items, spawn tables, and a small sample armory.
//!
//! Fixture shapes mirror the full column set the eligibility checks read, so
//! rows built from them are always shape-complete. Builders produce either
//! raw field-tree nodes (to exercise the projector) or projected rows (to
//! exercise the evaluator directly).

use std::sync::Arc;

use spawncheck_core::{
    ColumnType, FieldNode, ObjectNode, ObjectRef, ProjectedField, ScalarKind, Store, Value,
};

use crate::resolver::StaticResolver;

/// A spawnable item (an `FVRObject` record).
#[derive(Debug, Clone)]
pub struct ItemFixture {
    pub id: String,
    pub category: i32,
    pub osple: bool,
    pub mass: f32,
    pub min_capacity: i32,
    pub max_capacity: i32,
    pub era: i32,
    pub set: i32,
    pub size: i32,
    pub action: i32,
    pub round_power: i32,
    pub powerup_type: i32,
    pub thrown_type: i32,
    pub thrown_damage_type: i32,
    pub melee_style: i32,
    pub melee_handedness: i32,
    pub mount_type: i32,
    pub feature: i32,
    pub firing_modes: Vec<i32>,
    pub feed_options: Vec<i32>,
    pub mounts: Vec<i32>,
}

impl ItemFixture {
    /// An eligible category-1 item with no tags and unset capacities.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: 1,
            osple: true,
            mass: 1.0,
            min_capacity: -1,
            max_capacity: -1,
            era: 0,
            set: 0,
            size: 0,
            action: 0,
            round_power: 0,
            powerup_type: 0,
            thrown_type: 0,
            thrown_damage_type: 0,
            melee_style: 0,
            melee_handedness: 0,
            mount_type: 0,
            feature: 0,
            firing_modes: Vec::new(),
            feed_options: Vec::new(),
            mounts: Vec::new(),
        }
    }

    pub fn category(mut self, category: i32) -> Self {
        self.category = category;
        self
    }

    pub fn osple(mut self, osple: bool) -> Self {
        self.osple = osple;
        self
    }

    pub fn capacity(mut self, min: i32, max: i32) -> Self {
        self.min_capacity = min;
        self.max_capacity = max;
        self
    }

    pub fn era(mut self, era: i32) -> Self {
        self.era = era;
        self
    }

    pub fn size(mut self, size: i32) -> Self {
        self.size = size;
        self
    }

    pub fn action(mut self, action: i32) -> Self {
        self.action = action;
        self
    }

    pub fn thrown_type(mut self, thrown_type: i32) -> Self {
        self.thrown_type = thrown_type;
        self
    }

    pub fn firing_modes(mut self, modes: &[i32]) -> Self {
        self.firing_modes = modes.to_vec();
        self
    }

    pub fn feed_options(mut self, options: &[i32]) -> Self {
        self.feed_options = options.to_vec();
        self
    }

    pub fn mounts(mut self, mounts: &[i32]) -> Self {
        self.mounts = mounts.to_vec();
        self
    }

    /// This item as a raw field-tree node, including an ignored engine field.
    pub fn node(&self) -> ObjectNode {
        ObjectNode::new(
            "FVRObject",
            vec![
                FieldNode::string("m_GameObject", "engine bookkeeping"),
                FieldNode::string("m_Name", self.id.as_str()),
                FieldNode::string("ItemID", self.id.as_str()),
                FieldNode::int("Category", self.category),
                FieldNode::boolean("OSple", self.osple),
                FieldNode::float("Mass", self.mass),
                FieldNode::int("MinCapacityRelated", self.min_capacity),
                FieldNode::int("MaxCapacityRelated", self.max_capacity),
                FieldNode::int("TagEra", self.era),
                FieldNode::int("TagSet", self.set),
                FieldNode::int("TagFirearmSize", self.size),
                FieldNode::int("TagFirearmAction", self.action),
                FieldNode::int("TagFirearmRoundPower", self.round_power),
                FieldNode::int("TagPowerupType", self.powerup_type),
                FieldNode::int("TagThrownType", self.thrown_type),
                FieldNode::int("TagThrownDamageType", self.thrown_damage_type),
                FieldNode::int("TagMeleeStyle", self.melee_style),
                FieldNode::int("TagMeleeHandedness", self.melee_handedness),
                FieldNode::int("TagAttachmentMount", self.mount_type),
                FieldNode::int("TagAttachmentFeature", self.feature),
                FieldNode::int_array("TagFirearmFiringModes", &self.firing_modes),
                FieldNode::int_array("TagFirearmFeedOption", &self.feed_options),
                FieldNode::int_array("TagFirearmMounts", &self.mounts),
            ],
        )
    }

    /// This item as an already-projected row.
    pub fn projected_fields(&self) -> Vec<ProjectedField> {
        let mut out = vec![
            scalar_str("m_Name", &self.id),
            scalar_str("ItemID", &self.id),
            scalar_i32("Category", self.category),
            scalar_bool("OSple", self.osple),
            ProjectedField::new(
                "Mass",
                ColumnType::Scalar(ScalarKind::F32),
                Value::F32(self.mass),
            ),
            scalar_i32("MinCapacityRelated", self.min_capacity),
            scalar_i32("MaxCapacityRelated", self.max_capacity),
            scalar_i32("TagEra", self.era),
            scalar_i32("TagSet", self.set),
            scalar_i32("TagFirearmSize", self.size),
            scalar_i32("TagFirearmAction", self.action),
            scalar_i32("TagFirearmRoundPower", self.round_power),
            scalar_i32("TagPowerupType", self.powerup_type),
            scalar_i32("TagThrownType", self.thrown_type),
            scalar_i32("TagThrownDamageType", self.thrown_damage_type),
            scalar_i32("TagMeleeStyle", self.melee_style),
            scalar_i32("TagMeleeHandedness", self.melee_handedness),
            scalar_i32("TagAttachmentMount", self.mount_type),
            scalar_i32("TagAttachmentFeature", self.feature),
        ];
        out.push(array_i32("TagFirearmFiringModes", &self.firing_modes));
        out.push(array_i32("TagFirearmFeedOption", &self.feed_options));
        out.push(array_i32("TagFirearmMounts", &self.mounts));
        out
    }
}

/// A spawn-table definition (an `ObjectTableDef` record).
#[derive(Debug, Clone)]
pub struct RuleFixture {
    pub name: String,
    pub use_id_list_override: bool,
    pub id_override: Vec<String>,
    pub category: i32,
    pub min_ammo_capacity: i32,
    pub max_ammo_capacity: i32,
    pub eras: Vec<i32>,
    pub sets: Vec<i32>,
    pub sizes: Vec<i32>,
    pub actions: Vec<i32>,
    pub round_powers: Vec<i32>,
    pub powerup_types: Vec<i32>,
    pub thrown_types: Vec<i32>,
    pub thrown_damage_types: Vec<i32>,
    pub melee_styles: Vec<i32>,
    pub melee_handedness: Vec<i32>,
    pub mount_types: Vec<i32>,
    pub features: Vec<i32>,
    pub modes: Vec<i32>,
    pub feed_options: Vec<i32>,
    pub mounts_available: Vec<i32>,
    pub exclude_modes: Vec<i32>,
}

impl RuleFixture {
    /// A category-1 table with every axis unrestricted.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            use_id_list_override: false,
            id_override: Vec::new(),
            category: 1,
            min_ammo_capacity: -1,
            max_ammo_capacity: -1,
            eras: Vec::new(),
            sets: Vec::new(),
            sizes: Vec::new(),
            actions: Vec::new(),
            round_powers: Vec::new(),
            powerup_types: Vec::new(),
            thrown_types: Vec::new(),
            thrown_damage_types: Vec::new(),
            melee_styles: Vec::new(),
            melee_handedness: Vec::new(),
            mount_types: Vec::new(),
            features: Vec::new(),
            modes: Vec::new(),
            feed_options: Vec::new(),
            mounts_available: Vec::new(),
            exclude_modes: Vec::new(),
        }
    }

    pub fn category(mut self, category: i32) -> Self {
        self.category = category;
        self
    }

    pub fn id_override(mut self, ids: &[&str]) -> Self {
        self.use_id_list_override = true;
        self.id_override = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn ammo_capacity(mut self, min: i32, max: i32) -> Self {
        self.min_ammo_capacity = min;
        self.max_ammo_capacity = max;
        self
    }

    pub fn eras(mut self, eras: &[i32]) -> Self {
        self.eras = eras.to_vec();
        self
    }

    pub fn sizes(mut self, sizes: &[i32]) -> Self {
        self.sizes = sizes.to_vec();
        self
    }

    pub fn actions(mut self, actions: &[i32]) -> Self {
        self.actions = actions.to_vec();
        self
    }

    pub fn thrown_types(mut self, thrown_types: &[i32]) -> Self {
        self.thrown_types = thrown_types.to_vec();
        self
    }

    pub fn modes(mut self, modes: &[i32]) -> Self {
        self.modes = modes.to_vec();
        self
    }

    pub fn feed_options(mut self, options: &[i32]) -> Self {
        self.feed_options = options.to_vec();
        self
    }

    pub fn mounts_available(mut self, mounts: &[i32]) -> Self {
        self.mounts_available = mounts.to_vec();
        self
    }

    pub fn exclude_modes(mut self, modes: &[i32]) -> Self {
        self.exclude_modes = modes.to_vec();
        self
    }

    /// This table as a raw field-tree node.
    pub fn node(&self) -> ObjectNode {
        let ids: Vec<&str> = self.id_override.iter().map(String::as_str).collect();
        ObjectNode::new(
            "ObjectTableDef",
            vec![
                FieldNode::string("m_Name", self.name.as_str()),
                FieldNode::boolean("UseIDListOverride", self.use_id_list_override),
                FieldNode::string_array("IDOverride", &ids),
                FieldNode::int("Category", self.category),
                FieldNode::int("MinAmmoCapacity", self.min_ammo_capacity),
                FieldNode::int("MaxAmmoCapacity", self.max_ammo_capacity),
                FieldNode::int_array("Eras", &self.eras),
                FieldNode::int_array("Sets", &self.sets),
                FieldNode::int_array("Sizes", &self.sizes),
                FieldNode::int_array("Actions", &self.actions),
                FieldNode::int_array("RoundPowers", &self.round_powers),
                FieldNode::int_array("PowerupTypes", &self.powerup_types),
                FieldNode::int_array("ThrownTypes", &self.thrown_types),
                FieldNode::int_array("ThrownDamageTypes", &self.thrown_damage_types),
                FieldNode::int_array("MeleeStyles", &self.melee_styles),
                FieldNode::int_array("MeleeHandedness", &self.melee_handedness),
                FieldNode::int_array("MountTypes", &self.mount_types),
                FieldNode::int_array("Features", &self.features),
                FieldNode::int_array("Modes", &self.modes),
                FieldNode::int_array("Feedoptions", &self.feed_options),
                FieldNode::int_array("MountsAvailable", &self.mounts_available),
                FieldNode::int_array("ExcludeModes", &self.exclude_modes),
            ],
        )
    }

    /// This table as an already-projected row.
    pub fn projected_fields(&self) -> Vec<ProjectedField> {
        let ids: Vec<Arc<str>> = self
            .id_override
            .iter()
            .map(|s| Arc::from(s.as_str()))
            .collect();
        vec![
            scalar_str("m_Name", &self.name),
            scalar_bool("UseIDListOverride", self.use_id_list_override),
            ProjectedField::new(
                "IDOverride",
                ColumnType::Array(ScalarKind::Str),
                Value::StrArray(ids),
            ),
            scalar_i32("Category", self.category),
            scalar_i32("MinAmmoCapacity", self.min_ammo_capacity),
            scalar_i32("MaxAmmoCapacity", self.max_ammo_capacity),
            array_i32("Eras", &self.eras),
            array_i32("Sets", &self.sets),
            array_i32("Sizes", &self.sizes),
            array_i32("Actions", &self.actions),
            array_i32("RoundPowers", &self.round_powers),
            array_i32("PowerupTypes", &self.powerup_types),
            array_i32("ThrownTypes", &self.thrown_types),
            array_i32("ThrownDamageTypes", &self.thrown_damage_types),
            array_i32("MeleeStyles", &self.melee_styles),
            array_i32("MeleeHandedness", &self.melee_handedness),
            array_i32("MountTypes", &self.mount_types),
            array_i32("Features", &self.features),
            array_i32("Modes", &self.modes),
            array_i32("Feedoptions", &self.feed_options),
            array_i32("MountsAvailable", &self.mounts_available),
            array_i32("ExcludeModes", &self.exclude_modes),
        ]
    }
}

fn scalar_str(name: &str, value: &str) -> ProjectedField {
    ProjectedField::new(name, ColumnType::Scalar(ScalarKind::Str), Value::from(value))
}

fn scalar_i32(name: &str, value: i32) -> ProjectedField {
    ProjectedField::new(name, ColumnType::Scalar(ScalarKind::I32), Value::I32(value))
}

fn scalar_bool(name: &str, value: bool) -> ProjectedField {
    ProjectedField::new(name, ColumnType::Scalar(ScalarKind::Bool), Value::Bool(value))
}

fn array_i32(name: &str, values: &[i32]) -> ProjectedField {
    ProjectedField::new(
        name,
        ColumnType::Array(ScalarKind::I32),
        Value::I32Array(values.to_vec()),
    )
}

/// Builds a keyed store directly from projected fixture rows, bypassing the
/// projector.
pub fn store_of(rules: &[RuleFixture], items: &[ItemFixture]) -> Store {
    let mut store = Store::new();
    let rule_kind: Arc<str> = Arc::from("ObjectTableDef");
    let item_kind: Arc<str> = Arc::from("FVRObject");

    for rule in rules {
        store
            .get_or_create(&rule_kind)
            .insert_row(rule.projected_fields())
            .expect("fixture rule rows are shape-consistent");
    }
    for item in items {
        store
            .get_or_create(&item_kind)
            .insert_row(item.projected_fields())
            .expect("fixture item rows are shape-consistent");
    }
    if !rules.is_empty() {
        store
            .table_mut("ObjectTableDef")
            .expect("rule table exists")
            .set_primary_key("m_Name")
            .expect("fixture rule names are unique");
    }
    if !items.is_empty() {
        store
            .table_mut("FVRObject")
            .expect("item table exists")
            .set_primary_key("ItemID")
            .expect("fixture item ids are unique");
    }
    store
}

/// A small sample armory: five firearms, one thrown item, four spawn
/// tables, and spawner-id records pointing back at the items (one of them
/// dangling). Returns the node stream plus a resolver covering the items.
pub fn armory() -> (Vec<ObjectNode>, StaticResolver) {
    let items = vec![
        ItemFixture::new("pistol_m9")
            .era(2)
            .size(1)
            .action(1)
            .firing_modes(&[1])
            .feed_options(&[1])
            .capacity(15, 17),
        ItemFixture::new("rifle_ak")
            .era(3)
            .size(3)
            .action(2)
            .firing_modes(&[1, 2])
            .feed_options(&[1])
            .capacity(10, 30),
        ItemFixture::new("pistol_flint")
            .era(0)
            .size(1)
            .firing_modes(&[0])
            .feed_options(&[0])
            .capacity(1, 1),
        ItemFixture::new("smg_mp5")
            .era(3)
            .size(2)
            .action(2)
            .firing_modes(&[1, 2])
            .feed_options(&[1])
            .capacity(15, 30),
        ItemFixture::new("pistol_giant")
            .era(2)
            .size(4)
            .action(1)
            .firing_modes(&[1])
            .feed_options(&[1])
            .capacity(7, 7),
        ItemFixture::new("grenade_frag").category(2).thrown_type(1),
    ];

    let rules = vec![
        RuleFixture::new("FA_ALL"),
        RuleFixture::new("T_PistolsModern").eras(&[2, 3]).sizes(&[1]),
        RuleFixture::new("T_Longarms").sizes(&[2, 3]).exclude_modes(&[0]),
        RuleFixture::new("T_Museum").id_override(&["pistol_flint"]),
    ];

    let mut resolver = StaticResolver::new();
    let mut nodes: Vec<ObjectNode> = Vec::new();

    for (idx, item) in items.iter().enumerate() {
        let node = item.node();
        resolver.insert(ObjectRef::new(100 + idx as i64), node.clone());
        nodes.push(node);
    }
    nodes.extend(rules.iter().map(RuleFixture::node));

    for (idx, item) in items.iter().enumerate() {
        nodes.push(ObjectNode::new(
            "ItemSpawnerID",
            vec![
                FieldNode::string("ItemID", format!("sid_{}", item.id)),
                FieldNode::reference(
                    "MainObject",
                    "PPtr<$FVRObject>",
                    ObjectRef::new(100 + idx as i64),
                ),
                FieldNode::reference("Sprite", "PPtr<$Sprite>", ObjectRef::new(900)),
            ],
        ));
    }
    // A spawner id whose item was filtered out upstream.
    nodes.push(ObjectNode::new(
        "ItemSpawnerID",
        vec![
            FieldNode::string("ItemID", "sid_legacy"),
            FieldNode::reference("MainObject", "PPtr<$FVRObject>", ObjectRef::new(666)),
            FieldNode::reference("Sprite", "PPtr<$Sprite>", ObjectRef::new(900)),
        ],
    ));

    (nodes, resolver)
}
