//! Table and column names of the eligibility-relevant records.

/// Projected table names.
pub mod table {
    pub const ITEMS: &str = "FVRObject";
    pub const SPAWN_TABLES: &str = "ObjectTableDef";
    pub const SPAWNER_IDS: &str = "ItemSpawnerID";
}

/// Non-axis columns read by the evaluator.
pub mod col {
    pub const NAME: &str = "m_Name";
    pub const ITEM_ID: &str = "ItemID";
    pub const USE_ID_LIST_OVERRIDE: &str = "UseIDListOverride";
    pub const ID_OVERRIDE: &str = "IDOverride";
    pub const CATEGORY: &str = "Category";
    pub const OSPLE: &str = "OSple";
    pub const MIN_AMMO_CAPACITY: &str = "MinAmmoCapacity";
    pub const MAX_AMMO_CAPACITY: &str = "MaxAmmoCapacity";
    pub const MIN_CAPACITY_RELATED: &str = "MinCapacityRelated";
    pub const MAX_CAPACITY_RELATED: &str = "MaxCapacityRelated";
}

/// Scalar tag axes: the table carries an allowed-value set, the item one
/// value. An empty set means unrestricted. `(table column, item column)`.
pub const SCALAR_AXES: [(&str, &str); 12] = [
    ("Eras", "TagEra"),
    ("Sets", "TagSet"),
    ("Sizes", "TagFirearmSize"),
    ("Actions", "TagFirearmAction"),
    ("RoundPowers", "TagFirearmRoundPower"),
    ("PowerupTypes", "TagPowerupType"),
    ("ThrownTypes", "TagThrownType"),
    ("ThrownDamageTypes", "TagThrownDamageType"),
    ("MeleeStyles", "TagMeleeStyle"),
    ("MeleeHandedness", "TagMeleeHandedness"),
    ("MountTypes", "TagAttachmentMount"),
    ("Features", "TagAttachmentFeature"),
];

/// Set tag axes: both sides carry value sets; any overlap passes.
pub const OVERLAP_AXES: [(&str, &str); 3] = [
    ("Modes", "TagFirearmFiringModes"),
    ("Feedoptions", "TagFirearmFeedOption"),
    ("MountsAvailable", "TagFirearmMounts"),
];

/// Inverted set tag axes: any overlap fails.
pub const EXCLUSION_AXES: [(&str, &str); 1] = [("ExcludeModes", "TagFirearmFiringModes")];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixteen_axes_total() {
        assert_eq!(
            SCALAR_AXES.len() + OVERLAP_AXES.len() + EXCLUSION_AXES.len(),
            16
        );
    }

    #[test]
    fn test_axis_columns_are_unique_per_side() {
        let mut table_cols: Vec<&str> = SCALAR_AXES
            .iter()
            .chain(OVERLAP_AXES.iter())
            .chain(EXCLUSION_AXES.iter())
            .map(|(table_col, _)| *table_col)
            .collect();
        table_cols.sort_unstable();
        table_cols.dedup();
        assert_eq!(table_cols.len(), 16);
    }
}
