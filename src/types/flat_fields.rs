//! Flattened name → value view over the decoded records

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::{BitmapInfoHeader, FileHeader, Setup, TaggedBlocks};

/// Every retained field addressable by its own name, built from the
/// structured records. Tagged blocks contribute `time_only`, `time_float`,
/// `exposure_only` and `exposure_float`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlatFields(BTreeMap<String, Value>);

impl FlatFields {
    pub fn from_records(
        header: &FileHeader,
        bitmap_info: &BitmapInfoHeader,
        setup: &Setup,
        blocks: &TaggedBlocks,
    ) -> serde_json::Result<Self> {
        let mut fields = BTreeMap::new();
        for record in [
            serde_json::to_value(header)?,
            serde_json::to_value(bitmap_info)?,
            serde_json::to_value(setup)?,
        ] {
            if let Value::Object(map) = record {
                fields.extend(map);
            }
        }

        if let Some(block) = blocks.time_only() {
            fields.insert("time_only".into(), serde_json::to_value(&block.times)?);
            fields.insert(
                "time_float".into(),
                serde_json::to_value(block.time_float.to_vec())?,
            );
        }
        if let Some(block) = blocks.exposure_only() {
            fields.insert(
                "exposure_only".into(),
                serde_json::to_value(&block.fractions)?,
            );
            fields.insert(
                "exposure_float".into(),
                serde_json::to_value(block.exposure_float.to_vec())?,
            );
        }
        Ok(Self(fields))
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
