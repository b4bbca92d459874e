use rawbuf::IoBuffer;

use crate::{Field, Record, Result, get_list, put_list, record_field};

/// Name, unit and value range of one dataset axis.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisDescription {
    pub name: String,
    pub unit: String,
    pub min: f64,
    pub max: f64,
}

impl AxisDescription {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            min,
            max,
        }
    }

    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

impl Record for AxisDescription {
    const TYPE_NAME: &'static str = "AxisDescription";
    const FIELDS: &'static [Field<Self>] = &[
        record_field!(AxisDescription, "name", name: String),
        record_field!(AxisDescription, "unit", unit: String),
        record_field!(AxisDescription, "min", min: f64),
        record_field!(AxisDescription, "max", max: f64),
    ];

    fn element_name(&self) -> &str {
        &self.name
    }
}

/// Field name used by [`put_axis_descriptions`].
pub const AXIS_DESCRIPTIONS_FIELD: &str = "axisDescriptions";

pub fn put_axis_descriptions(buffer: &mut IoBuffer, axes: &[AxisDescription]) -> Result<u32> {
    put_list(buffer, AXIS_DESCRIPTIONS_FIELD, axes)
}

pub fn get_axis_descriptions(buffer: &mut IoBuffer) -> Result<Vec<AxisDescription>> {
    get_list(buffer)
}
