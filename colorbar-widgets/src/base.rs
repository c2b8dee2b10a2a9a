//! Fields shared by every color-scale widget.

use std::sync::Arc;

use colorbar_common::{Error, Result};

use crate::scale::Scale;
use crate::schema::{AttrValue, DefaultValue, FieldKind, FieldSpec};
use crate::widget::COLORMAP;

pub const COLORMAP_FIELD: FieldSpec =
    FieldSpec::new(COLORMAP, FieldKind::Scale, DefaultValue::Required);

pub const BREADTH_FIELD: FieldSpec = FieldSpec::new(
    "breadth",
    FieldKind::Int { min: Some(1) },
    DefaultValue::Int(30),
);

pub const BORDER_THICKNESS_FIELD: FieldSpec = FieldSpec::new(
    "border_thickness",
    FieldKind::Float { min: Some(0.0) },
    DefaultValue::Float(1.0),
);

/// The shared field group, in declaration order.
pub const BASE_FIELDS: [FieldSpec; 3] = [COLORMAP_FIELD, BREADTH_FIELD, BORDER_THICKNESS_FIELD];

/// Colormap reference and sizing common to bars and editors.
///
/// Embedded in each concrete widget. Sizes are zero until seeded from
/// [`BASE_FIELDS`].
#[derive(Debug, Clone)]
pub struct BaseFields {
    colormap: Arc<dyn Scale>,
    breadth: i64,
    border_thickness: f64,
}

impl BaseFields {
    pub fn new(colormap: Arc<dyn Scale>) -> Self {
        Self {
            colormap,
            breadth: 0,
            border_thickness: 0.0,
        }
    }

    pub fn colormap(&self) -> &Arc<dyn Scale> {
        &self.colormap
    }

    /// Thickness of the bar across its length, in pixels.
    pub fn breadth(&self) -> i64 {
        self.breadth
    }

    pub fn border_thickness(&self) -> f64 {
        self.border_thickness
    }

    pub(crate) fn get(&self, name: &str) -> Option<AttrValue> {
        match name {
            COLORMAP => Some(AttrValue::Scale(self.colormap.clone())),
            "breadth" => Some(AttrValue::Int(self.breadth)),
            "border_thickness" => Some(AttrValue::Float(self.border_thickness)),
            _ => None,
        }
    }

    pub(crate) fn assign(&mut self, name: &str, value: AttrValue) -> Result<()> {
        match name {
            COLORMAP => self.colormap = value.into_scale(name)?,
            "breadth" => self.breadth = value.into_i64(name)?,
            "border_thickness" => self.border_thickness = value.into_f64(name)?,
            other => return Err(Error::UnknownField(other.to_string())),
        }
        Ok(())
    }
}
