//! Color map editor widget.

use std::sync::Arc;

use colorbar_common::{ModelId, ModuleConfig, Result};

use crate::base::{BORDER_THICKNESS_FIELD, BREADTH_FIELD, BaseFields, COLORMAP_FIELD};
use crate::comm::Comm;
use crate::layout::{ORIENTATIONS, Orientation};
use crate::scale::Scale;
use crate::schema::{AttrValue, DefaultValue, FieldKind, FieldSpec};
use crate::widget::{Widget, WidgetBuilder};

/// Schema table of [`ColorMapEditor`].
pub static EDITOR_FIELDS: [FieldSpec; 5] = [
    COLORMAP_FIELD,
    BREADTH_FIELD,
    BORDER_THICKNESS_FIELD,
    FieldSpec::new(
        "orientation",
        FieldKind::Choice(ORIENTATIONS),
        DefaultValue::Text("horizontal"),
    ),
    FieldSpec::new(
        "length",
        FieldKind::Int { min: Some(2) },
        DefaultValue::Int(300),
    ),
];

/// An interactive editor for the stops of a colormap.
#[derive(Debug, Clone)]
pub struct ColorMapEditor {
    id: ModelId,
    base: BaseFields,
    orientation: Orientation,
    length: i64,
    comm: Option<Comm>,
    module: ModuleConfig,
}

impl ColorMapEditor {
    pub fn new(colormap: Arc<dyn Scale>) -> Self {
        Self::create(ModelId::new(), colormap)
    }

    pub fn builder() -> WidgetBuilder<ColorMapEditor> {
        WidgetBuilder::new()
    }

    pub fn colormap(&self) -> &Arc<dyn Scale> {
        self.base.colormap()
    }

    pub fn breadth(&self) -> i64 {
        self.base.breadth()
    }

    pub fn border_thickness(&self) -> f64 {
        self.base.border_thickness()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn length(&self) -> i64 {
        self.length
    }

    pub fn set_colormap(&mut self, colormap: Arc<dyn Scale>) -> Result<()> {
        self.set("colormap", colormap)
    }

    pub fn set_breadth(&mut self, breadth: i64) -> Result<()> {
        self.set("breadth", breadth)
    }

    pub fn set_border_thickness(&mut self, thickness: f64) -> Result<()> {
        self.set("border_thickness", thickness)
    }

    pub fn set_orientation(&mut self, orientation: Orientation) -> Result<()> {
        self.set("orientation", orientation)
    }

    pub fn set_length(&mut self, length: i64) -> Result<()> {
        self.set("length", length)
    }
}

impl Widget for ColorMapEditor {
    const MODEL_NAME: &'static str = "ColorMapEditorModel";
    const VIEW_NAME: &'static str = "ColorMapEditorView";

    fn schema() -> &'static [FieldSpec] {
        &EDITOR_FIELDS
    }

    fn blank(model_id: ModelId, colormap: Arc<dyn Scale>) -> Self {
        Self {
            id: model_id,
            base: BaseFields::new(colormap),
            orientation: Orientation::Horizontal,
            length: 0,
            comm: None,
            module: ModuleConfig::default(),
        }
    }

    fn model_id(&self) -> &ModelId {
        &self.id
    }

    fn get(&self, name: &str) -> Option<AttrValue> {
        match name {
            "orientation" => Some(self.orientation.into()),
            "length" => Some(AttrValue::Int(self.length)),
            other => self.base.get(other),
        }
    }

    fn assign(&mut self, name: &str, value: AttrValue) -> Result<()> {
        match name {
            "orientation" => self.orientation = value.into_choice(name)?,
            "length" => self.length = value.into_i64(name)?,
            other => return self.base.assign(other, value),
        }
        Ok(())
    }

    fn comm(&self) -> Option<&Comm> {
        self.comm.as_ref()
    }

    fn set_comm(&mut self, comm: Option<Comm>) {
        self.comm = comm;
    }

    fn module(&self) -> &ModuleConfig {
        &self.module
    }

    fn set_module(&mut self, module: ModuleConfig) {
        self.module = module;
    }
}

impl WidgetBuilder<ColorMapEditor> {
    pub fn orientation(self, orientation: Orientation) -> Self {
        self.attr("orientation", orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::ScaleHandle;

    fn scale() -> Arc<dyn Scale> {
        Arc::new(ScaleHandle::new("LinearScaleModel"))
    }

    #[test]
    fn test_defaults() {
        let editor = ColorMapEditor::new(scale());

        assert_eq!(editor.orientation(), Orientation::Horizontal);
        assert_eq!(editor.length(), 300);
        assert_eq!(editor.breadth(), 30);
        assert_eq!(editor.border_thickness(), 1.0);
    }

    #[test]
    fn test_every_field_reads_its_declared_default() {
        let editor = ColorMapEditor::new(scale());
        for spec in &EDITOR_FIELDS[1..] {
            assert_eq!(editor.get(spec.name), spec.default_value(), "{}", spec.name);
        }
    }

    #[test]
    fn test_no_colorbar_only_fields() {
        let mut editor = ColorMapEditor::new(scale());
        assert!(editor.set("side", "topleft").is_err());
        assert!(editor.get("ticks").is_none());
        assert!(editor.get("title").is_none());
    }

    #[test]
    fn test_length_minimum() {
        let mut editor = ColorMapEditor::new(scale());
        assert!(editor.set_length(1).is_err());
        assert_eq!(editor.length(), 300);
        editor.set_length(2).unwrap();
        assert_eq!(editor.length(), 2);
    }

    #[test]
    fn test_builder() {
        let editor = ColorMapEditor::builder()
            .colormap(scale())
            .orientation(Orientation::Vertical)
            .breadth(12)
            .build()
            .unwrap();

        assert_eq!(editor.orientation(), Orientation::Vertical);
        assert_eq!(editor.breadth(), 12);
        assert_eq!(editor.length(), 300);
    }
}
