//! Color bar display widget.

use std::sync::Arc;

use serde_json::Value;

use colorbar_common::{ModelId, ModuleConfig, Result};

use crate::base::{BORDER_THICKNESS_FIELD, BREADTH_FIELD, BaseFields, COLORMAP_FIELD};
use crate::comm::Comm;
use crate::layout::{ORIENTATIONS, Orientation, SIDES, Side};
use crate::scale::Scale;
use crate::schema::{AttrValue, DefaultValue, FieldKind, FieldSpec};
use crate::widget::{Widget, WidgetBuilder};

/// Schema table of [`ColorBar`].
pub static COLORBAR_FIELDS: [FieldSpec; 16] = [
    COLORMAP_FIELD,
    BREADTH_FIELD,
    BORDER_THICKNESS_FIELD,
    FieldSpec::new(
        "orientation",
        FieldKind::Choice(ORIENTATIONS),
        DefaultValue::Text("vertical"),
    ),
    FieldSpec::new(
        "side",
        FieldKind::Choice(SIDES),
        DefaultValue::Text("bottomright"),
    ),
    FieldSpec::new(
        "length",
        FieldKind::Int { min: Some(2) },
        DefaultValue::Int(100),
    ),
    FieldSpec::new("title", FieldKind::OptionalText, DefaultValue::None),
    FieldSpec::new(
        "title_padding",
        FieldKind::Int { min: None },
        DefaultValue::Int(30),
    ),
    FieldSpec::new("axis_padding", FieldKind::OptionalInt, DefaultValue::None),
    FieldSpec::new(
        "tick_arguments",
        FieldKind::OptionalSequence,
        DefaultValue::None,
    ),
    FieldSpec::new("tick_values", FieldKind::OptionalSequence, DefaultValue::None),
    FieldSpec::new("tick_format", FieldKind::OptionalSequence, DefaultValue::None),
    FieldSpec::new(
        "tick_size_inner",
        FieldKind::Float { min: None },
        DefaultValue::Float(6.0),
    ),
    FieldSpec::new(
        "tick_size_outer",
        FieldKind::Float { min: None },
        DefaultValue::Float(6.0),
    ),
    FieldSpec::new(
        "tick_padding",
        FieldKind::Float { min: None },
        DefaultValue::Float(3.0),
    ),
    // Hint for the local owner only; the view derives its own tick count.
    FieldSpec::new("ticks", FieldKind::Int { min: None }, DefaultValue::Int(10)).local(),
];

/// Axis tick configuration of a [`ColorBar`].
///
/// The sequences are passed to the view's axis untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickConfig {
    pub arguments: Option<Vec<Value>>,
    pub values: Option<Vec<Value>>,
    pub format: Option<Vec<Value>>,
    pub size_inner: f64,
    pub size_outer: f64,
    pub padding: f64,
    /// Suggested tick count, not synchronized.
    pub count: i64,
}

/// A color bar: the colormap drawn as a bar with an axis.
#[derive(Debug, Clone)]
pub struct ColorBar {
    id: ModelId,
    base: BaseFields,
    orientation: Orientation,
    side: Side,
    length: i64,
    title: Option<String>,
    title_padding: i64,
    axis_padding: Option<i64>,
    ticks: TickConfig,
    comm: Option<Comm>,
    module: ModuleConfig,
}

impl ColorBar {
    /// Create a color bar with default settings.
    pub fn new(colormap: Arc<dyn Scale>) -> Self {
        Self::create(ModelId::new(), colormap)
    }

    /// Start building a color bar. `build` fails unless a colormap is given.
    pub fn builder() -> WidgetBuilder<ColorBar> {
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

    pub fn side(&self) -> Side {
        self.side
    }

    /// Length of the bar along its orientation, in pixels.
    pub fn length(&self) -> i64 {
        self.length
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn title_padding(&self) -> i64 {
        self.title_padding
    }

    pub fn axis_padding(&self) -> Option<i64> {
        self.axis_padding
    }

    pub fn tick_config(&self) -> &TickConfig {
        &self.ticks
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

    pub fn set_side(&mut self, side: Side) -> Result<()> {
        self.set("side", side)
    }

    pub fn set_length(&mut self, length: i64) -> Result<()> {
        self.set("length", length)
    }

    pub fn set_title(&mut self, title: Option<&str>) -> Result<()> {
        self.set("title", title)
    }

    pub fn set_title_padding(&mut self, padding: i64) -> Result<()> {
        self.set("title_padding", padding)
    }

    pub fn set_axis_padding(&mut self, padding: Option<i64>) -> Result<()> {
        self.set("axis_padding", padding)
    }

    pub fn set_tick_arguments(&mut self, arguments: Option<Vec<Value>>) -> Result<()> {
        self.set("tick_arguments", arguments)
    }

    pub fn set_tick_values(&mut self, values: Option<Vec<Value>>) -> Result<()> {
        self.set("tick_values", values)
    }

    pub fn set_tick_format(&mut self, format: Option<Vec<Value>>) -> Result<()> {
        self.set("tick_format", format)
    }

    pub fn set_tick_size_inner(&mut self, size: f64) -> Result<()> {
        self.set("tick_size_inner", size)
    }

    pub fn set_tick_size_outer(&mut self, size: f64) -> Result<()> {
        self.set("tick_size_outer", size)
    }

    pub fn set_tick_padding(&mut self, padding: f64) -> Result<()> {
        self.set("tick_padding", padding)
    }

    pub fn set_ticks(&mut self, count: i64) -> Result<()> {
        self.set("ticks", count)
    }
}

impl Widget for ColorBar {
    const MODEL_NAME: &'static str = "ColorBarModel";
    const VIEW_NAME: &'static str = "ColorBarView";

    fn schema() -> &'static [FieldSpec] {
        &COLORBAR_FIELDS
    }

    fn blank(model_id: ModelId, colormap: Arc<dyn Scale>) -> Self {
        Self {
            id: model_id,
            base: BaseFields::new(colormap),
            orientation: Orientation::Vertical,
            side: Side::BottomRight,
            length: 0,
            title: None,
            title_padding: 0,
            axis_padding: None,
            ticks: TickConfig::default(),
            comm: None,
            module: ModuleConfig::default(),
        }
    }

    fn model_id(&self) -> &ModelId {
        &self.id
    }

    fn get(&self, name: &str) -> Option<AttrValue> {
        let value = match name {
            "orientation" => self.orientation.into(),
            "side" => self.side.into(),
            "length" => AttrValue::Int(self.length),
            "title" => self.title.clone().into(),
            "title_padding" => AttrValue::Int(self.title_padding),
            "axis_padding" => self.axis_padding.into(),
            "tick_arguments" => self.ticks.arguments.clone().into(),
            "tick_values" => self.ticks.values.clone().into(),
            "tick_format" => self.ticks.format.clone().into(),
            "tick_size_inner" => AttrValue::Float(self.ticks.size_inner),
            "tick_size_outer" => AttrValue::Float(self.ticks.size_outer),
            "tick_padding" => AttrValue::Float(self.ticks.padding),
            "ticks" => AttrValue::Int(self.ticks.count),
            other => return self.base.get(other),
        };
        Some(value)
    }

    fn assign(&mut self, name: &str, value: AttrValue) -> Result<()> {
        match name {
            "orientation" => self.orientation = value.into_choice(name)?,
            "side" => self.side = value.into_choice(name)?,
            "length" => self.length = value.into_i64(name)?,
            "title" => self.title = value.into_opt_text(name)?,
            "title_padding" => self.title_padding = value.into_i64(name)?,
            "axis_padding" => self.axis_padding = value.into_opt_i64(name)?,
            "tick_arguments" => self.ticks.arguments = value.into_opt_sequence(name)?,
            "tick_values" => self.ticks.values = value.into_opt_sequence(name)?,
            "tick_format" => self.ticks.format = value.into_opt_sequence(name)?,
            "tick_size_inner" => self.ticks.size_inner = value.into_f64(name)?,
            "tick_size_outer" => self.ticks.size_outer = value.into_f64(name)?,
            "tick_padding" => self.ticks.padding = value.into_f64(name)?,
            "ticks" => self.ticks.count = value.into_i64(name)?,
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

impl WidgetBuilder<ColorBar> {
    pub fn orientation(self, orientation: Orientation) -> Self {
        self.attr("orientation", orientation)
    }

    pub fn side(self, side: Side) -> Self {
        self.attr("side", side)
    }

    pub fn title(self, title: impl Into<String>) -> Self {
        self.attr("title", title.into())
    }

    pub fn title_padding(self, padding: i64) -> Self {
        self.attr("title_padding", padding)
    }

    pub fn axis_padding(self, padding: i64) -> Self {
        self.attr("axis_padding", padding)
    }

    pub fn tick_values(self, values: Vec<Value>) -> Self {
        self.attr("tick_values", values)
    }

    pub fn tick_format(self, format: Vec<Value>) -> Self {
        self.attr("tick_format", format)
    }

    pub fn ticks(self, count: i64) -> Self {
        self.attr("ticks", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::ScaleHandle;
    use colorbar_common::Error;

    fn scale() -> Arc<dyn Scale> {
        Arc::new(ScaleHandle::new("LinearScaleModel"))
    }

    #[test]
    fn test_defaults() {
        let bar = ColorBar::new(scale());

        assert_eq!(bar.orientation(), Orientation::Vertical);
        assert_eq!(bar.side(), Side::BottomRight);
        assert_eq!(bar.length(), 100);
        assert_eq!(bar.breadth(), 30);
        assert_eq!(bar.border_thickness(), 1.0);
        assert_eq!(bar.title(), None);
        assert_eq!(bar.title_padding(), 30);
        assert_eq!(bar.axis_padding(), None);
        assert_eq!(
            bar.tick_config(),
            &TickConfig {
                arguments: None,
                values: None,
                format: None,
                size_inner: 6.0,
                size_outer: 6.0,
                padding: 3.0,
                count: 10,
            }
        );
    }

    #[test]
    fn test_create_seeds_blank_storage_from_table() {
        let blank = ColorBar::blank(ModelId::from("m1"), scale());
        assert_eq!(blank.length(), 0);
        assert_eq!(blank.tick_config().count, 0);

        let bar = ColorBar::create(ModelId::from("m1"), scale());
        for spec in COLORBAR_FIELDS.iter().skip(1) {
            assert_eq!(bar.get(spec.name), spec.default_value(), "{}", spec.name);
        }
    }

    #[test]
    fn test_every_field_reads_its_declared_default() {
        let bar = ColorBar::new(scale());
        for spec in ColorBar::schema().iter().filter(|s| s.name != "colormap") {
            assert_eq!(bar.get(spec.name), spec.default_value(), "{}", spec.name);
        }
    }

    #[test]
    fn test_every_field_is_assignable() {
        let mut bar = ColorBar::new(scale());
        for spec in ColorBar::schema() {
            let value = bar.get(spec.name).unwrap();
            bar.assign(spec.name, value).unwrap();
        }
    }

    #[test]
    fn test_length_minimum() {
        let mut bar = ColorBar::new(scale());
        assert!(bar.set_length(2).is_ok());
        assert_eq!(bar.length(), 2);

        let err = bar.set_length(1).unwrap_err();
        assert!(err.is_constraint_violation());
        assert_eq!(bar.length(), 2);
    }

    #[test]
    fn test_breadth_minimum() {
        let mut bar = ColorBar::new(scale());
        assert!(bar.set_breadth(0).is_err());
        assert_eq!(bar.breadth(), 30);
        assert!(bar.set_breadth(1).is_ok());
    }

    #[test]
    fn test_bad_side_keeps_previous() {
        let mut bar = ColorBar::new(scale());
        bar.set_side(Side::TopLeft).unwrap();

        let err = bar.set("side", "left").unwrap_err();
        assert!(err.is_constraint_violation());
        assert_eq!(bar.side(), Side::TopLeft);
    }

    #[test]
    fn test_optional_fields() {
        let mut bar = ColorBar::new(scale());
        bar.set_title(Some("Temperature")).unwrap();
        bar.set_axis_padding(Some(12)).unwrap();
        assert_eq!(bar.title(), Some("Temperature"));
        assert_eq!(bar.axis_padding(), Some(12));

        bar.set_title(None).unwrap();
        assert_eq!(bar.title(), None);
        assert!(bar.set("axis_padding", "12").is_err());
    }

    #[test]
    fn test_tick_fields() {
        let mut bar = ColorBar::new(scale());
        bar.set_tick_values(Some(vec![Value::from(0), Value::from(0.5)]))
            .unwrap();
        bar.set_tick_size_inner(4.0).unwrap();
        bar.set_tick_padding(-1.0).unwrap();
        bar.set_ticks(5).unwrap();

        let ticks = bar.tick_config();
        assert_eq!(ticks.values.as_deref().map(<[Value]>::len), Some(2));
        assert_eq!(ticks.size_inner, 4.0);
        assert_eq!(ticks.padding, -1.0);
        assert_eq!(ticks.count, 5);
        assert!(bar.set_tick_size_outer(f64::NAN).is_err());
    }

    #[test]
    fn test_unknown_field() {
        let mut bar = ColorBar::new(scale());
        assert!(matches!(bar.set("width", 3), Err(Error::UnknownField(_))));
        assert!(bar.get("width").is_none());
    }

    #[test]
    fn test_builder() {
        let bar = ColorBar::builder()
            .colormap(scale())
            .orientation(Orientation::Horizontal)
            .side(Side::TopLeft)
            .length(250)
            .title("Depth")
            .tick_format(vec![Value::from(".1f")])
            .build()
            .unwrap();

        assert_eq!(bar.orientation(), Orientation::Horizontal);
        assert_eq!(bar.side(), Side::TopLeft);
        assert_eq!(bar.length(), 250);
        assert_eq!(bar.title(), Some("Depth"));
        assert!(bar.tick_config().format.is_some());
    }

    #[test]
    fn test_builder_without_colormap() {
        let err = ColorBar::builder().length(250).build().unwrap_err();
        assert!(matches!(
            err,
            Error::MissingRequiredValue {
                widget: "ColorBarModel",
                field: "colormap"
            }
        ));
    }
}
