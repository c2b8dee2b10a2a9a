//! Model-name registry for widgets opened from the remote side.

use colorbar_common::{Error, Method, ModelId, Result, State, SyncMessage};

use crate::colorbar::ColorBar;
use crate::comm::Comm;
use crate::editor::ColorMapEditor;
use crate::scale::ReferenceResolver;
use crate::widget::Widget;

/// Model names this crate can instantiate.
pub const MODEL_NAMES: &[&str] = &[ColorBar::MODEL_NAME, ColorMapEditor::MODEL_NAME];

/// Any of the widget models in this crate.
#[derive(Debug, Clone)]
pub enum AnyWidget {
    ColorBar(ColorBar),
    ColorMapEditor(ColorMapEditor),
}

impl AnyWidget {
    pub fn model_id(&self) -> &ModelId {
        match self {
            AnyWidget::ColorBar(w) => w.model_id(),
            AnyWidget::ColorMapEditor(w) => w.model_id(),
        }
    }

    pub fn model_name(&self) -> &'static str {
        match self {
            AnyWidget::ColorBar(_) => ColorBar::MODEL_NAME,
            AnyWidget::ColorMapEditor(_) => ColorMapEditor::MODEL_NAME,
        }
    }

    pub fn state(&self) -> Result<State> {
        match self {
            AnyWidget::ColorBar(w) => w.state(),
            AnyWidget::ColorMapEditor(w) => w.state(),
        }
    }

    pub fn handle_message(
        &mut self,
        message: &SyncMessage,
        resolver: &dyn ReferenceResolver,
    ) -> Result<()> {
        match self {
            AnyWidget::ColorBar(w) => w.handle_message(message, resolver),
            AnyWidget::ColorMapEditor(w) => w.handle_message(message, resolver),
        }
    }

    /// Attach to a sync channel and announce the full state.
    pub fn attach(&mut self, comm: Comm) -> Result<()> {
        match self {
            AnyWidget::ColorBar(w) => w.attach(comm),
            AnyWidget::ColorMapEditor(w) => w.attach(comm),
        }
    }

    /// Detach from the sync channel, telling the remote side.
    pub fn close(&mut self) {
        match self {
            AnyWidget::ColorBar(w) => w.close(),
            AnyWidget::ColorMapEditor(w) => w.close(),
        }
    }

    pub fn as_color_bar(&self) -> Option<&ColorBar> {
        match self {
            AnyWidget::ColorBar(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_editor(&self) -> Option<&ColorMapEditor> {
        match self {
            AnyWidget::ColorMapEditor(w) => Some(w),
            _ => None,
        }
    }
}

impl From<ColorBar> for AnyWidget {
    fn from(w: ColorBar) -> Self {
        AnyWidget::ColorBar(w)
    }
}

impl From<ColorMapEditor> for AnyWidget {
    fn from(w: ColorMapEditor) -> Self {
        AnyWidget::ColorMapEditor(w)
    }
}

/// Instantiate the widget a remote `open` message asks for.
///
/// The model class is taken from the `_model_name` key of the state.
pub fn create_from_open(
    message: &SyncMessage,
    resolver: &dyn ReferenceResolver,
) -> Result<AnyWidget> {
    if message.method != Method::Open {
        return Err(Error::constraint(
            "method",
            format!("expected open, got {}", message.method),
        ));
    }

    let model_name = message
        .state
        .get("_model_name")
        .and_then(|v| v.as_str())
        .ok_or(Error::MissingRequiredValue {
            widget: "open",
            field: "_model_name",
        })?;

    let id = message.model_id.clone();
    let widget: AnyWidget = if model_name == ColorBar::MODEL_NAME {
        ColorBar::from_state(id, &message.state, resolver)?.into()
    } else if model_name == ColorMapEditor::MODEL_NAME {
        ColorMapEditor::from_state(id, &message.state, resolver)?.into()
    } else {
        return Err(Error::constraint(
            "_model_name",
            format!("expected one of {:?}, got '{}'", MODEL_NAMES, model_name),
        ));
    };

    tracing::debug!(model_id = %message.model_id, model_name, "Created widget from remote open");
    Ok(widget)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comm;
    use crate::layout::Orientation;
    use colorbar_common::ModuleConfig;
    use crate::scale::{Scale, ScaleHandle, ScaleRegistry};
    use std::sync::Arc;

    fn registry_with_scale() -> (ScaleRegistry, Arc<dyn Scale>) {
        let mut registry = ScaleRegistry::new();
        let scale: Arc<dyn Scale> = Arc::new(ScaleHandle::new("LinearScaleModel"));
        registry.register(scale.clone());
        (registry, scale)
    }

    #[test]
    fn test_open_recreates_editor() {
        let (registry, scale) = registry_with_scale();
        let mut editor = ColorMapEditor::new(scale.clone());
        editor.set_orientation(Orientation::Vertical).unwrap();

        let open = SyncMessage::open(editor.model_id().clone(), editor.state().unwrap());
        let widget = create_from_open(&open, &registry).unwrap();

        assert_eq!(widget.model_name(), "ColorMapEditorModel");
        assert_eq!(widget.model_id(), editor.model_id());
        let copy = widget.as_editor().unwrap();
        assert_eq!(copy.orientation(), Orientation::Vertical);
        assert!(Arc::ptr_eq(copy.colormap(), &scale));
        assert!(widget.as_color_bar().is_none());
    }

    #[test]
    fn test_open_recreates_color_bar() {
        let (registry, scale) = registry_with_scale();
        let bar = ColorBar::new(scale);
        let open = SyncMessage::open(bar.model_id().clone(), bar.state().unwrap());

        let widget = create_from_open(&open, &registry).unwrap();
        assert_eq!(widget.state().unwrap(), bar.state().unwrap());
    }

    #[test]
    fn test_open_keeps_announced_module() {
        let (registry, scale) = registry_with_scale();
        let module = ModuleConfig {
            name: "lab".to_string(),
            version: "^9".to_string(),
        };
        let (remote, _remote_rx) = comm::channel(module);
        let mut editor = ColorMapEditor::new(scale);
        editor.attach(remote).unwrap();

        let open = SyncMessage::open(editor.model_id().clone(), editor.state().unwrap());
        let widget = create_from_open(&open, &registry).unwrap();
        let state = widget.state().unwrap();
        assert_eq!(state["_model_module"], "lab");
        assert_eq!(state["_view_module_version"], "^9");
    }

    #[test]
    fn test_remote_created_widget_can_attach() {
        let (registry, scale) = registry_with_scale();
        let bar = ColorBar::new(scale);
        let open = SyncMessage::open(bar.model_id().clone(), bar.state().unwrap());
        let mut widget = create_from_open(&open, &registry).unwrap();

        let request = SyncMessage::request_state(bar.model_id().clone());
        widget.handle_message(&request, &registry).unwrap();

        let (comm, mut rx) = comm::channel(ModuleConfig::default());
        widget.attach(comm).unwrap();
        assert_eq!(rx.try_recv().unwrap().method, Method::Open);

        widget.handle_message(&request, &registry).unwrap();
        let reply = rx.try_recv().unwrap();
        assert_eq!(reply.method, Method::Update);
        assert_eq!(reply.state, bar.state().unwrap());

        widget.close();
        assert_eq!(rx.try_recv().unwrap().method, Method::Close);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_unknown_model_name() {
        let (registry, _) = registry_with_scale();
        let open = SyncMessage::open(ModelId::new(), State::new())
            .with_field("_model_name", "SliderModel");

        let err = create_from_open(&open, &registry).unwrap_err();
        assert!(err.to_string().contains("SliderModel"));
    }

    #[test]
    fn test_open_without_colormap() {
        let (registry, _) = registry_with_scale();
        let open = SyncMessage::open(ModelId::new(), State::new())
            .with_field("_model_name", "ColorBarModel");

        assert!(matches!(
            create_from_open(&open, &registry),
            Err(Error::MissingRequiredValue { field: "colormap", .. })
        ));
    }

    #[test]
    fn test_rejects_non_open() {
        let (registry, _) = registry_with_scale();
        let update = SyncMessage::update(ModelId::new(), State::new());
        assert!(create_from_open(&update, &registry).is_err());
    }
}
