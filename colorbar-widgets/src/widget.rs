//! Generic construction, validation and synchronization engine.

use std::marker::PhantomData;
use std::sync::Arc;

use colorbar_common::{
    Error, Method, ModelId, ModelIdentity, ModuleConfig, Result, State, SyncMessage,
    is_identity_key,
};

use crate::comm::Comm;
use crate::scale::{ReferenceResolver, Scale};
use crate::schema::{AttrValue, FieldSpec, lookup};

/// Name of the field every widget requires.
pub const COLORMAP: &str = "colormap";

/// A widget model driven by a schema table.
///
/// Implementors provide storage (`blank`/`get`/`assign`) and the table.
/// Defaults, validation, snapshots and remote updates are provided here by
/// walking [`Widget::schema`].
///
/// # Example
///
/// ```ignore
/// use colorbar_widgets::{ColorBar, ScaleHandle, Widget, comm};
///
/// let (comm, mut rx) = comm::channel(Default::default());
/// let mut bar = ColorBar::new(Arc::new(ScaleHandle::new("LinearScaleModel")));
/// bar.attach(comm)?;
/// bar.set("length", 250)?;   // queues an `update` with {"length": 250}
/// ```
pub trait Widget: Sized {
    /// Model class name announced to the remote side.
    const MODEL_NAME: &'static str;

    /// View class name announced to the remote side.
    const VIEW_NAME: &'static str;

    /// The widget's schema table.
    fn schema() -> &'static [FieldSpec];

    /// Storage holding `colormap`. Other fields are overwritten by [`Widget::create`].
    fn blank(model_id: ModelId, colormap: Arc<dyn Scale>) -> Self;

    fn model_id(&self) -> &ModelId;

    /// Current value of a field, `None` if the widget has no such field.
    fn get(&self, name: &str) -> Option<AttrValue>;

    /// Store a value that already passed [`FieldSpec::check`].
    fn assign(&mut self, name: &str, value: AttrValue) -> Result<()>;

    fn comm(&self) -> Option<&Comm>;

    fn set_comm(&mut self, comm: Option<Comm>);

    /// Front-end module this model is announced with.
    fn module(&self) -> &ModuleConfig;

    fn set_module(&mut self, module: ModuleConfig);

    /// Create an instance holding `colormap` and the declared defaults.
    fn create(model_id: ModelId, colormap: Arc<dyn Scale>) -> Self {
        let mut widget = Self::blank(model_id, colormap);
        for spec in Self::schema() {
            let Some(value) = spec.default_value() else {
                continue;
            };
            if let Err(e) = widget.assign(spec.name, value) {
                tracing::error!(
                    model_name = Self::MODEL_NAME,
                    field = spec.name,
                    error = %e,
                    "Declared default does not fit the field"
                );
            }
        }
        widget
    }

    /// Look up a field of this widget's schema.
    fn field(name: &str) -> Result<&'static FieldSpec> {
        lookup(Self::schema(), name)
    }

    /// Construct from a mapping of field name to value.
    ///
    /// Only `colormap` is mandatory; every other field falls back to its
    /// declared default.
    fn from_attrs<I, K>(attrs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, AttrValue)>,
        K: AsRef<str>,
    {
        let mut colormap = None;
        let mut rest = Vec::new();
        for (name, value) in attrs {
            if name.as_ref() == COLORMAP {
                colormap = Some(value);
            } else {
                rest.push((name, value));
            }
        }

        let colormap = colormap.ok_or(Error::MissingRequiredValue {
            widget: Self::MODEL_NAME,
            field: COLORMAP,
        })?;
        let spec = Self::field(COLORMAP)?;
        spec.check(&colormap)?;

        let mut widget = Self::create(ModelId::new(), colormap.into_scale(spec.name)?);
        widget.set_many(rest)?;
        Ok(widget)
    }

    /// Build a widget from the full state sent with a remote `open`.
    fn from_state(
        model_id: ModelId,
        state: &State,
        resolver: &dyn ReferenceResolver,
    ) -> Result<Self> {
        let spec = Self::field(COLORMAP)?;
        let raw = state.get(COLORMAP).ok_or(Error::MissingRequiredValue {
            widget: Self::MODEL_NAME,
            field: COLORMAP,
        })?;
        let colormap = spec.from_wire(raw, resolver)?;
        spec.check(&colormap)?;

        let mut widget = Self::create(model_id, colormap.into_scale(spec.name)?);
        widget.set_module(ModelIdentity::module_of(state));
        widget.apply_state(state, resolver)?;
        Ok(widget)
    }

    /// Validate and assign one field, then mirror it if synchronized.
    ///
    /// On error the previous value is kept.
    fn set(&mut self, name: &str, value: impl Into<AttrValue>) -> Result<()> {
        let spec = Self::field(name)?;
        let value = value.into();
        spec.check(&value)?;
        self.assign(spec.name, value)?;
        tracing::trace!(model_id = %self.model_id(), field = spec.name, "Field assigned");
        self.notify(&[spec]);
        Ok(())
    }

    /// Validate all values first, then assign them and send one update.
    ///
    /// Nothing is assigned if any value is rejected.
    fn set_many<I, K>(&mut self, attrs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, AttrValue)>,
        K: AsRef<str>,
    {
        let mut checked = Vec::new();
        for (name, value) in attrs {
            let spec = Self::field(name.as_ref())?;
            spec.check(&value)?;
            checked.push((spec, value));
        }

        let specs: Vec<&'static FieldSpec> = checked.iter().map(|(spec, _)| *spec).collect();
        for (spec, value) in checked {
            self.assign(spec.name, value)?;
        }
        self.notify(&specs);
        Ok(())
    }

    /// Identity keys for this widget.
    fn identity(&self) -> ModelIdentity {
        ModelIdentity::new(Self::MODEL_NAME, Self::VIEW_NAME, self.module())
    }

    /// Snapshot of every synchronized field in wire form, plus identity keys.
    fn state(&self) -> Result<State> {
        let mut state = State::new();
        self.identity().write_into(&mut state);
        for spec in Self::schema().iter().filter(|spec| spec.sync) {
            let value = self
                .get(spec.name)
                .ok_or_else(|| Error::UnknownField(spec.name.to_string()))?;
            state.insert(spec.name.to_string(), spec.to_wire(&value)?);
        }
        Ok(state)
    }

    /// Wire values of the given fields, skipping local-only ones.
    fn partial_state(&self, specs: &[&FieldSpec]) -> Result<State> {
        let mut state = State::new();
        for spec in specs.iter().filter(|spec| spec.sync) {
            let value = self
                .get(spec.name)
                .ok_or_else(|| Error::UnknownField(spec.name.to_string()))?;
            state.insert(spec.name.to_string(), spec.to_wire(&value)?);
        }
        Ok(state)
    }

    /// Send an update for the given fields if a comm is attached.
    fn notify(&self, specs: &[&FieldSpec]) {
        let Some(comm) = self.comm() else {
            return;
        };

        match self.partial_state(specs) {
            Ok(state) if state.is_empty() => {}
            Ok(state) => {
                comm.send(SyncMessage::update(self.model_id().clone(), state));
            }
            Err(e) => {
                tracing::warn!(model_id = %self.model_id(), error = %e, "Failed to serialize update");
            }
        }
    }

    /// Attach to a sync channel and announce the full state.
    ///
    /// The widget takes on the channel's module and keeps it after closing.
    fn attach(&mut self, comm: Comm) -> Result<()> {
        self.set_module(comm.module().clone());
        self.set_comm(Some(comm));
        let state = self.state()?;
        if let Some(comm) = self.comm() {
            comm.send(SyncMessage::open(self.model_id().clone(), state));
        }
        tracing::info!(
            model_id = %self.model_id(),
            model_name = Self::MODEL_NAME,
            "Widget attached to sync channel"
        );
        Ok(())
    }

    /// Detach from the sync channel, telling the remote side.
    fn close(&mut self) {
        if let Some(comm) = self.comm() {
            comm.send(SyncMessage::close(self.model_id().clone()));
        }
        self.set_comm(None);
    }

    /// Apply an update coming from the remote view.
    ///
    /// Every key is decoded and validated before any is assigned. Identity
    /// keys are read-only and skipped. Applied values are not echoed back.
    /// Returns the names of the assigned fields.
    fn apply_state(
        &mut self,
        state: &State,
        resolver: &dyn ReferenceResolver,
    ) -> Result<Vec<&'static str>> {
        let mut checked = Vec::new();
        for (name, raw) in state {
            if is_identity_key(name) {
                continue;
            }
            let spec = Self::field(name)?;
            if !spec.sync {
                return Err(Error::constraint(name.as_str(), "field is not synchronized"));
            }
            let value = spec.from_wire(raw, resolver)?;
            spec.check(&value)?;
            checked.push((spec.name, value));
        }

        let mut applied = Vec::with_capacity(checked.len());
        for (name, value) in checked {
            self.assign(name, value)?;
            applied.push(name);
        }

        tracing::debug!(
            model_id = %self.model_id(),
            fields = ?applied,
            "Applied remote update"
        );
        Ok(applied)
    }

    /// Dispatch a message received from the remote view.
    fn handle_message(
        &mut self,
        message: &SyncMessage,
        resolver: &dyn ReferenceResolver,
    ) -> Result<()> {
        if &message.model_id != self.model_id() {
            tracing::warn!(
                model_id = %self.model_id(),
                target = %message.model_id,
                "Ignoring message for another model"
            );
            return Ok(());
        }

        match message.method {
            Method::Update => {
                self.apply_state(&message.state, resolver)?;
            }
            Method::RequestState => match self.comm() {
                Some(comm) => {
                    let state = self.state()?;
                    comm.send(SyncMessage::update(self.model_id().clone(), state));
                }
                None => {
                    tracing::warn!(
                        model_id = %self.model_id(),
                        "State requested for a detached model, nothing sent"
                    );
                }
            },
            Method::Close => {
                tracing::debug!(model_id = %self.model_id(), "Remote side closed the model");
                self.set_comm(None);
            }
            Method::Open => {
                tracing::warn!(model_id = %self.model_id(), "Unexpected open for a live model");
            }
        }
        Ok(())
    }
}

/// Collects attributes and constructs a widget with [`Widget::from_attrs`].
#[derive(Debug)]
pub struct WidgetBuilder<W> {
    attrs: Vec<(&'static str, AttrValue)>,
    widget: PhantomData<W>,
}

impl<W: Widget> WidgetBuilder<W> {
    pub fn new() -> Self {
        Self {
            attrs: Vec::new(),
            widget: PhantomData,
        }
    }

    /// Set an arbitrary field by name.
    pub fn attr(mut self, name: &'static str, value: impl Into<AttrValue>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn colormap(self, colormap: Arc<dyn Scale>) -> Self {
        self.attr(COLORMAP, colormap)
    }

    pub fn breadth(self, breadth: i64) -> Self {
        self.attr("breadth", breadth)
    }

    pub fn border_thickness(self, thickness: f64) -> Self {
        self.attr("border_thickness", thickness)
    }

    pub fn length(self, length: i64) -> Self {
        self.attr("length", length)
    }

    /// Validate and construct. Fails if no colormap was given.
    pub fn build(self) -> Result<W> {
        W::from_attrs(self.attrs)
    }
}

impl<W: Widget> Default for WidgetBuilder<W> {
    fn default() -> Self {
        Self::new()
    }
}
