//! Color bar widget models
//!
//! Synchronized data models for a color bar display and a color map editor.
//! Each model is a fixed set of typed, validated attributes mirrored to a
//! remote view over a fire-and-forget channel.
//!
//! # Overview
//!
//! - [`Widget`] - generic construction, validation and sync engine driven by a schema table
//! - [`ColorBar`] and [`ColorMapEditor`] - the two widget models
//! - [`FieldSpec`] / [`AttrValue`] - schema rows and dynamically typed values
//! - [`Scale`] / [`ScaleRegistry`] - the opaque colormap capability and handle resolution
//! - [`Comm`] - sending end of the sync channel
//! - [`create_from_open`] - instantiate a widget announced by the remote side
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use colorbar_widgets::{ColorBar, Orientation, ScaleHandle, Widget, comm};
//!
//! let (comm, mut rx) = comm::channel(Default::default());
//! let mut bar = ColorBar::new(Arc::new(ScaleHandle::new("LinearScaleModel")));
//! bar.attach(comm).unwrap();
//! bar.set_orientation(Orientation::Horizontal).unwrap();
//!
//! let open = rx.try_recv().unwrap();
//! assert_eq!(open.state["orientation"], "vertical");
//! let update = rx.try_recv().unwrap();
//! assert_eq!(update.state["orientation"], "horizontal");
//! ```

pub mod base;
pub mod colorbar;
pub mod comm;
pub mod editor;
pub mod layout;
pub mod registry;
pub mod scale;
pub mod schema;
pub mod widget;

pub use base::{BASE_FIELDS, BaseFields};
pub use colorbar::{COLORBAR_FIELDS, ColorBar, TickConfig};
pub use comm::{Comm, CommReceiver, SendStats};
pub use editor::{ColorMapEditor, EDITOR_FIELDS};
pub use layout::{Orientation, Side};
pub use registry::{AnyWidget, MODEL_NAMES, create_from_open};
pub use scale::{ReferenceResolver, Scale, ScaleHandle, ScaleRegistry, SyncModel};
pub use schema::{AttrValue, DefaultValue, FieldKind, FieldSpec, Serializer};
pub use widget::{Widget, WidgetBuilder};

// Re-export commonly used types from colorbar-common
pub use colorbar_common::{
    Error, Format, ModelId, ModuleConfig, Result, State, SyncConfig, SyncMessage,
};
