//! Headless presentation core for the catalog screen: the list presenter,
//! the row/view/image-loader seams a host toolkit implements, and the
//! screen controller that drives one fetch per screen lifetime.

pub mod controller;
pub mod diff;
pub mod image_loader;
pub mod layout;
pub mod presenter;
pub mod slot;
pub mod view;

pub use controller::{events::ScreenEvent, ScreenController, ScreenState};
pub use diff::KeyedDiff;
pub use image_loader::{HttpImageLoader, ImageLoadError};
pub use layout::RowLayout;
pub use presenter::{DatasetChange, ListPresenter};
pub use slot::{ImageSlot, LoadedImage, SlotState, SlotTicket};
pub use view::{ImageLoader, ListView, RowBinder, RowView, TextRow};
