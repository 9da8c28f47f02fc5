use crate::{
    presenter::{DatasetChange, ListPresenter},
    slot::{ImageSlot, SlotTicket},
};

/// One rendered row: a title text and an image area.
pub trait RowView {
    fn set_title(&mut self, title: &str);
    fn image_slot(&self) -> &ImageSlot;
}

/// Asynchronous image fetcher. `load` must return immediately; the result is
/// written through `ticket` whenever it arrives.
pub trait ImageLoader: Send + Sync {
    fn load(&self, url: &str, ticket: SlotTicket);
}

/// List container owned by the UI thread.
pub trait ListView {
    /// Called after every collection replacement, and once with zero rows
    /// when the screen is constructed.
    fn dataset_changed(&mut self, rows: &RowBinder<'_>, change: &DatasetChange);
}

/// Borrowed pairing of presenter and image loader handed to a [`ListView`].
pub struct RowBinder<'a> {
    presenter: &'a ListPresenter,
    loader: &'a dyn ImageLoader,
}

impl<'a> RowBinder<'a> {
    pub fn new(presenter: &'a ListPresenter, loader: &'a dyn ImageLoader) -> Self {
        Self { presenter, loader }
    }

    pub fn row_count(&self) -> usize {
        self.presenter.row_count()
    }

    /// Panics when `index` is outside `0..row_count()`.
    pub fn bind<R: RowView + ?Sized>(&self, index: usize, row: &mut R) {
        self.presenter.bind_row(index, row, self.loader);
    }
}

/// Plain row that keeps its title in memory; enough for headless hosts.
#[derive(Debug, Clone, Default)]
pub struct TextRow {
    pub title: String,
    slot: ImageSlot,
}

impl TextRow {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RowView for TextRow {
    fn set_title(&mut self, title: &str) {
        self.title.clear();
        self.title.push_str(title);
    }

    fn image_slot(&self) -> &ImageSlot {
        &self.slot
    }
}
