//! Line-oriented list view for terminals.

use std::{
    io::{self, Write},
    thread,
    time::{Duration, Instant},
};

use catalog_ui::{DatasetChange, ListView, RowBinder, RowLayout, RowView, SlotState, TextRow};
use tracing::warn;

const IMAGE_POLL_INTERVAL: Duration = Duration::from_millis(25);

pub struct ConsoleListView<W: Write> {
    out: W,
    layout: RowLayout,
    ansi: bool,
    rows: Vec<TextRow>,
}

impl<W: Write> ConsoleListView<W> {
    pub fn new(out: W, layout: RowLayout) -> Self {
        Self {
            out,
            layout,
            ansi: false,
            rows: Vec::new(),
        }
    }

    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Waits up to `timeout` for row images, then prints one line per row.
    /// A timeout too large to express as an instant waits without limit.
    pub fn report_images(&mut self, timeout: Duration) -> io::Result<()> {
        let deadline = Instant::now().checked_add(timeout);
        while self.rows.iter().any(is_loading)
            && deadline.map_or(true, |deadline| Instant::now() < deadline)
        {
            thread::sleep(IMAGE_POLL_INTERVAL);
        }

        for (index, row) in self.rows.iter().enumerate() {
            let status = match row.image_slot().state() {
                SlotState::Empty => "no image".to_string(),
                SlotState::Loading { url } => format!("still loading {url}"),
                SlotState::Ready(image) => format!("image {}x{}", image.width, image.height),
                SlotState::Failed { reason, .. } => format!("image failed: {reason}"),
            };
            writeln!(self.out, "{index:>3}  {status}")?;
        }
        self.out.flush()
    }

    fn write_rows(&mut self, change: &DatasetChange) -> io::Result<()> {
        if change.row_count == 0 {
            return writeln!(self.out, "(no items)");
        }
        for (index, row) in self.rows.iter().enumerate() {
            if self.ansi && self.layout.title_bold {
                writeln!(self.out, "{index:>3}  \x1b[1m{}\x1b[0m", row.title)?;
            } else {
                writeln!(self.out, "{index:>3}  {}", row.title)?;
            }
        }
        self.out.flush()
    }
}

fn is_loading(row: &TextRow) -> bool {
    matches!(row.image_slot().state(), SlotState::Loading { .. })
}

impl<W: Write> ListView for ConsoleListView<W> {
    fn dataset_changed(&mut self, rows: &RowBinder<'_>, change: &DatasetChange) {
        for row in &self.rows {
            row.image_slot().clear();
        }
        self.rows = (0..rows.row_count())
            .map(|index| {
                let mut row = TextRow::new();
                rows.bind(index, &mut row);
                row
            })
            .collect();

        if let Err(error) = self.write_rows(change) {
            warn!(%error, "failed to write catalog rows");
        }
    }
}
