/// Geometry of one catalog row: a bold title above a full-width image that
/// is centre-cropped into a fixed-height box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
    pub title_text_sp: f32,
    pub title_bold: bool,
    /// Applied left, top and right of both title and image; bottom is zero.
    pub padding_dp: u32,
    pub image_height_dp: u32,
}

impl Default for RowLayout {
    fn default() -> Self {
        Self {
            title_text_sp: 18.0,
            title_bold: true,
            padding_dp: 8,
            image_height_dp: 200,
        }
    }
}

/// Density-independent pixels to physical pixels, truncating.
pub fn dp_to_px(dp: u32, density: f32) -> u32 {
    (dp as f32 * density.max(0.0)) as u32
}

impl RowLayout {
    /// Drawable image area inside the padding for a row `row_width_px` wide.
    /// Never collapses below one pixel per side.
    pub fn image_box_px(&self, row_width_px: u32, density: f32) -> (u32, u32) {
        let padding = dp_to_px(self.padding_dp, density);
        let height = dp_to_px(self.image_height_dp, density);
        (
            row_width_px.saturating_sub(padding * 2).max(1),
            height.saturating_sub(padding).max(1),
        )
    }
}
