use render_trait::{ColumnRecord, ColumnSink};

/// Stands in for a rasteriser. Keeps just enough about each frame to log.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameSummary {
    pub bands: usize,
    pub columns: usize,
    /// Screen pixels across covered by wall columns, overlaps counted twice
    pub covered: u32,
    pub tallest: f32,
}

impl FrameSummary {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl ColumnSink for FrameSummary {
    fn fill_band(&mut self, _y: f32, _height: f32, _width: f32, _colour: [u8; 3]) {
        self.bands += 1;
    }

    fn draw_column(&mut self, column: &ColumnRecord) {
        self.columns += 1;
        self.covered += column.width;
        self.tallest = self.tallest.max(column.height);
    }
}
