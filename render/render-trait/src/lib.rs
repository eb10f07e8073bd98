use gameplay::ViewPoint;

/// Size of the surface the scene is laid out over
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferSize {
    width_usize: usize,
    height_usize: usize,
    width_f32: f32,
    height_f32: f32,
}

impl BufferSize {
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            width_usize: width,
            height_usize: height,
            width_f32: width as f32,
            height_f32: height as f32,
        }
    }

    pub const fn width_usize(&self) -> usize {
        self.width_usize
    }

    pub const fn height_usize(&self) -> usize {
        self.height_usize
    }

    pub const fn width_f32(&self) -> f32 {
        self.width_f32
    }

    pub const fn height_f32(&self) -> f32 {
        self.height_f32
    }

    pub const fn half_height_f32(&self) -> f32 {
        self.height_f32 / 2.0
    }
}

/// One textureless wall column, already projected and shaded
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnRecord {
    pub screen_x: u32,
    pub width: u32,
    /// Projected wall height in pixels. May exceed the screen when close.
    pub height: f32,
    /// Top of the column, negative when it starts above the screen
    pub y_offset: f32,
    pub colour: [u8; 3],
}

/// Whatever paints the frame. The scene renderer only describes what to
/// draw, in order: flat bands first, then columns left to right.
pub trait ColumnSink {
    /// A full width band of one colour, for ceiling and floor
    fn fill_band(&mut self, y: f32, height: f32, width: f32, colour: [u8; 3]);

    fn draw_column(&mut self, column: &ColumnRecord);
}

/// A way of turning a view in to draw calls
pub trait SceneRenderer {
    type Error;

    /// Lay the frame out over a new surface size
    fn resize(&mut self, size: BufferSize);

    /// Describe the scene seen from `view` to `sink`
    fn redraw(&mut self, view: &ViewPoint, sink: &mut impl ColumnSink) -> Result<(), Self::Error>;
}

/// A flat band as given to `ColumnSink::fill_band`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub y: f32,
    pub height: f32,
    pub width: f32,
    pub colour: [u8; 3],
}

/// Sink that keeps every call, for tests and offline inspection
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub bands: Vec<Band>,
    pub columns: Vec<ColumnRecord>,
}

impl RecordingSink {
    pub fn clear(&mut self) {
        self.bands.clear();
        self.columns.clear();
    }
}

impl ColumnSink for RecordingSink {
    fn fill_band(&mut self, y: f32, height: f32, width: f32, colour: [u8; 3]) {
        self.bands.push(Band {
            y,
            height,
            width,
            colour,
        });
    }

    fn draw_column(&mut self, column: &ColumnRecord) {
        self.columns.push(*column);
    }
}
