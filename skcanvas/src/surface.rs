//! Draw surface: a pixmap plus the matrix draws are made under.

use crate::blur::BlurMaskFilter;
use crate::error::{Canvas2dError, Canvas2dResult};
use tiny_skia::{BlendMode, FillRule, Paint, Path, Pixmap, PixmapPaint, Stroke, Transform};

#[derive(Debug, Clone)]
pub struct DrawSurface {
    pixmap: Pixmap,
    matrix: Transform,
}

impl DrawSurface {
    pub fn new(width: u32, height: u32) -> Canvas2dResult<Self> {
        let pixmap =
            Pixmap::new(width, height).ok_or(Canvas2dError::InvalidDimensions { width, height })?;
        Ok(Self {
            pixmap,
            matrix: Transform::identity(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn matrix(&self) -> Transform {
        self.matrix
    }

    pub fn set_matrix(&mut self, matrix: Transform) {
        self.matrix = matrix;
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Make every pixel transparent.
    pub fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    /// Make the area covered by `path` transparent.
    pub fn clear_path(&mut self, path: &Path) {
        let paint = Paint {
            blend_mode: BlendMode::Clear,
            anti_alias: false,
            ..Default::default()
        };
        self.pixmap.fill_path(path, &paint, FillRule::Winding, self.matrix, None);
    }

    /// Fill `path`, or stroke it when `stroke` is given.
    ///
    /// With a mask filter the geometry is rendered into a transient layer, filtered,
    /// and the layer is composited onto the surface.
    pub fn draw(
        &mut self,
        path: &Path,
        paint: &Paint,
        stroke: Option<&Stroke>,
        filter: Option<&BlurMaskFilter>,
    ) {
        let Some(filter) = filter else {
            Self::render(&mut self.pixmap, path, paint, stroke, self.matrix);
            return;
        };

        let Some(mut layer) = Pixmap::new(self.pixmap.width(), self.pixmap.height()) else {
            return;
        };
        Self::render(&mut layer, path, paint, stroke, self.matrix);
        filter.apply(&mut layer);
        self.pixmap.draw_pixmap(
            0,
            0,
            layer.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    fn render(
        target: &mut Pixmap,
        path: &Path,
        paint: &Paint,
        stroke: Option<&Stroke>,
        matrix: Transform,
    ) {
        match stroke {
            Some(stroke) => target.stroke_path(path, paint, stroke, matrix, None),
            None => target.fill_path(path, paint, FillRule::Winding, matrix, None),
        }
    }
}
