use crate::foundation::core::{Point, Rgba8Premul, Viewport};
use crate::foundation::error::{RingdriftError, RingdriftResult};
use crate::render::backend::{FrameRGBA, Surface};
use kurbo::Shape;

/// Options for the CPU surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuSurfaceOpts {
    pub(crate) clear_rgba: Option<[u8; 4]>,
}

impl CpuSurfaceOpts {
    /// Return options with a configured clear color. Without one, cleared
    /// frames are fully transparent, which suits a layer composited behind
    /// other content.
    pub fn with_clear_rgba(mut self, clear: Option<[u8; 4]>) -> Self {
        self.clear_rgba = clear;
        self
    }
}

/// CPU surface powered by `vello_cpu`.
///
/// The render context is reused across frames while the dimensions are
/// stable and reallocated on resize. Dimensions beyond `u16::MAX` are clamped
/// to the rasterizer's limit.
pub struct CpuSurface {
    opts: CpuSurfaceOpts,
    viewport: Viewport,
    ctx: Option<vello_cpu::RenderContext>,
}

impl CpuSurface {
    pub fn new(viewport: Viewport, opts: CpuSurfaceOpts) -> Self {
        Self {
            opts,
            viewport,
            ctx: None,
        }
    }

    fn raster_dims(&self) -> (u16, u16) {
        let clamp = |v: u32| -> u16 { v.min(u32::from(u16::MAX)) as u16 };
        (clamp(self.viewport.width), clamp(self.viewport.height))
    }
}

impl Surface for CpuSurface {
    fn resize(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.ctx = None;
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self) {
        if self.viewport.is_degenerate() {
            self.ctx = None;
            return;
        }

        let (w, h) = self.raster_dims();
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();

        if let Some([r, g, b, a]) = self.opts.clear_rgba {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(w),
                f64::from(h),
            ));
        }

        self.ctx = Some(ctx);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8Premul) {
        if !radius.is_finite() || radius <= 0.0 {
            return;
        }
        let Some(ctx) = self.ctx.as_mut() else {
            return;
        };

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));

        let circle = kurbo::Circle::new((center.x, center.y), radius);
        let mut path = vello_cpu::kurbo::BezPath::new();
        for el in circle.path_elements(0.1) {
            path.push(el);
        }
        ctx.fill_path(&path);
    }

    fn finish(&mut self) -> RingdriftResult<FrameRGBA> {
        if self.viewport.is_degenerate() {
            return Ok(FrameRGBA {
                width: self.viewport.width,
                height: self.viewport.height,
                data: Vec::new(),
            });
        }

        let ctx = self
            .ctx
            .as_mut()
            .ok_or_else(|| RingdriftError::render("finish called before clear"))?;
        let (w, h) = (ctx.width(), ctx.height());

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: u32::from(w),
            height: u32::from(h),
            data: pixmap.data_as_u8_slice().to_vec(),
        })
    }
}
