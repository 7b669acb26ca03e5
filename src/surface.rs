use crate::style::flake_fill_style;
use snowfall_core::{Dimensions, Particle, SnowfallError, Surface};
use std::f64::consts::TAU;
use web_sys as web;

/// Canvas 2D drawing target for the render loop.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: web::HtmlCanvasElement, ctx: web::CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn is_available(&self) -> bool {
        self.canvas.is_connected()
    }

    fn resize(&mut self, dims: Dimensions) {
        self.canvas.set_width(dims.width);
        self.canvas.set_height(dims.height);
    }

    fn clear(&mut self, dims: Dimensions) -> Result<(), SnowfallError> {
        self.ctx
            .clear_rect(0.0, 0.0, dims.width_f64(), dims.height_f64());
        Ok(())
    }

    fn draw(&mut self, particle: &Particle) -> Result<(), SnowfallError> {
        let pos = particle.position();
        self.ctx.begin_path();
        self.ctx
            .arc(pos.x, pos.y, particle.radius(), 0.0, TAU)
            .map_err(|e| SnowfallError::Draw(format!("{:?}", e)))?;
        self.ctx
            .set_fill_style_str(&flake_fill_style(particle.opacity()));
        self.ctx.fill();
        Ok(())
    }
}
