use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::error::AppError;

/// Smallest side, in displayed pixels, a selection may be resized down to.
pub const MIN_SELECTION_PX: f64 = 1.0;

/// Share of the displayed width the initial selection covers.
pub const INITIAL_SELECTION_PERCENT: f64 = 90.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CropUnit {
    Px,
    Percent,
}

/// A rectangle in the coordinate space of the displayed image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropSelection {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub unit: CropUnit,
}

/// Displayed-pixel rectangle, the only form the cropper accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PixelCrop {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropSelection {
    /// Square selection centered in a `display_w x display_h` image, covering
    /// 90% of the width unless the height is the tighter bound.
    pub fn centered_square(display_w: f64, display_h: f64) -> Option<Self> {
        if display_w <= 0.0 || display_h <= 0.0 {
            return None;
        }
        let side = (display_w * INITIAL_SELECTION_PERCENT / 100.0).min(display_h);
        let width = side / display_w * 100.0;
        let height = side / display_h * 100.0;
        Some(Self {
            x: (100.0 - width) / 2.0,
            y: (100.0 - height) / 2.0,
            width,
            height,
            unit: CropUnit::Percent,
        })
    }

    pub fn to_pixels(&self, display_w: f64, display_h: f64) -> PixelCrop {
        let crop = match self.unit {
            CropUnit::Px => PixelCrop {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
            },
            CropUnit::Percent => PixelCrop {
                x: self.x * display_w / 100.0,
                y: self.y * display_h / 100.0,
                width: self.width * display_w / 100.0,
                height: self.height * display_h / 100.0,
            },
        };
        crop.clamped(display_w, display_h)
    }
}

impl PixelCrop {
    pub fn is_applicable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Keeps the rectangle inside `[0, bound_w] x [0, bound_h]`.
    pub fn clamped(self, bound_w: f64, bound_h: f64) -> Self {
        let width = self.width.clamp(0.0, bound_w.max(0.0));
        let height = self.height.clamp(0.0, bound_h.max(0.0));
        Self {
            x: self.x.clamp(0.0, (bound_w - width).max(0.0)),
            y: self.y.clamp(0.0, (bound_h - height).max(0.0)),
            width,
            height,
        }
    }

    pub fn moved(self, dx: f64, dy: f64, bound_w: f64, bound_h: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
        .clamped(bound_w, bound_h)
    }

    /// Drags the bottom-right corner, keeping the selection square and the
    /// top-left corner fixed.
    pub fn resized_square(self, dx: f64, dy: f64, bound_w: f64, bound_h: f64) -> Self {
        let delta = if dx.abs() >= dy.abs() { dx } else { dy };
        let max_side = (bound_w - self.x).min(bound_h - self.y).max(MIN_SELECTION_PX);
        let side = (self.width.max(self.height) + delta).clamp(MIN_SELECTION_PX, max_side);
        Self {
            width: side,
            height: side,
            ..self
        }
        .clamped(bound_w, bound_h)
    }
}

impl fmt::Display for PixelCrop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}px at ({}, {})",
            self.width.round(),
            self.height.round(),
            self.x.round(),
            self.y.round()
        )
    }
}

/// Natural and rendered sizes of the source image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageGeometry {
    pub natural_width: f64,
    pub natural_height: f64,
    pub displayed_width: f64,
    pub displayed_height: f64,
}

impl ImageGeometry {
    pub fn of(img: &HtmlImageElement) -> Self {
        Self {
            natural_width: img.natural_width() as f64,
            natural_height: img.natural_height() as f64,
            displayed_width: img.width() as f64,
            displayed_height: img.height() as f64,
        }
    }
}

/// Everything needed to draw one crop: where to read in the source, and how
/// large the output surface is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropPlan {
    pub scale_x: f64,
    pub scale_y: f64,
    pub source_x: f64,
    pub source_y: f64,
    pub source_width: f64,
    pub source_height: f64,
    pub logical_width: f64,
    pub logical_height: f64,
    pub pixel_ratio: f64,
    pub surface_width: u32,
    pub surface_height: u32,
}

impl CropPlan {
    pub fn new(geometry: ImageGeometry, crop: &PixelCrop, pixel_ratio: f64) -> Result<Self, AppError> {
        if geometry.displayed_width <= 0.0 || geometry.displayed_height <= 0.0 {
            return Err(AppError::RenderContext("image has no rendered size".into()));
        }
        // The selection may predate a layout change; keep it on the image.
        let crop = crop.clamped(geometry.displayed_width, geometry.displayed_height);
        if !crop.is_applicable() {
            return Err(AppError::RenderContext("empty crop selection".into()));
        }
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        let scale_x = geometry.natural_width / geometry.displayed_width;
        let scale_y = geometry.natural_height / geometry.displayed_height;
        Ok(Self {
            scale_x,
            scale_y,
            source_x: crop.x * scale_x,
            source_y: crop.y * scale_y,
            source_width: crop.width * scale_x,
            source_height: crop.height * scale_y,
            logical_width: crop.width,
            logical_height: crop.height,
            pixel_ratio,
            surface_width: ((crop.width * pixel_ratio).floor() as u32).max(1),
            surface_height: ((crop.height * pixel_ratio).floor() as u32).max(1),
        })
    }
}

pub fn device_pixel_ratio() -> f64 {
    web_sys::window()
        .map(|w| w.device_pixel_ratio())
        .filter(|r| *r > 0.0)
        .unwrap_or(1.0)
}

/// web-sys has no binding for `imageSmoothingQuality`, so it is set by name.
fn enable_high_quality_smoothing(ctx: &CanvasRenderingContext2d) -> Result<(), AppError> {
    ctx.set_image_smoothing_enabled(true);
    Reflect::set(
        ctx,
        &JsValue::from_str("imageSmoothingQuality"),
        &JsValue::from_str("high"),
    )
    .map_err(|_| AppError::RenderContext("set imageSmoothingQuality failed".into()))?;
    Ok(())
}

// ----------------------------
// Canvas crop -> PNG data URL
// ----------------------------
pub fn crop_image(img: &HtmlImageElement, crop: &PixelCrop, pixel_ratio: f64) -> Result<String, AppError> {
    let plan = CropPlan::new(ImageGeometry::of(img), crop, pixel_ratio)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| AppError::RenderContext("no document".into()))?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| AppError::RenderContext("create_element canvas failed".into()))?
        .dyn_into()
        .map_err(|_| AppError::RenderContext("dyn_into HtmlCanvasElement failed".into()))?;

    canvas.set_width(plan.surface_width);
    canvas.set_height(plan.surface_height);

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|_| AppError::RenderContext("get_context failed".into()))?
        .ok_or_else(|| AppError::RenderContext("2d context missing".into()))?
        .dyn_into()
        .map_err(|_| AppError::RenderContext("dyn_into CanvasRenderingContext2d failed".into()))?;

    // Draw in logical pixels; the transform fills the denser surface.
    ctx.set_transform(plan.pixel_ratio, 0.0, 0.0, plan.pixel_ratio, 0.0, 0.0)
        .map_err(|_| AppError::RenderContext("set_transform failed".into()))?;
    enable_high_quality_smoothing(&ctx)?;

    ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
        img,
        plan.source_x,
        plan.source_y,
        plan.source_width,
        plan.source_height,
        0.0,
        0.0,
        plan.logical_width,
        plan.logical_height,
    )
    .map_err(|_| AppError::RenderContext("draw_image failed".into()))?;

    canvas
        .to_data_url_with_type("image/png")
        .map_err(|_| AppError::RenderContext("to_data_url failed".into()))
}

/// Decodes `src` into a detached image element, resolving once it has loaded.
pub async fn load_image(src: &str) -> Result<HtmlImageElement, AppError> {
    let img = HtmlImageElement::new()
        .map_err(|_| AppError::FileRead("create image element failed".into()))?;

    // Wait for onload via oneshot
    let (tx, rx) = futures_channel::oneshot::channel::<Result<(), AppError>>();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let tx2 = tx.clone();
    let onload = Closure::<dyn FnMut()>::new(move || {
        if let Some(sender) = tx2.borrow_mut().take() {
            let _ = sender.send(Ok(()));
        }
    });

    let tx3 = tx.clone();
    let onerror = Closure::<dyn FnMut()>::new(move || {
        if let Some(sender) = tx3.borrow_mut().take() {
            let _ = sender.send(Err(AppError::FileRead("image failed to decode".into())));
        }
    });

    img.set_onload(Some(onload.as_ref().unchecked_ref()));
    img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    img.set_src(src);

    let result = match rx.await {
        Ok(r) => r,
        Err(_) => Err(AppError::FileRead("image load channel canceled".into())),
    };

    img.set_onload(None);
    img.set_onerror(None);
    drop(onload);
    drop(onerror);

    result.map(|()| img)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(nw: f64, nh: f64, dw: f64, dh: f64) -> ImageGeometry {
        ImageGeometry {
            natural_width: nw,
            natural_height: nh,
            displayed_width: dw,
            displayed_height: dh,
        }
    }

    #[test]
    fn initial_selection_is_centered_square() {
        let sel = CropSelection::centered_square(400.0, 300.0).unwrap();
        let px = sel.to_pixels(400.0, 300.0);
        assert!((px.width - 300.0).abs() < 1e-9, "height bounds the square");
        assert!((px.height - 300.0).abs() < 1e-9);
        assert!((px.x - 50.0).abs() < 1e-9);
        assert!(px.y.abs() < 1e-9);

        let tall = CropSelection::centered_square(200.0, 500.0).unwrap();
        let px = tall.to_pixels(200.0, 500.0);
        assert!((px.width - 180.0).abs() < 1e-9);
        assert!((px.height - 180.0).abs() < 1e-9);
        assert!((px.x - 10.0).abs() < 1e-9);
        assert!((px.y - 160.0).abs() < 1e-9);
    }

    #[test]
    fn zero_sized_display_has_no_selection() {
        assert!(CropSelection::centered_square(0.0, 100.0).is_none());
    }

    #[test]
    fn pixel_selection_is_clamped_to_bounds() {
        let sel = CropSelection {
            x: 80.0,
            y: -5.0,
            width: 50.0,
            height: 50.0,
            unit: CropUnit::Px,
        };
        let px = sel.to_pixels(100.0, 100.0);
        assert_eq!(px, PixelCrop { x: 50.0, y: 0.0, width: 50.0, height: 50.0 });
    }

    #[test]
    fn moving_stops_at_edges() {
        let crop = PixelCrop { x: 10.0, y: 10.0, width: 40.0, height: 40.0 };
        let moved = crop.moved(100.0, -100.0, 100.0, 80.0);
        assert_eq!(moved, PixelCrop { x: 60.0, y: 0.0, width: 40.0, height: 40.0 });
    }

    #[test]
    fn resizing_keeps_square_and_bounds() {
        let crop = PixelCrop { x: 10.0, y: 20.0, width: 40.0, height: 40.0 };
        let grown = crop.resized_square(500.0, 3.0, 100.0, 100.0);
        assert_eq!(grown.width, grown.height);
        assert_eq!(grown.width, 80.0);

        let shrunk = crop.resized_square(-1000.0, 0.0, 100.0, 100.0);
        assert_eq!(shrunk.width, MIN_SELECTION_PX);
        assert!(shrunk.is_applicable());
    }

    #[test]
    fn display_reports_rounded_pixel_size() {
        let crop = PixelCrop { x: 10.4, y: 19.6, width: 120.2, height: 119.8 };
        assert_eq!(crop.to_string(), "120x120px at (10, 20)");
    }

    #[test]
    fn zero_area_crop_is_not_applicable() {
        assert!(!PixelCrop { x: 0.0, y: 0.0, width: 0.0, height: 10.0 }.is_applicable());
        assert!(!PixelCrop::default().is_applicable());
    }

    #[test]
    fn plan_scales_selection_to_natural_resolution() {
        let crop = PixelCrop { x: 10.0, y: 20.0, width: 100.0, height: 100.0 };
        let plan = CropPlan::new(geometry(2000.0, 1000.0, 500.0, 250.0), &crop, 2.0).unwrap();
        assert_eq!(plan.scale_x, 4.0);
        assert_eq!(plan.scale_y, 4.0);
        assert_eq!(
            (plan.source_x, plan.source_y, plan.source_width, plan.source_height),
            (40.0, 80.0, 400.0, 400.0)
        );
        assert_eq!((plan.logical_width, plan.logical_height), (100.0, 100.0));
        assert_eq!((plan.surface_width, plan.surface_height), (200, 200));
    }

    #[test]
    fn plan_surface_follows_pixel_ratio() {
        let crop = PixelCrop { x: 0.0, y: 0.0, width: 33.0, height: 21.0 };
        for ratio in [1.0, 1.5, 2.0, 3.0] {
            let plan = CropPlan::new(geometry(66.0, 42.0, 33.0, 21.0), &crop, ratio).unwrap();
            assert_eq!(plan.surface_width, (33.0 * ratio).floor() as u32);
            assert_eq!(plan.surface_height, (21.0 * ratio).floor() as u32);
        }
    }

    #[test]
    fn plan_rejects_empty_inputs() {
        let crop = PixelCrop { x: 0.0, y: 0.0, width: 0.0, height: 10.0 };
        assert!(matches!(
            CropPlan::new(geometry(10.0, 10.0, 10.0, 10.0), &crop, 1.0),
            Err(AppError::RenderContext(_))
        ));
        let crop = PixelCrop { x: 0.0, y: 0.0, width: 5.0, height: 5.0 };
        assert!(CropPlan::new(geometry(10.0, 10.0, 0.0, 10.0), &crop, 1.0).is_err());
    }

    #[test]
    fn plan_clamps_selection_made_against_a_larger_layout() {
        // Selected while the image was shown at 400px, applied after it shrank to 200px.
        let crop = PixelCrop { x: 150.0, y: 150.0, width: 200.0, height: 200.0 };
        let plan = CropPlan::new(geometry(800.0, 800.0, 200.0, 200.0), &crop, 1.0).unwrap();
        assert_eq!((plan.logical_width, plan.logical_height), (200.0, 200.0));
        assert_eq!((plan.source_x, plan.source_y), (0.0, 0.0));
        assert!(plan.source_x + plan.source_width <= 800.0);
        assert!(plan.source_y + plan.source_height <= 800.0);
        assert_eq!((plan.surface_width, plan.surface_height), (200, 200));
    }

    #[test]
    fn invalid_pixel_ratio_falls_back_to_one() {
        let crop = PixelCrop { x: 0.0, y: 0.0, width: 8.0, height: 8.0 };
        let plan = CropPlan::new(geometry(8.0, 8.0, 8.0, 8.0), &crop, f64::NAN).unwrap();
        assert_eq!(plan.pixel_ratio, 1.0);
        assert_eq!(plan.surface_width, 8);
    }
}
