use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, Luma, imageops};
use qrcode::{QrCode, Version};

use crate::errors::app_error::AppError;
use crate::models::qr_params::{ErrorCorrection, QrRequestParams};

pub const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
pub const DEFAULT_MAX_IMAGE_DIMENSION: u32 = 8192;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Turns sanitized request parameters into PNG bytes.
///
/// Handlers only see this trait so tests can swap in a recording renderer.
pub trait QrRenderer: Send + Sync {
    fn render(&self, params: &QrRequestParams) -> Result<Vec<u8>, AppError>;
}

/// Renderer backed by the `qrcode` encoder and the `image` PNG writer
#[derive(Debug, Clone)]
pub struct SymbolRenderer {
    pub max_dimension: u32,
}

impl Default for SymbolRenderer {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_IMAGE_DIMENSION,
        }
    }
}

impl QrRenderer for SymbolRenderer {
    fn render(&self, params: &QrRequestParams) -> Result<Vec<u8>, AppError> {
        let code = encode(&params.data, params.error_correction, params.micro)?;
        render_png(&code, params.scale, params.border, self.max_dimension)
    }
}

/// Encode `data` into a QR symbol.
///
/// Regular symbols take the smallest version that fits. Micro symbols are
/// tried from M1 to M4; the first one accepting the data and level wins.
pub fn encode(data: &str, level: ErrorCorrection, micro: bool) -> Result<QrCode, AppError> {
    if !micro {
        return Ok(QrCode::with_error_correction_level(
            data.as_bytes(),
            level.ec_level(),
        )?);
    }

    let mut last_err = qrcode::types::QrError::DataTooLong;
    for v in 1..=4 {
        match QrCode::with_version(data.as_bytes(), Version::Micro(v), level.ec_level()) {
            Ok(code) => return Ok(code),
            Err(e) => last_err = e,
        }
    }
    Err(last_err.into())
}

/// Render `code` as a grayscale PNG with `scale` pixels per module and a
/// quiet zone of `border` modules on every side.
pub fn render_png(
    code: &QrCode,
    scale: i64,
    border: i64,
    max_dimension: u32,
) -> Result<Vec<u8>, AppError> {
    if scale < 1 {
        return Err(AppError::Render(format!("scale must be at least 1, got {}", scale)));
    }
    if border < 0 {
        return Err(AppError::Render(format!("border must not be negative, got {}", border)));
    }

    let too_large =
        || AppError::Render(format!("image side exceeds the {} pixel limit", max_dimension));
    let modules = code.width() as i64;
    let side = border
        .checked_mul(2)
        .and_then(|b| b.checked_add(modules))
        .and_then(|m| m.checked_mul(scale))
        .filter(|side| *side <= i64::from(max_dimension))
        .ok_or_else(too_large)?;

    // side fits in u32, so scale and border do too
    let side = u32::try_from(side).map_err(|_| too_large())?;
    let scale = u32::try_from(scale).map_err(|_| too_large())?;
    let border = u32::try_from(border).map_err(|_| too_large())?;

    let symbol = code
        .render::<Luma<u8>>()
        .dark_color(DARK)
        .light_color(LIGHT)
        .quiet_zone(false)
        .module_dimensions(scale, scale)
        .build();

    let mut canvas = GrayImage::from_pixel(side, side, LIGHT);
    let offset = i64::from(border) * i64::from(scale);
    imageops::overlay(&mut canvas, &symbol, offset, offset);

    let mut buffer = Vec::new();
    DynamicImage::ImageLuma8(canvas).write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)?;
    Ok(buffer)
}
