use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;

use crate::error::BookingError;

/// Pixels per QR module.
pub const MODULE_PX: u32 = 8;

pub fn encode_png(text: &str) -> Result<Vec<u8>, BookingError> {
    let code =
        QrCode::new(text.as_bytes()).map_err(|e| BookingError::QrEncode(e.to_string()))?;

    let img = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_PX, MODULE_PX)
        .dark_color(Luma([0u8]))
        .light_color(Luma([255u8]))
        .quiet_zone(true)
        .build();

    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| BookingError::ImageEncode(e.to_string()))?;

    Ok(buf.into_inner())
}
