/// Scales a length given at `reference_dpi` to `target_dpi`.
///
/// The fractional part is dropped, never rounded. Returns `None` if the
/// result does not fit a `u32`.
pub fn scale(reference: u32, reference_dpi: u32, target_dpi: u32) -> Option<u32> {
    let scaled = reference as f64 * target_dpi as f64 / reference_dpi as f64;
    if scaled > u32::MAX as f64 {
        return None;
    }
    Some(scaled as u32)
}

pub fn scale_size(size: (u32, u32), reference_dpi: u32, target_dpi: u32) -> Option<(u32, u32)> {
    Some((
        scale(size.0, reference_dpi, target_dpi)?,
        scale(size.1, reference_dpi, target_dpi)?,
    ))
}
