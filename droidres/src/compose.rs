use crate::error::{Error, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, RgbaImage};

/// Resampling filter used for every resize.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Filter {
    Nearest,
    Triangle,
    #[default]
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<Filter> for FilterType {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Nearest => FilterType::Nearest,
            Filter::Triangle => FilterType::Triangle,
            Filter::CatmullRom => FilterType::CatmullRom,
            Filter::Gaussian => FilterType::Gaussian,
            Filter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Nearest => write!(f, "nearest"),
            Self::Triangle => write!(f, "triangle"),
            Self::CatmullRom => write!(f, "catmullrom"),
            Self::Gaussian => write!(f, "gaussian"),
            Self::Lanczos3 => write!(f, "lanczos3"),
        }
    }
}

impl std::str::FromStr for Filter {
    type Err = String;

    fn from_str(filter: &str) -> Result<Self, Self::Err> {
        Ok(match filter {
            "nearest" => Self::Nearest,
            "triangle" => Self::Triangle,
            "catmullrom" => Self::CatmullRom,
            "gaussian" => Self::Gaussian,
            "lanczos3" => Self::Lanczos3,
            _ => return Err(format!("unsupported filter {}", filter)),
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Smallest rectangle enclosing the visible pixels of `img`.
///
/// A pixel is visible when its alpha is non-zero. Images without an alpha
/// channel treat black as background. Returns `None` if nothing is visible.
pub fn bounding_box(img: &DynamicImage) -> Option<Rect> {
    let has_alpha = img.color().has_alpha();
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in img.pixels() {
        let visible = if has_alpha {
            pixel[3] != 0
        } else {
            pixel[0] != 0 || pixel[1] != 0 || pixel[2] != 0
        };
        if !visible {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bounds.map(|(x0, y0, x1, y1)| Rect {
        x: x0,
        y: y0,
        width: x1 - x0 + 1,
        height: y1 - y0 + 1,
    })
}

/// Fits `content` into `bounds`, matching the longer axis of the content to
/// the box exactly. The other axis is truncated after the division.
pub fn fit_to_box(content: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (width, height) = (content.0 as f64, content.1 as f64);
    if content.0 >= content.1 {
        (bounds.0, (bounds.1 as f64 / (width / height)) as u32)
    } else {
        ((bounds.0 as f64 / (height / width)) as u32, bounds.1)
    }
}

pub fn center_offset(canvas: (u32, u32), content: (u32, u32)) -> (u32, u32) {
    (
        canvas.0.saturating_sub(content.0) / 2,
        canvas.1.saturating_sub(content.1) / 2,
    )
}

pub fn resize(img: &DynamicImage, size: (u32, u32), filter: Filter) -> DynamicImage {
    img.resize_exact(size.0, size.1, filter.into())
}

/// Crops `img` to its visible content, scales that into `content_box` and
/// centers it on a transparent canvas of `size`.
pub fn compose_boxed(
    img: &DynamicImage,
    size: (u32, u32),
    content_box: (u32, u32),
    filter: Filter,
) -> Result<RgbaImage> {
    let rect = bounding_box(img)
        .ok_or_else(|| Error::Geometry("source image has no visible content".into()))?;
    let cropped = img.crop_imm(rect.x, rect.y, rect.width, rect.height);
    let fitted = fit_to_box((rect.width, rect.height), content_box);
    if fitted.0 == 0 || fitted.1 == 0 {
        return Err(Error::Geometry(format!(
            "content of {}x{} does not fit into {}x{}",
            rect.width, rect.height, content_box.0, content_box.1
        )));
    }
    let content = resize(&cropped, fitted, filter).to_rgba8();
    let mut canvas = RgbaImage::new(size.0, size.1);
    let (x, y) = center_offset(size, fitted);
    imageops::replace(&mut canvas, &content, x as i64, y as i64);
    Ok(canvas)
}
