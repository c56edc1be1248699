use crate::compose::{self, Filter};
use crate::density::{res_dir, Density};
use crate::error::{Error, Result};
use crate::profile::IconProfile;
use crate::resolution::scale_size;
use image::{DynamicImage, ImageFormat, ImageReader, Limits};
use std::path::{Path, PathBuf};

/// Decoded source image. Never modified during generation, every density
/// bucket starts from the original pixels.
pub struct Source {
    img: DynamicImage,
}

impl Source {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let read_err = |source| Error::Read {
            path: path.to_path_buf(),
            source,
        };
        let img = ImageReader::open(path)
            .map_err(read_err)?
            .with_guessed_format()
            .map_err(read_err)?
            .decode()
            .map_err(|source| Error::Decode {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { img })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.img.width(), self.img.height())
    }

    pub fn image(&self) -> &DynamicImage {
        &self.img
    }
}

impl From<DynamicImage> for Source {
    fn from(img: DynamicImage) -> Self {
        Self { img }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedAsset {
    pub density: Density,
    pub width: u32,
    pub height: u32,
    pub path: PathBuf,
}

impl std::fmt::Display for GeneratedAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:<7} {:<9} ({} dpi): {}",
            self.density.suffix(),
            format!("{}x{}", self.width, self.height),
            self.density.dpi(),
            self.path.display()
        )
    }
}

pub struct Generator {
    profile: IconProfile,
    root: PathBuf,
    filter: Filter,
    densities: Vec<Density>,
}

impl Generator {
    pub fn new(profile: IconProfile, root: impl Into<PathBuf>) -> Self {
        Self {
            profile,
            root: root.into(),
            filter: Filter::default(),
            densities: Density::ALL.to_vec(),
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Restricts generation to `densities`. Buckets are still produced in
    /// table order.
    pub fn only(mut self, densities: &[Density]) -> Self {
        self.densities = Density::ALL
            .into_iter()
            .filter(|density| densities.contains(density))
            .collect();
        self
    }

    pub fn generate(&self, source: &Source) -> Result<Vec<GeneratedAsset>> {
        self.generate_with(source, |_| {})
    }

    /// Writes one png per density bucket, calling `report` after each one
    /// is on disk. Existing files are overwritten. The first error aborts
    /// the remaining buckets, already written files are left in place.
    pub fn generate_with(
        &self,
        source: &Source,
        mut report: impl FnMut(&GeneratedAsset),
    ) -> Result<Vec<GeneratedAsset>> {
        let mut assets = Vec::with_capacity(self.densities.len());
        for density in &self.densities {
            let asset = self.generate_density(source, *density)?;
            report(&asset);
            assets.push(asset);
        }
        Ok(assets)
    }

    fn generate_density(&self, source: &Source, density: Density) -> Result<GeneratedAsset> {
        let profile = &self.profile;
        let size = scaled(profile, profile.size(), density, "canvas")?;

        let dir = res_dir(&self.root, profile.dir_type(), density);
        create_dir(&dir)?;
        let path = dir.join(profile.filename());

        let img = match profile.content_box() {
            None => compose::resize(source.image(), size, self.filter),
            Some(content_box) => {
                let content_box = scaled(profile, content_box, density, "content box")?;
                DynamicImage::ImageRgba8(compose::compose_boxed(
                    source.image(),
                    size,
                    content_box,
                    self.filter,
                )?)
            }
        };
        tracing::debug!(
            "writing {}x{} {} to {}",
            size.0,
            size.1,
            density,
            path.display()
        );
        img.save_with_format(&path, ImageFormat::Png)
            .map_err(|source| Error::Encode {
                path: path.clone(),
                source,
            })?;
        Ok(GeneratedAsset {
            density,
            width: size.0,
            height: size.1,
            path,
        })
    }
}

/// Scales `size` from the profile's reference dpi to `density`, rejecting
/// empty results and results too large to allocate as rgba8.
fn scaled(
    profile: &IconProfile,
    size: (u32, u32),
    density: Density,
    what: &str,
) -> Result<(u32, u32)> {
    let geometry_err = |size: String| {
        Error::Geometry(format!(
            "{} for {} ({} dpi) would be {}",
            what,
            density,
            density.dpi(),
            size
        ))
    };
    let (width, height) = scale_size(size, profile.reference_dpi(), density.dpi())
        .ok_or_else(|| geometry_err("out of range".into()))?;
    let bytes = width as u64 * height as u64 * 4;
    let too_large = Limits::default()
        .max_alloc
        .is_some_and(|max_alloc| bytes > max_alloc);
    if width == 0 || height == 0 || too_large {
        return Err(geometry_err(format!("{}x{}", width, height)));
    }
    Ok((width, height))
}

fn create_dir(dir: &Path) -> Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    std::os::unix::fs::DirBuilderExt::mode(&mut builder, 0o755);
    builder.create(dir).map_err(|source| Error::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_line() {
        let asset = GeneratedAsset {
            density: Density::Hdpi,
            width: 72,
            height: 72,
            path: PathBuf::from("res/mipmap-hdpi/ic_launcher.png"),
        };
        assert_eq!(
            asset.to_string(),
            "hdpi    72x72     (240 dpi): res/mipmap-hdpi/ic_launcher.png"
        );
    }
}
