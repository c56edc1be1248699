use anyhow::Result;
use droidres::{Density, Error, Filter, Generator, IconProfile, Mode, Source};
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use std::path::Path;

fn opaque(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    }))
}

fn profile(mode: Mode, source: &Source, filename: Option<&str>) -> Result<IconProfile> {
    Ok(IconProfile::new(
        mode,
        Path::new("assets/logo.png"),
        source.dimensions(),
        None,
        filename,
    )?)
}

#[test]
fn launcher() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let source = Source::from(opaque(512, 512));
    let generator = Generator::new(profile(Mode::Launcher, &source, None)?, dir.path());
    let assets = generator.generate(&source)?;

    let expected = [
        ("xxxhdpi", 192),
        ("xxhdpi", 144),
        ("xhdpi", 96),
        ("hdpi", 72),
        ("mdpi", 48),
        ("ldpi", 36),
    ];
    assert_eq!(assets.len(), expected.len());
    for (asset, (suffix, size)) in assets.iter().zip(expected) {
        let path = dir
            .path()
            .join(format!("mipmap-{}", suffix))
            .join("ic_launcher.png");
        assert_eq!(asset.path, path);
        assert_eq!((asset.width, asset.height), (size, size));
        let img = image::open(&path)?;
        assert_eq!(img.dimensions(), (size, size));
    }
    Ok(())
}

#[test]
fn actionbar_xhdpi() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let source = Source::from(opaque(300, 300));
    let generator = Generator::new(profile(Mode::ActionBar, &source, None)?, dir.path())
        .filter(Filter::Nearest)
        .only(&[Density::Xhdpi]);
    let assets = generator.generate(&source)?;
    assert_eq!(assets.len(), 1);

    let path = dir.path().join("drawable-xhdpi").join("logo.png");
    assert_eq!(assets[0].path, path);
    let img = image::open(&path)?.to_rgba8();
    assert_eq!(img.dimensions(), (64, 64));
    assert_eq!(img.get_pixel(7, 8)[3], 0);
    assert_eq!(img.get_pixel(8, 8)[3], 255);
    assert_eq!(img.get_pixel(55, 55)[3], 255);
    assert_eq!(img.get_pixel(56, 55)[3], 0);
    assert!(!dir.path().join("drawable-mdpi").exists());
    Ok(())
}

#[test]
fn notification_keeps_aspect() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut img = RgbaImage::new(400, 400);
    for x in 50..250 {
        for y in 100..200 {
            img.put_pixel(x, y, Rgba([255, 255, 255, 255]));
        }
    }
    let source = Source::from(DynamicImage::ImageRgba8(img));
    let generator = Generator::new(profile(Mode::Notification, &source, None)?, dir.path())
        .filter(Filter::Nearest)
        .only(&[Density::Xxxhdpi]);
    generator.generate(&source)?;

    // 200x100 content in an 88x88 box on a 96x96 canvas: 88x44 at (4, 26)
    let out = image::open(dir.path().join("drawable-xxxhdpi/logo.png"))?.to_rgba8();
    assert_eq!(out.dimensions(), (96, 96));
    assert_eq!(out.get_pixel(4, 26)[3], 255);
    assert_eq!(out.get_pixel(91, 69)[3], 255);
    assert_eq!(out.get_pixel(3, 26)[3], 0);
    assert_eq!(out.get_pixel(4, 25)[3], 0);
    assert_eq!(out.get_pixel(4, 70)[3], 0);
    Ok(())
}

#[test]
fn normal_mode_scales_source() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let source = Source::from(opaque(100, 60));
    let profile = IconProfile::new(
        Mode::Normal,
        Path::new("photo.jpeg"),
        source.dimensions(),
        Some(320),
        Some("banner.JPG"),
    )?;
    let assets = Generator::new(profile, dir.path()).generate(&source)?;
    let sizes: Vec<(u32, u32)> = assets.iter().map(|a| (a.width, a.height)).collect();
    assert_eq!(
        sizes,
        [(200, 120), (150, 90), (100, 60), (75, 45), (50, 30), (37, 22)]
    );
    for asset in &assets {
        assert_eq!(asset.path.file_name().unwrap(), "banner.png");
        assert!(asset.path.parent().unwrap().ends_with(format!("drawable-{}", asset.density)));
    }
    Ok(())
}

#[test]
fn transparent_source_is_rejected() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let source = Source::from(DynamicImage::ImageRgba8(RgbaImage::new(128, 128)));
    let generator = Generator::new(profile(Mode::ActionBar, &source, None)?, dir.path());
    let err = generator.generate(&source).unwrap_err();
    assert!(matches!(err, Error::Geometry(_)));
    Ok(())
}

#[test]
fn zero_sized_bucket_is_rejected() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let source = Source::from(opaque(3, 3));
    let profile = IconProfile::new(
        Mode::Normal,
        Path::new("dot.png"),
        source.dimensions(),
        None,
        None,
    )?;
    let mut reported = vec![];
    let err = Generator::new(profile, dir.path())
        .generate_with(&source, |asset| reported.push(asset.density))
        .unwrap_err();
    assert!(matches!(err, Error::Geometry(_)));
    // 3 * 160 / 640 = 0.75
    assert_eq!(reported, [Density::Xxxhdpi, Density::Xxhdpi, Density::Xhdpi, Density::Hdpi]);
    Ok(())
}

#[test]
fn oversized_bucket_is_rejected() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let source = Source::from(opaque(100, 100));
    // 100px at 1 dpi would be 64000x64000 at xxxhdpi
    let profile = IconProfile::new(
        Mode::Normal,
        Path::new("big.png"),
        source.dimensions(),
        Some(1),
        None,
    )?;
    let err = Generator::new(profile, dir.path()).generate(&source).unwrap_err();
    assert!(matches!(err, Error::Geometry(_)));
    assert!(!dir.path().join("drawable-xxxhdpi").exists());
    Ok(())
}

#[test]
fn rerun_overwrites_identically() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let source = Source::from(opaque(257, 131));
    let generator = Generator::new(profile(Mode::ActionBar, &source, None)?, dir.path());
    let first = generator.generate(&source)?;
    let before: Vec<Vec<u8>> = first
        .iter()
        .map(|asset| std::fs::read(&asset.path))
        .collect::<Result<_, _>>()?;
    let second = generator.generate(&source)?;
    assert_eq!(first, second);
    for (asset, bytes) in second.iter().zip(before) {
        assert_eq!(std::fs::read(&asset.path)?, bytes);
    }
    Ok(())
}

#[test]
fn decode_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"definitely not an image")?;
    assert!(matches!(Source::open(&path), Err(Error::Decode { .. })));
    Ok(())
}

#[test]
fn open_sniffs_format() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("icon.bin");
    opaque(20, 10).save_with_format(&path, image::ImageFormat::Png)?;
    let source = Source::open(&path)?;
    assert_eq!(source.dimensions(), (20, 10));
    Ok(())
}
