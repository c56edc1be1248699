use crate::density::DirType;
use crate::error::{Error, Result};
use std::path::Path;

/// Density all fixed icon geometry is specified at.
pub const REFERENCE_DPI: u32 = 640;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Mode {
    #[default]
    Normal,
    Launcher,
    ActionBar,
    Notification,
    SmallContextual,
}

/// Fixed platform geometry of an icon mode, given at [`REFERENCE_DPI`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ModeSpec {
    pub size: (u32, u32),
    /// Area the visible content is fitted into, centered on the canvas.
    pub content_box: Option<(u32, u32)>,
    pub dir_type: DirType,
    pub filename: Option<&'static str>,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Self::Normal,
        Self::Launcher,
        Self::ActionBar,
        Self::Notification,
        Self::SmallContextual,
    ];

    /// Returns `None` for [`Mode::Normal`], which takes its geometry from
    /// the source image.
    pub fn spec(self) -> Option<ModeSpec> {
        Some(match self {
            Self::Normal => return None,
            Self::Launcher => ModeSpec {
                size: (192, 192),
                content_box: None,
                dir_type: DirType::Mipmap,
                filename: Some("ic_launcher.png"),
            },
            Self::ActionBar => ModeSpec {
                size: (128, 128),
                content_box: Some((96, 96)),
                dir_type: DirType::Drawable,
                filename: None,
            },
            Self::Notification => ModeSpec {
                size: (96, 96),
                content_box: Some((88, 88)),
                dir_type: DirType::Drawable,
                filename: None,
            },
            Self::SmallContextual => ModeSpec {
                size: (64, 64),
                content_box: None,
                dir_type: DirType::Drawable,
                filename: None,
            },
        })
    }

    pub fn dir_type(self) -> DirType {
        self.spec()
            .map(|spec| spec.dir_type)
            .unwrap_or(DirType::Drawable)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Launcher => write!(f, "launcher"),
            Self::ActionBar => write!(f, "actionbar"),
            Self::Notification => write!(f, "notification"),
            Self::SmallContextual => write!(f, "smallcontextual"),
        }
    }
}

/// Everything needed to generate one set of density bucketed assets.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IconProfile {
    mode: Mode,
    reference_dpi: u32,
    size: (u32, u32),
    content_box: Option<(u32, u32)>,
    dir_type: DirType,
    filename: String,
}

impl IconProfile {
    /// Resolves the profile for `mode`.
    ///
    /// `source_size` and `dpi` only matter in [`Mode::Normal`]; the fixed
    /// icon modes always use their own geometry at [`REFERENCE_DPI`].
    /// `filename` falls back to the mode's default name, then to the base
    /// name of `input`. The extension is always forced to `png`.
    pub fn new(
        mode: Mode,
        input: &Path,
        source_size: (u32, u32),
        dpi: Option<u32>,
        filename: Option<&str>,
    ) -> Result<Self> {
        if dpi == Some(0) {
            return Err(Error::InvalidDpi);
        }
        let (reference_dpi, size, content_box) = match mode.spec() {
            None => (dpi.unwrap_or(REFERENCE_DPI), source_size, None),
            Some(spec) => {
                if let Some(dpi) = dpi.filter(|dpi| *dpi != REFERENCE_DPI) {
                    tracing::warn!("ignoring dpi {} for {} icons", dpi, mode);
                }
                (REFERENCE_DPI, spec.size, spec.content_box)
            }
        };
        let filename = filename
            .map(str::to_string)
            .or_else(|| mode.spec().and_then(|spec| spec.filename).map(Into::into))
            .or_else(|| {
                input
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .ok_or_else(|| Error::Filename(input.to_path_buf()))?;
        Ok(Self {
            mode,
            reference_dpi,
            size,
            content_box,
            dir_type: mode.dir_type(),
            filename: normalize_filename(&filename)?,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn reference_dpi(&self) -> u32 {
        self.reference_dpi
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn content_box(&self) -> Option<(u32, u32)> {
        self.content_box
    }

    pub fn dir_type(&self) -> DirType {
        self.dir_type
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
}

/// Replaces the extension of `name` with `png`, whatever its case, or
/// appends one if missing. Names without a final file component, like `..`
/// or an empty string, are rejected.
pub fn normalize_filename(name: &str) -> Result<String> {
    let path = Path::new(name);
    if path.file_name().is_none() {
        return Err(Error::Filename(path.to_path_buf()));
    }
    Ok(path.with_extension("png").to_string_lossy().into_owned())
}
