use std::path::{Path, PathBuf};

/// Android screen density buckets, highest first.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Density {
    Xxxhdpi,
    Xxhdpi,
    Xhdpi,
    Hdpi,
    Mdpi,
    Ldpi,
}

impl Density {
    pub const ALL: [Density; 6] = [
        Self::Xxxhdpi,
        Self::Xxhdpi,
        Self::Xhdpi,
        Self::Hdpi,
        Self::Mdpi,
        Self::Ldpi,
    ];

    pub fn dpi(self) -> u32 {
        match self {
            Self::Xxxhdpi => 640,
            Self::Xxhdpi => 480,
            Self::Xhdpi => 320,
            Self::Hdpi => 240,
            Self::Mdpi => 160,
            Self::Ldpi => 120,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Self::Xxxhdpi => "xxxhdpi",
            Self::Xxhdpi => "xxhdpi",
            Self::Xhdpi => "xhdpi",
            Self::Hdpi => "hdpi",
            Self::Mdpi => "mdpi",
            Self::Ldpi => "ldpi",
        }
    }
}

impl std::fmt::Display for Density {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

impl std::str::FromStr for Density {
    type Err = String;

    fn from_str(density: &str) -> Result<Self, Self::Err> {
        Ok(match density {
            "xxxhdpi" => Self::Xxxhdpi,
            "xxhdpi" => Self::Xxhdpi,
            "xhdpi" => Self::Xhdpi,
            "hdpi" => Self::Hdpi,
            "mdpi" => Self::Mdpi,
            "ldpi" => Self::Ldpi,
            _ => return Err(format!("unsupported density {}", density)),
        })
    }
}

/// Resource directory flavour. Launcher icons go to `mipmap`, everything
/// else to `drawable`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DirType {
    Drawable,
    Mipmap,
}

impl std::fmt::Display for DirType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Drawable => write!(f, "drawable"),
            Self::Mipmap => write!(f, "mipmap"),
        }
    }
}

pub fn res_dir_name(dir_type: DirType, density: Density) -> String {
    format!("{}-{}", dir_type, density)
}

pub fn res_dir(root: &Path, dir_type: DirType, density: Density) -> PathBuf {
    root.join(res_dir_name(dir_type, density))
}
