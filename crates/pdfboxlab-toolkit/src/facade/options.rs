use pdfboxlab_core::{PdfboxError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Options for `ExtractText`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractTextOptions {
    /// Text file to write; `None` returns the text instead
    pub output: Option<PathBuf>,
    pub password: Option<String>,
    pub encoding: Option<String>,
    pub html: bool,
    pub sort: bool,
    pub ignore_beads: bool,
    pub start_page: Option<u32>,
    pub end_page: Option<u32>,
}

/// Colour model for rendered pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDepth {
    Bilevel,
    Gray,
    Rgb,
    Rgba,
}

impl ColorDepth {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorDepth::Bilevel => "bilevel",
            ColorDepth::Gray => "gray",
            ColorDepth::Rgb => "rgb",
            ColorDepth::Rgba => "rgba",
        }
    }
}

impl fmt::Display for ColorDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorDepth {
    type Err = PdfboxError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "bilevel" => Ok(ColorDepth::Bilevel),
            "gray" | "grey" => Ok(ColorDepth::Gray),
            "rgb" => Ok(ColorDepth::Rgb),
            "rgba" => Ok(ColorDepth::Rgba),
            other => Err(PdfboxError::Generic(format!(
                "unknown color '{}': expected bilevel, gray, rgb or rgba",
                other
            ))),
        }
    }
}

/// Crop rectangle in PDF user space units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CropBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// `[x1, y1, x2, y2]`, the order `PDFToImage -cropbox` takes them in
    pub fn coordinates(&self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }
}

/// `"x1 y1 x2 y2"`
impl fmt::Display for CropBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x1, self.y1, self.x2, self.y2)
    }
}

impl FromStr for CropBox {
    type Err = PdfboxError;

    /// Accepts four numbers separated by spaces or commas
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PdfboxError::Generic(format!("invalid cropbox '{}': expected four numbers", s));

        let values = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .map(|p| p.parse::<f32>().map_err(|_| invalid()))
            .collect::<Result<Vec<f32>>>()?;

        match values.as_slice() {
            [x1, y1, x2, y2] => Ok(CropBox::new(*x1, *y1, *x2, *y2)),
            _ => Err(invalid()),
        }
    }
}

/// Options for `PDFToImage`
#[derive(Debug, Clone, PartialEq)]
pub struct PdfToImageOptions {
    pub password: Option<String>,
    /// Image format name understood by ImageIO (`png`, `jpg`, ...)
    pub image_type: Option<String>,
    /// Files are written as `<prefix><page>.<ext>`
    pub output_prefix: Option<PathBuf>,
    pub start_page: Option<u32>,
    pub end_page: Option<u32>,
    pub page: Option<u32>,
    pub dpi: Option<u32>,
    pub color: Option<ColorDepth>,
    pub cropbox: Option<CropBox>,
    /// Report rendering time
    pub time: bool,
}

impl Default for PdfToImageOptions {
    fn default() -> Self {
        Self {
            password: None,
            image_type: None,
            output_prefix: None,
            start_page: None,
            end_page: None,
            page: None,
            dpi: None,
            color: None,
            cropbox: None,
            time: true,
        }
    }
}

/// Formats the bundled ImageIO writers handle
///
/// `PDFToImage` answers any other name with `System.exit(1)`.
pub const IMAGE_TYPES: &[&str] = &["bmp", "gif", "jpeg", "jpg", "png", "tif", "tiff", "wbmp"];

impl PdfToImageOptions {
    /// Rejects an `image_type` no writer exists for
    pub fn check_image_type(&self) -> Result<()> {
        match &self.image_type {
            Some(kind) if !IMAGE_TYPES.contains(&kind.to_ascii_lowercase().as_str()) => {
                Err(PdfboxError::Generic(format!(
                    "unsupported image type '{}': expected one of {}",
                    kind,
                    IMAGE_TYPES.join(", ")
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Options for `ExtractImages`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractImagesOptions {
    pub password: Option<String>,
    /// Files are written as `<prefix>-<n>.<ext>`
    pub prefix: Option<PathBuf>,
    /// Write JPEG streams as-is instead of re-encoding
    pub direct_jpeg: bool,
}

/// Expands a leading `~` and makes the path absolute against the current directory
///
/// The path need not exist.
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    let expanded = expand_home(path)?;
    if expanded.is_absolute() {
        return Ok(expanded);
    }

    Ok(std::env::current_dir()?.join(expanded))
}

fn expand_home(path: &Path) -> Result<PathBuf> {
    let mut components = path.components();
    match components.next() {
        Some(std::path::Component::Normal(first)) if first == "~" => {
            let home = dirs::home_dir().ok_or_else(|| {
                PdfboxError::Generic("could not determine home directory".to_string())
            })?;
            let rest = components.as_path();
            let mut expanded = home.join(rest).into_os_string();
            // components() drops a trailing separator; "~/pages/" is a directory prefix
            if !rest.as_os_str().is_empty() && has_trailing_separator(path) {
                expanded.push(std::path::MAIN_SEPARATOR_STR);
            }
            Ok(PathBuf::from(expanded))
        }
        _ => Ok(path.to_path_buf()),
    }
}

fn has_trailing_separator(path: &Path) -> bool {
    path.to_string_lossy().ends_with(std::path::is_separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_depth_parse() {
        assert_eq!("RGB".parse::<ColorDepth>().unwrap(), ColorDepth::Rgb);
        assert_eq!("grey".parse::<ColorDepth>().unwrap(), ColorDepth::Gray);
        assert_eq!(ColorDepth::Bilevel.to_string(), "bilevel");
        assert!("cmyk".parse::<ColorDepth>().is_err());
    }

    #[test]
    fn test_cropbox_display_and_parse() {
        let cropbox: CropBox = "0, 0 612.5,792".parse().unwrap();
        assert_eq!(cropbox, CropBox::new(0.0, 0.0, 612.5, 792.0));
        assert_eq!(cropbox.to_string(), "0 0 612.5 792");

        assert!("1 2 3".parse::<CropBox>().is_err());
        assert!("a b c d".parse::<CropBox>().is_err());
    }

    #[test]
    fn test_pdf_to_image_defaults_report_time() {
        assert!(PdfToImageOptions::default().time);
    }

    #[test]
    fn test_expand_path_relative() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(expand_path(Path::new("out/page-")).unwrap(), cwd.join("out/page-"));
    }

    #[test]
    fn test_expand_path_absolute_unchanged() {
        let abs = std::env::temp_dir().join("page-");
        assert_eq!(expand_path(&abs).unwrap(), abs);
    }

    #[test]
    fn test_expand_path_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_path(Path::new("~/scans/p")).unwrap(), home.join("scans/p"));
        assert_eq!(expand_path(Path::new("~")).unwrap(), home);
    }

    #[test]
    fn test_expand_path_home_keeps_trailing_separator() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let expanded = expand_path(Path::new("~/pages/")).unwrap();
        let relative = expand_path(Path::new("pages/")).unwrap();

        let sep = std::path::MAIN_SEPARATOR;
        assert_eq!(
            expanded.to_string_lossy(),
            format!("{}{}pages{}", home.display(), sep, sep)
        );
        assert!(relative.to_string_lossy().ends_with(sep));
    }

    #[test]
    fn test_image_type_checked_case_insensitively() {
        let with = |kind: &str| PdfToImageOptions {
            image_type: Some(kind.to_string()),
            ..Default::default()
        };

        assert!(PdfToImageOptions::default().check_image_type().is_ok());
        assert!(with("PNG").check_image_type().is_ok());
        assert!(with("tiff").check_image_type().is_ok());
        assert!(matches!(
            with("webp").check_image_type(),
            Err(PdfboxError::Generic(msg)) if msg.contains("webp")
        ));
    }

    #[test]
    fn test_cropbox_coordinates_order() {
        assert_eq!(
            CropBox::new(1.0, 2.0, 3.0, 4.5).coordinates(),
            [1.0, 2.0, 3.0, 4.5]
        );
    }

    #[test]
    fn test_expand_path_tilde_inside_name_is_literal() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(expand_path(Path::new("~notes")).unwrap(), cwd.join("~notes"));
    }
}
