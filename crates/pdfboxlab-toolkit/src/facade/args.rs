//! Argument vectors in PDFBox 2.x tool grammar
//!
//! Flags come first in a fixed order, then the input path, then the output
//! path if any. Paths are expected to be normalized by the caller.

use super::options::{ExtractImagesOptions, ExtractTextOptions, PdfToImageOptions};
use std::path::Path;

struct ArgList(Vec<String>);

impl ArgList {
    fn new() -> Self {
        Self(Vec::new())
    }

    fn flag(&mut self, name: &str, enabled: bool) -> &mut Self {
        if enabled {
            self.0.push(name.to_string());
        }
        self
    }

    fn value<T: ToString>(&mut self, name: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.0.push(name.to_string());
            self.0.push(value.to_string());
        }
        self
    }

    /// A flag followed by several separate arguments
    fn values<I>(&mut self, name: &str, values: Option<I>) -> &mut Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        if let Some(values) = values {
            self.0.push(name.to_string());
            self.0.extend(values.into_iter().map(|v| v.to_string()));
        }
        self
    }

    fn path(&mut self, path: &Path) -> &mut Self {
        self.0.push(path.to_string_lossy().into_owned());
        self
    }

    fn finish(&mut self) -> Vec<String> {
        std::mem::take(&mut self.0)
    }
}

pub fn extract_text_args(input: &Path, options: &ExtractTextOptions) -> Vec<String> {
    let mut args = ArgList::new();
    args.value("-password", options.password.as_deref())
        .value("-encoding", options.encoding.as_deref())
        .flag("-html", options.html)
        .flag("-sort", options.sort)
        .flag("-ignoreBeads", options.ignore_beads)
        .value("-startPage", options.start_page)
        .value("-endPage", options.end_page)
        .flag("-console", options.output.is_none())
        .path(input);

    if let Some(output) = &options.output {
        args.path(output);
    }
    args.finish()
}

pub fn pdf_to_image_args(input: &Path, options: &PdfToImageOptions) -> Vec<String> {
    ArgList::new()
        .value("-password", options.password.as_deref())
        .value("-imageType", options.image_type.as_deref())
        .value(
            "-outputPrefix",
            options
                .output_prefix
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
        )
        .value("-startPage", options.start_page)
        .value("-endPage", options.end_page)
        .value("-page", options.page)
        .value("-dpi", options.dpi)
        .value("-color", options.color)
        .values("-cropbox", options.cropbox.map(|c| c.coordinates()))
        .flag("-time", options.time)
        .path(input)
        .finish()
}

pub fn extract_images_args(input: &Path, options: &ExtractImagesOptions) -> Vec<String> {
    ArgList::new()
        .value("-password", options.password.as_deref())
        .value(
            "-prefix",
            options
                .prefix
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
        )
        .flag("-directJPEG", options.direct_jpeg)
        .path(input)
        .finish()
}
