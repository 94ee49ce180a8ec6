//! End-to-end facade runs through the subprocess invoker
//!
//! Unix tests use a `/bin/sh` script in place of `java`. The `real_pdfbox_*`
//! tests need `PDFBOX` pointing at a 2.x `pdfbox-app` jar and `java` on PATH;
//! they skip otherwise.

use pdfboxlab_core::config::RuntimeConfig;
use pdfboxlab_core::{Config, InvokerKind, PdfboxError};
use pdfboxlab_testkit::fixtures::{self, PDFBOX_LIKE_SCRIPT};
use pdfboxlab_toolkit::{
    ExtractImagesOptions, ExtractTextOptions, PdfBox, PdfToImageOptions, ResolverConfig,
};
use std::path::{Path, PathBuf};

fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn override_resolver(jar: PathBuf, cache_dir: &Path) -> ResolverConfig {
    let mut resolver = ResolverConfig::new(cache_dir, "http://127.0.0.1:9/unreachable");
    resolver.jar_override = Some(jar);
    resolver.offline = true;
    resolver
}

#[cfg(unix)]
mod fake_java {
    use super::*;
    use pdfboxlab_testkit::fixtures::FakeJava;

    struct Setup {
        _temp: tempfile::TempDir,
        dir: PathBuf,
        fake: FakeJava,
        pdfbox: PdfBox,
    }

    fn setup() -> Setup {
        let temp = pdfboxlab_testkit::temp_dir_in_workspace();
        let dir = temp.path().to_path_buf();
        let fake = fixtures::write_fake_java(&dir, PDFBOX_LIKE_SCRIPT);
        let jar = fixtures::fake_jar(&dir.join("jars"), "2.0.27");

        let mut config = Config::default();
        config.runtime = RuntimeConfig {
            invoker: InvokerKind::Subprocess,
            java: Some(fake.interpreter()),
            jvm_args: fake.jvm_args(),
        };

        let pdfbox =
            PdfBox::with_resolver(&override_resolver(jar, &dir.join("cache")), &config).unwrap();

        Setup {
            _temp: temp,
            dir,
            fake,
            pdfbox,
        }
    }

    #[test]
    fn test_extract_text_to_console() {
        let s = setup();
        let input = fixtures::write_pdf(&s.dir, "doc.pdf", &["Hello"], false);

        let text = s
            .pdfbox
            .extract_text(&input, &ExtractTextOptions::default())
            .unwrap();

        assert_eq!(text.as_deref(), Some("fake text\n"));
        assert_eq!(
            s.fake.last_args(),
            vec![
                "ExtractText".to_string(),
                "-console".to_string(),
                input.to_string_lossy().into_owned()
            ]
        );
    }

    #[test]
    fn test_extract_text_to_file() {
        let s = setup();
        let input = fixtures::write_pdf(&s.dir, "doc.pdf", &["Hello"], false);
        let output = s.dir.join("doc.txt");

        let options = ExtractTextOptions {
            output: Some(output.clone()),
            sort: true,
            start_page: Some(1),
            ..Default::default()
        };
        let text = s.pdfbox.extract_text(&input, &options).unwrap();

        assert_eq!(text, None);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "fake text\n");
        assert_eq!(
            s.fake.last_args(),
            vec![
                "ExtractText".to_string(),
                "-sort".to_string(),
                "-startPage".to_string(),
                "1".to_string(),
                input.to_string_lossy().into_owned(),
                output.to_string_lossy().into_owned()
            ]
        );
    }

    #[test]
    fn test_rasterize_two_pages() {
        let s = setup();
        let input = fixtures::write_pdf(&s.dir, "doc.pdf", &["one", "two"], false);
        let pages = s.dir.join("pages");
        std::fs::create_dir(&pages).unwrap();

        let options = PdfToImageOptions {
            output_prefix: Some(pages.join("page-")),
            image_type: Some("png".to_string()),
            ..Default::default()
        };
        s.pdfbox.rasterize_pages(&input, &options).unwrap();

        assert_eq!(files_in(&pages), vec!["page-1.png", "page-2.png"]);
    }

    #[test]
    fn test_extract_single_image() {
        let s = setup();
        let input = fixtures::write_pdf(&s.dir, "doc.pdf", &["pic"], true);
        let images = s.dir.join("images");
        std::fs::create_dir(&images).unwrap();

        let options = ExtractImagesOptions {
            prefix: Some(images.join("img")),
            direct_jpeg: true,
            ..Default::default()
        };
        let result = s.pdfbox.extract_images(&input, &options).unwrap();

        assert_eq!(files_in(&images), vec!["img-1.png"]);
        assert!(result.diagnostics().contains("Writing image"));
        assert!(s.fake.last_args().contains(&"-directJPEG".to_string()));
    }

    #[test]
    fn test_missing_input_is_tool_failure() {
        let s = setup();
        let missing = s.dir.join("missing.pdf");

        match s.pdfbox.extract_text(&missing, &ExtractTextOptions::default()) {
            Err(PdfboxError::ToolFailed {
                tool, exit_code, ..
            }) => {
                assert_eq!(tool, "ExtractText");
                assert_eq!(exit_code, 4);
            }
            other => panic!("Expected ToolFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_input_is_not_modified() {
        let s = setup();
        let input = fixtures::write_pdf(&s.dir, "doc.pdf", &["keep"], true);
        let before = std::fs::read(&input).unwrap();

        s.pdfbox
            .extract_text(&input, &ExtractTextOptions::default())
            .unwrap();
        s.pdfbox
            .rasterize_pages(&input, &PdfToImageOptions::default())
            .unwrap();

        assert_eq!(std::fs::read(&input).unwrap(), before);
    }
}

#[test]
fn test_missing_java_fails_at_construction() {
    let temp = pdfboxlab_testkit::temp_dir_in_workspace();
    let jar = fixtures::fake_jar(temp.path(), "2.0.27");

    let mut config = Config::default();
    config.runtime.java = Some(temp.path().join("no-such-java"));

    let result = PdfBox::with_resolver(&override_resolver(jar, temp.path()), &config);
    assert!(matches!(result, Err(PdfboxError::RuntimeMissing(_))));
}

/// A real PDFBox 2.x setup, if the environment provides one
fn real_pdfbox(cache_dir: &Path) -> Option<PdfBox> {
    let Some(jar) = std::env::var_os("PDFBOX").map(PathBuf::from) else {
        eprintln!("PDFBOX not set, skipping");
        return None;
    };
    if which::which("java").is_err() {
        eprintln!("java not on PATH, skipping");
        return None;
    }

    Some(PdfBox::with_resolver(&override_resolver(jar, cache_dir), &Config::default()).unwrap())
}

#[cfg(windows)]
const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
const LINE_SEPARATOR: &str = "\n";

#[test]
fn real_pdfbox_extract_text_returns_stdout() {
    let temp = pdfboxlab_testkit::temp_dir_in_workspace();
    let Some(pdfbox) = real_pdfbox(temp.path()) else {
        return;
    };
    let input = fixtures::write_pdf(temp.path(), "hello.pdf", &["Hello PDFBox"], false);

    let text = pdfbox
        .extract_text(&input, &ExtractTextOptions::default())
        .unwrap();

    assert_eq!(text, Some(format!("Hello PDFBox{}", LINE_SEPARATOR)));
}

#[test]
fn real_pdfbox_rasterizes_each_page() {
    let temp = pdfboxlab_testkit::temp_dir_in_workspace();
    let Some(pdfbox) = real_pdfbox(temp.path()) else {
        return;
    };
    let input = fixtures::write_pdf(temp.path(), "two.pdf", &["first", "second"], false);
    let pages = temp.path().join("pages");
    std::fs::create_dir(&pages).unwrap();

    let options = PdfToImageOptions {
        output_prefix: Some(pages.join("p")),
        image_type: Some("png".to_string()),
        dpi: Some(36),
        ..Default::default()
    };
    pdfbox.rasterize_pages(&input, &options).unwrap();

    assert_eq!(files_in(&pages), vec!["p1.png", "p2.png"]);
}

#[test]
fn real_pdfbox_extracts_one_image() {
    let temp = pdfboxlab_testkit::temp_dir_in_workspace();
    let Some(pdfbox) = real_pdfbox(temp.path()) else {
        return;
    };
    let input = fixtures::write_pdf(temp.path(), "image.pdf", &["pic"], true);
    let images = temp.path().join("images");
    std::fs::create_dir(&images).unwrap();

    let options = ExtractImagesOptions {
        prefix: Some(images.join("img")),
        ..Default::default()
    };
    pdfbox.extract_images(&input, &options).unwrap();

    assert_eq!(files_in(&images).len(), 1);
}
