//! Fixture builders: small PDFs, placeholder archives and a fake `java`

use std::path::{Path, PathBuf};

/// Builds a valid PDF with one page per entry of `pages`
///
/// Each page shows its text in Helvetica at the top left. With `with_image`,
/// page one also draws a 2x2 RGB image XObject. An empty slice yields one
/// blank page.
pub fn minimal_pdf(pages: &[&str], with_image: bool) -> Vec<u8> {
    let page_count = pages.len().max(1);
    let first_page_obj = if with_image { 5 } else { 4 };

    let kids = (0..page_count)
        .map(|i| format!("{} 0 R", first_page_obj + 2 * i))
        .collect::<Vec<_>>()
        .join(" ");

    let mut objects: Vec<Vec<u8>> = vec![
        b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, page_count).into_bytes(),
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_vec(),
    ];

    if with_image {
        let pixels: [u8; 12] = [255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
        objects.push(stream_object(
            "/Type /XObject /Subtype /Image /Width 2 /Height 2 /ColorSpace /DeviceRGB /BitsPerComponent 8",
            &pixels,
        ));
    }

    for i in 0..page_count {
        let text = pages.get(i).copied().unwrap_or("");
        let draws_image = with_image && i == 0;

        let resources = if draws_image {
            "<< /Font << /F1 3 0 R >> /XObject << /Im1 4 0 R >> >>"
        } else {
            "<< /Font << /F1 3 0 R >> >>"
        };
        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Resources {} /Contents {} 0 R >>",
                resources,
                first_page_obj + 2 * i + 1
            )
            .into_bytes(),
        );

        let mut content = format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", escape_pdf_string(text));
        if draws_image {
            content.push_str("\nq 100 0 0 100 72 500 cm /Im1 Do Q");
        }
        objects.push(stream_object("", content.as_bytes()));
    }

    serialize(&objects)
}

fn stream_object(dict_entries: &str, data: &[u8]) -> Vec<u8> {
    let mut obj = if dict_entries.is_empty() {
        format!("<< /Length {} >>\nstream\n", data.len())
    } else {
        format!("<< {} /Length {} >>\nstream\n", dict_entries, data.len())
    }
    .into_bytes();
    obj.extend_from_slice(data);
    obj.extend_from_slice(b"\nendstream");
    obj
}

fn serialize(objects: &[Vec<u8>]) -> Vec<u8> {
    let mut out = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());

    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    out
}

fn escape_pdf_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '(' | ')' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Writes a [`minimal_pdf`] to `<dir>/<name>` and returns the path
pub fn write_pdf(dir: &Path, name: &str, pages: &[&str], with_image: bool) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, minimal_pdf(pages, with_image)).expect("Failed to write PDF fixture");
    path
}

/// Writes a placeholder `pdfbox-app-<version>.jar` into `dir`
pub fn fake_jar(dir: &Path, version: &str) -> PathBuf {
    std::fs::create_dir_all(dir).expect("Failed to create jar directory");
    let path = dir.join(format!("pdfbox-app-{}.jar", version));
    std::fs::write(&path, format!("PK\x03\x04 pdfbox-app {}", version))
        .expect("Failed to write fake jar");
    path
}

/// A shell script standing in for the `java` launcher
///
/// The script runs through `/bin/sh`, so it never needs to be executable:
/// configure `interpreter()` as the java path and `jvm_args()` as the JVM
/// arguments. It then sees `-jar <jar> <Tool> <args...>` as `$1...`.
#[derive(Debug, Clone)]
pub struct FakeJava {
    pub script: PathBuf,
}

impl FakeJava {
    pub fn interpreter(&self) -> PathBuf {
        PathBuf::from("/bin/sh")
    }

    pub fn jvm_args(&self) -> Vec<String> {
        vec![self.script.to_string_lossy().into_owned()]
    }

    /// `[runtime]` table selecting this fake
    pub fn runtime_toml(&self) -> String {
        format!(
            "[runtime]\ninvoker = \"subprocess\"\njava = {:?}\njvm_args = [{:?}]\n",
            self.interpreter().to_string_lossy(),
            self.script.to_string_lossy()
        )
    }

    /// Argument vector recorded by [`PDFBOX_LIKE_SCRIPT`] on its last run
    pub fn last_args(&self) -> Vec<String> {
        let log = self
            .script
            .parent()
            .map(|dir| dir.join("last-args"))
            .unwrap_or_else(|| PathBuf::from("last-args"));
        std::fs::read_to_string(log)
            .map(|content| content.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

/// Writes `body` as `<dir>/java.sh`
pub fn write_fake_java(dir: &Path, body: &str) -> FakeJava {
    let script = dir.join("java.sh");
    std::fs::write(&script, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write fake java");
    FakeJava { script }
}

/// Imitates the file effects of the three PDFBox tools
///
/// - records `<Tool> <args...>` one per line in `last-args` next to the script
/// - exits 4 with a message on stderr when the input file is missing
/// - `ExtractText`: prints `fake text` (console) or writes it to the output file
/// - `PDFToImage`: creates `<prefix>1.<type>` and `<prefix>2.<type>`
/// - `ExtractImages`: creates `<prefix>-1.png`
pub const PDFBOX_LIKE_SCRIPT: &str = r#"shift 2
tool="$1"
shift
printf '%s\n' "$tool" "$@" > "$(dirname "$0")/last-args"
input=""; output=""; prefix=""; image_type="jpg"; console=0
while [ $# -gt 0 ]; do
  case "$1" in
    -console) console=1 ;;
    -outputPrefix|-prefix) prefix="$2"; shift ;;
    -imageType) image_type="$2"; shift ;;
    -password|-encoding|-startPage|-endPage|-page|-dpi|-color) shift ;;
    -cropbox) shift 4 ;;
    -*) ;;
    *) if [ -z "$input" ]; then input="$1"; else output="$1"; fi ;;
  esac
  shift
done
if [ ! -f "$input" ]; then
  echo "Error: file not found: $input" >&2
  exit 4
fi
case "$tool" in
  ExtractText)
    if [ "$console" = 1 ]; then echo "fake text"; else echo "fake text" > "$output"; fi ;;
  PDFToImage)
    [ -n "$prefix" ] || prefix="${input%.pdf}"
    : > "${prefix}1.${image_type}"
    : > "${prefix}2.${image_type}" ;;
  ExtractImages)
    [ -n "$prefix" ] || prefix="${input%.pdf}"
    : > "${prefix}-1.png"
    echo "Writing image: ${prefix}-1.png" ;;
  *)
    echo "unknown tool $tool" >&2
    exit 2 ;;
esac"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_pdf_structure() {
        let pdf = minimal_pdf(&["Hello", "World"], false);
        let text = String::from_utf8_lossy(&pdf);

        assert!(text.starts_with("%PDF-1.4"));
        assert!(text.ends_with("%%EOF\n"));
        assert!(text.contains("/Count 2"));
        assert!(text.contains("(Hello) Tj"));
        assert!(text.contains("(World) Tj"));
        assert!(!text.contains("/Subtype /Image"));
    }

    fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).rposition(|w| w == needle)
    }

    #[test]
    fn test_minimal_pdf_xref_offsets_point_at_objects() {
        let pdf = minimal_pdf(&["one"], true);

        let startxref = rfind(&pdf, b"startxref\n").unwrap() + "startxref\n".len();
        let trailer = std::str::from_utf8(&pdf[startxref..]).unwrap();
        let xref_offset: usize = trailer.lines().next().unwrap().parse().unwrap();
        assert!(pdf[xref_offset..].starts_with(b"xref\n"));

        let xref = std::str::from_utf8(&pdf[xref_offset..]).unwrap();
        let entries: Vec<&str> = xref.lines().skip(3).take(6).collect();
        assert_eq!(entries.len(), 6);
        for (i, entry) in entries.iter().enumerate() {
            let offset: usize = entry[..10].parse().unwrap();
            assert!(
                pdf[offset..].starts_with(format!("{} 0 obj", i + 1).as_bytes()),
                "xref entry {} points at wrong object",
                i + 1
            );
        }
    }

    #[test]
    fn test_minimal_pdf_with_image() {
        let pdf = minimal_pdf(&["pic"], true);
        let text = String::from_utf8_lossy(&pdf);
        assert!(text.contains("/Subtype /Image"));
        assert!(text.contains("/Im1 Do"));
    }

    #[test]
    fn test_escape_pdf_string() {
        assert_eq!(escape_pdf_string(r"a(b)\c"), r"a\(b\)\\c");
    }

    #[test]
    fn test_fake_jar_name() {
        let temp = crate::temp_dir_in_workspace();
        let jar = fake_jar(temp.path(), "2.0.27");
        assert_eq!(jar.file_name().unwrap(), "pdfbox-app-2.0.27.jar");
        assert!(jar.is_file());
    }

    #[test]
    #[cfg(unix)]
    fn test_fake_java_runs_through_sh() {
        let temp = crate::temp_dir_in_workspace();
        let input = write_pdf(temp.path(), "in.pdf", &["x"], false);
        let fake = write_fake_java(temp.path(), PDFBOX_LIKE_SCRIPT);

        let output = std::process::Command::new(fake.interpreter())
            .args(fake.jvm_args())
            .args(["-jar", "pdfbox.jar", "ExtractText", "-console"])
            .arg(&input)
            .output()
            .unwrap();

        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout), "fake text\n");
        assert_eq!(
            fake.last_args(),
            vec![
                "ExtractText".to_string(),
                "-console".to_string(),
                input.to_string_lossy().into_owned()
            ]
        );
    }

    #[test]
    fn test_runtime_toml() {
        let fake = FakeJava {
            script: PathBuf::from("/tmp/x/java.sh"),
        };
        let toml = fake.runtime_toml();
        assert!(toml.contains("java = \"/bin/sh\""));
        assert!(toml.contains("jvm_args = [\"/tmp/x/java.sh\"]"));
    }
}
