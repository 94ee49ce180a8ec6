//! Resolution against a mocked distribution server
//!
//! Every test uses its own path prefix on the shared mock server.

use mockito::Mock;
use pdfboxlab_core::PdfboxError;
use pdfboxlab_testkit::get_shared_mock_server;
use pdfboxlab_testkit::mock::index_page;
use pdfboxlab_toolkit::checksum::sha512_hex;
use pdfboxlab_toolkit::resolve::{list_cached, list_remote};
use pdfboxlab_toolkit::{ResolverConfig, ToolkitSource, resolve_toolkit};
use semver::Version;
use std::path::Path;

fn v(s: &str) -> Version {
    Version::parse(s).unwrap()
}

/// Mocks `<prefix>/<version>/pdfbox-app-<version>.jar` and its `.sha512`
fn mock_artifact(prefix: &str, version: &str, served: &[u8], digest_of: &[u8]) -> (Mock, Mock) {
    let mut server = get_shared_mock_server();
    let jar_path = format!("{}/{}/pdfbox-app-{}.jar", prefix, version, version);

    let jar = server
        .mock("GET", jar_path.as_str())
        .with_status(200)
        .with_body(served)
        .expect(1)
        .create();
    let sum = server
        .mock("GET", format!("{}.sha512", jar_path).as_str())
        .with_status(200)
        .with_body(format!(
            "pdfbox-app-{}.jar: {}\n",
            version,
            sha512_hex(digest_of).to_uppercase()
        ))
        .create();
    (jar, sum)
}

fn mock_index(prefix: &str, versions: &[&str], expect: usize) -> Mock {
    get_shared_mock_server()
        .mock("GET", prefix)
        .with_status(200)
        .with_body(index_page(versions))
        .expect(expect)
        .create()
}

fn resolver(prefix: &str, cache_dir: &Path) -> ResolverConfig {
    let base = format!("{}{}", get_shared_mock_server().url(), prefix);
    ResolverConfig::new(cache_dir, base)
}

#[test]
fn test_second_resolve_uses_cache_without_requests() {
    let prefix = "/idempotent";
    let body = b"idempotent archive".to_vec();
    let index = mock_index(prefix, &["1.8.17", "2.0.9", "2.0.27", "3.0.1"], 1);
    let (jar, _sum) = mock_artifact(prefix, "2.0.27", &body, &body);

    let temp = pdfboxlab_testkit::temp_dir_in_workspace();
    let config = resolver(prefix, temp.path());

    let first = resolve_toolkit(&config).unwrap();
    assert_eq!(first.source, ToolkitSource::Downloaded);
    assert_eq!(first.version, Some(v("2.0.27")));
    assert_eq!(std::fs::read(&first.path).unwrap(), body);

    let second = resolve_toolkit(&config).unwrap();
    assert_eq!(second.source, ToolkitSource::Cache);
    assert_eq!(second.path, first.path);

    index.assert();
    jar.assert();
}

#[test]
fn test_corrupted_archive_is_rejected_and_retried() {
    let prefix = "/corrupt";
    let body = b"genuine pdfbox archive".to_vec();
    let mut corrupted = body.clone();
    corrupted[5] ^= 0x20;

    let _index = mock_index(prefix, &["2.0.30"], 2);
    let (bad_jar, bad_sum) = mock_artifact(prefix, "2.0.30", &corrupted, &body);

    let temp = pdfboxlab_testkit::temp_dir_in_workspace();
    let config = resolver(prefix, temp.path());

    let result = resolve_toolkit(&config);
    assert!(matches!(result, Err(PdfboxError::ChecksumMismatch { .. })));
    assert!(list_cached(temp.path()).unwrap().is_empty());

    bad_jar.assert();
    bad_jar.remove();
    bad_sum.remove();

    let (good_jar, _good_sum) = mock_artifact(prefix, "2.0.30", &body, &body);
    let info = resolve_toolkit(&config).unwrap();

    assert_eq!(info.source, ToolkitSource::Downloaded);
    assert_eq!(std::fs::read(&info.path).unwrap(), body);
    good_jar.assert();
}

#[test]
fn test_missing_override_fails_before_network() {
    let prefix = "/override-missing";
    let index = mock_index(prefix, &["2.0.27"], 0);

    let temp = pdfboxlab_testkit::temp_dir_in_workspace();
    let mut config = resolver(prefix, temp.path());
    config.jar_override = Some(temp.path().join("does-not-exist.jar"));

    match resolve_toolkit(&config) {
        Err(PdfboxError::JarOverrideMissing { path }) => {
            assert_eq!(path, temp.path().join("does-not-exist.jar"))
        }
        other => panic!("Expected JarOverrideMissing, got {:?}", other),
    }

    index.assert();
}

#[test]
fn test_pinned_version_skips_index() {
    let prefix = "/pinned";
    let body = b"pinned archive".to_vec();
    let index = mock_index(prefix, &["2.0.27"], 0);
    let (jar, _sum) = mock_artifact(prefix, "2.0.9", &body, &body);

    let temp = pdfboxlab_testkit::temp_dir_in_workspace();
    let mut config = resolver(prefix, temp.path());
    config.pinned_version = Some(v("2.0.9"));

    let info = resolve_toolkit(&config).unwrap();
    assert_eq!(info.version, Some(v("2.0.9")));
    assert_eq!(info.path, temp.path().join("pdfbox-app-2.0.9.jar"));

    index.assert();
    jar.assert();
}

#[test]
fn test_mirror_serves_archive() {
    let index_prefix = "/mirror-index";
    let mirror_prefix = "/mirror-downloads";
    let body = b"mirrored archive".to_vec();

    let _index = mock_index(index_prefix, &["2.0.21"], 1);
    let (jar, _sum) = mock_artifact(mirror_prefix, "2.0.21", &body, &body);

    let temp = pdfboxlab_testkit::temp_dir_in_workspace();
    let mut config = resolver(index_prefix, temp.path());
    config.mirror_url = Some(format!("{}{}", get_shared_mock_server().url(), mirror_prefix));

    let info = resolve_toolkit(&config).unwrap();
    assert_eq!(info.version, Some(v("2.0.21")));
    jar.assert();
}

#[test]
fn test_only_excluded_versions_published() {
    let prefix = "/only-three";
    let _index = mock_index(prefix, &["3.0.0", "3.0.1"], 1);

    let temp = pdfboxlab_testkit::temp_dir_in_workspace();
    let result = resolve_toolkit(&resolver(prefix, temp.path()));

    assert!(matches!(result, Err(PdfboxError::NoCompatibleVersion { .. })));
}

#[test]
fn test_download_picks_numeric_newest_outside_excluded_major() {
    let prefix = "/numeric-newest";
    let body = b"one ten archive".to_vec();
    let index = mock_index(prefix, &["1.9.0", "1.10.0", "2.0.0"], 1);
    let (jar, _sum) = mock_artifact(prefix, "1.10.0", &body, &body);

    let temp = pdfboxlab_testkit::temp_dir_in_workspace();
    let mut config = resolver(prefix, temp.path());
    config.policy.excluded_majors = vec![2];

    let info = resolve_toolkit(&config).unwrap();
    assert_eq!(info.source, ToolkitSource::Downloaded);
    assert_eq!(info.version, Some(v("1.10.0")));
    assert_eq!(std::fs::read(&info.path).unwrap(), body);

    index.assert();
    jar.assert();
}

#[test]
fn test_index_unavailable() {
    let prefix = "/index-down";
    let _index = get_shared_mock_server()
        .mock("GET", prefix)
        .with_status(503)
        .create();

    let temp = pdfboxlab_testkit::temp_dir_in_workspace();
    let result = resolve_toolkit(&resolver(prefix, temp.path()));

    assert!(matches!(result, Err(PdfboxError::IndexFetchFailed { .. })));
}

#[test]
fn test_list_remote_filters_by_policy() {
    let prefix = "/list-remote";
    let _index = mock_index(prefix, &["1.8.17", "2.0.0-RC1", "2.0.9", "2.0.27", "3.0.1"], 1);

    let temp = pdfboxlab_testkit::temp_dir_in_workspace();
    let versions = list_remote(&resolver(prefix, temp.path())).unwrap();

    assert_eq!(versions, vec![v("2.0.27"), v("2.0.9"), v("1.8.17")]);
}

#[test]
fn test_cache_prefers_highest_numeric_version() {
    let prefix = "/cache-max";
    let index = mock_index(prefix, &["2.0.27"], 0);

    let temp = pdfboxlab_testkit::temp_dir_in_workspace();
    for version in ["1.9.0", "1.10.0", "3.0.0"] {
        pdfboxlab_testkit::fixtures::fake_jar(temp.path(), version);
    }

    let info = resolve_toolkit(&resolver(prefix, temp.path())).unwrap();
    assert_eq!(info.source, ToolkitSource::Cache);
    assert_eq!(info.version, Some(v("1.10.0")));

    index.assert();
}
