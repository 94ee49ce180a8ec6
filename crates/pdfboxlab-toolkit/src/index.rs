//! Remote version discovery
//!
//! The Apache distribution index is a plain directory listing whose links
//! name released versions (`2.0.27/`, `3.0.0/`, ...). Every `<a href>` whose
//! last path segment starts with `digits.digits.digits` is a candidate; the
//! [`VersionPolicy`] filters candidates and the newest survivor wins.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use semver::Version;

/// Which versions the resolver may select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPolicy {
    /// Major lines never selected (e.g. `3`, whose tools use another CLI grammar)
    pub excluded_majors: Vec<u64>,
    /// Whether `-RC`/`-beta` style versions qualify
    pub allow_prerelease: bool,
}

impl Default for VersionPolicy {
    fn default() -> Self {
        Self {
            excluded_majors: pdfboxlab_core::config::consts::remote::DEFAULT_EXCLUDED_MAJORS
                .to_vec(),
            allow_prerelease: false,
        }
    }
}

impl VersionPolicy {
    pub fn accepts(&self, version: &Version) -> bool {
        if self.excluded_majors.contains(&version.major) {
            return false;
        }
        self.allow_prerelease || version.pre.is_empty()
    }
}

/// Collects every `href` attribute of every `<a>` element
pub fn extract_links(html: &str) -> Vec<String> {
    let dom = match parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
    {
        Ok(dom) => dom,
        Err(e) => {
            tracing::warn!("failed to parse version index: {}", e);
            return Vec::new();
        }
    };

    let mut links = Vec::new();
    collect_links(&dom.document, &mut links);
    links
}

fn collect_links(handle: &Handle, links: &mut Vec<String>) {
    if let NodeData::Element { name, attrs, .. } = &handle.data
        && name.local.as_ref() == "a"
    {
        for attr in attrs.borrow().iter() {
            if attr.name.local.as_ref() == "href" {
                links.push(attr.value.to_string());
            }
        }
    }

    for child in handle.children.borrow().iter() {
        collect_links(child, links);
    }
}

/// Returns the version named by a link, if it looks like one
///
/// `"2.0.27/"`, `"/dist/pdfbox/2.0.27/"` and `"2.0.0-RC1/"` qualify;
/// `"../"`, `"KEYS"` and `"?C=N;O=D"` do not.
pub fn version_from_link(href: &str) -> Option<Version> {
    let segment = href
        .trim()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();

    if !has_version_shape(segment) {
        return None;
    }

    match Version::parse(segment) {
        Ok(version) => Some(version),
        Err(e) => {
            tracing::debug!("skipping link '{}': {}", href, e);
            None
        }
    }
}

/// `digits.digits.digits...`
fn has_version_shape(s: &str) -> bool {
    let mut parts = s.splitn(3, '.');
    let all_digits = |p: &str| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit());

    match (parts.next(), parts.next(), parts.next()) {
        (Some(major), Some(minor), Some(rest)) => {
            all_digits(major)
                && all_digits(minor)
                && rest.chars().next().is_some_and(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}

/// All distinct versions linked from an index page, newest first
pub fn parse_index(html: &str) -> Vec<Version> {
    let mut versions: Vec<Version> = extract_links(html)
        .iter()
        .filter_map(|href| version_from_link(href))
        .collect();

    versions.sort_by(|a, b| b.cmp(a));
    versions.dedup();
    versions
}

/// Newest version accepted by the policy (semantic, not lexicographic, ordering)
pub fn select_newest<'a, I>(versions: I, policy: &VersionPolicy) -> Option<Version>
where
    I: IntoIterator<Item = &'a Version>,
{
    versions
        .into_iter()
        .filter(|v| policy.accepts(v))
        .max()
        .cloned()
}
