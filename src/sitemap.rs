//! Sitemap
//!
//! Builds a sitemaps.org `urlset` for the storefront's static routes and artwork pages.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use jiff::Timestamp;
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Namespace of the sitemap protocol.
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Where the generated sitemap is written unless told otherwise.
pub const DEFAULT_SITEMAP_PATH: &str = "public/sitemap.xml";

/// Errors related to sitemap generation.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// Writing the output failed.
    #[error("failed to write sitemap: {0}")]
    Io(#[from] std::io::Error),

    /// XML serialization failed.
    #[error("failed to encode sitemap: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The route list could not be parsed.
    #[error("failed to parse route list: {0}")]
    Routes(#[from] serde_norway::Error),

    /// The hostname is not an absolute http(s) URL.
    #[error("invalid sitemap hostname: {0}")]
    InvalidHostname(String),
}

/// How often a page is expected to change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    /// Changes on every access
    Always,

    /// Hourly
    Hourly,

    /// Daily
    Daily,

    /// Weekly
    #[default]
    Weekly,

    /// Monthly
    Monthly,

    /// Yearly
    Yearly,

    /// Archived
    Never,
}

impl ChangeFrequency {
    /// Value written to `changefreq`.
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

/// One `url` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitemapEntry {
    /// Route path, starting with `/`
    pub path: String,

    /// Last modification time
    pub last_modified: Option<Timestamp>,

    /// Expected change frequency
    pub change_frequency: ChangeFrequency,

    /// Relative priority between 0 and 1
    pub priority: Decimal,
}

impl SitemapEntry {
    /// Entry with the default weekly frequency and 0.8 priority.
    pub fn new(path: &str) -> Self {
        Self {
            path: normalize_path(path),
            last_modified: None,
            change_frequency: ChangeFrequency::default(),
            priority: Decimal::new(8, 1),
        }
    }

    /// Set the last modification time.
    #[must_use]
    pub fn with_last_modified(mut self, at: Timestamp) -> Self {
        self.last_modified = Some(at);
        self
    }
}

/// Sitemap for a single host.
#[derive(Debug, Clone)]
pub struct Sitemap {
    hostname: String,
    entries: Vec<SitemapEntry>,
    seen: FxHashSet<String>,
}

impl Sitemap {
    /// Create an empty sitemap for a host such as `https://example.com`.
    ///
    /// # Errors
    ///
    /// Returns [`SitemapError::InvalidHostname`] unless the hostname is an http(s) URL.
    pub fn new(hostname: &str) -> Result<Self, SitemapError> {
        let hostname = hostname.trim().trim_end_matches('/');

        let host = hostname
            .strip_prefix("https://")
            .or_else(|| hostname.strip_prefix("http://"));

        if host.is_none_or(str::is_empty) {
            return Err(SitemapError::InvalidHostname(hostname.to_string()));
        }

        Ok(Self {
            hostname: hostname.to_string(),
            entries: Vec::new(),
            seen: FxHashSet::default(),
        })
    }

    /// Add an entry. Paths already present are skipped.
    pub fn push(&mut self, entry: SitemapEntry) -> &mut Self {
        if self.seen.insert(entry.path.clone()) {
            self.entries.push(entry);
        } else {
            debug!(path = %entry.path, "skipping duplicate sitemap route");
        }

        self
    }

    /// Add static routes with default settings.
    pub fn add_routes<I, S>(&mut self, routes: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for route in routes {
            self.push(SitemapEntry::new(route.as_ref()));
        }

        self
    }

    /// Add the detail page of an artwork.
    pub fn add_artwork(&mut self, id: &str, last_modified: Option<Timestamp>) -> &mut Self {
        let mut entry = SitemapEntry::new(&format!("/artwork/{id}"));
        entry.last_modified = last_modified;

        self.push(entry)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[SitemapEntry] {
        &self.entries
    }

    /// Absolute URL of an entry.
    pub fn location(&self, entry: &SitemapEntry) -> String {
        format!("{}{}", self.hostname, entry.path)
    }

    /// Serialize as XML.
    ///
    /// # Errors
    ///
    /// Returns a [`SitemapError`] if the writer fails.
    pub fn write_xml<W: Write>(&self, writer: W) -> Result<(), SitemapError> {
        let mut xml = Writer::new_with_indent(writer, b' ', 2);

        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        xml.write_event(Event::Start(
            BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NAMESPACE)]),
        ))?;

        for entry in &self.entries {
            xml.write_event(Event::Start(BytesStart::new("url")))?;

            write_element(&mut xml, "loc", &self.location(entry))?;

            if let Some(at) = entry.last_modified {
                write_element(&mut xml, "lastmod", &at.strftime("%Y-%m-%d").to_string())?;
            }

            write_element(&mut xml, "changefreq", entry.change_frequency.as_str())?;
            write_element(&mut xml, "priority", &entry.priority.to_string())?;

            xml.write_event(Event::End(BytesEnd::new("url")))?;
        }

        xml.write_event(Event::End(BytesEnd::new("urlset")))?;
        xml.into_inner().flush()?;

        Ok(())
    }

    /// Serialize as an XML string.
    ///
    /// # Errors
    ///
    /// Returns a [`SitemapError`] if serialization fails.
    pub fn to_xml_string(&self) -> Result<String, SitemapError> {
        let mut buffer = Vec::new();

        self.write_xml(&mut buffer)?;

        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Write the sitemap to a file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns a [`SitemapError`] if the file cannot be written.
    pub fn write_to_path(&self, path: &Path) -> Result<(), SitemapError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        self.write_xml(BufWriter::new(File::create(path)?))
    }
}

fn write_element<W: Write>(
    xml: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), SitemapError> {
    xml.write_event(Event::Start(BytesStart::new(name)))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new(name)))?;

    Ok(())
}

fn normalize_path(path: &str) -> String {
    let path = path.trim();

    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Parse a route list: either a YAML sequence of strings or one route per line.
///
/// Blank lines and lines starting with `#` are ignored in the line form.
///
/// # Errors
///
/// Returns [`SitemapError::Routes`] if the content looks like a YAML list but does not parse.
pub fn parse_routes(contents: &str) -> Result<Vec<String>, SitemapError> {
    let is_yaml_list = contents
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .is_some_and(|line| line.starts_with('-') || line.starts_with('['));

    if is_yaml_list {
        let routes: Vec<String> = serde_norway::from_str(contents)?;

        return Ok(routes
            .into_iter()
            .map(|route| route.trim().to_string())
            .filter(|route| !route.is_empty())
            .collect());
    }

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToString::to_string)
        .collect())
}
