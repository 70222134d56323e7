use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use super::frontmatter;

const POST_EXTENSION: &str = "mdx";

/// Listing entry for a post; `source` is left out so lists stay small.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub date: String,
    pub tag: String,
    pub modified: DateTime<Utc>,
}

/// A single post with its uncompiled MDX body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    #[serde(flatten)]
    pub summary: PostSummary,
    pub source: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid content in {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

impl ContentError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Directory of `.mdx` posts, read fresh on every call so edits from the CMS show up
/// without a restart.
#[derive(Debug, Clone)]
pub struct PostLibrary {
    dir: PathBuf,
}

impl PostLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Slugs ordered newest-modified first; ties fall back to slug order.
    pub fn slugs(&self) -> Result<Vec<String>, ContentError> {
        Ok(self
            .entries()?
            .into_iter()
            .map(|(slug, _)| slug)
            .collect())
    }

    /// Summaries in slug order. Unreadable files are logged and left out of the listing.
    pub fn summaries(&self) -> Result<Vec<PostSummary>, ContentError> {
        Ok(self
            .entries()?
            .into_iter()
            .filter_map(|(slug, modified)| {
                let path = self.path_for(&slug);
                match fs::read_to_string(&path) {
                    Ok(raw) => Some(parse_post(slug, modified, &raw).summary),
                    Err(err) => {
                        warn!(path = %path.display(), error = %err, "skipping unreadable post");
                        None
                    }
                }
            })
            .collect())
    }

    pub fn by_slug(&self, slug: &str) -> Result<Option<Post>, ContentError> {
        if !is_safe_slug(slug) {
            debug!(slug, "rejected post slug");
            return Ok(None);
        }

        let path = self.path_for(slug);
        let metadata = match fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => metadata,
            Ok(_) => return Ok(None),
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(ContentError::io(&path, err)),
        };
        let modified = modified_at(&metadata);
        let raw = fs::read_to_string(&path).map_err(|err| ContentError::io(&path, err))?;

        Ok(Some(parse_post(slug.to_string(), modified, &raw)))
    }

    fn path_for(&self, slug: &str) -> PathBuf {
        self.dir.join(format!("{slug}.{POST_EXTENSION}"))
    }

    fn entries(&self) -> Result<Vec<(String, DateTime<Utc>)>, ContentError> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(ContentError::io(&self.dir, err)),
        };

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|err| ContentError::io(&self.dir, err))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(POST_EXTENSION) {
                continue;
            }
            let Some(slug) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let metadata = entry
                .metadata()
                .map_err(|err| ContentError::io(&path, err))?;
            if !metadata.is_file() {
                continue;
            }
            entries.push((slug.to_string(), modified_at(&metadata)));
        }

        entries.sort_by(|(a_slug, a_time), (b_slug, b_time)| {
            b_time.cmp(a_time).then_with(|| a_slug.cmp(b_slug))
        });
        Ok(entries)
    }
}

fn modified_at(metadata: &fs::Metadata) -> DateTime<Utc> {
    metadata
        .modified()
        .unwrap_or(SystemTime::UNIX_EPOCH)
        .into()
}

fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.contains("..")
        && !slug.contains(['/', '\\', '\0'])
        && !slug.starts_with('.')
}

fn parse_post(slug: String, modified: DateTime<Utc>, raw: &str) -> Post {
    let (mut fields, body) = frontmatter::split(raw);
    let mut take = |key: &str| fields.remove(key).unwrap_or_default();

    let title = take("title");
    let excerpt = take("excerpt");
    let date = take("date");
    let tag = take("tag");
    let title = if title.is_empty() { slug.clone() } else { title };

    Post {
        summary: PostSummary {
            slug,
            title,
            excerpt,
            date,
            tag,
            modified,
        },
        source: body.to_string(),
    }
}
