//! Language handling for the bilingual (Chinese/English) surface.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Zh,
    En,
}

pub const SUPPORTED_LANGS: [Lang; 2] = [Lang::Zh, Lang::En];

impl Lang {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "zh" => Some(Self::Zh),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::En => "en",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::Zh => Self::En,
            Self::En => Self::Zh,
        }
    }

    /// Request bodies only opt into English explicitly; everything else is Chinese.
    pub fn from_body_hint(value: Option<&str>) -> Self {
        match value {
            Some("en") => Self::En,
            _ => Self::Zh,
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

pub fn resolve_lang_param(value: Option<&str>) -> Option<Lang> {
    value.filter(|raw| !raw.is_empty()).and_then(Lang::parse)
}

pub fn with_lang(path: &str, lang: Lang) -> String {
    let normalized = if path == "/" { "" } else { path };
    format!("/{}{}", lang.code(), normalized)
}

pub fn without_lang_prefix(pathname: &str) -> String {
    let segments: Vec<&str> = pathname.split('/').filter(|s| !s.is_empty()).collect();
    match segments.split_first() {
        None => "/".to_string(),
        Some((first, rest)) if Lang::parse(first).is_some() => {
            if rest.is_empty() {
                "/".to_string()
            } else {
                format!("/{}", rest.join("/"))
            }
        }
        Some(_) => pathname.to_string(),
    }
}
