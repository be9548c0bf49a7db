use serde::{Deserialize, Serialize};

use super::error::CatalogError;

/// A named news source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

impl FeedSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Parses a `name=url` definition.
    pub fn parse(definition: &str) -> Result<Self, CatalogError> {
        let invalid = || CatalogError::InvalidSource(definition.trim().to_string());
        let (name, url) = definition.split_once('=').ok_or_else(invalid)?;
        let (name, url) = (name.trim(), url.trim());
        if name.is_empty() || url.is_empty() {
            return Err(invalid());
        }
        Ok(Self::new(name, url))
    }
}

/// Parses `name=url` definitions separated by `;`. Blank definitions are ignored.
pub fn parse_sources(definitions: &str) -> Result<Vec<FeedSource>, CatalogError> {
    definitions
        .split(';')
        .filter(|d| !d.trim().is_empty())
        .map(FeedSource::parse)
        .collect()
}

/// The built-in news sources.
pub fn default_sources() -> Vec<FeedSource> {
    vec![
        FeedSource::new("VnExpress", "https://vnexpress.net/rss/tin-moi-nhat.rss"),
        FeedSource::new("Tuoi Tre", "https://tuoitre.vn/rss/tin-moi-nhat.rss"),
        FeedSource::new("Thanh Nien", "https://thanhnien.vn/rss/home.rss"),
    ]
}

/// Ordered news sources with exactly one active selection.
///
/// The first source is active until another one is selected. Names are
/// matched case-insensitively and must be unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedCatalog {
    sources: Vec<FeedSource>,
    active: usize,
}

impl FeedCatalog {
    pub fn new(sources: Vec<FeedSource>) -> Result<Self, CatalogError> {
        if sources.is_empty() {
            return Err(CatalogError::NoSources);
        }
        for (i, source) in sources.iter().enumerate() {
            let duplicate = sources[..i]
                .iter()
                .any(|other| other.name.eq_ignore_ascii_case(&source.name));
            if duplicate {
                return Err(CatalogError::InvalidSource(format!(
                    "duplicate name {}",
                    source.name
                )));
            }
        }
        Ok(Self { sources, active: 0 })
    }

    pub fn sources(&self) -> &[FeedSource] {
        &self.sources
    }

    pub fn active(&self) -> &FeedSource {
        &self.sources[self.active]
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active().name.eq_ignore_ascii_case(name)
    }

    pub fn find(&self, name: &str) -> Option<&FeedSource> {
        self.position(name).map(|i| &self.sources[i])
    }

    /// Makes `name` the active source and returns it.
    pub fn select(&mut self, name: &str) -> Result<&FeedSource, CatalogError> {
        let index = self
            .position(name)
            .ok_or_else(|| CatalogError::UnknownSource(name.to_string()))?;
        self.active = index;
        Ok(&self.sources[index])
    }

    /// Every source except the active one, in catalog order.
    pub fn inactive(&self) -> impl Iterator<Item = &FeedSource> {
        let active = self.active;
        self.sources
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != active)
            .map(|(_, source)| source)
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.sources
            .iter()
            .position(|source| source.name.eq_ignore_ascii_case(name))
    }
}

impl Default for FeedCatalog {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            active: 0,
        }
    }
}
