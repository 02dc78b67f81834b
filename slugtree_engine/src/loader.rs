//! Loader for the demo site tree backing the in-memory store.
//!
//! Real deployments implement [`crate::store::PageStore`] over their own
//! record store; this loader only exists so the binary and integration
//! tests can run against a TOML fixture.

use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;
use std::path::Path;

use crate::candidate::SlugCandidate;
use crate::record::{LanguageId, PageId};
use crate::store::{MemoryStore, PageRow};

#[derive(Debug, Deserialize)]
struct SiteDef {
    #[serde(default)]
    pages: Vec<PageDef>,
}

#[derive(Debug, Deserialize)]
struct PageDef {
    id: PageId,
    #[serde(default)]
    parent: PageId,
    slug: String,
    #[serde(default)]
    language: LanguageId,
}

/// Load a site tree from a TOML file into a [`MemoryStore`].
///
/// Stored slugs are normalized on the way in so the store never holds a
/// malformed path.
///
/// # Errors
/// Errors bubble up from file IO or deserialization.
pub fn load_site(path: &Path) -> Result<MemoryStore> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("while reading site file {}", path.display()))?;
    let def: SiteDef = toml::from_str(&text).context("while parsing site TOML")?;
    let store = MemoryStore::from_rows(
        def.pages
            .into_iter()
            .map(|page| PageRow {
                id: page.id,
                parent: page.parent,
                slug: SlugCandidate::normalize(&page.slug),
                language: page.language,
            })
            .collect(),
    );
    info!("{} pages added to the store", store.len());
    Ok(store)
}
