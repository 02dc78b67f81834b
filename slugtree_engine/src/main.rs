#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** slugtree **
//! Line-oriented front end for the slug proposal engine: one JSON request
//! per stdin line, one JSON response per stdout line. Stands in for the
//! AJAX endpoint of a real backend.

use anyhow::{Context, Result, bail};
use log::info;
use serde::Deserialize;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use slugtree_engine::loader::load_site;
use slugtree_engine::{
    CallerAccess, EngineConfig, FieldConfigRegistry, PageId, PermissionBoundary,
    ProposalDispatcher, ProposalRequest, Suggestion,
};

/// Request line: the proposal request plus the collaborator-supplied
/// permission facts (`fullPermission` bypasses the engine; `mountRoot`
/// absent means no ancestor is hidden from the caller).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest {
    #[serde(flatten)]
    request: ProposalRequest,
    #[serde(default)]
    full_permission: bool,
    mount_root: Option<PageId>,
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(registry_path), Some(site_path)) = (args.next(), args.next()) else {
        bail!("usage: slugtree_engine <registry.toml> <site.toml> [--last-segment-only]");
    };
    let last_segment_only = match args.next().as_deref() {
        None => false,
        Some("--last-segment-only") => true,
        Some(other) => bail!("unknown argument '{other}'"),
    };

    let registry = FieldConfigRegistry::load(&PathBuf::from(registry_path))
        .context("while loading field configuration registry")?;
    let store = load_site(&PathBuf::from(site_path)).context("while loading site tree")?;
    info!("slug proposal engine ready (last_segment_only: {last_segment_only})");

    let config = EngineConfig {
        last_segment_only,
        ..EngineConfig::default()
    };
    let dispatcher = ProposalDispatcher::new(&store, &registry, config);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("while reading request line")?;
        if line.trim().is_empty() {
            continue;
        }
        let reply = match serde_json::from_str::<WireRequest>(&line) {
            Ok(wire) => {
                let access = CallerAccess {
                    full_permission: wire.full_permission,
                    boundary: wire.mount_root.map_or(PermissionBoundary::Unrestricted, |id| {
                        PermissionBoundary::RestrictedTo { ancestor: id }
                    }),
                };
                match dispatcher.suggest(&wire.request, access) {
                    Ok(Suggestion::Proposal(result)) => serde_json::to_string(&result)?,
                    Ok(Suggestion::Legacy) => r#"{"legacy":true}"#.to_string(),
                    Err(err) => serde_json::to_string(&serde_json::json!({
                        "error": err.to_string(),
                    }))?,
                }
            },
            Err(err) => serde_json::to_string(&serde_json::json!({
                "error": format!("malformed request: {err}"),
            }))?,
        };
        writeln!(stdout, "{reply}")?;
    }

    Ok(())
}
