use se::*;
use slugtree_engine as se;

use slugtree_data::{FieldConfiguration, FieldSource, RegistryDef, SlugConstraint, TableDef};
use std::cell::RefCell;
use std::collections::BTreeSet;

fn registry(constraints: &[SlugConstraint]) -> FieldConfigRegistry {
    let config = FieldConfiguration {
        generator_fields: vec![FieldSource(vec!["nav_title".to_string(), "title".to_string()])],
        constraints: constraints.iter().copied().collect::<BTreeSet<_>>(),
        ..FieldConfiguration::default()
    };
    let mut table = TableDef::default();
    table.fields.insert("slug".to_string(), config);
    let mut def = RegistryDef::default();
    def.tables.insert("pages".to_string(), table);
    FieldConfigRegistry::new(def)
}

fn store(rows: &[(u64, u64, &str)]) -> MemoryStore {
    MemoryStore::from_rows(
        rows.iter()
            .map(|(id, parent, slug)| PageRow {
                id: *id,
                parent: *parent,
                slug: SlugCandidate::normalize(slug),
                language: 0,
            })
            .collect(),
    )
}

fn request(mode: &str, values: &[(&str, &str)]) -> ProposalRequest {
    ProposalRequest {
        table_name: "pages".to_string(),
        field_name: "slug".to_string(),
        mode: mode.to_string(),
        values: values
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect(),
        page_id: 0,
        parent_page_id: 0,
        record_id: 0,
        language: 0,
    }
}

fn editor_access() -> CallerAccess {
    CallerAccess {
        full_permission: false,
        boundary: PermissionBoundary::Unrestricted,
    }
}

fn proposal_of(suggestion: Suggestion) -> ProposalResult {
    match suggestion {
        Suggestion::Proposal(result) => result,
        Suggestion::Legacy => panic!("expected a proposal, got the legacy bypass"),
    }
}

#[test]
fn test_auto_mode_without_constraints() {
    let store = store(&[]);
    let registry = registry(&[]);
    let dispatcher = ProposalDispatcher::new(&store, &registry, EngineConfig::default());
    let result = proposal_of(
        dispatcher
            .suggest(&request("auto", &[("title", "About")]), editor_access())
            .unwrap(),
    );
    assert!(!result.has_conflicts);
    assert_eq!(result.manual, "");
    assert_eq!(result.proposal.as_str(), "/about");
    assert_eq!(result.inaccessible_segments, None);
    assert!(!result.last_segment_only);
}

#[test]
fn test_recreate_mode_uses_parent_scope() {
    let store = store(&[(3, 0, "/archive")]);
    let registry = registry(&[]);
    let dispatcher = ProposalDispatcher::new(&store, &registry, EngineConfig::default());
    let mut req = request("recreate", &[("title", "Old News")]);
    req.page_id = 9;
    req.parent_page_id = 3;
    let result = proposal_of(dispatcher.suggest(&req, editor_access()).unwrap());
    assert_eq!(result.proposal.as_str(), "/archive/old-news");
}

#[test]
fn test_manual_mode_last_segment_only() {
    let store = store(&[(4, 0, "/parent")]);
    let registry = registry(&[]);
    let config = EngineConfig {
        last_segment_only: true,
        ..EngineConfig::default()
    };
    let dispatcher = ProposalDispatcher::new(&store, &registry, config);
    let mut req = request("manual", &[("title", "Auto Slug"), ("manual", "My Page/Sub")]);
    req.page_id = 7;
    req.parent_page_id = 4;
    let result = proposal_of(dispatcher.suggest(&req, editor_access()).unwrap());
    assert_eq!(result.proposal.as_str(), "/parent/my-page-sub");
    assert_eq!(result.manual, "My Page/Sub");
    assert!(result.last_segment_only);
}

#[test]
fn test_manual_mode_unrestricted_keeps_full_path() {
    let store = store(&[]);
    let registry = registry(&[]);
    let dispatcher = ProposalDispatcher::new(&store, &registry, EngineConfig::default());
    let req = request("manual", &[("manual", "My Page/Sub")]);
    let result = proposal_of(dispatcher.suggest(&req, editor_access()).unwrap());
    assert_eq!(result.proposal.as_str(), "/my-page/sub");
}

#[test]
fn test_empty_mode_reports_conflict() {
    let store = store(&[(5, 0, "/about")]);
    let registry = registry(&[SlugConstraint::UniqueInSite]);
    let dispatcher = ProposalDispatcher::new(&store, &registry, EngineConfig::default());
    let result = proposal_of(
        dispatcher
            .suggest(&request("", &[("title", "About")]), editor_access())
            .unwrap(),
    );
    assert!(result.has_conflicts);
    assert_eq!(result.proposal.as_str(), "/about-1");

    // The disambiguated slug sails through a second check.
    let result = proposal_of(
        dispatcher
            .suggest(&request("", &[("title", "About 1")]), editor_access())
            .unwrap(),
    );
    assert!(!result.has_conflicts);
    assert_eq!(result.proposal.as_str(), "/about-1");
}

#[test]
fn test_explicit_mode_suppresses_conflict_flag() {
    let store = store(&[(5, 0, "/about")]);
    let registry = registry(&[SlugConstraint::UniqueInSite]);
    let dispatcher = ProposalDispatcher::new(&store, &registry, EngineConfig::default());
    let result = proposal_of(
        dispatcher
            .suggest(&request("auto", &[("title", "About")]), editor_access())
            .unwrap(),
    );
    // Still disambiguated, but the flag stays down for explicit modes.
    assert!(!result.has_conflicts);
    assert_eq!(result.proposal.as_str(), "/about-1");
}

#[test]
fn test_existing_record_keeps_own_slug() {
    let store = store(&[(5, 0, "/about")]);
    let registry = registry(&[SlugConstraint::UniqueInSite, SlugConstraint::UniqueInParent]);
    let dispatcher = ProposalDispatcher::new(&store, &registry, EngineConfig::default());
    let mut req = request("", &[("title", "About")]);
    req.record_id = 5;
    let result = proposal_of(dispatcher.suggest(&req, editor_access()).unwrap());
    assert!(!result.has_conflicts);
    assert_eq!(result.proposal.as_str(), "/about");
}

#[test]
fn test_bogus_mode_is_fatal() {
    let store = store(&[]);
    let registry = registry(&[]);
    let dispatcher = ProposalDispatcher::new(&store, &registry, EngineConfig::default());
    let err = dispatcher
        .suggest(&request("bogus", &[]), editor_access())
        .unwrap_err();
    assert_eq!(err, ProposalError::InvalidMode("bogus".to_string()));
}

#[test]
fn test_missing_configuration_is_fatal() {
    let store = store(&[]);
    let registry = registry(&[]);
    let dispatcher = ProposalDispatcher::new(&store, &registry, EngineConfig::default());
    let mut req = request("auto", &[]);
    req.field_name = "path_segment".to_string();
    let err = dispatcher.suggest(&req, editor_access()).unwrap_err();
    assert_eq!(
        err,
        ProposalError::ConfigurationMissing {
            table: "pages".to_string(),
            field: "path_segment".to_string(),
        }
    );
}

#[test]
fn test_bypass_for_other_tables_and_full_permission() {
    let store = store(&[]);
    let registry = registry(&[]);
    let dispatcher = ProposalDispatcher::new(&store, &registry, EngineConfig::default());

    let mut req = request("auto", &[("title", "News Item")]);
    req.table_name = "news".to_string();
    assert_eq!(
        dispatcher.suggest(&req, editor_access()).unwrap(),
        Suggestion::Legacy
    );

    let req = request("auto", &[("title", "About")]);
    assert_eq!(
        dispatcher.suggest(&req, CallerAccess::full()).unwrap(),
        Suggestion::Legacy
    );
}

#[test]
fn test_restricted_caller_sees_inaccessible_segments() {
    let store = store(&[(1, 0, "/products"), (2, 1, "/products/widgets")]);
    let registry = registry(&[]);
    let dispatcher = ProposalDispatcher::new(&store, &registry, EngineConfig::default());
    let mut req = request("auto", &[("title", "Gears")]);
    req.page_id = 2;
    let result = proposal_of(
        dispatcher
            .suggest(&req, CallerAccess::restricted_to(2))
            .unwrap(),
    );
    assert_eq!(result.proposal.as_str(), "/products/widgets/gears");
    assert_eq!(result.inaccessible_segments.unwrap().as_str(), "/products");
}

/// Store wrapper recording the order of uniqueness queries.
struct SpyStore {
    inner: MemoryStore,
    calls: RefCell<Vec<&'static str>>,
}

impl PageStore for SpyStore {
    fn page_slug(&self, page: PageId, language: LanguageId) -> Option<SlugCandidate> {
        self.inner.page_slug(page, language)
    }

    fn parent_of(&self, page: PageId) -> Option<PageId> {
        self.inner.parent_of(page)
    }

    fn slug_taken_in_site(&self, candidate: &SlugCandidate, state: &RecordState<'_>) -> bool {
        self.calls.borrow_mut().push("site");
        self.inner.slug_taken_in_site(candidate, state)
    }

    fn slug_taken_in_parent(&self, candidate: &SlugCandidate, state: &RecordState<'_>) -> bool {
        self.calls.borrow_mut().push("parent");
        self.inner.slug_taken_in_parent(candidate, state)
    }
}

#[test]
fn test_site_check_runs_before_parent_check() {
    let spy = SpyStore {
        inner: store(&[(5, 0, "/team")]),
        calls: RefCell::new(Vec::new()),
    };
    let registry = registry(&[SlugConstraint::UniqueInSite, SlugConstraint::UniqueInParent]);
    let dispatcher = ProposalDispatcher::new(&spy, &registry, EngineConfig::default());
    let _ = dispatcher
        .suggest(&request("", &[("title", "Team")]), editor_access())
        .unwrap();

    let calls = spy.calls.borrow();
    let first_site = calls.iter().position(|c| *c == "site").unwrap();
    let first_parent = calls.iter().position(|c| *c == "parent").unwrap();
    assert!(first_site < first_parent, "site check must precede parent check: {calls:?}");
}

#[test]
fn test_values_map_deserializes_from_wire_json() {
    let req: ProposalRequest = serde_json::from_str(
        r#"{
            "tableName": "pages",
            "fieldName": "slug",
            "mode": "manual",
            "values": {"title": "About", "manual": "/About Us"},
            "pageId": 2,
            "parentPageId": 1,
            "recordId": 0,
            "language": 0
        }"#,
    )
    .unwrap();
    assert_eq!(req.mode, "manual");
    assert_eq!(req.values.get("manual").map(String::as_str), Some("/About Us"));
    assert_eq!(req.page_id, 2);
}
