use gramr::builders::{
    CreatedNodeBuilder, CreatedRelationshipBuilder, DeletedNodeBuilder,
    DeletedRelationshipBuilder, StatementBuilder, UpdatedNodeBuilder, UpdatedRelationshipBuilder,
};
use gramr::prelude::*;
use neo4rs::{BoltString, BoltType};

fn rows(stmt: &Statement) -> &[BoltType] {
    match stmt.parameters().get("rows") {
        Some(BoltType::List(l)) => &l.value,
        other => panic!("expected a rows list, got: {other:?}"),
    }
}

fn entry<'a>(row: &'a BoltType, key: &str) -> &'a BoltType {
    match row {
        BoltType::Map(m) => m
            .value
            .get(&BoltString::from(key))
            .unwrap_or_else(|| panic!("missing '{key}' in row")),
        other => panic!("expected a map row, got: {other:?}"),
    }
}

fn has_entry(row: &BoltType, key: &str) -> bool {
    match row {
        BoltType::Map(m) => m.value.contains_key(&BoltString::from(key)),
        other => panic!("expected a map row, got: {other:?}"),
    }
}

fn int(value: &BoltType) -> i64 {
    match value {
        BoltType::Integer(i) => i.value,
        other => panic!("expected Integer, got: {other:?}"),
    }
}

fn text(value: &BoltType) -> &str {
    match value {
        BoltType::String(s) => &s.value,
        other => panic!("expected String, got: {other:?}"),
    }
}

fn row_kind(stmt: &Statement) -> &str {
    text(stmt.parameters().get("type").expect("missing type parameter"))
}

// --- Deleted relationships ---

#[test]
fn test_deleted_rels_without_version() {
    let factory = RowStatementFactory;
    let a = EdgeChange::existing(10, "KNOWS", 1, 2);
    let b = EdgeChange::existing(11, "KNOWS", 2, 3);
    let edges = [&a, &b];

    let stmt = DeletedRelationshipBuilder::new(&edges, &factory).build().unwrap();
    assert_eq!(
        stmt.query(),
        "UNWIND $rows AS row MATCH ()-[r]-() WHERE ID(r) = row.relId \
         DELETE r RETURN ID(r) AS ref, ID(r) AS id, $type AS type"
    );
    assert_eq!(rows(&stmt).len(), 2);
    assert_eq!(int(entry(&rows(&stmt)[0], "relId")), 10);
    assert_eq!(row_kind(&stmt), "rel");
    assert!(stmt.optimistic_locking().is_none());
}

#[test]
fn test_deleted_rels_with_version() {
    let factory = RowStatementFactory;
    let a = EdgeChange::existing(10, "KNOWS", 1, 2)
        .with_version(Property::new("v", 3).unwrap());
    let b = EdgeChange::existing(11, "KNOWS", 2, 3)
        .with_version(Property::new("v", 1).unwrap());
    let edges = [&a, &b];

    let stmt = DeletedRelationshipBuilder::new(&edges, &factory).build().unwrap();
    assert!(stmt.query().contains("AND r.`v` = row.`v` "));

    let rows = rows(&stmt);
    assert_eq!(int(entry(&rows[0], "relId")), 10);
    assert_eq!(int(entry(&rows[0], "v")), 3);
    assert_eq!(int(entry(&rows[1], "relId")), 11);
    assert_eq!(int(entry(&rows[1], "v")), 1);

    let locking = stmt.optimistic_locking().expect("versioned batch needs a locking config");
    assert_eq!(locking.expected(), 2);
    assert_eq!(locking.types(), ["KNOWS"].as_slice());
    assert_eq!(locking.version_key(), "v");
}

#[test]
fn test_deleted_rels_empty_is_noop() {
    let factory = RowStatementFactory;
    let edges: [&EdgeChange; 0] = [];
    let stmt = DeletedRelationshipBuilder::new(&edges, &factory).build().unwrap();
    assert!(stmt.is_noop());
    assert!(stmt.parameters().is_empty());
    assert!(stmt.optimistic_locking().is_none());
}

#[test]
fn test_deleted_rels_mixed_versioning_is_rejected() {
    let factory = RowStatementFactory;
    let a = EdgeChange::existing(10, "KNOWS", 1, 2)
        .with_version(Property::new("v", 3).unwrap());
    let b = EdgeChange::existing(11, "KNOWS", 2, 3);
    let edges = [&a, &b];

    let err = DeletedRelationshipBuilder::new(&edges, &factory).build().unwrap_err();
    match &err {
        GramrError::InconsistentVersioning { kind, .. } => assert_eq!(kind, "relationship"),
        other => panic!("expected InconsistentVersioning, got: {other}"),
    }
}

#[test]
fn test_deleted_rels_differing_version_keys_are_rejected() {
    let factory = RowStatementFactory;
    let a = EdgeChange::existing(10, "KNOWS", 1, 2)
        .with_version(Property::new("v", 3).unwrap());
    let b = EdgeChange::existing(11, "KNOWS", 2, 3)
        .with_version(Property::new("rev", 1).unwrap());
    let edges = [&a, &b];

    let err = DeletedRelationshipBuilder::new(&edges, &factory).build().unwrap_err();
    assert!(matches!(err, GramrError::InconsistentVersioning { .. }));
}

#[test]
fn test_deleted_rel_without_id_is_rejected() {
    let factory = RowStatementFactory;
    let a = EdgeChange::created(-1, "KNOWS", 1, 2);
    let edges = [&a];

    let err = DeletedRelationshipBuilder::new(&edges, &factory).build().unwrap_err();
    match &err {
        GramrError::MissingIdentity { kind } => assert_eq!(kind, "deleted relationship"),
        other => panic!("expected MissingIdentity, got: {other}"),
    }
}

// --- Created nodes ---

#[test]
fn test_created_nodes() {
    let factory = RowStatementFactory;
    let a = NodeChange::created(-1, vec!["Person".into()])
        .with_property(Property::new("name", "Alice").unwrap());
    let b = NodeChange::created(-2, vec!["Person".into()])
        .with_property(Property::new("name", "Bob").unwrap());
    let nodes = [&a, &b];

    let stmt = CreatedNodeBuilder::new(&nodes, &factory).build().unwrap();
    assert_eq!(
        stmt.query(),
        "UNWIND $rows AS row CREATE (n:`Person`) SET n = row.props \
         RETURN row.nodeRef AS ref, ID(n) AS id, $type AS type"
    );

    let rows = rows(&stmt);
    assert_eq!(rows.len(), 2);
    assert_eq!(int(entry(&rows[0], "nodeRef")), -1);
    assert_eq!(text(entry(entry(&rows[0], "props"), "name")), "Alice");
    assert_eq!(int(entry(&rows[1], "nodeRef")), -2);
    assert_eq!(row_kind(&stmt), "node");
    assert!(stmt.optimistic_locking().is_none());
}

#[test]
fn test_created_node_version_rides_in_props() {
    let factory = RowStatementFactory;
    let a = NodeChange::created(-1, vec!["Person".into()])
        .with_property(Property::new("name", "Alice").unwrap())
        .with_version(Property::new("version", 0).unwrap());
    let nodes = [&a];

    let stmt = CreatedNodeBuilder::new(&nodes, &factory).build().unwrap();
    let rows = rows(&stmt);
    assert_eq!(int(entry(entry(&rows[0], "props"), "version")), 0);
    assert!(stmt.optimistic_locking().is_none());
}

#[test]
fn test_created_node_label_escaping() {
    let factory = RowStatementFactory;
    let a = NodeChange::created(-1, vec!["User`X".into()]);
    let nodes = [&a];

    let stmt = CreatedNodeBuilder::new(&nodes, &factory).build().unwrap();
    assert!(stmt.query().contains("CREATE (n:`User``X`)"));
}

// --- Updated nodes ---

#[test]
fn test_updated_nodes_with_version() {
    let factory = RowStatementFactory;
    let a = NodeChange::existing(5, vec!["Person".into()])
        .with_property(Property::new("name", "Alice").unwrap())
        .with_version(Property::new("version", 7).unwrap());
    let nodes = [&a];

    let stmt = UpdatedNodeBuilder::new(&nodes, &factory).build().unwrap();
    assert_eq!(
        stmt.query(),
        "UNWIND $rows AS row MATCH (n) WHERE ID(n) = row.nodeId \
         AND n.`version` = row.`version` SET n.`version` = row.`version` + 1 \
         SET n:`Person` SET n += row.props \
         RETURN row.nodeId AS ref, ID(n) AS id, $type AS type"
    );

    let rows = rows(&stmt);
    assert_eq!(int(entry(&rows[0], "nodeId")), 5);
    assert_eq!(int(entry(&rows[0], "version")), 7);
    assert_eq!(text(entry(entry(&rows[0], "props"), "name")), "Alice");

    let locking = stmt.optimistic_locking().unwrap();
    assert_eq!(locking.expected(), 1);
    assert_eq!(locking.types(), ["Person"].as_slice());
    assert_eq!(locking.version_key(), "version");
}

#[test]
fn test_updated_nodes_without_labels_skip_label_assertion() {
    let factory = RowStatementFactory;
    let a = NodeChange::existing(5, vec![]).with_property(Property::new("name", "Alice").unwrap());
    let nodes = [&a];

    let stmt = UpdatedNodeBuilder::new(&nodes, &factory).build().unwrap();
    assert!(!stmt.query().contains("SET n:"));
    assert!(stmt.query().contains("SET n += row.props"));
}

// --- Deleted nodes ---

#[test]
fn test_deleted_nodes_sweep_remaining_relationships() {
    let factory = RowStatementFactory;
    let a = NodeChange::existing(8, vec!["Person".into()]);
    let nodes = [&a];

    let stmt = DeletedNodeBuilder::new(&nodes, &factory).build().unwrap();
    assert_eq!(
        stmt.query(),
        "UNWIND $rows AS row MATCH (n) WHERE ID(n) = row.nodeId \
         OPTIONAL MATCH (n)-[r0]-() DELETE r0, n \
         RETURN ID(n) AS ref, ID(n) AS id, $type AS type"
    );
    assert_eq!(int(entry(&rows(&stmt)[0], "nodeId")), 8);
    assert_eq!(row_kind(&stmt), "node");
}

#[test]
fn test_deleted_nodes_locking_collects_distinct_labels() {
    let factory = RowStatementFactory;
    let a = NodeChange::existing(8, vec!["Person".into()])
        .with_version(Property::new("version", 1).unwrap());
    let b = NodeChange::existing(9, vec!["Company".into()])
        .with_version(Property::new("version", 4).unwrap());
    let nodes = [&a, &b];

    let stmt = DeletedNodeBuilder::new(&nodes, &factory).build().unwrap();
    assert!(stmt.query().contains("AND n.`version` = row.`version` "));

    let locking = stmt.optimistic_locking().unwrap();
    assert_eq!(locking.expected(), 2);
    assert_eq!(locking.types(), ["Company", "Person"].as_slice());
}

// --- Created relationships ---

#[test]
fn test_created_rels() {
    let factory = RowStatementFactory;
    let a = EdgeChange::created(-3, "KNOWS", -1, 2)
        .with_property(Property::new("since", 2020).unwrap());
    let edges = [&a];

    let stmt = CreatedRelationshipBuilder::new(&edges, &factory).build().unwrap();
    assert_eq!(
        stmt.query(),
        "UNWIND $rows AS row \
         MATCH (startNode) WHERE ID(startNode) = row.startNodeId \
         MATCH (endNode) WHERE ID(endNode) = row.endNodeId \
         MERGE (startNode)-[rel:`KNOWS`]->(endNode) SET rel += row.props \
         RETURN row.relRef AS ref, ID(rel) AS id, $type AS type"
    );

    let rows = rows(&stmt);
    assert_eq!(int(entry(&rows[0], "startNodeId")), -1);
    assert_eq!(int(entry(&rows[0], "endNodeId")), 2);
    assert_eq!(int(entry(&rows[0], "relRef")), -3);
    assert_eq!(int(entry(entry(&rows[0], "props"), "since")), 2020);
    assert_eq!(row_kind(&stmt), "rel");
    assert!(stmt.optimistic_locking().is_none());
}

// --- Updated relationships ---

#[test]
fn test_updated_rels_with_version() {
    let factory = RowStatementFactory;
    let a = EdgeChange::existing(6, "KNOWS", 1, 2)
        .with_property(Property::new("since", 2021).unwrap())
        .with_version(Property::new("v", 2).unwrap());
    let edges = [&a];

    let stmt = UpdatedRelationshipBuilder::new(&edges, &factory).build().unwrap();
    assert_eq!(
        stmt.query(),
        "UNWIND $rows AS row MATCH ()-[r]-() WHERE ID(r) = row.relId \
         AND r.`v` = row.`v` SET r.`v` = row.`v` + 1 \
         SET r += row.props RETURN row.relId AS ref, ID(r) AS id, $type AS type"
    );

    let rows = rows(&stmt);
    assert_eq!(int(entry(&rows[0], "relId")), 6);
    assert_eq!(int(entry(&rows[0], "v")), 2);
    assert!(!has_entry(entry(&rows[0], "props"), "v"));

    let locking = stmt.optimistic_locking().unwrap();
    assert_eq!(locking.expected(), 1);
    assert_eq!(locking.types(), ["KNOWS"].as_slice());
    assert_eq!(locking.version_key(), "v");
}

#[test]
fn test_updated_rels_mixed_types_share_one_statement() {
    let factory = RowStatementFactory;
    let a = EdgeChange::existing(6, "KNOWS", 1, 2)
        .with_version(Property::new("v", 2).unwrap());
    let b = EdgeChange::existing(7, "WORKS_AT", 1, 3)
        .with_version(Property::new("v", 5).unwrap());
    let edges = [&a, &b];

    let stmt = UpdatedRelationshipBuilder::new(&edges, &factory).build().unwrap();
    assert_eq!(rows(&stmt).len(), 2);
    let locking = stmt.optimistic_locking().unwrap();
    assert_eq!(locking.types(), ["KNOWS", "WORKS_AT"].as_slice());
}
