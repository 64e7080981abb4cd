#![doc = r#"
A Cypher write-statement compiler for graph OGMs.

`gramr` takes the unit-of-work of an object-graph mapper — nodes and
relationships that were created, updated, or deleted since the last flush —
and compiles it into a minimal, ordered list of parameterized, batched
Cypher statements, including optimistic-locking version checks. Statement
parameters are [`neo4rs`] Bolt values, ready to bind by a Bolt-speaking
executor; the compiler itself never talks to a database.

# Quick start

## Declare mappings

Entity and relationship mappings are registered explicitly at startup — no
runtime reflection:

```rust
use gramr::prelude::*;

# fn main() -> Result<(), GramrError> {
let mut registry = SchemaRegistry::new();
registry.register_entity(
    EntityMapping::new("Person")
        .label("Person")
        .field(FieldMapping::new("name"))
        .field(FieldMapping::new("born").prop("born_at").converter("date_long"))
        .version(FieldMapping::new("version")),
)?;
registry.register_relationship(
    RelationshipMapping::new("Knows")
        .rel_type("KNOWS")
        .from("Person")
        .to("Person")
        .field(FieldMapping::new("since")),
)?;
# Ok(())
# }
```

## Accumulate changes and compile

```rust
use gramr::prelude::*;

# fn main() -> Result<(), GramrError> {
# let mut registry = SchemaRegistry::new();
# registry.register_entity(
#     EntityMapping::new("Person").label("Person").field(FieldMapping::new("name")),
# )?;
let person = registry.entity("Person").unwrap();

let mut changes = ChangeSet::new();
changes.create_node(
    NodeChange::created(-1, person.labels().to_vec())
        .with_property(person.property("name", DomainValue::Text("Alice".into()))?),
);
changes.create_node(
    NodeChange::created(-2, person.labels().to_vec())
        .with_property(person.property("name", DomainValue::Text("Bob".into()))?),
);
changes.create_relationship(EdgeChange::created(-3, "KNOWS", -1, -2));

let statements = StatementCompiler::new().compile(&changes)?;
assert_eq!(statements.len(), 2);
assert!(statements[0].query().starts_with("UNWIND $rows AS row CREATE"));
# Ok(())
# }
```

Node-creation statements always precede relationship-creation statements,
and relationship deletions always precede node deletions. Each statement
batches every affected entity of its category as one row of the `$rows`
parameter.

## Optimistic locking

Update and delete batches whose descriptors carry a version property get a
version predicate in the query and an [`OptimisticLockingConfig`] on the
statement. The executor checks the config against the actual affected-row
count after execution:

```rust
use gramr::prelude::*;

# fn main() -> Result<(), GramrError> {
let mut changes = ChangeSet::new();
changes.delete_relationship(
    EdgeChange::existing(10, "KNOWS", 1, 2).with_version(Property::new("version", 3)?),
);
changes.delete_relationship(
    EdgeChange::existing(11, "KNOWS", 2, 3).with_version(Property::new("version", 1)?),
);

let statements = StatementCompiler::new().compile(&changes)?;
let locking = statements[0].optimistic_locking().unwrap();
assert_eq!(locking.expected(), 2);
assert_eq!(locking.types(), ["KNOWS"].as_slice());

// After execution, with the affected-row count reported by the database:
assert!(matches!(locking.check(1), Err(GramrError::StaleWrite { .. })));
# Ok(())
# }
```

Mixing versioned and unversioned descriptors (or differing version keys)
within one update/delete batch fails compilation with
[`GramrError::InconsistentVersioning`] — a batch-wide predicate cannot
honestly cover a disagreeing batch.

# Result rows

Every produced statement projects `ref` (a caller-correlatable id), `id`
(the database id), and the literal discriminator `type` (`"node"` or
`"rel"`), so the executor can demultiplex a heterogeneous result stream and,
for create statements, map newly assigned database ids back to the temporary
references the caller supplied.

# Error handling

All operations return [`GramrError`]. Conversion errors are wrapped with the
entity, field, and property key:

```text
Person::born (prop 'born_at'): conversion failed: expected a temporal value, got Text
```

[`neo4rs`]: https://docs.rs/neo4rs
"#]

pub mod builders;
pub mod changeset;
pub mod compiler;
pub mod prelude;
pub mod schema;

pub use gramr_core as core;

pub use gramr_core::{
    DomainValue, EdgeChange, GramrError, NodeChange, OptimisticLockingConfig, Property, RowKind,
    RowStatementFactory, Statement, StatementFactory, Value,
};

pub use changeset::ChangeSet;
pub use compiler::StatementCompiler;
pub use schema::{EntityMapping, FieldMapping, RelationshipMapping, SchemaRegistry};
