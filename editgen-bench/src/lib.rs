//! # editgen Bench
//!
//! Synthetic type graphs for benchmarking classification and planning.

use editgen_schema::{
    Constructor, Declaration, GenerationRequest, HostObject, Parameter, SubtypeDef, TypeGraph,
    TypeRef, Visibility,
};

/// Builds a chain of `depth` records, each holding a few primitives and the
/// next record, closed by a sealed type that refers back to the first one.
#[must_use]
pub fn record_chain(depth: usize) -> TypeGraph {
    let mut graph = TypeGraph::new("bench");
    for level in 0..depth {
        let mut parameters = vec![
            Parameter::new("id", TypeRef::new("u64")),
            Parameter::new("name", TypeRef::new("String")),
            Parameter::new("weight", TypeRef::nullable("f64")),
        ];
        let next = if level + 1 < depth {
            record_name(level + 1)
        } else {
            "crate::bench::Tail".to_string()
        };
        parameters.push(Parameter::new("next", TypeRef::new(next)));
        graph.add_declaration(Declaration::class(record_name(level), Constructor::named(parameters)));
    }

    graph.add_declaration(Declaration::sealed(
        "crate::bench::Tail",
        vec![
            SubtypeDef::new("End", "crate::bench::End"),
            SubtypeDef::new("Loop", "crate::bench::Loop"),
        ],
    ));
    graph.add_declaration(Declaration::object("crate::bench::End"));
    graph.add_declaration(Declaration::class(
        "crate::bench::Loop",
        Constructor::named(vec![
            Parameter::new("head", TypeRef::nullable(record_name(0))).boxed(),
        ]),
    ));

    graph.add_request(GenerationRequest::new(
        HostObject::new("crate::forms::BenchForms", Visibility::Public),
        TypeRef::new(record_name(0)),
        "record_editor",
    ));
    graph
}

/// Adds `hosts` independent hosts that each request every record of `graph`.
pub fn add_hosts(graph: &mut TypeGraph, hosts: usize) {
    let records: Vec<String> = graph
        .declarations
        .iter()
        .filter(|d| d.canonical_name.starts_with("crate::bench::Record"))
        .map(|d| d.canonical_name.clone())
        .collect();
    for host in 0..hosts {
        let host = HostObject::new(format!("crate::forms::Host{host}"), Visibility::Internal);
        for (idx, record) in records.iter().enumerate() {
            graph.add_request(GenerationRequest::new(
                host.clone(),
                TypeRef::new(record.clone()),
                format!("edit_record_{idx}"),
            ));
        }
    }
}

fn record_name(level: usize) -> String {
    format!("crate::bench::Record{level}")
}
