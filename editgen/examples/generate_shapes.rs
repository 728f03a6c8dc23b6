//! Generates editors for a small shapes type graph.
//!
//! Run with: cargo run --example generate_shapes [OUT_DIR]
//!
//! Without an output directory the generated files are printed.

use editgen::prelude::*;

const SHAPES: &str = include_str!("shapes.xml");

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let graph = parse_type_graph(SHAPES)?;
    validate_graph(&graph)?;
    let generator = Generator::new(&graph);

    if let Some(out_dir) = std::env::args().nth(1) {
        let mut sink = DirectorySink::new(&out_dir);
        let count = generator.write_to(&mut sink)?;
        println!("Wrote {count} files to {out_dir}");
        return Ok(());
    }

    for file in generator.generate() {
        println!("==> {}/{} <==", file.package_name, file.file_name);
        println!("{}", file.source_text);
    }
    Ok(())
}
