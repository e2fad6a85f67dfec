use crate::cli::ListArgs;
use crate::config::defaults::DefaultsConfig;
use crate::error::Result;
use crossbridge::core::io::store::GridStore;
use std::path::PathBuf;
use tracing::info;

pub fn run(args: ListArgs) -> Result<()> {
    let root = args
        .output
        .unwrap_or_else(|| PathBuf::from(DefaultsConfig::default().output_dir));
    info!("Opening the {} store under {:?}", args.kind, root);
    let store = GridStore::open_existing(&root, args.kind)?;

    let grid = store.grid_spec();
    let d10 = store.d10_range();
    println!("Store: {}", store.directory().display());
    println!("  crossbridge:     {}", store.kind());
    println!(
        "  axial offset:    {}:{}:{} nm ({} columns)",
        grid.axial.start,
        grid.axial.stop,
        grid.axial.step,
        grid.cols()
    );
    println!(
        "  lattice spacing: {}:{}:{} nm ({} rows, d10 {:.3}:{:.3}:{:.3})",
        grid.lattice.start,
        grid.lattice.stop,
        grid.lattice.step,
        grid.rows(),
        d10.start,
        d10.stop,
        d10.step
    );

    let names = store.list();
    if names.is_empty() {
        println!("  (no grids stored)");
        return Ok(());
    }
    for name in names {
        match store.get(name) {
            Ok(values) => {
                let shape = if values.is_vector() { "vector" } else { "scalar" };
                let nan = values.nan_count();
                if nan == 0 {
                    println!("  {:<12} {}", name, shape);
                } else {
                    println!("  {:<12} {} ({} NaN cell(s))", name, shape, nan);
                }
            }
            Err(_) => {
                let value = store.scalar(name)?;
                println!("  {:<12} = {}", name, value);
            }
        }
    }
    Ok(())
}
