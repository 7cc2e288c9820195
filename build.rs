use anyhow::{Context, Result};

/// Generate build metadata file that is then included in code
fn build_metadata() -> Result<()> {
    built::write_built_file()
        .context("Writing built.rs")?;
    Ok(())
}

fn main() -> Result<()>  {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_ENCODER_DIRECTION_FLIP");
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_ROW2COL");
    build_metadata()?;
    Ok(())
}
