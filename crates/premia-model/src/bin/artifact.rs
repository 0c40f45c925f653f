//! premia-artifact - write the demo pipeline artifact
//!
//! The service refuses to start without a model file. This writes the fixed
//! demo pipeline so a local gateway has something to load:
//!
//! ```bash
//! premia-artifact model/premia_gbm.json
//! ```
//!
//! Format follows the extension: `.json` for JSON, anything else bincode.

use anyhow::Context;
use premia_model::demo_pipeline;

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "model/premia_gbm.json".to_string());

    if let Some(parent) = std::path::Path::new(&path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }

    demo_pipeline()
        .save(&path)
        .with_context(|| format!("writing artifact to {}", path))?;

    println!("wrote demo pipeline artifact to {}", path);
    Ok(())
}
