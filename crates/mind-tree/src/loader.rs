//! TOML tree-template loader.
//!
//! # File format
//!
//! One `[[tree]]` table per template; nodes form a flat array referenced by
//! index.  Children must be listed before their parents.  `root` is optional
//! and defaults to the last node.
//!
//! ```toml
//! [[tree]]
//! name     = "adult_default"
//! category = "Adult"
//!
//! [[tree.nodes]]          # 0
//! kind = "condition"
//! name = "is_hungry"
//!
//! [[tree.nodes]]          # 1
//! kind = "action"
//! name = "eat"
//!
//! [[tree.nodes]]          # 2
//! kind     = "sequence"
//! children = [0, 1]
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::{TreeError, TreeResult, TreeTemplate};

#[derive(Deserialize)]
struct TreeFile {
    #[serde(default, rename = "tree")]
    trees: Vec<TreeTemplate>,
}

/// Parse and validate every template in a TOML document.
pub fn load_templates_toml(text: &str) -> TreeResult<Vec<TreeTemplate>> {
    let file: TreeFile = toml::from_str(text).map_err(|e| TreeError::Parse(e.to_string()))?;
    for t in &file.trees {
        t.validate()?;
    }
    Ok(file.trees)
}

/// Read `path` and parse it with [`load_templates_toml`].
pub fn load_templates_file(path: impl AsRef<Path>) -> TreeResult<Vec<TreeTemplate>> {
    let text = std::fs::read_to_string(path)?;
    load_templates_toml(&text)
}
