use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("no template for category '{category}' and no '{fallback}' fallback template")]
    MissingFallback {
        category: String,
        fallback: String,
    },

    #[error("template '{0}' has no nodes")]
    EmptyTemplate(String),

    #[error("template '{template}': node {node} references child {child}, which is not an earlier node")]
    BadChildIndex {
        template: String,
        node:     u32,
        child:    u32,
    },

    #[error("template '{template}': root {root} is out of range")]
    BadRoot {
        template: String,
        root:     u32,
    },

    #[error("a template for category '{0}' is already registered")]
    DuplicateTemplate(String),

    #[error("too many {0} registered")]
    Capacity(&'static str),

    #[error("tree template parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TreeResult<T> = Result<T, TreeError>;
