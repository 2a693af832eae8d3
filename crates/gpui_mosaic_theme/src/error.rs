use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("could not read theme file \"{}\"", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("a theme needs at least one variant")]
    NoVariants,

    #[error("invalid theme: {0}")]
    Parse(#[from] serde_json::Error),
}
