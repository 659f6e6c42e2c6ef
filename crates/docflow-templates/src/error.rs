use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Failed to read template file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse template YAML from {origin}: {source}")]
    Parse {
        /// File path, or `<inline>` for in-memory YAML
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },
}
