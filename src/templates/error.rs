#[derive(Debug, thiserror::Error)]
pub enum TemplateLoadError {
    #[error("failed to read template document {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch template document {url}: {message}")]
    Fetch { url: String, message: String },
    #[error("template document {url} returned unexpected status {status}")]
    Status { url: String, status: u16 },
    #[error("invalid json in template document {location}: {source}")]
    ParseJson {
        location: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid yaml in template document {location}: {source}")]
    ParseYaml {
        location: String,
        #[source]
        source: serde_yaml::Error,
    },
}
