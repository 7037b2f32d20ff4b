use super::*;

/// Failure to fetch or decode one of the JSON endpoints.
#[derive(Debug, Error)]
pub(crate) enum LoadError {
  #[error("could not decode {location}: {source}")]
  Decode {
    location: Location,
    source: serde_json::Error,
  },
  #[error("request to {location} failed: {source}")]
  Http {
    location: Location,
    source: reqwest::Error,
  },
  #[error("could not read {location}: {source}")]
  Io {
    location: Location,
    source: io::Error,
  },
  #[error("{location} returned {status}")]
  Status {
    location: Location,
    status: StatusCode,
  },
}
