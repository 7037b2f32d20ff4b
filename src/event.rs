use super::*;

pub(crate) enum Event {
  Comments {
    item_id: Option<String>,
    request_id: u64,
    result: Result<Vec<Comment>, LoadError>,
  },
  Manifest {
    request_id: u64,
    result: Result<Vec<ManifestEntry>, LoadError>,
  },
}
