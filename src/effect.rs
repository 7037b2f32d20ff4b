use super::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Effect {
  FetchComments {
    item_id: Option<String>,
    request_id: u64,
  },
  FetchManifest {
    request_id: u64,
  },
  OpenLocation {
    location: Location,
  },
}
