use super::*;

#[derive(Clone)]
pub(crate) struct Client {
  http: reqwest::Client,
  source: Source,
}

impl Client {
  const COMMENTS_FILE: &str = "comments.json";

  const MANIFEST_FILE: &str = "manifest.json";

  /// Fetches every manifest item's comments, at most `parallelism` at a time,
  /// in manifest order.
  pub(crate) async fn fetch_all_comments(
    &self,
    entries: &[ManifestEntry],
    parallelism: usize,
  ) -> Vec<(String, Result<Vec<Comment>, LoadError>)> {
    stream::iter(entries.iter().map(|entry| {
      let client = self.clone();
      let id = entry.id.clone();

      async move {
        let result = client.fetch_comments(Some(id.as_str())).await;
        (id, result)
      }
    }))
    .buffered(parallelism.max(1))
    .collect()
    .await
  }

  /// Fetches the comment collection of `item_id`, or the lone collection at
  /// the root when there is no manifest.
  pub(crate) async fn fetch_comments(
    &self,
    item_id: Option<&str>,
  ) -> Result<Vec<Comment>, LoadError> {
    match item_id {
      Some(item_id) => self.fetch_json(&[item_id, Self::COMMENTS_FILE]).await,
      None => self.fetch_json(&[Self::COMMENTS_FILE]).await,
    }
  }

  async fn fetch_json<T: DeserializeOwned>(
    &self,
    segments: &[&str],
  ) -> Result<T, LoadError> {
    let location = self.source.locate(segments);

    debug!(%location, "fetching");

    let bytes = self.read(&location).await?;

    serde_json::from_slice(&bytes)
      .map_err(|source| LoadError::Decode { location, source })
  }

  pub(crate) async fn fetch_manifest(
    &self,
  ) -> Result<Vec<ManifestEntry>, LoadError> {
    self.fetch_json(&[Self::MANIFEST_FILE]).await
  }

  pub(crate) fn new(source: Source) -> Self {
    Self {
      http: reqwest::Client::new(),
      source,
    }
  }

  async fn read(&self, location: &Location) -> Result<Vec<u8>, LoadError> {
    let http_error = |source| LoadError::Http {
      location: location.clone(),
      source,
    };

    match location {
      Location::File(path) => {
        tokio::fs::read(path).await.map_err(|source| LoadError::Io {
          location: location.clone(),
          source,
        })
      }
      Location::Url(url) => {
        let response =
          self.http.get(url.clone()).send().await.map_err(http_error)?;

        let status = response.status();

        if !status.is_success() {
          return Err(LoadError::Status {
            location: location.clone(),
            status,
          });
        }

        Ok(response.bytes().await.map_err(http_error)?.to_vec())
      }
    }
  }
}
