use super::*;

/// Where a file lives once a path below the data root has been resolved.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Location {
  File(PathBuf),
  Url(Url),
}

impl Display for Location {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Self::File(path) => write!(f, "{}", path.display()),
      Self::Url(url) => write!(f, "{url}"),
    }
  }
}

/// Root under which `manifest.json` and the per-item directories are served,
/// either over HTTP or from a local directory.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Source {
  Directory(PathBuf),
  Http(Url),
}

impl Source {
  /// Resolves `segments` below the root. Segments may themselves contain `/`
  /// or `\` separators, as scraped image paths do. Empty, `.` and `..` parts
  /// are dropped, so the result never escapes the root.
  pub(crate) fn locate(&self, segments: &[&str]) -> Location {
    let parts = segments
      .iter()
      .flat_map(|segment| segment.split(['/', '\\']))
      .filter(|part| !matches!(*part, "" | "." | ".."));

    match self {
      Self::Directory(root) => {
        let mut path = root.clone();
        path.extend(parts);
        Location::File(path)
      }
      Self::Http(root) => {
        let mut url = root.clone();

        if let Ok(mut path) = url.path_segments_mut() {
          path.pop_if_empty().extend(parts);
        }

        Location::Url(url)
      }
    }
  }

  pub(crate) fn parse(base: &str) -> Result<Self> {
    if base.starts_with("http://") || base.starts_with("https://") {
      let url = Url::parse(base)
        .with_context(|| format!("invalid base url `{base}`"))?;

      if url.cannot_be_a_base() {
        bail!("base url `{base}` cannot hold paths");
      }

      Ok(Self::Http(url))
    } else {
      Ok(Self::Directory(PathBuf::from(base)))
    }
  }
}

impl Display for Source {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Self::Directory(path) => write!(f, "{}", path.display()),
      Self::Http(url) => write!(f, "{url}"),
    }
  }
}
