//! Registry tag pagination
//!
//! Pages are fetched one at a time, following each page's `next` cursor until
//! it is empty. Every page, including the last one, is yielded.

use crate::core::error::{CalendarError, CalendarResult, DataError, ResultExt};
use crate::fetch::{Fetcher, fetch_json};
use crate::release::model::{DockerTagEntry, DockerTagPage};
use std::collections::HashSet;
use url::Url;

/// Iterator over registry tag pages
pub struct TagPages<'a, F: ?Sized> {
  fetcher: &'a F,
  next: Option<Url>,
  seen: HashSet<Url>,
}

impl<'a, F: Fetcher + ?Sized> TagPages<'a, F> {
  pub fn new(fetcher: &'a F, first_page: Url) -> Self {
    Self {
      fetcher,
      next: Some(first_page),
      seen: HashSet::new(),
    }
  }

  fn fetch(&mut self, url: Url) -> CalendarResult<DockerTagPage> {
    if !self.seen.insert(url.clone()) {
      return Err(CalendarError::Data(DataError::MalformedPayload {
        url: url.to_string(),
        reason: "pagination revisited this page; refusing to loop".to_string(),
      }));
    }

    let page: DockerTagPage = fetch_json(self.fetcher, &url).with_context(|| format!("Failed to fetch tag page {}", url))?;

    self.next = match page.next_page() {
      Some(next) => Some(url.join(next).map_err(|e| {
        CalendarError::Data(DataError::MalformedPayload {
          url: url.to_string(),
          reason: format!("invalid next-page cursor '{}' ({})", next, e),
        })
      })?),
      None => None,
    };
    Ok(page)
  }
}

impl<F: Fetcher + ?Sized> Iterator for TagPages<'_, F> {
  type Item = CalendarResult<DockerTagPage>;

  fn next(&mut self) -> Option<Self::Item> {
    let url = self.next.take()?;
    Some(self.fetch(url))
  }
}

/// Collect every tag of every page, in fetch order
pub fn fetch_all_tags<F: Fetcher + ?Sized>(fetcher: &F, first_page: Url) -> CalendarResult<Vec<DockerTagEntry>> {
  let mut tags = Vec::new();
  for page in TagPages::new(fetcher, first_page) {
    tags.extend(page?.results);
  }
  Ok(tags)
}
