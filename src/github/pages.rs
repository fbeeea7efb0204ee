// Lazy, page-at-a-time iteration over a repository's closed pull requests.
// A page is only requested when the consumer pulls past the buffered items,
// so dropping the iterator is the whole of early termination.

use std::collections::VecDeque;

use crate::error::BriefResult;
use crate::github::api::GithubApi;
use crate::github::model::PullRequestRecord;

pub struct PullPages<'a> {
  api: &'a dyn GithubApi,
  owner: String,
  name: String,
  per_page: u32,
  next_page: u32,
  exhausted: bool,
  buffer: VecDeque<PullRequestRecord>,
  pages_requested: u32,
}

impl<'a> PullPages<'a> {
  pub fn new(api: &'a dyn GithubApi, owner: &str, name: &str, per_page: u32) -> Self {
    Self {
      api,
      owner: owner.to_string(),
      name: name.to_string(),
      per_page: per_page.max(1),
      next_page: 1,
      exhausted: false,
      buffer: VecDeque::new(),
      pages_requested: 0,
    }
  }

  pub fn pages_requested(&self) -> u32 {
    self.pages_requested
  }

  /// Request the next page and return how many pulls it held (0 once exhausted).
  pub fn next_page(&mut self) -> BriefResult<usize> {
    if self.exhausted {
      return Ok(0);
    }

    let page = self.api.list_closed_pulls(&self.owner, &self.name, self.next_page, self.per_page)?;
    self.pages_requested += 1;

    tracing::debug!(
      repo = %format!("{}/{}", self.owner, self.name),
      page = self.next_page,
      items = page.items.len(),
      has_next = page.has_next,
      "fetched pulls page"
    );

    self.next_page += 1;
    if !page.has_next {
      self.exhausted = true;
    }

    let records = page.items.iter().map(PullRequestRecord::from_json).collect::<BriefResult<Vec<_>>>()?;
    let n = records.len();
    self.buffer.extend(records);

    Ok(n)
  }
}

impl Iterator for PullPages<'_> {
  type Item = BriefResult<PullRequestRecord>;

  fn next(&mut self) -> Option<Self::Item> {
    while self.buffer.is_empty() {
      if self.exhausted {
        return None;
      }

      match self.next_page() {
        Ok(0) => {
          self.exhausted = true;
          return None;
        }
        Ok(_) => {}
        Err(e) => {
          self.exhausted = true;
          return Some(Err(e));
        }
      }
    }

    self.buffer.pop_front().map(Ok)
  }
}
