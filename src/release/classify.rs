//! Bucketing of releases by product and version family
//!
//! Each product owns five ordered buckets, "7.4" down to "7.0". DXP folds every
//! quarterly family (anything containing `.q`) into its "7.4" bucket; Portal
//! never does. Releases matching no bucket are dropped from the bucketed view
//! but are kept in the product's unfiltered list.

use crate::release::model::Release;
use std::fmt;

/// Version families that get their own bucket, newest first
pub const VERSION_FAMILIES: [&str; 5] = ["7.4", "7.3", "7.2", "7.1", "7.0"];

/// Products with classified output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Product {
  Dxp,
  Portal,
}

impl Product {
  pub const ALL: [Product; 2] = [Product::Dxp, Product::Portal];

  /// Feed identifier
  pub fn as_str(self) -> &'static str {
    match self {
      Product::Dxp => "dxp",
      Product::Portal => "portal",
    }
  }

  /// Human label used in summaries
  pub fn label(self) -> &'static str {
    match self {
      Product::Dxp => "DXP",
      Product::Portal => "Portal",
    }
  }

  pub fn from_feed(product: &str) -> Option<Self> {
    match product {
      "dxp" => Some(Product::Dxp),
      "portal" => Some(Product::Portal),
      _ => None,
    }
  }

  /// Whether `family` belongs to the bucket `bucket`
  pub fn matches(self, bucket: &str, family: &str) -> bool {
    match self {
      Product::Dxp if bucket == "7.4" => family == "7.4" || family.contains(".q"),
      _ => family == bucket,
    }
  }
}

impl fmt::Display for Product {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Releases of one version family, in feed order
#[derive(Debug, Clone)]
pub struct Bucket {
  pub family: &'static str,
  pub releases: Vec<Release>,
}

/// All buckets of one product
#[derive(Debug, Clone)]
pub struct ProductReleases {
  pub product: Product,
  /// Every release of this product in feed order, bucketed or not
  pub all: Vec<Release>,
  pub buckets: Vec<Bucket>,
}

impl ProductReleases {
  fn new(product: Product) -> Self {
    Self {
      product,
      all: Vec::new(),
      buckets: VERSION_FAMILIES
        .into_iter()
        .map(|family| Bucket {
          family,
          releases: Vec::new(),
        })
        .collect(),
    }
  }

  fn push(&mut self, release: &Release) {
    self.all.push(release.clone());
    let product = self.product;
    let family = release.product_group_version.as_str();
    if let Some(bucket) = self
      .buckets
      .iter_mut()
      .find(|bucket| product.matches(bucket.family, family))
    {
      bucket.releases.push(release.clone());
    }
  }

  /// Bucket for a version family key such as "7.3"
  pub fn bucket(&self, family: &str) -> Option<&Bucket> {
    self.buckets.iter().find(|bucket| bucket.family == family)
  }

  /// Number of releases that landed in some bucket
  pub fn bucketed_count(&self) -> usize {
    self.buckets.iter().map(|bucket| bucket.releases.len()).sum()
  }
}

/// Releases grouped per product and version family
#[derive(Debug, Clone)]
pub struct ClassifiedReleases {
  dxp: ProductReleases,
  portal: ProductReleases,
  /// Releases whose product is neither dxp nor portal
  pub unclassified: usize,
}

impl ClassifiedReleases {
  /// Classify a flat sequence of releases
  pub fn classify<'a>(releases: impl IntoIterator<Item = &'a Release>) -> Self {
    let mut classified = Self {
      dxp: ProductReleases::new(Product::Dxp),
      portal: ProductReleases::new(Product::Portal),
      unclassified: 0,
    };

    for release in releases {
      match Product::from_feed(&release.product) {
        Some(Product::Dxp) => classified.dxp.push(release),
        Some(Product::Portal) => classified.portal.push(release),
        None => classified.unclassified += 1,
      }
    }

    classified
  }

  pub fn product(&self, product: Product) -> &ProductReleases {
    match product {
      Product::Dxp => &self.dxp,
      Product::Portal => &self.portal,
    }
  }

  /// Products in output order (dxp, portal)
  pub fn products(&self) -> impl Iterator<Item = &ProductReleases> {
    Product::ALL.into_iter().map(|product| self.product(product))
  }
}
