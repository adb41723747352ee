//! Test helpers for writing catalogs and reading command output.

use crate::recommend::Recommendation;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Four restaurants around the Irvine campus, nearest first: Taco House,
/// Campus Grill, Burrito Barn, Sushi Place.
pub(super) const IRVINE_CATALOG: &str = "\
name,cuisine,lat,lon,city,street,postcode,state,opening_hours,phone,website
Sushi Place,Japanese,33.70,-117.90,Irvine,,,CA,,,
Taco House,Mexican,33.65,-117.84,Irvine,Campus Drive,92612,CA,Mo-Su 10:00-22:00,,
Burrito Barn,Mexican;Tex-Mex,33.62,-117.80,Irvine,,,CA,,,
Campus Grill,American,33.66,-117.86,Irvine,,,CA,,,
";

pub(super) const CAMPUS: (f64, f64) = (33.649, -117.846);

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directories");
    }
    fs::write(path, contents).expect("write fixture file");
}

/// Temporary directory addressed through UTF-8 paths.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, relative: &str) -> Utf8PathBuf {
        self.root.join(relative)
    }

    pub(super) fn irvine_catalog(&self) -> Utf8PathBuf {
        let path = self.path("restaurants.csv");
        write_utf8(&path, IRVINE_CATALOG.as_bytes());
        path
    }
}

pub(super) fn parse_recommendations(stdout: &[u8]) -> Vec<Recommendation> {
    serde_json::from_slice(stdout).expect("output should be a JSON array of recommendations")
}

pub(super) fn names(recommendations: &[Recommendation]) -> Vec<&str> {
    recommendations.iter().map(|r| r.name.as_str()).collect()
}
