//! Test corpus management
//!
//! Real-world ICC profiles are not checked in. Drop `.icc`/`.icm` files under
//! `testdata/profiles/` (any depth) at the workspace root and the corpus tests
//! pick them up; without them those tests skip.

use std::path::{Path, PathBuf};

/// A profile file from the corpus
#[derive(Debug)]
pub struct TestProfile {
    /// File stem
    pub name: String,
    /// Path to the profile file
    pub path: PathBuf,
}

/// Workspace `testdata/` directory
pub fn testdata_dir() -> PathBuf {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .ancestors()
        .nth(2)
        .unwrap_or(manifest)
        .join("testdata")
}

/// Test corpus of profile files found under a directory
pub struct TestCorpus {
    profiles: Vec<TestProfile>,
    base_path: PathBuf,
}

impl TestCorpus {
    /// Create an empty corpus rooted at `base_path`
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            profiles: Vec::new(),
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Corpus of `testdata/profiles`, loaded
    pub fn default_corpus() -> std::io::Result<Self> {
        let mut corpus = Self::new(testdata_dir().join("profiles"));
        corpus.load()?;
        Ok(corpus)
    }

    /// Collect all profile files below the base path
    pub fn load(&mut self) -> std::io::Result<()> {
        let base = self.base_path.clone();
        self.load_dir(&base)
    }

    fn load_dir(&mut self, dir: &Path) -> std::io::Result<()> {
        if !dir.exists() {
            return Ok(());
        }

        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<_>>()?;
        paths.sort();

        for path in paths {
            if path.is_dir() {
                self.load_dir(&path)?;
            } else if path
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("icc") || e.eq_ignore_ascii_case("icm"))
            {
                let name = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.profiles.push(TestProfile { name, path });
            }
        }
        Ok(())
    }

    /// Get all profiles
    pub fn profiles(&self) -> &[TestProfile] {
        &self.profiles
    }

    /// Get profile by name
    pub fn get(&self, name: &str) -> Option<&TestProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
