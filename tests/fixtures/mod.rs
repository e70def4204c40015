//! On-disk fixtures for the integration tests
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

/// Scratch directory unique to one test
pub struct Workspace {
    dir: PathBuf,
}

impl Workspace {
    pub fn new(test_name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "firlab-{}-{}",
            std::process::id(),
            test_name
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create fixture directory");
        Self { dir }
    }

    /// Write `contents` to `name` inside the workspace and return its path
    pub fn file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.join(name);
        fs::write(&path, contents).expect("write fixture file");
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

/// Square wave in the mixed literal styles used by the lab vector files
pub const SQUARE_VEC: &str = "0\n0\n0x64\n0b1100100\n100\n\n100\n0\n0\n0o0\n0\n";

pub const SQUARE_SAMPLES: [i64; 10] = [0, 0, 100, 100, 100, 100, 0, 0, 0, 0];

/// Two-tap moving sum
pub const P0_CFG: &str = "coef,en,value\n0,1,0x01\n1,1,0x01\n2,0,0x00\n3,0,0x00\n";

/// Taps 0 and 2 enabled, tap 1 disabled
pub const P4_CFG: &str = "coef,en,value\n0,1,2\n1,0,0x7F\n2,1,0x1\n3,0,0\n";
