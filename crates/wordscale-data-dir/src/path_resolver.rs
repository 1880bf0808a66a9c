//! # App Path Resolver
//!
//! Static library defaults for data directory resolution.

use std::env;
use std::path::{Path, PathBuf};

use directories_next::ProjectDirs;

/// Static configuration for application path resolution.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver {
    /// The qualifier for [`ProjectDirs`].
    pub qualifier: &'static str,

    /// The organization for [`ProjectDirs`].
    pub organization: &'static str,

    /// The application for [`ProjectDirs`].
    pub application: &'static str,

    /// The resolution order for data directory environment variables.
    pub data_env_vars: &'static [&'static str],
}

impl PathResolver {
    /// Get the [`ProjectDirs`] for this config.
    pub fn project_dirs(&self) -> Option<ProjectDirs> {
        ProjectDirs::from(self.qualifier, self.organization, self.application)
    }

    /// Resolve the data directory for this config.
    ///
    /// Resolution Order:
    /// 1. `path`, if present.
    /// 2. ``env[$VAR]`` for each `self.data_env_vars`; in order; empty values are ignored.
    /// 3. `self.project_dirs().data_dir()`, if present.
    /// 4. `None`
    ///
    /// ## Project Dirs Behavior
    ///
    /// |Platform | Value                                                                      | Example                                                       |
    /// | ------- | -------------------------------------------------------------------------- | ------------------------------------------------------------- |
    /// | Linux   | `$XDG_DATA_HOME`/`_project_path_` or `$HOME`/.local/share/`_project_path_` | /home/alice/.local/share/barapp                               |
    /// | macOS   | `$HOME`/Library/Application Support/`_project_path_`                       | /Users/Alice/Library/Application Support/com.Foo-Corp.Bar-App |
    /// | Windows | `{FOLDERID_RoamingAppData}`\\`_project_path_`\\data                        | C:\Users\Alice\AppData\Roaming\Foo Corp\Bar App\data          |
    pub fn resolve_data_dir<P: AsRef<Path>>(
        &self,
        path: Option<P>,
    ) -> Option<PathBuf> {
        if let Some(path) = path.as_ref() {
            return Some(path.as_ref().to_path_buf());
        }

        for env_var in self.data_env_vars {
            match env::var(env_var) {
                Ok(path) if !path.is_empty() => return Some(PathBuf::from(path)),
                _ => {}
            }
        }

        self.project_dirs().map(|pds| pds.data_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    const DATA_ENV1: &str = "_APP_PATH_DATA_ENV1";
    const DATA_ENV2: &str = "_APP_PATH_DATA_ENV2";

    const TEST_CONFIG: PathResolver = PathResolver {
        qualifier: "io",
        organization: "crates",
        application: "example",
        data_env_vars: &[DATA_ENV1, DATA_ENV2],
    };

    #[test]
    #[serial]
    fn test_resolve_data_dir() {
        let pds = TEST_CONFIG
            .project_dirs()
            .expect("failed to get project dirs");

        let no_path: Option<PathBuf> = None;
        let user_data_dir = PathBuf::from("/tmp/app_data/data");
        let env_data_dir1 = PathBuf::from("/tmp/app_data/env_data.1");
        let env_data_dir2 = PathBuf::from("/tmp/app_data/env_data.2");

        unsafe {
            for v in TEST_CONFIG.data_env_vars {
                env::remove_var(v);
            }
        }

        assert_eq!(
            TEST_CONFIG.resolve_data_dir(Some(user_data_dir.clone())),
            Some(user_data_dir.clone()),
        );
        assert_eq!(
            TEST_CONFIG.resolve_data_dir(no_path.clone()),
            Some(pds.data_dir().to_path_buf())
        );

        // Empty values are skipped.
        unsafe {
            env::set_var(DATA_ENV1, "");
            env::set_var(DATA_ENV2, env_data_dir2.to_str().unwrap());
        }
        assert_eq!(
            TEST_CONFIG.resolve_data_dir(no_path.clone()),
            Some(env_data_dir2.clone())
        );

        unsafe {
            env::set_var(DATA_ENV1, env_data_dir1.to_str().unwrap());
        }
        assert_eq!(
            TEST_CONFIG.resolve_data_dir(Some(user_data_dir.clone())),
            Some(user_data_dir.clone()),
        );
        assert_eq!(
            TEST_CONFIG.resolve_data_dir(no_path.clone()),
            Some(env_data_dir1.clone())
        );

        unsafe {
            for v in TEST_CONFIG.data_env_vars {
                env::remove_var(v);
            }
        }
    }
}
