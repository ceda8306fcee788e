mod edge_cases;
mod log_level;
mod retry;

use std::env;

use tempfile::TempDir;

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    name: &'static str,
    previous: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(name: &'static str, value: &str) -> Self {
        unsafe {
            let previous = env::var(name).ok();
            env::set_var(name, value);
            Self { name, previous }
        }
    }

    pub(crate) fn remove(name: &'static str) -> Self {
        unsafe {
            let previous = env::var(name).ok();
            env::remove_var(name);
            Self { name, previous }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.previous {
                Some(val) => env::set_var(self.name, val),
                None => env::remove_var(self.name),
            }
        }
    }
}

/// Create a temp config directory and point CM_CONFIG_DIR at it
pub(crate) fn setup_config_dir() -> (TempDir, EnvGuard) {
    let temp = TempDir::new().unwrap();
    let guard = EnvGuard::set("CM_CONFIG_DIR", temp.path().to_str().unwrap());
    (temp, guard)
}
