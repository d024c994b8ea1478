//! # oplog-ports
//!
//! Boundary traits for the `oplog` logging facade.
//!
//! This crate defines the interfaces between the facade and the concrete
//! logging backends. It depends only on `shared`.

pub mod adapter;
pub mod transport;

pub use adapter::{
    LogFields, LoggerAdapter, MESSAGE_FIELD, STACK_TRACE_FIELD, attach_error, redact_fields,
    render_error_chain,
};
pub use transport::{CloudEntry, CloudLogTransport, CloudSeverity};

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use oplog_shared::shared_crate_version;

    fn workspace_deps() -> Vec<String> {
        let cargo_toml = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"));
        let mut deps = Vec::new();
        let mut in_deps = false;
        let mut in_dev_deps = false;

        for raw_line in cargo_toml.lines() {
            let line = raw_line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('[') {
                in_deps = line == "[dependencies]";
                in_dev_deps = line == "[dev-dependencies]";
                continue;
            }
            if !(in_deps || in_dev_deps) {
                continue;
            }
            if line.starts_with("oplog-") {
                let key = line.split('=').next().unwrap_or("").trim();
                let name = key.split('.').next().unwrap_or("").trim();
                deps.push(name.to_string());
            }
        }

        deps
    }

    #[test]
    fn ports_depends_only_on_shared() {
        let deps = workspace_deps();
        assert_eq!(deps, vec!["oplog-shared".to_string()]);
    }

    #[test]
    fn ports_crate_compiles() {
        let version = ports_crate_version();
        assert!(!version.is_empty());
    }

    #[test]
    fn ports_can_use_shared() {
        assert!(!shared_crate_version().is_empty());
    }
}
