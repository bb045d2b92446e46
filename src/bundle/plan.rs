use std::fmt;
use std::path::PathBuf;

use crate::sidematter::Resolution;

/// Per-component selection for copy and move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferOptions {
    /// Create the destination's parent directory when missing.
    pub make_parents: bool,
    pub primary: bool,
    pub metadata: bool,
    pub assets: bool,
    /// Carry timestamps and permissions over on copy.
    pub preserve_metadata: bool,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            make_parents: true,
            primary: true,
            metadata: true,
            assets: true,
            preserve_metadata: false,
        }
    }
}

/// One part of a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Metadata,
    Assets,
    Primary,
}

impl Component {
    pub fn as_str(self) -> &'static str {
        match self {
            Component::Metadata => "metadata",
            Component::Assets => "assets",
            Component::Primary => "primary",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransferStep {
    pub component: Component,
    pub from: PathBuf,
    pub to: PathBuf,
}

/// What a copy or move will do, computed without touching the destination.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferPlan {
    pub source: Resolution,
    /// The bundle as it will look once every step has run.
    pub destination: Resolution,
    /// Steps in execution order: metadata, assets, primary.
    pub steps: Vec<TransferStep>,
}

impl TransferPlan {
    pub(crate) fn build(source: Resolution, dest_primary: PathBuf, opts: &TransferOptions) -> Self {
        let mut destination = source.renamed_as(&dest_primary);
        if !opts.metadata {
            destination = destination.without_meta();
        }
        if !opts.assets {
            destination = destination.without_assets();
        }

        let mut steps = Vec::with_capacity(3);
        if let (Some(from), Some(to)) = (source.meta_path(), destination.meta_path()) {
            steps.push(TransferStep {
                component: Component::Metadata,
                from: from.to_path_buf(),
                to: to.to_path_buf(),
            });
        }
        if let (Some(from), Some(to)) = (source.assets_dir(), destination.assets_dir()) {
            steps.push(TransferStep {
                component: Component::Assets,
                from: from.to_path_buf(),
                to: to.to_path_buf(),
            });
        }
        if opts.primary {
            steps.push(TransferStep {
                component: Component::Primary,
                from: source.primary().to_path_buf(),
                to: destination.primary().to_path_buf(),
            });
        }

        Self {
            source,
            destination,
            steps,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// How `remove` treats failures while deleting the assets directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovalPolicy {
    /// Log and continue.
    #[default]
    BestEffort,
    /// Propagate like any other error.
    Strict,
}

impl RemovalPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "best_effort" | "besteffort" => Some(RemovalPolicy::BestEffort),
            "strict" => Some(RemovalPolicy::Strict),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RemovalPolicy::BestEffort => "best_effort",
            RemovalPolicy::Strict => "strict",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sidematter::MetadataFormat;
    use std::path::Path;

    fn full_source() -> Resolution {
        Resolution::new(
            PathBuf::from("in/doc.md"),
            Some((PathBuf::from("in/doc.meta.json"), MetadataFormat::Json)),
            None,
            Some(PathBuf::from("in/doc.assets")),
        )
    }

    #[test]
    fn steps_follow_fixed_order() {
        let plan = TransferPlan::build(full_source(), PathBuf::from("out/copy.md"), &TransferOptions::default());
        let order: Vec<Component> = plan.steps.iter().map(|s| s.component).collect();
        assert_eq!(order, [Component::Metadata, Component::Assets, Component::Primary]);
        assert_eq!(plan.steps[0].to, Path::new("out/copy.meta.json"));
        assert_eq!(plan.destination.path_list().len(), 3);
    }

    #[test]
    fn disabled_components_are_absent_from_destination() {
        let opts = TransferOptions {
            metadata: false,
            primary: false,
            ..TransferOptions::default()
        };
        let plan = TransferPlan::build(full_source(), PathBuf::from("out/copy.md"), &opts);
        assert!(plan.destination.meta_path().is_none());
        assert_eq!(plan.steps.len(), 1);
        assert_eq!(plan.steps[0].component, Component::Assets);
        assert_eq!(plan.destination.primary(), Path::new("out/copy.md"));
    }

    #[test]
    fn removal_policy_parse() {
        assert_eq!(RemovalPolicy::parse("strict"), Some(RemovalPolicy::Strict));
        assert_eq!(RemovalPolicy::parse("Best-Effort"), Some(RemovalPolicy::BestEffort));
        assert_eq!(RemovalPolicy::parse("loose"), None);
    }
}
