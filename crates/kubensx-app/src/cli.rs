use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};
use kubensx_core::{MatchMode, Target};

const KUBECONFIG_HELP: &str = "Path to the config file (e.g. ~/.kube/config)

Defaults to $KUBECONFIG, then ~/.kube/config. When $KUBECONFIG lists several
files they are not merged: only the first existing one is read and written, so
users and clusters defined in the others are not offered.";

#[derive(Debug, Parser)]
#[command(name = "kubensx", version)]
#[command(about = "Simpler Cluster/User/Namespace switching for Kubernetes")]
pub struct Cli {
    /// Turn on debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Path to the config file (e.g. ~/.kube/config)
    #[arg(long, global = true, value_name = "PATH", long_help = KUBECONFIG_HELP)]
    pub kubeconfig: Option<PathBuf>,

    /// Disable color output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Change context
    #[command(visible_alias = "u")]
    Use(UseArgs),

    /// Assoc[iate] user with one or more clusters
    #[command(visible_alias = "a")]
    Assoc(AssocArgs),

    /// Record namespaces to offer for a user:cluster pair
    #[command(name = "config-ns", visible_alias = "n")]
    ConfigNs(ConfigNsArgs),

    /// Show current context (user:cluster/namespace)
    #[command(visible_alias = "c")]
    Current(CurrentArgs),

    /// List users/clusters/namespaces
    #[command(visible_alias = "l")]
    Ls(LsArgs),

    /// Command-line completion
    Completion {
        #[command(subcommand)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Shell {
    /// Generate Bash completion
    Bash,
    /// Generate Z shell completion
    Zsh,
}

#[derive(Debug, Default, Args)]
pub struct MatchArgs {
    /// Match exactly (instead of default (wildcard) matching)
    #[arg(short, long, conflicts_with = "fuzzy")]
    pub exact: bool,

    /// Match fuzzily (instead of default (wildcard) matching)
    #[arg(short = 'z', long)]
    pub fuzzy: bool,
}

impl MatchArgs {
    pub fn flag(&self) -> Option<MatchMode> {
        if self.exact {
            Some(MatchMode::Exact)
        } else if self.fuzzy {
            Some(MatchMode::Fuzzy)
        } else {
            None
        }
    }
}

#[derive(Debug, Args)]
#[command(after_help = "Examples:
  # interactive
  kubensx use
  # switch to the previous context
  kubensx use -
  # all users named qa, on any cluster
  kubensx use -x 'qa:*'
  # namespace kube-system of the current user and cluster
  kubensx use kube-system")]
pub struct UseArgs {
    /// user:cluster/namespace, user:cluster, cluster/namespace, namespace or `-`
    pub pattern: Option<String>,

    /// Change user only
    #[arg(short, long, conflicts_with_all = ["cluster", "namespace"])]
    pub user: bool,

    /// Change cluster only
    #[arg(short, long, conflicts_with = "namespace")]
    pub cluster: bool,

    /// Change namespace only
    #[arg(short, long, visible_alias = "ns")]
    pub namespace: bool,

    /// List matches (without changing the context) (requires pattern)
    #[arg(short = 'x', long, requires = "pattern")]
    pub dry_run: bool,

    #[command(flatten)]
    pub matching: MatchArgs,

    /// Ignore user:cluster assoc[iations]
    #[arg(long)]
    pub ignore_assoc: bool,

    /// Ignore namespaces recorded with config-ns (ask the cluster instead)
    #[arg(long)]
    pub ignore_config_ns: bool,

    /// Accept the namespace as is (do not check that it exists)
    #[arg(short, long)]
    pub force: bool,
}

impl UseArgs {
    pub fn target(&self) -> Target {
        match (self.user, self.cluster, self.namespace) {
            (true, _, _) => Target::User,
            (_, true, _) => Target::Cluster,
            (_, _, true) => Target::Namespace,
            _ => Target::All,
        }
    }
}

#[derive(Debug, Args)]
#[command(after_help = "Examples:
  # assoc[iate] (interactive)
  kubensx assoc
  # assoc[iate] minikube user with minikube cluster
  kubensx assoc minikube:minikube
  # list assoc[iations]
  kubensx assoc -l
  # list <user>:<cluster> pairs that would be assoc[iated]
  kubensx assoc --dry-run '*:minikube'")]
pub struct AssocArgs {
    /// <user>[:<cluster>]
    pub pattern: Option<String>,

    /// Delete assoc[iation]
    #[arg(short, long, requires = "pattern")]
    pub delete: bool,

    /// Delete all assoc[iations]
    #[arg(long, conflicts_with_all = ["pattern", "delete"])]
    pub delete_all: bool,

    /// List assoc[iations] (<user>:<cluster> pairs)
    #[arg(short, long, conflicts_with_all = ["delete", "delete_all", "dry_run"])]
    pub list: bool,

    /// Do not modify the config (just show what's going to happen)
    #[arg(short = 'x', long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub matching: MatchArgs,
}

#[derive(Debug, Args)]
#[command(after_help = "Examples:
  # offer only team-a on prod for user admin
  kubensx config-ns admin:prod/team-a
  # forget every recorded namespace of admin on any prod-* cluster
  kubensx config-ns -d 'admin:prod-*'
  # list recorded namespaces
  kubensx config-ns -l")]
pub struct ConfigNsArgs {
    /// <user>:<cluster>/<namespace> (namespace optional with --delete)
    pub pattern: Option<String>,

    /// Delete matching namespaces
    #[arg(short, long, requires = "pattern")]
    pub delete: bool,

    /// Delete all recorded namespaces
    #[arg(long, conflicts_with_all = ["pattern", "delete"])]
    pub delete_all: bool,

    /// List recorded namespaces (<user>:<cluster>/<namespace>)
    #[arg(short, long, conflicts_with_all = ["delete", "delete_all", "dry_run"])]
    pub list: bool,

    /// Do not modify the config (just show what's going to happen)
    #[arg(short = 'x', long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub matching: MatchArgs,
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("field").args(["user", "cluster", "namespace"])))]
pub struct CurrentArgs {
    /// Output user only
    #[arg(short, long)]
    pub user: bool,

    /// Output cluster only
    #[arg(short, long)]
    pub cluster: bool,

    /// Output namespace only
    #[arg(short, long, visible_alias = "ns")]
    pub namespace: bool,
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("kind").required(true).args(["users", "clusters", "namespaces"])))]
pub struct LsArgs {
    /// List users
    #[arg(short, long)]
    pub users: bool,

    /// List clusters
    #[arg(short, long)]
    pub clusters: bool,

    /// List namespaces
    #[arg(short, long)]
    pub namespaces: bool,
}
