mod assoc;
mod config_ns;
mod current;
mod ls;
mod use_context;

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use kubensx_config::{AppConfig, MatchModeSetting};
use kubensx_core::bulk::Change;
use kubensx_core::kubeconfig::resolve_path;
use kubensx_core::{ContextStore, KubeNamespaceLister, MatchMode};
use tracing::debug;

use crate::cli::{Cli, Command, MatchArgs};
use crate::completion;

/// Settings shared by every command of one invocation.
pub struct Session<'a> {
    pub kubeconfig: PathBuf,
    pub color: bool,
    pub match_mode: MatchMode,
    pub config: &'a AppConfig,
}

impl<'a> Session<'a> {
    pub fn new(cli: &Cli, config: &'a AppConfig) -> Self {
        let kubeconfig = resolve_path(cli.kubeconfig.as_deref());
        debug!("Using kubeconfig {}", kubeconfig.display());
        let match_mode = match config.general.match_mode {
            MatchModeSetting::Exact => MatchMode::Exact,
            MatchModeSetting::Wildcard => MatchMode::Wildcard,
            MatchModeSetting::Fuzzy => MatchMode::Fuzzy,
        };
        debug!("Default matcher is {match_mode}");
        let color = config.general.color && !cli.no_color;
        Self { kubeconfig, color, match_mode, config }
    }

    pub fn load_store(&self) -> anyhow::Result<ContextStore> {
        Ok(ContextStore::load(&self.kubeconfig)?)
    }

    pub fn lister(&self) -> anyhow::Result<KubeNamespaceLister> {
        Ok(KubeNamespaceLister::new(&self.kubeconfig)?)
    }

    /// Mode for `pattern` (flags, then sigil, then the configured default) and
    /// the pattern without its sigil.
    pub fn detect<'p>(&self, pattern: &'p str, matching: &MatchArgs) -> (MatchMode, &'p str) {
        MatchMode::detect(pattern, matching.flag(), self.match_mode)
    }

    /// Colors only when enabled and stdout is a terminal.
    pub fn stdout_color(&self) -> bool {
        self.color && io::stdout().is_terminal()
    }
}

pub fn run(cli: &Cli, config: &AppConfig) -> anyhow::Result<()> {
    let session = Session::new(cli, config);
    match &cli.command {
        Command::Use(args) => use_context::run(&session, args),
        Command::Assoc(args) => assoc::run(&session, args),
        Command::ConfigNs(args) => config_ns::run(&session, args),
        Command::Current(args) => current::run(&session, args),
        Command::Ls(args) => ls::run(&session, args),
        Command::Completion { shell } => {
            print!("{}", completion::hook(*shell)?);
            Ok(())
        }
    }
}

fn print_changes(changes: &[Change]) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    for change in changes {
        writeln!(out, "{change}")?;
    }
    Ok(())
}
