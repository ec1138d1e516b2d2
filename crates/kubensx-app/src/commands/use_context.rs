use std::io::{self, Write};

use kubensx_core::resolve::restore_previous;
use kubensx_core::{ContextPattern, ResolveOptions, Resolver};

use super::Session;
use crate::cli::UseArgs;
use crate::prompt::TuiChooser;

pub fn run(session: &Session, args: &UseArgs) -> anyhow::Result<()> {
    let mut store = session.load_store()?;
    let lister = session.lister()?;
    let general = &session.config.general;
    let options = ResolveOptions {
        ignore_assoc: args.ignore_assoc || general.ignore_assoc,
        ignore_config_ns: args.ignore_config_ns || general.ignore_config_ns,
        force: args.force,
    };
    let resolver = Resolver::new(&lister, options);
    let mut chooser = TuiChooser::new(session.color);

    let switched = match args.pattern.as_deref() {
        None => resolver.interactive(&mut store, args.target(), &mut chooser)?,
        Some("-") => restore_previous(&mut store),
        Some(raw) => {
            let (mode, pattern) = session.detect(raw, &args.matching);
            let pattern = ContextPattern::parse(pattern, mode, args.target(), store.current());
            if args.dry_run {
                let mut out = io::stdout().lock();
                for triple in resolver.enumerate(&store, &pattern)? {
                    writeln!(out, "{triple}")?;
                }
                return Ok(());
            }
            resolver.resolve(&mut store, &pattern, &mut chooser)?
        }
    };

    if !args.dry_run {
        store.commit()?;
    }
    println!("Switched to {switched}");
    Ok(())
}
