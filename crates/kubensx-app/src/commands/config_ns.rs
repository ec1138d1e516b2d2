use std::io::{self, Write};

use anyhow::bail;
use kubensx_core::bulk::{self, NamespacePattern};

use super::{print_changes, Session};
use crate::cli::ConfigNsArgs;

pub fn run(session: &Session, args: &ConfigNsArgs) -> anyhow::Result<()> {
    let mut store = session.load_store()?;

    if args.list {
        let mut out = io::stdout().lock();
        for ns in store.explicit_namespaces() {
            writeln!(out, "{ns}")?;
        }
        return Ok(());
    }

    let changes = match args.pattern.as_deref() {
        None if args.delete_all => bulk::delete_explicit_namespaces(&mut store, None),
        None => bail!("pattern (<user>:<cluster>/<namespace>) required"),
        Some(raw) => {
            let (mode, raw) = session.detect(raw, &args.matching);
            let pattern = NamespacePattern::parse(raw, mode)?;
            if args.delete {
                bulk::delete_explicit_namespaces(&mut store, Some(&pattern))
            } else {
                bulk::add_explicit_namespaces(&mut store, &pattern)?
            }
        }
    };
    print_changes(&changes)?;

    if !args.dry_run {
        store.commit()?;
    }
    Ok(())
}
