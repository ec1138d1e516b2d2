use std::io;

use kubensx_core::{ContextStore, NamespaceLister};

use super::Session;
use crate::cli::LsArgs;
use crate::output;

pub fn run(session: &Session, args: &LsArgs) -> anyhow::Result<()> {
    let store = session.load_store()?;
    let (items, selection) = if args.users {
        (store.users(), store.user())
    } else if args.clusters {
        (store.clusters(), store.cluster())
    } else {
        let lister = session.lister()?;
        (namespaces(&store, &lister, session.config.general.ignore_config_ns)?, store.namespace())
    };
    output::print_highlighted(&mut io::stdout().lock(), items, selection, session.stdout_color())?;
    Ok(())
}

/// Recorded namespaces of the current pair, unless they are ignored.
fn namespaces(
    store: &ContextStore,
    lister: &dyn NamespaceLister,
    ignore_config_ns: bool,
) -> anyhow::Result<Vec<String>> {
    let found = if ignore_config_ns { store.namespaces(lister)? } else { store.namespace_view(lister)? };
    Ok(found)
}
