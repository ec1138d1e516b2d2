use std::io::{self, Write};

use anyhow::bail;
use kubensx_core::bulk::{self, PairPattern};
use kubensx_core::resolve::ensure_selectable;
use kubensx_core::{Chooser, ContextStore, Field};

use super::{print_changes, Session};
use crate::cli::AssocArgs;
use crate::prompt::TuiChooser;

pub fn run(session: &Session, args: &AssocArgs) -> anyhow::Result<()> {
    let mut store = session.load_store()?;

    if args.list {
        let mut out = io::stdout().lock();
        for assoc in store.associations() {
            writeln!(out, "{assoc}")?;
        }
        return Ok(());
    }

    let changes = match args.pattern.as_deref() {
        None if args.delete_all => bulk::dissociate(&mut store, None),
        None if args.dry_run => bail!("pattern (<user>:<cluster>) required"),
        None => interactive(&mut store, &mut TuiChooser::new(session.color))?,
        Some(raw) => {
            let (mode, raw) = session.detect(raw, &args.matching);
            let pattern = PairPattern::parse(raw, mode)?;
            if args.delete {
                bulk::dissociate(&mut store, Some(&pattern))
            } else {
                bulk::associate(&mut store, &pattern)
            }
        }
    };
    print_changes(&changes)?;

    if !args.dry_run {
        store.commit()?;
    }
    Ok(())
}

/// Pick a user, then the full set of clusters it should be associated with.
fn interactive(store: &mut ContextStore, chooser: &mut dyn Chooser) -> anyhow::Result<Vec<bulk::Change>> {
    ensure_selectable(store)?;
    let mut users = store.users();
    users.sort();
    let selected = users.iter().position(|u| u == store.user()).unwrap_or(0);
    let user = if users.len() == 1 { users[0].clone() } else { chooser.choose(Field::User, &users, selected)? };

    let mut clusters = store.clusters();
    clusters.sort();
    let current = store.clusters_by_user().remove(&user).unwrap_or_default();
    let chosen = chooser.choose_many(Field::Cluster, &clusters, &current)?;
    Ok(bulk::reassociate(store, &user, &chosen))
}
