use super::Session;
use crate::cli::CurrentArgs;

pub fn run(session: &Session, args: &CurrentArgs) -> anyhow::Result<()> {
    let store = session.load_store()?;
    let current = store.current();
    match (args.user, args.cluster, args.namespace) {
        (true, _, _) => println!("{}", current.user),
        (_, true, _) => println!("{}", current.cluster),
        (_, _, true) => println!("{}", current.namespace),
        _ => println!("{current}"),
    }
    Ok(())
}
