//! Shell completion via `complete -C`: the shell runs the binary itself with
//! `COMP_LINE` set and reads candidates from stdout.

use std::env;

use clap::Command;

use crate::cli::Shell;

/// Script that registers the running binary as its own completer.
pub fn hook(shell: Shell) -> anyhow::Result<String> {
    let bin = env::current_exe()?;
    let name = bin.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_else(|| "kubensx".into());
    let bin = bin.display();
    Ok(match shell {
        Shell::Bash => format!("complete -C {bin} {name}\n"),
        Shell::Zsh => format!(
            "autoload +X compinit && compinit\nautoload +X bashcompinit && bashcompinit\ncomplete -C {bin} {name}\n"
        ),
    })
}

/// The command line up to the cursor, if the shell asked for completions.
pub fn requested_line() -> Option<String> {
    let line = env::var("COMP_LINE").ok().filter(|line| !line.is_empty())?;
    let point = env::var("COMP_POINT").ok().and_then(|point| point.parse().ok());
    Some(truncate_at(line, point))
}

fn truncate_at(mut line: String, point: Option<usize>) -> String {
    if let Some(point) = point {
        if point < line.len() && line.is_char_boundary(point) {
            line.truncate(point);
        }
    }
    line
}

/// Subcommands (with aliases) or flags of the innermost command named on
/// `line`, filtered by the word being completed.
pub fn candidates(root: &Command, line: &str) -> Vec<String> {
    let mut root = root.clone();
    root.build();

    let mut words: Vec<&str> = line.split_whitespace().collect();
    let prefix = if line.ends_with(char::is_whitespace) { "" } else { words.pop().unwrap_or_default() };

    let mut current = &root;
    let mut expects_value = false;
    for word in words.iter().skip(1) {
        if expects_value {
            expects_value = false;
        } else if word.starts_with('-') {
            expects_value = takes_value(current, word);
        } else if let Some(sub) = current.find_subcommand(word) {
            current = sub;
        }
    }
    if expects_value {
        return Vec::new();
    }

    let mut found = if prefix.starts_with('-') { flags(current) } else { subcommands(current) };
    found.retain(|candidate| candidate.starts_with(prefix));
    found.sort();
    found.dedup();
    found
}

fn takes_value(cmd: &Command, word: &str) -> bool {
    if word.contains('=') {
        return false;
    }
    cmd.get_arguments()
        .find(|arg| match word.strip_prefix("--") {
            Some(long) => arg.get_long() == Some(long),
            None => word.len() == 2 && arg.get_short() == word.chars().nth(1),
        })
        .is_some_and(|arg| arg.get_action().takes_values())
}

fn flags(cmd: &Command) -> Vec<String> {
    let mut found = Vec::new();
    for arg in cmd.get_arguments().filter(|arg| !arg.is_positional() && !arg.is_hide_set()) {
        if let Some(long) = arg.get_long() {
            found.push(format!("--{long}"));
        }
        for alias in arg.get_visible_aliases().unwrap_or_default() {
            found.push(format!("--{alias}"));
        }
        if let Some(short) = arg.get_short() {
            found.push(format!("-{short}"));
        }
    }
    found
}

fn subcommands(cmd: &Command) -> Vec<String> {
    let mut found = Vec::new();
    for sub in cmd.get_subcommands().filter(|sub| !sub.is_hide_set()) {
        found.push(sub.get_name().to_string());
        found.extend(sub.get_visible_aliases().map(str::to_string));
    }
    found
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cli::Cli;

    fn complete(line: &str) -> Vec<String> {
        candidates(&Cli::command(), line)
    }

    #[test]
    fn top_level_commands_and_aliases() {
        let found = complete("kubensx ");
        for expected in ["use", "u", "assoc", "a", "config-ns", "n", "current", "c", "ls", "l", "completion"] {
            assert!(found.contains(&expected.to_string()), "missing {expected} in {found:?}");
        }
    }

    #[test]
    fn prefix_filters_commands() {
        assert_eq!(complete("kubensx co"), vec!["completion", "config-ns"]);
    }

    #[test]
    fn flags_of_subcommand() {
        assert_eq!(complete("kubensx use --ig"), vec!["--ignore-assoc", "--ignore-config-ns"]);
        assert_eq!(complete("kubensx u --n"), vec!["--namespace", "--no-color", "--ns"]);
    }

    #[test]
    fn short_flags_and_globals() {
        let found = complete("kubensx assoc -");
        for expected in ["-d", "--delete", "--delete-all", "-x", "-l", "--debug", "--kubeconfig"] {
            assert!(found.contains(&expected.to_string()), "missing {expected} in {found:?}");
        }
    }

    #[test]
    fn nested_subcommands() {
        let found = complete("kubensx completion ");
        assert!(found.contains(&"bash".to_string()));
        assert!(found.contains(&"zsh".to_string()));
    }

    #[test]
    fn value_of_option_is_left_to_shell() {
        assert!(complete("kubensx --kubeconfig ").is_empty());
        assert!(!complete("kubensx --kubeconfig /tmp/kc ").is_empty());
    }

    #[test]
    fn cursor_position_truncates_line() {
        assert_eq!(truncate_at("kubensx use --force".into(), Some(11)), "kubensx use");
        assert_eq!(truncate_at("kubensx".into(), Some(40)), "kubensx");
        assert_eq!(truncate_at("kubensx".into(), None), "kubensx");
    }
}
