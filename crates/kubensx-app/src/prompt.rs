use std::io::{self, IsTerminal};

use kubensx_core::{Chooser, Field, KubensxError, Result};
use kubensx_tui::Theme;

/// Asks the operator through the inline selector on stderr.
pub struct TuiChooser {
    theme: Theme,
}

impl TuiChooser {
    pub fn new(color: bool) -> Self {
        Self { theme: Theme::new(color) }
    }

    fn ensure_terminal(field: Field) -> Result<()> {
        if io::stdin().is_terminal() && io::stderr().is_terminal() {
            return Ok(());
        }
        Err(KubensxError::validation(format!(
            "more than one {field} matches and there is no terminal to choose from (narrow down the pattern)"
        )))
    }
}

impl Chooser for TuiChooser {
    fn choose(&mut self, field: Field, options: &[String], selected: usize) -> Result<String> {
        Self::ensure_terminal(field)?;
        let title = field.to_string();
        match kubensx_tui::select_one(&title, options, selected, &self.theme).map_err(prompt_failed)? {
            Some(choice) => {
                eprintln!("{title}: {}", display(&choice));
                Ok(choice)
            }
            None => Err(KubensxError::Interrupted),
        }
    }

    fn choose_many(&mut self, field: Field, options: &[String], selected: &[String]) -> Result<Vec<String>> {
        Self::ensure_terminal(field)?;
        let title = format!("{field}s");
        match kubensx_tui::select_many(&title, options, selected, &self.theme).map_err(prompt_failed)? {
            Some(choices) => {
                eprintln!("{title}: {}", choices.join(", "));
                Ok(choices)
            }
            None => Err(KubensxError::Interrupted),
        }
    }
}

fn prompt_failed(e: anyhow::Error) -> KubensxError {
    KubensxError::Io(io::Error::other(format!("{e:#}")))
}

/// Empty values are shown as `""`.
fn display(value: &str) -> &str {
    if value.is_empty() {
        "\"\""
    } else {
        value
    }
}
