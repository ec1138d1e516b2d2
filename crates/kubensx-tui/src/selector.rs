use std::collections::BTreeSet;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press did to the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Confirm,
    Cancel,
}

/// Filterable list prompt. In multi mode Space toggles the highlighted
/// option and Enter confirms the marked set.
#[derive(Debug, Clone)]
pub struct SelectorState {
    title: String,
    options: Vec<String>,
    filter: String,
    selected: usize,
    marked: BTreeSet<String>,
    multi: bool,
}

impl SelectorState {
    pub fn single(title: impl Into<String>, options: Vec<String>, selected: usize) -> Self {
        let selected = selected.min(options.len().saturating_sub(1));
        Self { title: title.into(), options, filter: String::new(), selected, marked: BTreeSet::new(), multi: false }
    }

    pub fn multi(title: impl Into<String>, options: Vec<String>, marked: &[String]) -> Self {
        let marked = marked.iter().filter(|m| options.contains(m)).cloned().collect();
        Self { title: title.into(), options, filter: String::new(), selected: 0, marked, multi: true }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn is_multi(&self) -> bool {
        self.multi
    }

    /// Index into [`SelectorState::filtered`].
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_marked(&self, option: &str) -> bool {
        self.marked.contains(option)
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn filtered(&self) -> Vec<&str> {
        let filter_lower = self.filter.to_lowercase();
        self.options
            .iter()
            .filter(|option| filter_lower.is_empty() || option.to_lowercase().contains(&filter_lower))
            .map(String::as_str)
            .collect()
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.filtered().get(self.selected).copied()
    }

    /// Marked options in their original order.
    pub fn marked(&self) -> Vec<String> {
        self.options.iter().filter(|o| self.marked.contains(*o)).cloned().collect()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        if key.kind == KeyEventKind::Release {
            return Outcome::Continue;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => return Outcome::Cancel,
            KeyCode::Esc => return Outcome::Cancel,
            KeyCode::Enter => {
                if self.multi || self.highlighted().is_some() {
                    return Outcome::Confirm;
                }
            }
            KeyCode::Up => self.select_prev(),
            KeyCode::Char('p') if ctrl => self.select_prev(),
            KeyCode::Down | KeyCode::Tab => self.select_next(),
            KeyCode::Char('n') if ctrl => self.select_next(),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.filtered().len().saturating_sub(1),
            KeyCode::Char(' ') if self.multi => self.toggle(),
            KeyCode::Char('u') if ctrl => self.set_filter(String::new()),
            KeyCode::Char(c) if !ctrl => {
                let mut filter = std::mem::take(&mut self.filter);
                filter.push(c);
                self.set_filter(filter);
            }
            KeyCode::Backspace => {
                let mut filter = std::mem::take(&mut self.filter);
                filter.pop();
                self.set_filter(filter);
            }
            _ => {}
        }
        Outcome::Continue
    }

    fn set_filter(&mut self, filter: String) {
        self.filter = filter;
        self.selected = 0;
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn select_next(&mut self) {
        if self.selected + 1 < self.filtered().len() {
            self.selected += 1;
        }
    }

    fn toggle(&mut self) {
        let Some(option) = self.highlighted().map(str::to_string) else {
            return;
        };
        if !self.marked.remove(&option) {
            self.marked.insert(option);
        }
    }
}

#[cfg(test)]
mod tests;
