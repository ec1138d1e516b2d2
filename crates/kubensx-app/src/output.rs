use std::io::{self, Write};

use crossterm::style::Stylize;

/// Prints `items` sorted, one per line, with `selection` in cyan.
pub fn print_highlighted(out: &mut impl Write, mut items: Vec<String>, selection: &str, color: bool) -> io::Result<()> {
    items.sort();
    for item in &items {
        if color && item == selection {
            writeln!(out, "{}", item.as_str().cyan())?;
        } else {
            writeln!(out, "{item}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(items: &[&str], selection: &str, color: bool) -> String {
        let mut buf = Vec::new();
        let items = items.iter().map(|s| s.to_string()).collect();
        print_highlighted(&mut buf, items, selection, color).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn sorts_without_color() {
        assert_eq!(render(&["prod", "dev"], "prod", false), "dev\nprod\n");
    }

    #[test]
    fn highlights_selection() {
        let rendered = render(&["prod", "dev"], "prod", true);
        assert!(rendered.starts_with("dev\n"));
        assert!(rendered.lines().nth(1).is_some_and(|line| line.contains("prod")));
    }
}
