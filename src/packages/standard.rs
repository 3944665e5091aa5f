//! Commands from the LaTeX kernel: one-character escapes and line breaks.

use super::LatexPackage;
use crate::config::PROTECTED_SPACE;

#[derive(Debug, Default, Clone, Copy)]
pub struct StandardPackage;

impl LatexPackage for StandardPackage {
    fn on_command(&mut self, name: &str, _parameters: &[String]) -> Option<String> {
        let mut chars = name.chars();
        if let (Some('\\'), Some(c), None) = (chars.next(), chars.next(), chars.next()) {
            return Some(match c {
                ',' => PROTECTED_SPACE.to_string(),
                '\\' => "\n".to_string(),
                other => other.to_string(),
            });
        }

        match name {
            "\\newline" | "\\linebreak" => Some("\n".to_string()),
            _ => None,
        }
    }
}
