//! Commands whose package is unknown or irrelevant, handled by name.
//!
//! This is the last package in the default chain. It also remembers acronyms:
//! `\acro{API}{Application Programming Interface}` makes later `\ac{API}`
//! print the long form. The memory belongs to one registry, so one document.

use std::collections::HashMap;

use super::LatexPackage;
use crate::config::{ACRONYM_PLACEHOLDER, Options, REFERENCE_PLACEHOLDER};

#[derive(Debug, Clone, Default)]
pub struct UnknownPackages {
    opts: Options,
    acronyms: HashMap<String, String>,
}

impl UnknownPackages {
    pub fn new(opts: &Options) -> Self {
        Self {
            opts: opts.clone(),
            acronyms: HashMap::new(),
        }
    }

    pub fn acronym(&self, short: &str) -> Option<&str> {
        self.acronyms.get(short).map(String::as_str)
    }
}

fn is_headline(name: &str) -> bool {
    name.trim_end_matches('*').ends_with("section") || name.ends_with("title")
}

impl LatexPackage for UnknownPackages {
    fn on_command(&mut self, name: &str, parameters: &[String]) -> Option<String> {
        let first = parameters.first();

        match name {
            _ if is_headline(name) => first.map(|title| format!("\n\n{title}.\n")),
            "\\underline" | "\\textbf" | "\\emph" | "\\texttt" => first.cloned(),
            "\\textit" => match parameters {
                [text] => Some(self.opts.quote(text)),
                _ => None,
            },
            "\\item" => Some(format!("\n- {}", parameters.join(" "))),
            "\\end" => Some("\n".to_string()),
            "\\ref" => Some(REFERENCE_PLACEHOLDER.to_string()),
            "\\ac" => match parameters {
                [short] => Some(
                    self.acronym(short)
                        .unwrap_or(ACRONYM_PLACEHOLDER)
                        .to_string(),
                ),
                _ => Some(ACRONYM_PLACEHOLDER.to_string()),
            },
            "\\acro" => {
                if let [short, long] = parameters {
                    self.acronyms.insert(short.clone(), long.clone());
                }
                None
            }
            "\\url" => first.cloned(),
            "\\caption" => match parameters {
                [caption] => Some(format!("{caption}.")),
                _ => None,
            },
            _ => None,
        }
    }
}
