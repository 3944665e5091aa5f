//! Pluggable command resolvers.
//!
//! A package is offered every command the scanner finishes, together with its
//! already plain-texted arguments, and either returns the plain-text
//! replacement or declines. The [`PackageRegistry`] asks its packages in order
//! and stops at the first answer; a command nobody answers disappears from the
//! plain text.

mod eurosym;
mod standard;
mod unknown;

pub use eurosym::EurosymPackage;
pub use standard::StandardPackage;
pub use unknown::UnknownPackages;

use crate::config::Options;

pub trait LatexPackage {
    /// Resolve `name` (including the leading `\`) with its parameters.
    /// Parameters do not distinguish bracket types.
    fn on_command(&mut self, name: &str, parameters: &[String]) -> Option<String>;
}

/// Ordered chain of packages. The default value is empty.
#[derive(Default)]
pub struct PackageRegistry {
    packages: Vec<Box<dyn LatexPackage>>,
}

impl PackageRegistry {
    /// Standard escapes, eurosym, then the catch-all for everything else
    pub fn with_default_packages(opts: &Options) -> Self {
        let mut registry = Self::default();
        registry
            .register(StandardPackage)
            .register(EurosymPackage)
            .register(UnknownPackages::new(opts));
        registry
    }

    /// Append a package; it is asked after all packages registered before it
    pub fn register<P: LatexPackage + 'static>(&mut self, package: P) -> &mut Self {
        self.packages.push(Box::new(package));
        self
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl LatexPackage for PackageRegistry {
    fn on_command(&mut self, name: &str, parameters: &[String]) -> Option<String> {
        let replacement = self
            .packages
            .iter_mut()
            .find_map(|package| package.on_command(name, parameters));

        match &replacement {
            Some(text) => log::trace!("{name} {parameters:?} -> {text:?}"),
            None => log::debug!("dropping unhandled command {name} {parameters:?}"),
        }
        replacement
    }
}

impl std::fmt::Debug for PackageRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageRegistry")
            .field("packages", &self.packages.len())
            .finish()
    }
}
