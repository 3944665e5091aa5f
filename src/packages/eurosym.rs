//! Commands from the `eurosym` package.

use super::LatexPackage;

#[derive(Debug, Default, Clone, Copy)]
pub struct EurosymPackage;

impl LatexPackage for EurosymPackage {
    fn on_command(&mut self, name: &str, parameters: &[String]) -> Option<String> {
        match (name, parameters) {
            ("\\euro", _) => Some("€".to_string()),
            // \EUR takes exactly one amount
            ("\\EUR", [amount]) if !amount.is_empty() => Some(format!("{amount} €")),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn euro_sign() {
        assert_eq!(EurosymPackage.on_command("\\euro", &[]), Some("€".to_string()));
    }

    #[test]
    fn eur_amount() {
        let amount = vec!["100".to_string()];
        assert_eq!(
            EurosymPackage.on_command("\\EUR", &amount),
            Some("100 €".to_string())
        );
    }

    #[test]
    fn eur_needs_one_non_empty_amount() {
        assert_eq!(EurosymPackage.on_command("\\EUR", &[]), None);
        assert_eq!(EurosymPackage.on_command("\\EUR", &[String::new()]), None);
        let two = vec!["1".to_string(), "2".to_string()];
        assert_eq!(EurosymPackage.on_command("\\EUR", &two), None);
    }
}
