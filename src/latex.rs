//! LaTeX state machine on top of the generic scanner.
//!
//! Contexts and their transitions:
//!
//! ```text
//! Text ──space──▶ Space ──other──▶ Text
//!  │ ──%──▶ Comment ──line break──▶ Space
//!  │ ──\──▶ MarkupCommand ──{ or [──▶ MarkupContent ──closing──▶ MarkupCommand ─▶ Text
//!  │ ──"──▶ QuotationMarks ──` or '──▶ Text
//!  └ ──{──▶ Math ──}──▶ Text
//! ```
//!
//! Command arguments and math groups are turned into plain text by a fresh
//! scan over their content, so `\section{About \textit{this}}` resolves the
//! inner command before `\section` sees its parameter.

use std::io::Write;
use std::ops::Range;

use crossterm::style::{Color, Stylize};

use crate::annotated::AnnotatedText;
use crate::config::{Options, STRAIGHT_QUOTE};
use crate::error::Error;
use crate::packages::{LatexPackage, PackageRegistry};
use crate::scanner::{ContextMachine, ScanContext, ScanState, Scanner, opposite};
use crate::span_index::ContextSwitch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Text,
    Space,
    Comment,
    MarkupCommand,
    MarkupContent,
    QuotationMarks,
    Math,
}

impl ScanContext for Context {
    fn is_plain(self) -> bool {
        self == Context::Text
    }
}

impl Context {
    /// Foreground and background for highlighted printing
    pub fn colors(self) -> (Color, Color) {
        match self {
            Context::Text => (Color::White, Color::Black),
            Context::Space => (Color::White, Color::Grey),
            Context::Comment => (Color::Yellow, Color::Cyan),
            Context::MarkupCommand => (Color::Yellow, Color::Red),
            Context::MarkupContent => (Color::White, Color::Magenta),
            Context::QuotationMarks => (Color::Rgb { r: 255, g: 165, b: 0 }, Color::Black),
            Context::Math => (Color::White, Color::DarkRed),
        }
    }
}

fn is_linebreak(c: char) -> bool {
    c == '\r' || c == '\n'
}

fn is_space(c: char) -> bool {
    c.is_whitespace() || is_linebreak(c)
}

fn is_command_letter(c: char) -> bool {
    c.is_alphabetic() || c == '*' || c == '@'
}

fn opens_argument(c: Option<char>) -> bool {
    matches!(c, Some('{') | Some('['))
}

/// A command between its `\` and its resolution
#[derive(Debug)]
struct Command {
    start: usize,
    /// Set once the first argument opens
    name: Option<String>,
    parameters: Vec<String>,
    argument_open: bool,
    awaiting_argument: bool,
}

impl Command {
    fn new(start: usize) -> Self {
        Self {
            start,
            name: None,
            parameters: Vec::new(),
            argument_open: false,
            awaiting_argument: false,
        }
    }
}

pub struct LatexMachine {
    opts: Options,
    registry: PackageRegistry,
    depth: usize,
    /// Bracket closing the current argument
    closing_bracket: char,
    /// Open brackets inside the current argument or math group,
    /// e.g. `\graphicspath{ {./images/} }`
    inner_brackets: usize,
    /// No text was emitted since the last emitted space
    space_inserted: bool,
    command: Option<Command>,
    /// Offset of the `{` opening the math group being read
    math_start: Option<usize>,
    quote_open: bool,
}

impl LatexMachine {
    pub fn new(opts: Options, registry: PackageRegistry) -> Self {
        Self::nested(opts, registry, 0)
    }

    fn nested(opts: Options, registry: PackageRegistry, depth: usize) -> Self {
        Self {
            opts,
            registry,
            depth,
            closing_bracket: '}',
            inner_brackets: 0,
            space_inserted: true,
            command: None,
            math_start: None,
            quote_open: false,
        }
    }

    pub fn registry(&self) -> &PackageRegistry {
        &self.registry
    }

    /// Plain text of a nested piece of LaTeX.
    ///
    /// The sub-scan borrows this document's registry so command state such
    /// as acronyms carries over in both directions.
    fn plain_text_of(&mut self, source: &str) -> Result<String, Error> {
        if self.depth >= self.opts.max_nesting {
            return Err(Error::NestingTooDeep(self.opts.max_nesting));
        }
        let registry = std::mem::take(&mut self.registry);
        let machine = LatexMachine::nested(self.opts.clone(), registry, self.depth + 1);

        let mut scanner = Scanner::new(source, machine);
        let result = scanner.scan().and_then(|()| scanner.to_plain_text(None));
        self.registry = scanner.into_machine().registry;
        result
    }

    /// Ask the registry and append the answer to the current span
    fn resolve(
        &mut self,
        scan: &mut ScanState<'_, Context>,
        name: &str,
        parameters: &[String],
    ) -> Result<(), Error> {
        if let Some(replacement) = self.registry.on_command(name, parameters) {
            self.emitted(&replacement);
            scan.push_current_context_replacement(&replacement)?;
        }
        Ok(())
    }

    /// Track whether emitted text ended in a space
    fn emitted(&mut self, text: &str) {
        if let Some(last) = text.chars().last() {
            self.space_inserted = is_space(last);
        }
    }

    fn parse_text(&mut self, scan: &mut ScanState<'_, Context>) -> Result<(), Error> {
        let c = scan.char();
        if is_space(c) {
            scan.set_current_context(Context::Space)
        } else if c == '%' {
            scan.set_current_context(Context::Comment)
        } else if c == '\\' {
            self.command = Some(Command::new(scan.index()));
            scan.set_current_context(Context::MarkupCommand)
        } else if c == '"' {
            self.quote_open = true;
            scan.set_current_context(Context::QuotationMarks)
        } else if c == '{' {
            self.inner_brackets = 0;
            self.math_start = Some(scan.index());
            scan.set_current_context(Context::Math)
        } else {
            self.space_inserted = false;

            let letter = |c: Option<char>| c.is_some_and(char::is_alphabetic);
            if c == '.' && letter(scan.previous_char()) && letter(scan.next_char()) {
                log::warn!(
                    "Missing space after period at {}: {}",
                    scan.location(),
                    scan.source().slice(scan.index() - 1..scan.index() + 2)
                );
            }
            Ok(())
        }
    }

    /// Replacement for the space run of the current span, ending at `end`
    fn close_space(&mut self, scan: &mut ScanState<'_, Context>, end: usize) -> Result<(), Error> {
        if self.space_inserted {
            return Ok(());
        }
        self.space_inserted = true;

        let run = scan.source().slice(scan.current_context_start()?..end);
        let replacement = if run.chars().count() == 1 {
            run.to_string()
        } else {
            " ".to_string()
        };
        scan.set_current_context_replacement(Some(replacement))
    }

    fn parse_space(&mut self, scan: &mut ScanState<'_, Context>) -> Result<(), Error> {
        if is_space(scan.char()) {
            return Ok(());
        }
        let end = scan.index();
        self.close_space(scan, end)?;
        scan.set_current_context(Context::Text)?;
        self.parse_text(scan)
    }

    fn parse_comment(&mut self, scan: &mut ScanState<'_, Context>) -> Result<(), Error> {
        if is_linebreak(scan.char()) {
            scan.set_current_context(Context::Space)?;
            self.parse_space(scan)?;
        }
        Ok(())
    }

    fn parse_quotation_marks(&mut self, scan: &mut ScanState<'_, Context>) -> Result<(), Error> {
        self.quote_open = false;
        let c = scan.char();
        let smart = match c {
            '`' => Some(self.opts.opening_quote.clone()),
            '\'' => Some(self.opts.closing_quote.clone()),
            _ => None,
        };

        match smart {
            Some(quote) => {
                self.emitted(&quote);
                scan.push_current_context_replacement(&quote)?;
                scan.set_next_context(Context::Text)
            }
            None => {
                scan.push_current_context_replacement(STRAIGHT_QUOTE)?;
                if c.is_alphabetic() {
                    log::warn!("Unescaped quotation mark found at {}", scan.location());
                } else {
                    log::warn!(
                        "Unknown quotation mark escape found at {}: \"{c}",
                        scan.location()
                    );
                }
                scan.set_current_context(Context::Text)?;
                self.parse_text(scan)
            }
        }
    }

    fn parse_markup_command(&mut self, scan: &mut ScanState<'_, Context>) -> Result<(), Error> {
        let c = scan.char();
        let index = scan.index();
        let Some(command) = self.command.as_mut() else {
            // Nothing pending, the char belongs to the text after a command
            scan.set_current_context(Context::Text)?;
            return self.parse_text(scan);
        };
        let length = index - command.start;

        if (c == '{' || c == '[') && (command.awaiting_argument || length > 1) {
            if command.name.is_none() {
                command.name = Some(scan.source().slice(command.start..index).to_string());
            }
            command.awaiting_argument = false;
            command.argument_open = true;
            self.closing_bracket = opposite(c)?;
            self.inner_brackets = 0;
            scan.set_next_context(Context::MarkupContent)
        } else if length == 1 && !c.is_alphabetic() {
            // Short commands like \, or \\ or \"
            self.command = None;
            self.resolve(scan, &format!("\\{c}"), &[])?;
            scan.set_next_context(Context::Text)
        } else if is_space(c) {
            // Commands without parameters like \newline
            let name = scan.source().slice(command.start..index).to_string();
            self.command = None;
            self.resolve(scan, &name, &[])?;
            scan.set_current_context(Context::Space)
        } else if length > 1 && !is_command_letter(c) {
            // Name ended by punctuation like \euro.
            let name = scan.source().slice(command.start..index).to_string();
            self.command = None;
            self.resolve(scan, &name, &[])?;
            scan.set_current_context(Context::Text)?;
            self.parse_text(scan)
        } else {
            Ok(())
        }
    }

    fn parse_markup_content(&mut self, scan: &mut ScanState<'_, Context>) -> Result<(), Error> {
        let c = scan.char();

        if c == self.closing_bracket {
            if self.inner_brackets > 0 {
                self.inner_brackets -= 1;
                return Ok(());
            }

            let content = scan.current_context_text()?.to_string();
            let parameter = self.plain_text_of(&content)?;
            let index = scan.index();
            let command = self.command.get_or_insert_with(|| Command::new(index));
            command.parameters.push(parameter);
            command.argument_open = false;

            if opens_argument(scan.next_char()) {
                // Another argument follows
                command.awaiting_argument = true;
                return scan.set_current_context(Context::MarkupCommand);
            }

            let name = command.name.take().unwrap_or_default();
            let parameters = std::mem::take(&mut command.parameters);
            self.command = None;

            if scan.current_context_length()? == 0 {
                // Empty argument: fold the closing bracket into the command
                scan.set_current_context(Context::MarkupCommand)?;
                self.resolve(scan, &name, &parameters)?;
            } else {
                self.resolve(scan, &name, &parameters)?;
                scan.set_current_context(Context::MarkupCommand)?;
            }
            scan.set_next_context(Context::Text)
        } else {
            if c == opposite(self.closing_bracket)? {
                self.inner_brackets += 1;
            }
            Ok(())
        }
    }

    fn parse_math(&mut self, scan: &mut ScanState<'_, Context>) -> Result<(), Error> {
        match scan.char() {
            '}' if self.inner_brackets > 0 => self.inner_brackets -= 1,
            '}' => {
                let start = self.math_start.take().unwrap_or(scan.index());
                let body = scan.source().slice(start + 1..scan.index()).to_string();
                let replacement = self.plain_text_of(&body)?;
                self.emitted(&replacement);
                scan.push_current_context_replacement(&replacement)?;
                scan.set_next_context(Context::Text)?;
            }
            '{' => self.inner_brackets += 1,
            _ => {}
        }
        Ok(())
    }
}

impl ContextMachine for LatexMachine {
    type Context = Context;

    fn start_context(&self) -> Context {
        Context::Text
    }

    fn on_char(&mut self, context: Context, scan: &mut ScanState<'_, Context>) -> Result<(), Error> {
        match context {
            Context::Text => self.parse_text(scan),
            Context::Space => self.parse_space(scan),
            Context::Comment => self.parse_comment(scan),
            Context::MarkupCommand => self.parse_markup_command(scan),
            Context::MarkupContent => self.parse_markup_content(scan),
            Context::QuotationMarks => self.parse_quotation_marks(scan),
            Context::Math => self.parse_math(scan),
        }
    }

    fn on_end(&mut self, context: Context, scan: &mut ScanState<'_, Context>) -> Result<(), Error> {
        match context {
            Context::Space => {
                let end = scan.index() + 1;
                self.close_space(scan, end)
            }
            Context::QuotationMarks if self.quote_open => {
                self.quote_open = false;
                scan.push_current_context_replacement(STRAIGHT_QUOTE)
            }
            Context::MarkupCommand => match self.command.take() {
                Some(command) if command.argument_open || command.awaiting_argument => {
                    Err(Error::UnclosedBracket {
                        expected: self.closing_bracket,
                    })
                }
                Some(command) => {
                    // Input ends inside a command name like "\euro"
                    let name = scan
                        .source()
                        .slice(command.start..scan.index() + 1)
                        .to_string();
                    self.resolve(scan, &name, &[])
                }
                None => Ok(()),
            },
            Context::MarkupContent => Err(Error::UnclosedBracket {
                expected: self.closing_bracket,
            }),
            Context::Math if self.math_start.is_some() => {
                Err(Error::UnclosedBracket { expected: '}' })
            }
            _ => Ok(()),
        }
    }
}

/// A LaTeX source and its context map.
///
/// ```
/// use detex_map::LatexDocument;
///
/// let doc = LatexDocument::parse("\\section{Intro} Some  text").unwrap();
/// assert_eq!(doc.to_plain_text().unwrap(), "Intro.\nSome text");
/// ```
pub struct LatexDocument {
    scanner: Scanner<LatexMachine>,
}

impl std::fmt::Debug for LatexDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LatexDocument").finish_non_exhaustive()
    }
}

impl LatexDocument {
    /// Prepare a document with default options; call [`scan`](Self::scan) next
    pub fn new(input: &str) -> Self {
        Self::with_options(input, Options::default())
    }

    pub fn with_options(input: &str, opts: Options) -> Self {
        let registry = PackageRegistry::with_default_packages(&opts);
        Self::with_registry(input, opts, registry)
    }

    pub fn with_registry(input: &str, opts: Options, registry: PackageRegistry) -> Self {
        Self {
            scanner: Scanner::new(input, LatexMachine::new(opts, registry)),
        }
    }

    /// Build and scan in one step
    pub fn parse(input: &str) -> Result<Self, Error> {
        Self::parse_with_options(input, Options::default())
    }

    pub fn parse_with_options(input: &str, opts: Options) -> Result<Self, Error> {
        let mut doc = Self::with_options(input, opts);
        doc.scan()?;
        Ok(doc)
    }

    pub fn scan(&mut self) -> Result<(), Error> {
        self.scanner.scan()
    }

    pub fn is_scanned(&self) -> bool {
        self.scanner.is_scanned()
    }

    pub fn source(&self) -> &str {
        self.scanner.source().as_str()
    }

    pub fn registry(&self) -> &PackageRegistry {
        self.scanner.machine().registry()
    }

    pub fn to_plain_text(&self) -> Result<String, Error> {
        self.scanner.to_plain_text(None)
    }

    /// Plain text of the spans touching a char range of the source
    pub fn to_plain_text_in(&self, range: Range<usize>) -> Result<String, Error> {
        self.scanner.to_plain_text(Some(range))
    }

    pub fn to_annotated_text(&self) -> Result<AnnotatedText, Error> {
        self.scanner.to_annotated_text()
    }

    pub fn index_to_location(&self, offset: usize) -> String {
        self.scanner.index_to_location(offset)
    }

    pub fn ordered_switches(&self) -> Result<&[ContextSwitch<Context>], Error> {
        self.scanner.ordered_switches()
    }

    /// Every span's context and literal source text, in order
    pub fn spans(&self) -> Result<Vec<(Context, &str)>, Error> {
        Ok(self
            .scanner
            .spans()?
            .into_iter()
            .map(|span| (span.context(), span.text))
            .collect())
    }

    pub fn for_each<F>(&self, callback: F) -> Result<(), Error>
    where
        F: FnMut(&ContextSwitch<Context>, &str),
    {
        self.scanner.for_each(callback)
    }

    /// Print the source with each span coloured by its context.
    /// Useful to debug scan mistakes.
    pub fn write_highlighted<W: Write>(&self, out: &mut W) -> Result<(), Error> {
        for (context, text) in self.spans()? {
            let (fg, bg) = context.colors();
            write!(out, "{}", text.with(fg).on(bg))?;
        }
        writeln!(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn plain(input: &str) -> String {
        LatexDocument::parse(input).unwrap().to_plain_text().unwrap()
    }

    fn dump(input: &str) -> String {
        let doc = LatexDocument::parse(input).unwrap();
        let mut out = String::new();
        doc.for_each(|switch, part| {
            out.push_str(&format!("{:?} {part:?}", switch.context()));
            if let Some(replacement) = switch.replacement() {
                out.push_str(&format!(" -> {replacement:?}"));
            }
            out.push('\n');
        })
        .unwrap();
        out
    }

    #[rstest]
    #[case::double_space("a  b", "a b")]
    #[case::single_space("a b", "a b")]
    #[case::single_linebreak("a\nb", "a\nb")]
    #[case::paragraph("a\n\n  b", "a b")]
    #[case::title("\\title{Test}", "Test.")]
    #[case::starred_section("\\section*{Intro} Text", "Intro.\nText")]
    #[case::euro("\\euro", "€")]
    #[case::euro_before_period("5\\euro.", "5€.")]
    #[case::eur_amount("\\EUR{100}", "100 €")]
    #[case::eur_empty("100\\EUR{}", "100")]
    #[case::comment("a % comment\nb", "a b")]
    #[case::dropped_command("a \\label{x} b", "a b")]
    #[case::protected_spaces("a\\,\\,b", "a\u{202F}\u{202F}b")]
    #[case::escaped_percent("50\\% more", "50% more")]
    #[case::math_group("x {a {b} c} y", "x a b c y")]
    #[case::adjacent_math("{a}{b}", "ab")]
    #[case::empty_group("{}", "")]
    #[case::group_at_end("x {a}", "x a")]
    #[case::group_ending_argument("\\textbf{a {b}}", "a b")]
    #[case::group_ending_argument_before_text("\\textbf{a {b}} c", "a b c")]
    #[case::bold_group_in_section("\\section{About {\\bf this}}", "About this.")]
    #[case::group_after_short_command("a\\,{x}", "a\u{202F}x")]
    #[case::nested_command("\\section{About \\textit{this}}", "About „this“.")]
    #[case::smart_quotes("\"`Hallo\"'", "„Hallo“")]
    #[case::unescaped_quote("say \"hi", "say \"hi")]
    #[case::trailing_quote("end\"", "end\"")]
    #[case::inner_brackets("\\underline{a {b} c}", "a b c")]
    #[case::url("\\url{https://example.org} ok", "https://example.org ok")]
    #[case::caption("\\caption{A cat}", "A cat.")]
    #[case::reference("see \\ref{fig} now", "see 1.0.0 now")]
    #[case::missing_space_after_period("end.Next", "end.Next")]
    #[case::empty("", "")]
    fn plain_text(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(plain(input), expected);
    }

    #[test]
    fn list_items_are_separate_lines() {
        let text = plain("\\item{First} \\item{Second}");
        let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
        assert_eq!(lines, vec!["- First", "- Second"]);
    }

    #[test]
    fn itemize_without_braces() {
        let text = plain("\\begin{itemize}\n\\item One\n\\item Two\n\\end{itemize}");
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(lines, vec!["- One", "- Two"]);
    }

    #[test]
    fn acronyms_feed_later_uses() {
        assert_eq!(
            plain("\\acro{API}{Application Programming Interface}\\ac{API} is"),
            "Application Programming Interface is"
        );
        assert_eq!(plain("\\ac{API} is"), "Text is");
    }

    #[test]
    fn acronyms_defined_inside_arguments_stay_in_document() {
        let doc = LatexDocument::parse("\\emph{\\acro{A}{Alpha}} \\ac{A}").unwrap();
        assert_eq!(doc.to_plain_text().unwrap(), "Alpha");
    }

    #[test]
    fn acronyms_do_not_persist_across_documents() {
        plain("\\acro{API}{Interface}");
        assert_eq!(plain("\\ac{API}"), "Text");
    }

    #[test]
    fn unescaped_quote_keeps_straight_replacement() {
        let doc = LatexDocument::parse("say \"hi").unwrap();
        let quote = doc
            .ordered_switches()
            .unwrap()
            .iter()
            .find(|s| s.context() == Context::QuotationMarks)
            .unwrap();
        assert_eq!(quote.start(), 4);
        assert_eq!(quote.replacement(), Some("\""));
    }

    #[test]
    fn spans_of_a_title() {
        insta::assert_snapshot!(dump("\\title{Test} ok"), @r#"
        MarkupCommand "\\title{"
        MarkupContent "Test" -> "\n\nTest.\n"
        MarkupCommand "}"
        Space " "
        Text "ok"
        "#);
    }

    #[test]
    fn back_to_back_commands_share_a_span() {
        insta::assert_snapshot!(dump("a\\%\\%b"), @r#"
        Text "a"
        MarkupCommand "\\%\\%" -> "%%"
        Text "b"
        "#);
    }

    #[test]
    fn multiple_arguments_are_collected() {
        struct Record(std::rc::Rc<std::cell::RefCell<Vec<(String, Vec<String>)>>>);
        impl LatexPackage for Record {
            fn on_command(&mut self, name: &str, parameters: &[String]) -> Option<String> {
                self.0
                    .borrow_mut()
                    .push((name.to_string(), parameters.to_vec()));
                None
            }
        }

        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut registry = PackageRegistry::default();
        registry.register(Record(seen.clone()));
        let mut doc =
            LatexDocument::with_registry("\\frac{a}[b]{ c }", Options::default(), registry);
        doc.scan().unwrap();

        assert_eq!(
            seen.borrow().as_slice(),
            &[(
                "\\frac".to_string(),
                vec!["a".to_string(), "b".to_string(), "c".to_string()]
            )]
        );
        assert_eq!(doc.to_plain_text().unwrap(), "");
    }

    #[test]
    fn annotated_text_maps_back_to_source() {
        let doc = LatexDocument::parse("Hi \\textbf{you}!").unwrap();
        let annotated = doc.to_annotated_text().unwrap();
        assert_eq!(annotated.plain_text(), "Hi you!");
        assert_eq!(annotated.original_position(0), 0);
        assert_eq!(annotated.original_position(3), 11);
        assert_eq!(annotated.original_position(6), 15);
        assert_eq!(annotated.nodes().len(), 6);
    }

    #[test]
    fn plain_text_in_range() {
        let doc = LatexDocument::parse("one \\textbf{two} three").unwrap();
        assert_eq!(doc.to_plain_text_in(4..16).unwrap(), "two");
        assert_eq!(doc.to_plain_text_in(17..22).unwrap(), "three");
    }

    #[rstest]
    #[case::content("\\textbf{abc", '}', "1:11 (10)")]
    #[case::bracket_at_end("\\textbf{", '}', "1:8 (7)")]
    #[case::optional("\\url[abc", ']', "1:8 (7)")]
    #[case::math("x {abc", '}', "1:6 (5)")]
    fn unclosed_brackets_fail(
        #[case] input: &str,
        #[case] expected: char,
        #[case] location: &str,
    ) {
        let err = LatexDocument::parse(input).unwrap_err();
        assert_eq!(err.locations(), vec![location]);
        match err.root_cause() {
            Error::UnclosedBracket { expected: found } => assert_eq!(*found, expected),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn nested_errors_keep_both_locations() {
        let err = LatexDocument::parse("\\emph[{x]").unwrap_err();
        assert_eq!(err.locations(), vec!["1:9 (8)", "1:2 (1)"]);
        assert!(matches!(
            err.root_cause(),
            Error::UnclosedBracket { expected: '}' }
        ));
    }

    #[test]
    fn nesting_is_bounded() {
        let opts = Options::default().with_max_nesting(1);
        let err = LatexDocument::parse_with_options("{ {x} }", opts).unwrap_err();
        assert!(matches!(err.root_cause(), Error::NestingTooDeep(1)));
    }

    #[test]
    fn projections_need_a_scan() {
        let mut doc = LatexDocument::new("text");
        assert!(!doc.is_scanned());
        assert!(matches!(doc.to_plain_text(), Err(Error::NotScanned)));
        assert!(matches!(doc.to_annotated_text(), Err(Error::NotScanned)));
        doc.scan().unwrap();
        assert_eq!(doc.to_plain_text().unwrap(), "text");
        assert!(matches!(doc.scan(), Err(Error::AlreadyScanned)));
    }

    #[test]
    fn custom_quotes() {
        let opts = Options::default().with_quotes("«»");
        let doc = LatexDocument::parse_with_options("\"`oui\"' \\textit{non}", opts).unwrap();
        assert_eq!(doc.to_plain_text().unwrap(), "«oui» «non»");
    }

    #[test]
    fn highlighted_output_contains_every_part() {
        let doc = LatexDocument::parse("a \\textbf{b}").unwrap();
        let mut out = Vec::new();
        doc.write_highlighted(&mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("\\textbf{"));
        assert!(printed.contains('b'));
        assert!(printed.ends_with('\n'));
    }
}
