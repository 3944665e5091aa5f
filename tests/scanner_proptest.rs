//! Property-based tests for the LaTeX scanner
//!
//! Whatever the input, a successful scan covers every character exactly once,
//! never leaves two neighbouring spans with the same context, and its
//! projections agree with each other. Input with balanced brackets always
//! scans; an unclosed group is the only way a scan fails.

use detex_map::{Error, LatexDocument, SourceText};
use proptest::prelude::*;

const FRAGMENTS: &[&str] = &[
    "word", "Text", " ", "  ", "\n", "\n\n", "\t", ".", ",", "%", "% note\n", "{", "}", "[", "]",
    "\"", "\"`", "\"'", "\\", "\\,", "\\\\", "\\%", "\\euro", "\\EUR{", "\\section{",
    "\\section*{", "\\textbf{", "\\textit{", "\\item ", "\\item{", "\\acro{A}{Alpha}",
    "\\ac{A}", "\\ref{x}", "\\label{y}", "\\url[o]{", "ä", "€",
];

/// Pieces that never open or close a bracket on their own
const LEAVES: &[&str] = &[
    "word", "Text", " ", "  ", "\n", "\n\n", ".", ",", "% note\n", "\"", "\"`", "\"'", "\\,",
    "\\\\", "\\%", "\\euro", "\\item ", "\\ac{A}", "ä", "€",
];

/// Free mix of fragments, brackets may or may not match
fn latex_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS.to_vec()), 0..24)
        .prop_map(|parts| parts.concat())
}

/// Documents whose groups and arguments are all closed
fn balanced_strategy() -> impl Strategy<Value = String> {
    let leaf = prop::sample::select(LEAVES.to_vec()).prop_map(str::to_string);
    leaf.prop_recursive(4, 48, 4, |inner| {
        let body = prop::collection::vec(inner, 0..4).prop_map(|parts| parts.concat());
        prop_oneof![
            body.clone(),
            body.clone().prop_map(|b| format!("{{{b}}}")),
            body.clone().prop_map(|b| format!("\\textbf{{{b}}}")),
            body.clone().prop_map(|b| format!("\\section*{{{b}}}")),
            (body.clone(), body).prop_map(|(o, b)| format!("\\url[{o}]{{{b}}}")),
        ]
    })
}

/// Text, quotes and bare brackets without any command or comment
fn brace_strategy() -> impl Strategy<Value = String> {
    r#"[a-z {}\[\]"`'\n.]{0,40}"#
}

/// Math groups still open at the end; a `}` outside any group is plain text
fn open_groups(input: &str) -> usize {
    input.chars().fold(0, |depth: usize, c| match c {
        '{' => depth + 1,
        '}' => depth.saturating_sub(1),
        _ => depth,
    })
}

fn assert_covers(doc: &LatexDocument, input: &str) -> Result<(), TestCaseError> {
    let spans = doc.spans().unwrap();
    let joined: String = spans.iter().map(|(_, text)| *text).collect();
    prop_assert_eq!(joined, input);

    for pair in spans.windows(2) {
        prop_assert_ne!(pair[0].0, pair[1].0);
    }

    let switches = doc.ordered_switches().unwrap();
    prop_assert_eq!(switches[0].start(), 0);
    prop_assert!(switches.windows(2).all(|w| w[0].start() < w[1].start()));
    Ok(())
}

proptest! {
    #[test]
    fn scan_covers_input_without_adjacent_same_context(input in latex_strategy()) {
        match LatexDocument::parse(&input) {
            Ok(doc) => assert_covers(&doc, &input)?,
            Err(err) => prop_assert!(
                matches!(err.root_cause(), Error::UnclosedBracket { .. }),
                "unexpected error {err:?}"
            ),
        }
    }

    #[test]
    fn balanced_documents_always_scan(input in balanced_strategy()) {
        let doc = LatexDocument::parse(&input);
        prop_assert!(doc.is_ok(), "{input:?} failed with {:?}", doc.as_ref().err());
        if let Ok(doc) = doc {
            assert_covers(&doc, &input)?;
        }
    }

    #[test]
    fn only_open_groups_fail(input in brace_strategy()) {
        match LatexDocument::parse(&input) {
            Ok(doc) => {
                prop_assert_eq!(open_groups(&input), 0, "{:?} should fail", input);
                assert_covers(&doc, &input)?;
            }
            Err(err) => {
                prop_assert!(open_groups(&input) > 0, "{input:?} failed with {err:?}");
                let is_unclosed_brace = matches!(
                    err.root_cause(),
                    Error::UnclosedBracket { expected: '}' }
                );
                prop_assert!(is_unclosed_brace);
            }
        }
    }

    #[test]
    fn projections_agree(input in prop_oneof![latex_strategy(), balanced_strategy()]) {
        if let Ok(doc) = LatexDocument::parse(&input) {
            let plain = doc.to_plain_text().unwrap();
            let annotated = doc.to_annotated_text().unwrap();
            let annotated_plain = annotated.plain_text();
            prop_assert_eq!(annotated_plain.trim(), plain.as_str());
            prop_assert_eq!(annotated.source_len(), input.chars().count());
            prop_assert_eq!(doc.to_plain_text_in(0..input.chars().count()).unwrap(), plain);
        }
    }

    #[test]
    fn space_runs_collapse(words in prop::collection::vec("[a-z]{1,6}", 1..8),
                           gaps in prop::collection::vec("[ ]{1,4}", 8)) {
        let mut input = String::new();
        for (i, word) in words.iter().enumerate() {
            if i > 0 {
                input.push_str(&gaps[i - 1]);
            }
            input.push_str(word);
        }

        let doc = LatexDocument::parse(&input).unwrap();
        prop_assert_eq!(doc.to_plain_text().unwrap(), words.join(" "));
    }

    #[test]
    fn locations_count_lines_and_columns(lines in prop::collection::vec("[a-z ]{0,10}", 1..6)) {
        let input = lines.join("\n");
        let source = SourceText::new(&input);

        let mut offset = 0;
        for (line_number, line) in lines.iter().enumerate() {
            for col in 0..=line.chars().count() {
                if offset + col >= input.chars().count() {
                    break;
                }
                prop_assert_eq!(
                    source.index_to_location(offset + col),
                    format!("{}:{} ({})", line_number + 1, col + 1, offset + col)
                );
            }
            offset += line.chars().count() + 1;
        }
    }
}
