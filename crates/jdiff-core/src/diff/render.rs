//! Text rendering of a [`Diff`] tree.
//!
//! Every entry starts on its own line with a sign column (`' '`, `-` or `+`),
//! a space, and the indentation of its nesting level. Multi-line values repeat
//! the sign and indentation on each of their rows. Nesting adds four columns
//! for the value of a diff and four more for the entries of an object or
//! array, so object keys sit eight columns deeper than their parent.

use super::{ArrayEntry, Diff, KeyChange, ObjectEntry, Sign};
use crate::Value;

const INDENT: usize = 4;
const ROOT_PREFIX: &str = "  ";

const COLOR_RESET: &str = "\u{1b}[0m";
const COLOR_RED: &str = "\u{1b}[31m";
const COLOR_GREEN: &str = "\u{1b}[32m";

/// Configuration toggles for diff rendering.
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderConfig {
    color: bool,
}

impl RenderConfig {
    /// Constructs a configuration with default settings (no ANSI color).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables ANSI color output.
    ///
    /// ```
    /// # use jdiff_core::{DiffOptions, RenderConfig, Value};
    /// let lhs = Value::from_json_str("[1]")?;
    /// let rhs = Value::from_json_str("[2]")?;
    /// let diff = lhs.diff(&rhs, &DiffOptions::default());
    /// let text = diff.render(&RenderConfig::new().with_color(true));
    /// assert!(text.contains("\u{1b}[31m-         1,\u{1b}[0m\n"));
    /// # Ok::<(), jdiff_core::LoadError>(())
    /// ```
    #[must_use]
    pub fn with_color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    /// Indicates whether color output is enabled.
    #[must_use]
    pub fn color_enabled(self) -> bool {
        self.color
    }
}

pub(super) fn render_document(diff: &Diff, config: &RenderConfig) -> String {
    let mut renderer = Renderer::default();
    renderer.diff(diff, 0);

    let mut output = match diff {
        // Root kinds differ: both documents are dumped and no line precedes them.
        Diff::TypeChanged { .. } => renderer.out.trim_start_matches('\n').to_string(),
        _ => {
            let mut output = String::with_capacity(renderer.out.len() + 3);
            output.push_str(ROOT_PREFIX);
            output.push_str(&renderer.out);
            output
        }
    };
    output.push('\n');

    if config.color_enabled() {
        colorize(&output)
    } else {
        output
    }
}

#[derive(Default)]
struct Renderer {
    out: String,
}

impl Renderer {
    /// Renders `diff` as the value of an entry whose own indentation is `depth`.
    fn diff(&mut self, diff: &Diff, depth: usize) {
        let depth = depth + INDENT;
        match diff {
            Diff::Unchanged(value) => self.out.push_str(&value.to_compact_json()),
            Diff::Changed { removed, added } | Diff::TypeChanged { removed, added } => {
                self.block(&lead(Sign::Removed, depth), removed);
                self.out.push(',');
                self.block(&lead(Sign::Added, depth), added);
            }
            Diff::Object(entries) => self.object(entries, depth),
            Diff::Array(entries) => self.array(entries, depth),
        }
    }

    fn object(&mut self, entries: &[ObjectEntry], depth: usize) {
        self.out.push('{');
        if entries.is_empty() {
            self.out.push('}');
            return;
        }

        let entry_depth = depth + INDENT;
        for (index, entry) in entries.iter().enumerate() {
            if index > 0 {
                self.out.push(',');
            }
            let sign = match &entry.change {
                KeyChange::Common(_) => Sign::Unchanged,
                KeyChange::Removed(_) => Sign::Removed,
                KeyChange::Added(_) => Sign::Added,
            };
            self.out.push_str(&lead(sign, entry_depth));
            self.out.push_str(&Value::String(entry.key.clone()).to_compact_json());
            self.out.push_str(": ");

            let value_lead = lead(sign, entry_depth + INDENT);
            match &entry.change {
                KeyChange::Common(diff) => {
                    if diff.opens_block() {
                        self.out.push_str(&value_lead);
                    }
                    self.diff(diff, entry_depth);
                }
                KeyChange::Removed(value) | KeyChange::Added(value) => {
                    self.inline(&value_lead, value);
                }
            }
        }
        self.close('}', depth);
    }

    fn array(&mut self, entries: &[ArrayEntry], depth: usize) {
        self.out.push('[');
        if entries.is_empty() {
            self.out.push(']');
            return;
        }

        let entry_depth = depth + INDENT;
        for (index, entry) in entries.iter().enumerate() {
            if index > 0 {
                self.out.push(',');
            }
            let entry_lead = lead(entry.sign, entry_depth);
            self.out.push_str(&entry_lead);
            self.inline(&entry_lead, &entry.value);
        }
        self.close(']', depth);
    }

    fn close(&mut self, bracket: char, depth: usize) {
        self.out.push_str(&lead(Sign::Unchanged, depth));
        self.out.push(bracket);
    }

    /// Writes a value that continues the current line: compact values go
    /// right after the cursor, multi-line values start a row per line.
    fn inline(&mut self, lead: &str, value: &Value) {
        if value.is_multi_line() {
            for row in value.to_pretty_json().lines() {
                self.out.push_str(lead);
                self.out.push_str(row);
            }
        } else {
            self.out.push_str(&value.to_compact_json());
        }
    }

    /// Writes a value that always starts on a new line.
    fn block(&mut self, lead: &str, value: &Value) {
        if !value.is_multi_line() {
            self.out.push_str(lead);
        }
        self.inline(lead, value);
    }
}

fn lead(sign: Sign, depth: usize) -> String {
    let mut lead = String::with_capacity(depth + 3);
    lead.push('\n');
    lead.push(sign.as_char());
    lead.push(' ');
    lead.extend(std::iter::repeat(' ').take(depth));
    lead
}

fn colorize(output: &str) -> String {
    let mut colored = String::with_capacity(output.len() + 64);
    for line in output.split_inclusive('\n') {
        let (text, newline) = match line.strip_suffix('\n') {
            Some(text) => (text, "\n"),
            None => (line, ""),
        };
        let color = if text.starts_with('-') {
            Some(COLOR_RED)
        } else if text.starts_with('+') {
            Some(COLOR_GREEN)
        } else {
            None
        };
        match color {
            Some(color) => {
                colored.push_str(color);
                colored.push_str(text);
                colored.push_str(COLOR_RESET);
            }
            None => colored.push_str(text),
        }
        colored.push_str(newline);
    }
    colored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiffOptions;

    fn render(lhs: &str, rhs: &str, options: &DiffOptions) -> String {
        let lhs = Value::from_json_str(lhs).unwrap();
        let rhs = Value::from_json_str(rhs).unwrap();
        lhs.diff(&rhs, options).render(&RenderConfig::default())
    }

    #[test]
    fn equal_scalars_render_once() {
        assert_eq!(render("\"abc\"", "\"abc\"", &DiffOptions::default()), "  \"abc\"\n");
    }

    #[test]
    fn changed_scalars_render_as_pair() {
        assert_eq!(render("1", "2", &DiffOptions::default()), "  \n-     1,\n+     2\n");
    }

    #[test]
    fn empty_containers_render_as_tokens() {
        assert_eq!(render("{}", "{}", &DiffOptions::default()), "  {}\n");
        assert_eq!(render("[]", "[]", &DiffOptions::default()), "  []\n");
    }

    #[test]
    fn root_type_mismatch_dumps_both_documents() {
        let expected = "-     {\n-         \"x\": 1\n-     },\n+     [\n+         1\n+     ]\n";
        assert_eq!(render("{\"x\":1}", "[1]", &DiffOptions::default()), expected);
    }

    #[test]
    fn root_scalar_type_mismatch_has_no_prefix() {
        assert_eq!(render("1", "\"1\"", &DiffOptions::default()), "-     1,\n+     \"1\"\n");
    }

    #[test]
    fn keys_render_sorted() {
        let expected = "  {\n          \"a\": 2,\n          \"b\": 1\n      }\n";
        assert_eq!(render("{\"b\":1,\"a\":2}", "{\"a\":2,\"b\":1}", &DiffOptions::default()), expected);
    }

    #[test]
    fn end_to_end_example() {
        let expected = concat!(
            "  {\n",
            "          \"a\": \n",
            "              [\n",
            "                  1,\n",
            "                  2\n",
            "              ],\n",
            "          \"b\": \n",
            "-             \"x\",\n",
            "+             \"y\"\n",
            "      }\n",
        );
        assert_eq!(
            render("{\"a\":[1,2],\"b\":\"x\"}", "{\"a\":[2,1],\"b\":\"y\"}", &DiffOptions::default()),
            expected
        );
    }

    #[test]
    fn ordered_arrays_render_positional_pairs() {
        let expected = concat!(
            "  [\n",
            "-         1,\n",
            "+         3,\n",
            "          2,\n",
            "-         3,\n",
            "+         1\n",
            "      ]\n",
        );
        assert_eq!(render("[1,2,3]", "[3,2,1]", &DiffOptions::default().keep_array_order()), expected);
    }

    #[test]
    fn multi_line_array_elements_start_with_sign_line() {
        let expected = concat!(
            "  [\n",
            "+         \n",
            "+         {\n",
            "+             \"a\": 1\n",
            "+         }\n",
            "      ]\n",
        );
        assert_eq!(render("[]", "[{\"a\":1}]", &DiffOptions::default()), expected);
    }

    #[test]
    fn removed_key_with_container_value() {
        let expected = concat!(
            "  {\n",
            "-         \"a\": \n",
            "-             [\n",
            "-                 1\n",
            "-             ]\n",
            "      }\n",
        );
        assert_eq!(render("{\"a\":[1]}", "{}", &DiffOptions::default()), expected);
    }

    #[test]
    fn output_ends_with_single_newline() {
        let text = render("{\"a\":{\"b\":[1,{\"c\":null}]}}", "{\"a\":{\"b\":[2]}}", &DiffOptions::default());
        assert!(text.ends_with('\n'));
        assert!(!text.ends_with("\n\n"));
    }

    #[test]
    fn colorize_wraps_signed_lines_only() {
        let colored = colorize("  [\n-         1,\n+         2\n      ]\n");
        assert_eq!(
            colored,
            "  [\n\u{1b}[31m-         1,\u{1b}[0m\n\u{1b}[32m+         2\u{1b}[0m\n      ]\n"
        );
    }
}
