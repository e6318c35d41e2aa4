//! Renders a snippet as a standalone, syntax-highlighted HTML page.

use html_escape::encode_text;
use once_cell::sync::Lazy;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Color, Style as TextStyle, Theme, ThemeSet};
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::models::{Language, Style};

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

/// Full HTML document for `code`.
///
/// Never fails: if the language or theme cannot be loaded the code is
/// emitted escaped but unstyled.
pub fn render(code: &str, language: Language, style: Style, linenos: bool, title: &str) -> String {
    let theme = THEME_SET.themes.get(style.theme_name());

    let lines = theme
        .and_then(|theme| highlight_lines(code, language, theme).ok())
        .unwrap_or_else(|| plain_lines(code));

    let body = if linenos {
        with_line_numbers(&lines)
    } else {
        format!("<div class=\"highlight\"><pre>{}</pre></div>", lines.concat())
    };

    let (background, foreground) = theme
        .map(|theme| {
            (
                theme.settings.background.map(hex).unwrap_or_else(|| "#ffffff".into()),
                theme.settings.foreground.map(hex).unwrap_or_else(|| "#000000".into()),
            )
        })
        .unwrap_or_else(|| ("#ffffff".into(), "#000000".into()));

    document(title, &background, &foreground, &body)
}

fn highlight_lines(code: &str, language: Language, theme: &Theme) -> Result<Vec<String>, syntect::Error> {
    let syntax = SYNTAX_SET
        .find_syntax_by_name(language.syntax_name())
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut lines = Vec::new();
    for line in LinesWithEndings::from(code) {
        let ranges: Vec<(TextStyle, &str)> = highlighter.highlight_line(line, &SYNTAX_SET)?;
        lines.push(styled_line_to_highlighted_html(&ranges[..], IncludeBackground::No)?);
    }
    Ok(lines)
}

fn plain_lines(code: &str) -> Vec<String> {
    LinesWithEndings::from(code)
        .map(|line| encode_text(line).into_owned())
        .collect()
}

fn with_line_numbers(lines: &[String]) -> String {
    let numbers: Vec<String> = (1..=lines.len().max(1)).map(|n| n.to_string()).collect();
    format!(
        concat!(
            "<table class=\"highlighttable\"><tr>",
            "<td class=\"linenos\"><div class=\"linenodiv\"><pre>{}</pre></div></td>",
            "<td class=\"code\"><div class=\"highlight\"><pre>{}</pre></div></td>",
            "</tr></table>"
        ),
        numbers.join("\n"),
        lines.concat()
    )
}

fn document(title: &str, background: &str, foreground: &str, body: &str) -> String {
    let title = encode_text(title);
    let heading = if title.is_empty() {
        String::new()
    } else {
        format!("<h2>{title}</h2>\n\n")
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <title>{title}</title>
  <meta http-equiv="content-type" content="text/html; charset=utf-8">
  <style type="text/css">
body {{ background: {background}; color: {foreground}; }}
pre {{ margin: 0; line-height: 125%; }}
td.linenos {{ padding-right: 10px; color: #888888; user-select: none; }}
  </style>
</head>
<body>
{heading}{body}
</body>
</html>
"#
    )
}

fn hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}
