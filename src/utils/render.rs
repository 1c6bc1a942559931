//! Text rendering shared by diagnostics: invocations, wanted patterns and
//! invocation listings.

use crate::DiagnosticsConfig;
use crate::Invocation;
use crate::Matcher;
use crate::Value;

/// Joins rendered lines, each on its own indented line.
pub(crate) fn render_lines(lines: &[String]) -> String {
    if lines.is_empty() {
        return "\n    (none)".to_string();
    }
    lines.iter().map(|line| format!("\n    {line}")).collect()
}

pub(crate) fn render_args(args: &[Value]) -> String {
    args.iter()
        .map(|arg| format!("{arg:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `list.add(<any>, "hello")`
pub(crate) fn render_wanted(
    mock_name: &str,
    method: &str,
    matchers: &[Matcher],
) -> String {
    let args = matchers
        .iter()
        .map(|matcher| matcher.description())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{mock_name}.{method}({args})")
}

pub(crate) fn render_invocation(
    invocation: &Invocation,
    diagnostics: &DiagnosticsConfig,
) -> String {
    if diagnostics.show_sequence_numbers {
        format!("#{} {}", invocation.sequence_no(), invocation)
    } else {
        invocation.to_string()
    }
}

/// Renders at most `max_listed_invocations` entries, summarising the rest.
pub(crate) fn render_invocations<'a, I>(
    invocations: I,
    diagnostics: &DiagnosticsConfig,
) -> Vec<String>
where
    I: IntoIterator<Item = &'a Invocation>,
{
    let mut lines = Vec::new();
    let mut omitted = 0usize;
    for invocation in invocations {
        if lines.len() < diagnostics.max_listed_invocations {
            lines.push(render_invocation(invocation, diagnostics));
        } else {
            omitted += 1;
        }
    }
    if omitted > 0 {
        lines.push(format!("... and {omitted} more"));
    }
    lines
}
