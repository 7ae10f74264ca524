//! Error rendering using ariadne
//!
//! Sieve errors carry a span but not the expression text, so every renderer
//! takes the source the error came from.

use crate::{Diagnostic, Error, Severity};
use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use std::io::Write;

const SOURCE_ID: &str = "<expression>";

/// Render an error with source annotations to stderr
///
/// # Example
/// ```no_run
/// use sieve::{Context, Engine, render_error};
///
/// let engine = Engine::default();
/// let source = "write('pwned.txt')";
/// if let Err(e) = engine.evaluate(source, &Context::default()) {
///     render_error(&e, source);
/// }
/// ```
pub fn render_error(error: &Error, source: &str) {
    render_error_to_writer(error, source, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(error: &Error, source: &str, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, source, writer, true)
}

/// Render an error to a String (useful for logs, web UIs, etc.)
pub fn render_error_to_string(error: &Error, source: &str) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, source, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes
///
/// This is the same as `render_error_to_string` but without ANSI color codes,
/// making the output easier to compare in tests.
pub fn render_error_to_string_no_color(error: &Error, source: &str) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, source, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &Error,
    source: &str,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    render_diagnostic(&error.to_diagnostic(), source, writer, use_color)
}

fn render_diagnostic(
    diag: &Diagnostic,
    source: &str,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let mut colors = ColorGenerator::new();
    colors.next(); // Skip the first color.

    let kind = match diag.severity {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
        Severity::Info => ReportKind::Advice,
    };

    let mut report = Report::build(kind, (SOURCE_ID, diag.span.0.clone()))
        .with_message(&diag.message)
        .with_config(ariadne::Config::default().with_color(use_color));

    if let Some(code) = &diag.code {
        report = report.with_code(code);
    }

    let color = colors.next();
    report = report.with_label(
        Label::new((SOURCE_ID, diag.span.0.clone()))
            .with_message(&diag.message)
            .with_color(color),
    );

    if let Some(help) = &diag.help {
        report = report.with_help(help);
    }

    report
        .finish()
        .write((SOURCE_ID, Source::from(source)), &mut *writer)
}
