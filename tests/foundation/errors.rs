//! Integration tests for Error types
//!
//! Tests error construction, user-facing text, and diagnostic context.

use parley_foundation::{
    ArgumentError, ArgumentErrorKind, ArgumentLabel, Error, ErrorContext, ErrorKind,
    NO_PERMISSION_MESSAGE, UNEXPECTED_ERROR_MESSAGE,
};

fn page() -> ArgumentLabel {
    ArgumentLabel::new("page", "[page]")
}

// =============================================================================
// Argument Errors
// =============================================================================

#[test]
fn missing_uses_format() {
    let err = ArgumentError::missing(page());
    assert!(err.is_missing());
    assert_eq!(err.render(), "Missing argument: [page]");
}

#[test]
fn invalid_uses_display_name_and_input() {
    let err = ArgumentError::invalid(page().with_display_name("page number"), "x");
    assert_eq!(err.input(), Some("x"));
    assert_eq!(err.render(), "Invalid page number: x");
}

#[test]
fn rejected_is_flagged() {
    let err = ArgumentError::rejected(page(), "-1");
    assert!(err.is_rejected());
    assert_eq!(err.to_string(), "Not allowed for page: -1");
}

#[test]
fn unknown_and_unexpected_have_no_argument() {
    let unknown = ArgumentError::unknown_command("lst");
    assert!(unknown.argument().is_none());
    assert_eq!(unknown.render(), "Unknown command: lst");

    let unexpected = ArgumentError::unexpected("extra");
    assert_eq!(unexpected.render(), "Unexpected argument: extra");
}

#[test]
fn chain_reports_outermost_argument() {
    let err = ArgumentError::invalid(ArgumentLabel::new("inner", "<inner>"), "q")
        .wrapped_by(ArgumentLabel::new("outer", "<outer>"));
    assert_eq!(err.argument().map(|l| &*l.name), Some("inner"));
    assert_eq!(err.root_argument().map(|l| &*l.name), Some("outer"));
    assert_eq!(err.render(), "Invalid outer: q");
}

#[test]
fn wrapping_twice_by_same_label_is_ignored() {
    let label = ArgumentLabel::new("outer", "<outer>");
    let err = ArgumentError::missing(page())
        .wrapped_by(label.clone())
        .wrapped_by(label);
    assert_eq!(err.chain().len(), 2);
}

#[test]
fn custom_message_template() {
    let err = ArgumentError::invalid(page(), "abc").with_message("'{input}' is not a {argument}");
    assert_eq!(err.render(), "'abc' is not a page");
    assert!(matches!(err.kind(), ArgumentErrorKind::Invalid { .. }));
}

// =============================================================================
// Command Errors
// =============================================================================

#[test]
fn user_messages() {
    assert_eq!(Error::no_permission().user_message(), NO_PERMISSION_MESSAGE);
    assert_eq!(Error::failed("Out of stock").user_message(), "Out of stock");
    assert_eq!(
        Error::from(ArgumentError::unexpected("z")).user_message(),
        "Unexpected argument: z"
    );
}

#[test]
fn internal_errors_are_hidden() {
    let err = Error::internal("broken invariant");
    assert!(err.is_unexpected());
    assert_eq!(err.user_message(), UNEXPECTED_ERROR_MESSAGE);
    assert!(format!("{err}").contains("broken invariant"));

    let err = Error::registration("duplicate");
    assert!(err.is_unexpected());
}

#[test]
fn argument_error_accessor() {
    let err = Error::from(ArgumentError::missing(page()));
    assert!(err.as_argument_error().is_some_and(ArgumentError::is_missing));
    assert!(Error::no_permission().as_argument_error().is_none());
    assert!(matches!(err.kind, ErrorKind::Argument(_)));
}

#[test]
fn context_display() {
    let context = ErrorContext::new()
        .with_command("/shop list [player] [page]")
        .with_frame("page")
        .with_value("player", "Bob")
        .with_cursor("1/2");
    let err = Error::failed("nope").with_context(context);
    let text = err.context.map(|c| c.to_string()).unwrap_or_default();
    assert_eq!(
        text,
        "in /shop list [player] [page] argument chain: page context: {player=Bob} cursor: 1/2"
    );
}
