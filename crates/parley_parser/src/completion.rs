//! Tab completion over an argument list.

use parley_foundation::Invoker;
use tracing::trace;

use crate::argument::{Argument, ParseFailure};
use crate::context::ParseContext;
use crate::cursor::TokenCursor;

/// Collects suggestions for the argument the last token belongs to.
///
/// Arguments are parsed in order for as long as input remains. Arguments that
/// parse without consuming input still contribute suggestions, since the
/// next token may belong to them. Completion stops at the first argument
/// that fails on visible input.
pub fn complete_arguments(
    arguments: &[Box<dyn Argument>],
    invoker: &dyn Invoker,
    context: &mut dyn ParseContext,
    cursor: &mut TokenCursor,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    for argument in arguments {
        let remaining = cursor.remaining();
        if remaining == 0 {
            break;
        }
        let start = cursor.snapshot();

        match argument.parse(invoker, &mut *context, cursor) {
            Ok(_) if !cursor.has_next() => {
                cursor.restore(start);
                suggestions.extend(argument.complete(invoker, &*context, cursor));
                break;
            }
            Ok(_) => {
                if cursor.remaining() == remaining {
                    suggestions.extend(argument.complete(invoker, &*context, cursor));
                    cursor.restore(start);
                }
            }
            Err(ParseFailure::Fallback(_)) => {
                cursor.restore(start);
                suggestions.extend(argument.complete(invoker, &*context, cursor));
                cursor.restore(start);
            }
            Err(ParseFailure::Error(err)) => {
                cursor.restore(start);
                suggestions.extend(argument.complete(invoker, &*context, cursor));
                cursor.restore(start);
                if !argument.reduced_format().is_empty() {
                    trace!(argument = argument.name(), %err, "completion stopped");
                    break;
                }
            }
        }
    }

    suggestions
}
