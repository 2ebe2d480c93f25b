//! Reusable argument types.
//!
//! | Argument | Consumes | Value |
//! |----------|----------|-------|
//! | [`StringArgument`] | one token, or the rest | string |
//! | [`LiteralArgument`] | one keyword | the keyword |
//! | [`IntegerArgument`] | one token | int |
//! | [`NameArgument`] | one known name | canonical name |
//! | [`FixedValueArgument`] | nothing | a fixed value |
//! | [`InvokerNameArgument`] | nothing | the invoking player's name |
//! | [`OptionalArgument`] | like the wrapped argument, or nothing | wrapped value or none |
//! | [`TypedFallback`] | the wrapped or the fallback argument | either value |
//! | [`FirstOfArgument`] | the first alternative that parses | choice |
//! | [`NamedArgument`] | one `name=value` token | wrapped value |

use thiserror::Error;

use parley_foundation::Value;

use crate::argument::Argument;

pub mod fallback;
pub mod first_of;
pub mod fixed;
pub mod integer;
pub mod literal;
pub mod name;
pub mod named;
pub mod optional;
pub mod string;

pub use fallback::TypedFallback;
pub use first_of::FirstOfArgument;
pub use fixed::{FixedValueArgument, InvokerNameArgument};
pub use integer::IntegerArgument;
pub use literal::LiteralArgument;
pub use name::{NameArgument, NameDirectory};
pub use named::NamedArgument;
pub use optional::OptionalArgument;
pub use string::StringArgument;

/// An argument was put together incorrectly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// A fallback argument was used as the fallback of another argument.
    #[error("fallback '{0}' must not be a fallback argument itself")]
    NestedFallback(String),

    /// An alternatives argument was given no alternatives.
    #[error("argument '{0}' needs at least one alternative")]
    NoAlternatives(String),
}

/// Combinators available on every argument.
pub trait ArgumentExt: Argument + Sized + 'static {
    /// Makes the argument optional.
    fn optional(self) -> OptionalArgument {
        OptionalArgument::new(self)
    }

    /// Falls back to `value` if the argument cannot be parsed.
    fn or_default_value(self, value: impl Into<Value>) -> TypedFallback {
        let fallback = FixedValueArgument::new(self.name().to_string(), value);
        TypedFallback::new_unchecked(self, fallback)
    }

    /// Falls back to accepting any single token.
    fn or_any_string(self) -> TypedFallback {
        let fallback = StringArgument::new(self.name().to_string());
        TypedFallback::new_unchecked(self, fallback)
    }

    /// Falls back to the invoking player's name.
    fn or_invoker_name(self) -> TypedFallback {
        let fallback = InvokerNameArgument::new(self.name().to_string());
        TypedFallback::new_unchecked(self, fallback)
    }

    /// Requires the argument to be written as `name=value`.
    fn named(self) -> NamedArgument {
        NamedArgument::new(self)
    }

    /// Boxes the argument for use in argument lists.
    fn boxed(self) -> Box<dyn Argument> {
        Box::new(self)
    }
}

impl<A: Argument + Sized + 'static> ArgumentExt for A {}
