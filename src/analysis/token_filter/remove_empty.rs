//! Remove empty filter implementation.
//!
//! # Examples
//!
//! ```
//! use veraz::analysis::token_filter::Filter;
//! use veraz::analysis::token_filter::remove_empty::RemoveEmptyFilter;
//! use veraz::analysis::token::Token;
//!
//! let filter = RemoveEmptyFilter::new();
//! let tokens = vec![
//!     Token::new("hola", 0),
//!     Token::new("", 1),
//!     Token::new("de", 2).stop(),
//!     Token::new("mundo", 3)
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[0].text, "hola");
//! assert_eq!(result[1].text, "mundo");
//! ```

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that removes empty and stopped tokens from the stream.
///
/// Placed at the end of the pipeline so the joined output never contains
/// doubled spaces or words marked by earlier filters.
#[derive(Clone, Debug, Default)]
pub struct RemoveEmptyFilter;

impl RemoveEmptyFilter {
    /// Create a new remove empty filter.
    pub fn new() -> Self {
        RemoveEmptyFilter
    }
}

impl Filter for RemoveEmptyFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens: Vec<Token> = tokens
            .filter(|token| !token.is_stopped() && !token.text.is_empty())
            .collect();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "remove_empty"
    }
}
