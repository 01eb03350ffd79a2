use crate::{
    error::DecodeError,
    token::{Token, TokenCursor, TokenShape},
};
use serde_json::Value as JsonValue;

///
/// TokenBuffer
///
/// In-memory cursor over a flat token vector. The first token is current
/// on construction; advancing past the last token leaves the cursor at end
/// of input.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenBuffer {
    #[must_use]
    pub const fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Flatten a parsed JSON document into tokens.
    #[must_use]
    pub fn from_json(value: &JsonValue) -> Self {
        let mut tokens = Vec::new();
        push_json(&mut tokens, value);

        Self::new(tokens)
    }

    /// Parse JSON text and flatten it. Numbers keep their literal text.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let value: JsonValue = serde_json::from_str(text)?;

        Ok(Self::from_json(&value))
    }

    #[must_use]
    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.position >= self.tokens.len()
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl From<Vec<Token>> for TokenBuffer {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl TokenCursor for TokenBuffer {
    fn current_shape(&self) -> Option<TokenShape> {
        self.current().map(Token::shape)
    }

    fn text(&self) -> Option<&str> {
        self.current().map(Token::text)
    }

    fn next_token(&mut self) -> Result<Option<TokenShape>, DecodeError> {
        if self.position < self.tokens.len() {
            self.position += 1;
        }

        Ok(self.current_shape())
    }
}

fn push_json(tokens: &mut Vec<Token>, value: &JsonValue) {
    match value {
        JsonValue::Null => tokens.push(Token::Null),
        JsonValue::Bool(true) => tokens.push(Token::True),
        JsonValue::Bool(false) => tokens.push(Token::False),
        JsonValue::Number(number) => {
            let text = number.to_string();
            if text.contains(['.', 'e', 'E']) {
                tokens.push(Token::Float(text));
            } else {
                tokens.push(Token::Int(text));
            }
        }
        JsonValue::String(text) => tokens.push(Token::String(text.clone())),
        JsonValue::Array(items) => {
            tokens.push(Token::StartArray);
            for item in items {
                push_json(tokens, item);
            }
            tokens.push(Token::EndArray);
        }
        JsonValue::Object(fields) => {
            tokens.push(Token::StartObject);
            for (name, field) in fields {
                tokens.push(Token::FieldName(name.clone()));
                push_json(tokens, field);
            }
            tokens.push(Token::EndObject);
        }
    }
}
