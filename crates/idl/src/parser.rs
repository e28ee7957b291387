//! Recursive-descent parser over the token stream.
//!
//! Recognizes `type NAME = TYPE;` alias statements followed by exactly one
//! `service : { ... }` block. No resolution happens here: alias
//! right-hand sides and method parameter types come out as [`TypeNode`]
//! syntax trees with symbolic `Ref` leaves.

use crate::ast::{MethodKind, Prim, RawMethod, RecordField, TypeNode, VariantAlt};
use crate::error::IdlError;
use crate::lexer::Token;
use std::collections::HashMap;

/// Alias name -> definition. Names are global across the whole text;
/// a duplicate name overwrites the earlier definition.
pub type AliasTable = HashMap<String, TypeNode>;

/// Parse output: the alias table plus the service block's methods in
/// declaration order.
#[derive(Debug, Clone)]
pub struct Interface {
    pub aliases: AliasTable,
    pub methods: Vec<RawMethod>,
}

pub fn parse(tokens: &[Token]) -> Result<Interface, IdlError> {
    let mut p = Parser::new(tokens);

    let mut aliases: AliasTable = HashMap::new();
    while p.is_word("type") {
        p.advance();
        let name = p.take_ident()?;
        p.expect_sym('=')?;
        let ty = p.parse_type()?;
        p.expect_sym(';')?;
        // Last writer wins on duplicate alias names.
        aliases.insert(name, ty);
    }

    p.expect_word("service")?;
    // An optional service name before ':' is tolerated and discarded.
    if !p.is_sym(':') {
        p.take_ident()?;
    }
    p.expect_sym(':')?;
    p.expect_sym('{')?;

    let mut methods = Vec::new();
    while !p.is_sym('}') {
        if p.at_eof() {
            return Err(p.err("expected '}' closing the service block, got end of input"));
        }
        methods.push(p.parse_method()?);
    }
    p.advance();

    Ok(Interface { aliases, methods })
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_at(&self, offset: usize) -> &Token {
        &self.tokens[(self.pos + offset).min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> &Token {
        let t = &self.tokens[self.pos.min(self.tokens.len() - 1)];
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        t
    }

    fn at_eof(&self) -> bool {
        matches!(self.peek(), Token::Eof)
    }

    fn is_sym(&self, c: char) -> bool {
        matches!(self.peek(), Token::Sym(x) if *x == c)
    }

    fn is_word(&self, w: &str) -> bool {
        matches!(self.peek(), Token::Ident(x) if x == w)
    }

    fn err(&self, msg: impl Into<String>) -> IdlError {
        IdlError::parse(msg)
    }

    fn expect_sym(&mut self, c: char) -> Result<(), IdlError> {
        if self.is_sym(c) {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!("expected '{}', got {:?}", c, self.peek())))
        }
    }

    fn expect_word(&mut self, expected: &str) -> Result<(), IdlError> {
        if self.is_word(expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!("expected '{}', got {:?}", expected, self.peek())))
        }
    }

    fn take_ident(&mut self) -> Result<String, IdlError> {
        if let Token::Ident(w) = self.peek().clone() {
            self.advance();
            Ok(w)
        } else {
            Err(self.err(format!("expected identifier, got {:?}", self.peek())))
        }
    }

    // -- Method entries -----------------------------------------

    fn parse_method(&mut self) -> Result<RawMethod, IdlError> {
        let name = self.take_ident()?;
        self.expect_sym(':')?;
        self.expect_sym('(')?;
        let args = self.parse_type_list()?;
        self.expect_sym(')')?;
        self.expect_sym('-')?;
        self.expect_sym('>')?;
        self.expect_sym('(')?;
        let rets = self.parse_type_list()?;
        self.expect_sym(')')?;

        let kind = if self.is_word("query") {
            self.advance();
            MethodKind::Query
        } else {
            MethodKind::Update
        };

        // Tolerate trailing annotations (oneway and friends) without
        // modeling them: discard everything up to the terminating ';'.
        loop {
            if self.is_sym(';') {
                self.advance();
                break;
            }
            if self.at_eof() {
                return Err(self.err("expected ';' after method signature, got end of input"));
            }
            self.advance();
        }

        Ok(RawMethod {
            name,
            kind,
            args,
            rets,
        })
    }

    /// Zero or more comma-separated types, stopping before ')'.
    fn parse_type_list(&mut self) -> Result<Vec<TypeNode>, IdlError> {
        let mut types = Vec::new();
        if self.is_sym(')') {
            return Ok(types);
        }
        loop {
            types.push(self.parse_type()?);
            if self.is_sym(',') {
                self.advance();
                continue;
            }
            break;
        }
        Ok(types)
    }

    // -- Type grammar -------------------------------------------

    fn parse_type(&mut self) -> Result<TypeNode, IdlError> {
        let word = self.take_ident()?;
        match word.as_str() {
            "opt" => Ok(TypeNode::Opt(Box::new(self.parse_type()?))),
            "vec" => Ok(TypeNode::Vec(Box::new(self.parse_type()?))),
            "record" => self.parse_record(),
            "variant" => self.parse_variant(),
            other => match Prim::from_keyword(other) {
                Some(p) => Ok(TypeNode::Prim(p)),
                None => Ok(TypeNode::Ref(other.to_owned())),
            },
        }
    }

    fn parse_record(&mut self) -> Result<TypeNode, IdlError> {
        self.expect_sym('{')?;
        let mut fields = Vec::new();
        while !self.is_sym('}') {
            if self.at_eof() {
                return Err(self.err("expected '}' closing record, got end of input"));
            }
            // `ident : T ;` is a named field; anything else is a bare
            // positional entry keyed by its declaration index.
            let named =
                matches!(self.peek(), Token::Ident(_)) && matches!(self.peek_at(1), Token::Sym(':'));
            let field = if named {
                let name = self.take_ident()?;
                self.expect_sym(':')?;
                let ty = self.parse_type()?;
                RecordField {
                    name,
                    named: true,
                    ty,
                }
            } else {
                let ty = self.parse_type()?;
                RecordField {
                    name: fields.len().to_string(),
                    named: false,
                    ty,
                }
            };
            fields.push(field);
            self.expect_sym(';')?;
        }
        self.advance();
        Ok(TypeNode::Record(fields))
    }

    fn parse_variant(&mut self) -> Result<TypeNode, IdlError> {
        self.expect_sym('{')?;
        let mut alts = Vec::new();
        while !self.is_sym('}') {
            if self.at_eof() {
                return Err(self.err("expected '}' closing variant, got end of input"));
            }
            let name = self.take_ident()?;
            let ty = if self.is_sym(':') {
                self.advance();
                Some(self.parse_type()?)
            } else {
                None
            };
            alts.push(VariantAlt { name, ty });
            self.expect_sym(';')?;
        }
        self.advance();
        Ok(TypeNode::Variant(alts))
    }
}
