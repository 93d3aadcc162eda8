//! Recursive-descent parser for method snippets and companion declarations.
//!
//! The grammar is the pragmatic subset a pasted controller fragment needs:
//! class/interface declarations with `extends`/`implements` clauses, field
//! declarator lists, method signatures with annotated parameters, and
//! annotations with positional or named arguments. Method bodies, field
//! initializers, constructors, and enums are parsed past and dropped.

use super::ast::{
    Annotation, AnnotationArg, AnnotationValue, CompilationUnit, FieldDecl, MethodDecl, ParamDecl,
    TypeDecl, TypeRef,
};
use super::lexer::{self, Token};
use crate::error::GenerateError;

const MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "final",
    "abstract",
    "default",
    "synchronized",
    "native",
    "transient",
    "volatile",
    "strictfp",
];

/// Parses a bare method snippet by wrapping it in a synthetic enclosing
/// class, returning the first method declaration found.
pub(crate) fn parse_method_snippet(source: &str) -> Result<MethodDecl, GenerateError> {
    let wrapped = format!("class Snippet {{ {source} }}");
    let unit = parse_unit(&wrapped)?;
    unit.types
        .into_iter()
        .flat_map(|decl| decl.methods)
        .next()
        .ok_or(GenerateError::MethodNotFound)
}

/// Parses a companion-declarations block into a flat compilation unit; an
/// empty input yields an empty unit. Nested type declarations are lifted to
/// the top level so the pool stays flat.
pub(crate) fn parse_declarations(source: &str) -> Result<CompilationUnit, GenerateError> {
    parse_unit(source)
}

fn parse_unit(source: &str) -> Result<CompilationUnit, GenerateError> {
    let tokens = lexer::tokenize(source)?;
    let mut parser = Parser { tokens, pos: 0 };
    let mut unit = CompilationUnit::default();
    while !parser.at_end() {
        if parser.eat_punct(';') {
            continue;
        }
        parser.parse_type_decl(&mut unit)?;
    }
    Ok(unit)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn peek_ident(&self) -> Option<&str> {
        match self.peek() {
            Some(Token::Ident(text)) => Some(text),
            _ => None,
        }
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expected(&self, what: &str) -> GenerateError {
        let found = self
            .peek()
            .map(Token::describe)
            .unwrap_or_else(|| "end of input".to_string());
        GenerateError::snippet(format!("expected {what}, found {found}"))
    }

    fn eat_punct(&mut self, c: char) -> bool {
        if self.peek() == Some(&Token::Punct(c)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, c: char) -> Result<(), GenerateError> {
        if self.eat_punct(c) {
            Ok(())
        } else {
            Err(self.expected(&format!("'{c}'")))
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.peek_ident() == Some(keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_modifier(&mut self) -> bool {
        match self.peek_ident() {
            Some(ident) if MODIFIERS.contains(&ident) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn expect_ident(&mut self, what: &str) -> Result<String, GenerateError> {
        match self.peek() {
            Some(Token::Ident(text)) => {
                let text = text.clone();
                self.pos += 1;
                Ok(text)
            }
            _ => Err(self.expected(what)),
        }
    }

    fn parse_type_decl(&mut self, unit: &mut CompilationUnit) -> Result<(), GenerateError> {
        loop {
            if self.peek() == Some(&Token::Punct('@')) {
                // type-level annotations carry nothing the engine needs
                self.parse_annotation()?;
            } else if !self.eat_modifier() {
                break;
            }
        }
        self.parse_type_decl_tail(unit)
    }

    /// Parses a type declaration starting at its `class`/`interface`/`enum`
    /// keyword (annotations and modifiers already consumed).
    fn parse_type_decl_tail(&mut self, unit: &mut CompilationUnit) -> Result<(), GenerateError> {
        if self.eat_keyword("enum") {
            return self.skip_enum();
        }
        let is_interface = if self.eat_keyword("interface") {
            true
        } else if self.eat_keyword("class") {
            false
        } else {
            return Err(self.expected("a class or interface declaration"));
        };
        let name = self.expect_ident("a type name")?;
        if self.peek() == Some(&Token::Punct('<')) {
            self.skip_balanced('<', '>')?;
        }

        let mut extends = Vec::new();
        let mut implements = Vec::new();
        if self.eat_keyword("extends") {
            extends = self.parse_type_name_list()?;
        }
        if self.eat_keyword("implements") {
            implements = self.parse_type_name_list()?;
        }

        let mut decl = TypeDecl {
            name,
            is_interface,
            extends,
            implements,
            fields: Vec::new(),
            methods: Vec::new(),
        };
        self.expect_punct('{')?;
        while !self.eat_punct('}') {
            if self.at_end() {
                return Err(self.expected("a member or '}'"));
            }
            self.parse_member(&mut decl, unit)?;
        }
        unit.types.push(decl);
        Ok(())
    }

    fn parse_type_name_list(&mut self) -> Result<Vec<String>, GenerateError> {
        let mut names = vec![self.parse_type_ref()?.simple_name().to_string()];
        while self.eat_punct(',') {
            names.push(self.parse_type_ref()?.simple_name().to_string());
        }
        Ok(names)
    }

    fn parse_member(
        &mut self,
        decl: &mut TypeDecl,
        unit: &mut CompilationUnit,
    ) -> Result<(), GenerateError> {
        if self.eat_punct(';') {
            return Ok(());
        }

        let mut annotations = Vec::new();
        loop {
            if self.peek() == Some(&Token::Punct('@')) {
                annotations.push(self.parse_annotation()?);
            } else if !self.eat_modifier() {
                break;
            }
        }

        // nested type declaration: lift it into the unit
        if matches!(self.peek_ident(), Some("class" | "interface" | "enum")) {
            return self.parse_type_decl_tail(unit);
        }

        // instance or static initializer block
        if self.peek() == Some(&Token::Punct('{')) {
            return self.skip_balanced('{', '}');
        }

        // generic method type parameters, e.g. `<T> T get()`
        if self.peek() == Some(&Token::Punct('<')) {
            self.skip_balanced('<', '>')?;
        }

        let ty = self.parse_type_ref()?;

        // `Name(` with no member name is a constructor; contributes nothing
        if self.peek() == Some(&Token::Punct('(')) {
            self.skip_balanced('(', ')')?;
            self.skip_throws()?;
            self.skip_method_body()?;
            return Ok(());
        }

        let name = self.expect_ident("a member name")?;

        if self.eat_punct('(') {
            let params = self.parse_params()?;
            self.skip_throws()?;
            self.skip_method_body()?;
            decl.methods.push(MethodDecl {
                name,
                return_type: ty,
                annotations,
                params,
            });
            return Ok(());
        }

        // field declarator list
        decl.fields.push(FieldDecl {
            name,
            ty: ty.clone(),
        });
        loop {
            if self.eat_punct('=') {
                self.skip_initializer()?;
            }
            if self.eat_punct(',') {
                let next = self.expect_ident("a field name")?;
                decl.fields.push(FieldDecl {
                    name: next,
                    ty: ty.clone(),
                });
                continue;
            }
            self.expect_punct(';')?;
            return Ok(());
        }
    }

    /// Parses a parameter list, the opening `(` already consumed.
    fn parse_params(&mut self) -> Result<Vec<ParamDecl>, GenerateError> {
        let mut params = Vec::new();
        if self.eat_punct(')') {
            return Ok(params);
        }
        loop {
            let mut annotations = Vec::new();
            loop {
                if self.peek() == Some(&Token::Punct('@')) {
                    annotations.push(self.parse_annotation()?);
                } else if !self.eat_keyword("final") {
                    break;
                }
            }
            let ty = self.parse_type_ref()?;
            // varargs ellipsis
            while self.eat_punct('.') {}
            let name = self.expect_ident("a parameter name")?;
            params.push(ParamDecl {
                name,
                ty,
                annotations,
            });
            if self.eat_punct(',') {
                continue;
            }
            self.expect_punct(')')?;
            return Ok(params);
        }
    }

    /// Parses a type reference into its normalized raw text: a qualified
    /// name, optional balanced generics, optional array suffixes.
    fn parse_type_ref(&mut self) -> Result<TypeRef, GenerateError> {
        let mut raw = self.expect_ident("a type")?;
        while self.peek() == Some(&Token::Punct('.'))
            && matches!(self.peek_at(1), Some(Token::Ident(_)))
        {
            self.pos += 1;
            let segment = self.expect_ident("a type segment")?;
            raw.push('.');
            raw.push_str(&segment);
        }
        if self.peek() == Some(&Token::Punct('<')) {
            self.capture_balanced_angles(&mut raw)?;
        }
        while self.peek() == Some(&Token::Punct('['))
            && self.peek_at(1) == Some(&Token::Punct(']'))
        {
            self.pos += 2;
            raw.push_str("[]");
        }
        Ok(TypeRef::new(raw))
    }

    fn capture_balanced_angles(&mut self, raw: &mut String) -> Result<(), GenerateError> {
        let mut depth = 0usize;
        loop {
            let Some(token) = self.next() else {
                return Err(self.expected("'>'"));
            };
            match &token {
                Token::Punct('<') => {
                    depth += 1;
                    raw.push('<');
                }
                Token::Punct('>') => {
                    depth = depth.saturating_sub(1);
                    raw.push('>');
                    if depth == 0 {
                        return Ok(());
                    }
                }
                other => render_token(raw, other),
            }
        }
    }

    fn parse_annotation(&mut self) -> Result<Annotation, GenerateError> {
        self.expect_punct('@')?;
        let mut name = self.expect_ident("an annotation name")?;
        // qualified annotation names reduce to the simple name
        while self.peek() == Some(&Token::Punct('.'))
            && matches!(self.peek_at(1), Some(Token::Ident(_)))
        {
            self.pos += 1;
            name = self.expect_ident("an annotation name segment")?;
        }

        let mut args = Vec::new();
        if self.eat_punct('(') && !self.eat_punct(')') {
            loop {
                args.push(self.parse_annotation_arg()?);
                if self.eat_punct(',') {
                    continue;
                }
                self.expect_punct(')')?;
                break;
            }
        }
        Ok(Annotation { name, args })
    }

    fn parse_annotation_arg(&mut self) -> Result<AnnotationArg, GenerateError> {
        let name = if matches!(self.peek(), Some(Token::Ident(_)))
            && self.peek_at(1) == Some(&Token::Punct('='))
        {
            let attr = self.expect_ident("an attribute name")?;
            self.pos += 1; // '='
            Some(attr)
        } else {
            None
        };
        let value = self.parse_annotation_value()?;
        Ok(AnnotationArg { name, value })
    }

    /// Captures an annotation argument value: everything up to a depth-0 `,`
    /// or `)`. A lone string literal stays a string; anything else keeps its
    /// raw text.
    fn parse_annotation_value(&mut self) -> Result<AnnotationValue, GenerateError> {
        let mut captured: Vec<Token> = Vec::new();
        let mut depth = 0usize;
        loop {
            match self.peek() {
                None => return Err(self.expected("an annotation value")),
                Some(Token::Punct(',' | ')')) if depth == 0 => break,
                Some(Token::Punct('(' | '{' | '[')) => depth += 1,
                Some(Token::Punct(')' | '}' | ']')) => depth = depth.saturating_sub(1),
                _ => {}
            }
            if let Some(token) = self.next() {
                captured.push(token);
            }
        }
        match captured.as_slice() {
            [] => Err(self.expected("an annotation value")),
            [Token::Str(text)] => Ok(AnnotationValue::Str(text.clone())),
            tokens => {
                let mut raw = String::new();
                for token in tokens {
                    render_token(&mut raw, token);
                }
                Ok(AnnotationValue::Raw(raw))
            }
        }
    }

    fn skip_throws(&mut self) -> Result<(), GenerateError> {
        if self.eat_keyword("throws") {
            loop {
                self.parse_type_ref()?;
                if !self.eat_punct(',') {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Skips a `{ ... }` body or the `;` of an abstract/interface method.
    fn skip_method_body(&mut self) -> Result<(), GenerateError> {
        if self.peek() == Some(&Token::Punct('{')) {
            self.skip_balanced('{', '}')
        } else {
            self.expect_punct(';')
        }
    }

    /// Skips a field initializer up to a depth-0 `,` or `;`, leaving the
    /// delimiter in place. Angle brackets count toward depth so generic
    /// constructor calls survive.
    fn skip_initializer(&mut self) -> Result<(), GenerateError> {
        let mut depth = 0usize;
        loop {
            match self.peek() {
                None => return Err(self.expected("';'")),
                Some(Token::Punct(',' | ';')) if depth == 0 => return Ok(()),
                Some(Token::Punct('(' | '{' | '[' | '<')) => depth += 1,
                Some(Token::Punct(')' | '}' | ']' | '>')) => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.pos += 1;
        }
    }

    fn skip_enum(&mut self) -> Result<(), GenerateError> {
        self.expect_ident("an enum name")?;
        if self.eat_keyword("implements") {
            self.parse_type_name_list()?;
        }
        self.skip_balanced('{', '}')
    }

    fn skip_balanced(&mut self, open: char, close: char) -> Result<(), GenerateError> {
        self.expect_punct(open)?;
        let mut depth = 1usize;
        while depth > 0 {
            match self.next() {
                None => return Err(self.expected(&format!("'{close}'"))),
                Some(Token::Punct(c)) if c == open => depth += 1,
                Some(Token::Punct(c)) if c == close => depth -= 1,
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// Appends a token's source form, separating adjacent words with a space.
fn render_token(raw: &mut String, token: &Token) {
    match token {
        Token::Ident(text) | Token::Atom(text) => {
            if raw.ends_with(|c: char| c.is_alphanumeric() || c == '_') {
                raw.push(' ');
            }
            raw.push_str(text);
        }
        Token::Str(text) => {
            raw.push('"');
            raw.push_str(text);
            raw.push('"');
        }
        Token::Punct(c) => raw.push(*c),
    }
}
