//! Frontend interfaces: abstract contracts for language frontends and their
//! parsers (§4.6). No implementation lives here; these are the collaborators
//! a language frontend plugs in to hand this crate a populated [`IR`].

use crate::ir::IR;
use crate::module::Module;
use crate::types::TypeSystem;
use crate::value::Location;
use crate::error::FrontendError;

/// A position spanning source text, as a frontend's lexer/parser would track
/// it, distinct from [`Location`], which is what the IR attaches to values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: String,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Self {
        Self { file: file.into(), start_line, start_column, end_line, end_column }
    }

    /// Converts to an IR [`Location`]: the start position becomes `line`/
    /// `column`, the end position becomes `end_line`/`end_column`.
    pub fn to_location(&self) -> Location {
        Location::new(self.file.clone(), self.start_line, self.start_column)
            .with_end(self.end_line, self.end_column)
    }
}

/// Formats a diagnostic the way every trait in this module does:
/// `"file:line:column: message"` when a location is known, or the bare
/// message otherwise.
pub fn format_diagnostic(message: &str, location: Option<&SourceLocation>) -> String {
    match location {
        Some(loc) => format!("{}:{}:{}: {}", loc.file, loc.start_line, loc.start_column, message),
        None => message.to_string(),
    }
}

/// An AST node a frontend hands to its [`AstVisitor`]: a source location and
/// a list of children, generic over the frontend's own node representation.
pub trait Ast {
    fn location(&self) -> Option<&SourceLocation>;
    fn children(&self) -> Vec<&Self>;
}

/// Parses source text into a frontend-defined AST. Owns its own diagnostic
/// log, separate from the [`Frontend`] that drives it.
///
/// Both methods are contract violations when not overridden: a frontend
/// crate that hasn't implemented parsing yet gets a fatal, not a silent
/// no-op.
pub trait Parser {
    type Node: Ast;

    fn parse_file(&mut self, _path: &str) -> Result<Self::Node, FrontendError> {
        Err(FrontendError::NotImplemented("Parser::parse_file"))
    }

    fn parse_string(&mut self, _content: &str, _path: &str) -> Result<Self::Node, FrontendError> {
        Err(FrontendError::NotImplemented("Parser::parse_string"))
    }

    fn errors(&self) -> &[String];
    fn warnings(&self) -> &[String];

    fn add_error(&mut self, message: &str, location: Option<&SourceLocation>) {
        self.push_error(format_diagnostic(message, location));
    }

    fn add_warning(&mut self, message: &str, location: Option<&SourceLocation>) {
        self.push_warning(format_diagnostic(message, location));
    }

    fn push_error(&mut self, message: String);
    fn push_warning(&mut self, message: String);
}

/// Walks a frontend's AST, emitting IR entities through the construction API
/// (§4.1) as it goes. Holds the shared [`IR`], the module currently being
/// built, and the [`TypeSystem`] it shares with `ir`.
pub trait AstVisitor<N: Ast> {
    fn ir(&self) -> &IR;
    fn ir_mut(&mut self) -> &mut IR;
    fn current_module(&self) -> Option<&str>;
    fn set_current_module(&mut self, name: Option<String>);
    fn type_system(&self) -> &TypeSystem;

    fn errors(&self) -> &[String];
    fn warnings(&self) -> &[String];

    /// The one genuinely abstract operation: every concrete visitor must
    /// define what visiting a node does.
    fn visit(&mut self, _node: &N) -> Result<(), FrontendError> {
        Err(FrontendError::NotImplemented("AstVisitor::visit"))
    }

    fn add_error(&mut self, message: &str, location: Option<&SourceLocation>) {
        self.push_error(format_diagnostic(message, location));
    }

    fn add_warning(&mut self, message: &str, location: Option<&SourceLocation>) {
        self.push_warning(format_diagnostic(message, location));
    }

    fn push_error(&mut self, message: String);
    fn push_warning(&mut self, message: String);
}

/// Binds a [`Parser`] to an [`IR`] and turns source text into [`Module`]s.
/// Aggregates its own diagnostics with its parser's.
pub trait Frontend {
    type P: Parser;

    fn ir(&self) -> &IR;
    fn ir_mut(&mut self) -> &mut IR;
    fn parser(&self) -> &Self::P;
    fn parser_mut(&mut self) -> &mut Self::P;

    fn errors(&self) -> &[String];
    fn warnings(&self) -> &[String];

    fn create_module(&mut self, _name: &str) -> Result<Module, FrontendError> {
        Err(FrontendError::NotImplemented("Frontend::create_module"))
    }

    fn process_file(&mut self, _path: &str) -> Result<Module, FrontendError> {
        Err(FrontendError::NotImplemented("Frontend::process_file"))
    }

    fn process_string(&mut self, _content: &str, _path: &str) -> Result<Module, FrontendError> {
        Err(FrontendError::NotImplemented("Frontend::process_string"))
    }

    fn add_error(&mut self, message: &str, location: Option<&SourceLocation>) {
        self.push_error(format_diagnostic(message, location));
    }

    fn add_warning(&mut self, message: &str, location: Option<&SourceLocation>) {
        self.push_warning(format_diagnostic(message, location));
    }

    fn push_error(&mut self, message: String);
    fn push_warning(&mut self, message: String);

    /// Aggregates this frontend's own errors with its parser's.
    fn has_errors(&self) -> bool {
        !self.errors().is_empty() || !self.parser().errors().is_empty()
    }

    fn all_errors(&self) -> Vec<String> {
        self.errors().iter().chain(self.parser().errors()).cloned().collect()
    }

    fn all_warnings(&self) -> Vec<String> {
        self.warnings().iter().chain(self.parser().warnings()).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_location_converts_start_and_end_positions() {
        let loc = SourceLocation::new("a.seen", 3, 5, 4, 1);
        let ir_loc = loc.to_location();
        assert_eq!(ir_loc.file, "a.seen");
        assert_eq!(ir_loc.line, 3);
        assert_eq!(ir_loc.column, 5);
        assert_eq!(ir_loc.end_line, Some(4));
        assert_eq!(ir_loc.end_column, Some(1));
    }

    #[test]
    fn diagnostic_format_matches_file_line_column_message() {
        let loc = SourceLocation::new("a.seen", 10, 2, 10, 2);
        assert_eq!(format_diagnostic("bad token", Some(&loc)), "a.seen:10:2: bad token");
        assert_eq!(format_diagnostic("bad token", None), "bad token");
    }

    struct NullParser {
        errors: Vec<String>,
        warnings: Vec<String>,
    }

    struct NullNode;
    impl Ast for NullNode {
        fn location(&self) -> Option<&SourceLocation> {
            None
        }
        fn children(&self) -> Vec<&Self> {
            Vec::new()
        }
    }

    impl Parser for NullParser {
        type Node = NullNode;

        fn errors(&self) -> &[String] {
            &self.errors
        }
        fn warnings(&self) -> &[String] {
            &self.warnings
        }
        fn push_error(&mut self, message: String) {
            self.errors.push(message);
        }
        fn push_warning(&mut self, message: String) {
            self.warnings.push(message);
        }
    }

    #[test]
    fn unimplemented_parser_methods_are_fatal_contract_violations() {
        let mut parser = NullParser { errors: Vec::new(), warnings: Vec::new() };
        let err = parser.parse_file("missing.seen").unwrap_err();
        assert_eq!(err, FrontendError::NotImplemented("Parser::parse_file"));
    }

    #[test]
    fn add_error_formats_with_location() {
        let mut parser = NullParser { errors: Vec::new(), warnings: Vec::new() };
        let loc = SourceLocation::new("a.seen", 1, 1, 1, 1);
        parser.add_error("oops", Some(&loc));
        assert_eq!(parser.errors(), &["a.seen:1:1: oops".to_string()]);
    }
}
