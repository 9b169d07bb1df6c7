// marl-parser - Reader, value model and printer for the marl language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # marl-parser
//!
//! Lexer, parser and printer for the marl language, together with the
//! `MarlVal` value model they produce and consume.

pub mod keyword;
pub mod lexer;
pub mod map;
pub mod parser;
pub mod printer;
pub mod stack;
pub mod symbol;
pub mod value;

pub use im::Vector;
pub use keyword::Keyword;
pub use lexer::{Lexer, LexerError, Token};
pub use map::MarlMap;
pub use parser::{ParseError, Parser, read, read_all, strip_comments};
pub use printer::{pr_seq, pr_str};
pub use stack::ensure_sufficient_stack;
pub use symbol::Symbol;
pub use value::{MarlAtom, MarlFn, MarlNativeFn, MarlVal, Meta};
