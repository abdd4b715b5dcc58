//! Reader for the navigation script a documentation page ships with.
//!
//! The generator emits one array per menu followed by one handler per menu:
//!
//! ```text
//! var list_up0 = [
//! 'cppad.htm',
//! 'ad.htm'
//! ];
//! function choose_up0(item)
//! { ... }
//! ```
//!
//! Only those two shapes are interpreted. Everything else in the file is
//! tokenized and skipped.

use tracing::debug;

use crate::error::NavError;
use crate::menu::{Menu, MenuName};

const LIST_PREFIX: &str = "list_";
const HANDLER_PREFIX: &str = "choose_";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Str(String),
    Punct(char),
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            chars: src.chars().peekable(),
            line: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn error(&self, message: impl Into<String>) -> NavError {
        NavError::Script {
            line: self.line,
            message: message.into(),
        }
    }

    fn skip_trivia(&mut self) -> Result<(), NavError> {
        loop {
            match self.chars.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') => {
                    let mut ahead = self.chars.clone();
                    ahead.next();
                    match ahead.next() {
                        Some('/') => {
                            while let Some(c) = self.bump() {
                                if c == '\n' {
                                    break;
                                }
                            }
                        }
                        Some('*') => {
                            self.bump();
                            self.bump();
                            let mut star = false;
                            loop {
                                match self.bump() {
                                    Some('/') if star => break,
                                    Some(c) => star = c == '*',
                                    None => return Err(self.error("unterminated comment")),
                                }
                            }
                        }
                        _ => return Ok(()),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// Next token and the line it starts on.
    fn next_token(&mut self) -> Result<Option<(Token, usize)>, NavError> {
        self.skip_trivia()?;
        let line = self.line;
        let Some(c) = self.bump() else {
            return Ok(None);
        };

        let token = match c {
            '\'' | '"' => Token::Str(self.string(c)?),
            c if is_ident_char(c) => {
                let mut ident = String::from(c);
                while let Some(&next) = self.chars.peek() {
                    if !is_ident_char(next) {
                        break;
                    }
                    ident.push(next);
                    self.bump();
                }
                Token::Ident(ident)
            }
            c => Token::Punct(c),
        };
        Ok(Some((token, line)))
    }

    fn string(&mut self, quote: char) -> Result<String, NavError> {
        let mut out = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    // Line continuation.
                    Some('\n') => {}
                    Some(c) => out.push(c),
                    None => return Err(self.error("unterminated string literal")),
                },
                Some('\n') | None => return Err(self.error("unterminated string literal")),
                Some(c) => out.push(c),
            }
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl Parser<'_> {
    fn next(&mut self) -> Result<Option<(Token, usize)>, NavError> {
        self.lexer.next_token()
    }

    fn expect_punct(&mut self, want: char, context: &str) -> Result<(), NavError> {
        match self.next()? {
            Some((Token::Punct(c), _)) if c == want => Ok(()),
            Some((other, line)) => Err(NavError::Script {
                line,
                message: format!("expected '{want}' {context}, found {}", describe(&other)),
            }),
            None => Err(self
                .lexer
                .error(format!("expected '{want}' {context}, found end of input"))),
        }
    }

    fn ident(&mut self) -> Result<Option<(String, usize)>, NavError> {
        match self.next()? {
            Some((Token::Ident(ident), line)) => Ok(Some((ident, line))),
            _ => Ok(None),
        }
    }

    /// Body of `[ 'a', 'b', ]`, after the `=`.
    fn string_array(&mut self, list: &str) -> Result<Vec<String>, NavError> {
        let context = format!("in {list}");
        self.expect_punct('[', &context)?;

        let mut items = Vec::new();
        loop {
            match self.next()? {
                Some((Token::Punct(']'), _)) => return Ok(items),
                Some((Token::Str(s), _)) => items.push(s),
                Some((other, line)) => {
                    return Err(NavError::Script {
                        line,
                        message: format!("expected string {context}, found {}", describe(&other)),
                    })
                }
                None => return Err(self.lexer.error(format!("unterminated array {context}"))),
            }

            match self.next()? {
                Some((Token::Punct(']'), _)) => return Ok(items),
                Some((Token::Punct(','), _)) => {}
                Some((other, line)) => {
                    return Err(NavError::Script {
                        line,
                        message: format!("expected ',' or ']' {context}, found {}", describe(&other)),
                    })
                }
                None => return Err(self.lexer.error(format!("unterminated array {context}"))),
            }
        }
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Ident(ident) => format!("'{ident}'"),
        Token::Str(s) => format!("string '{s}'"),
        Token::Punct(c) => format!("'{c}'"),
    }
}

fn menu_name(id: &str, line: usize) -> Result<MenuName, NavError> {
    id.parse().map_err(|_| NavError::Script {
        line,
        message: format!("'{id}' does not name a navigation menu"),
    })
}

/// Reads every `list_<menu>` array and `choose_<menu>` handler in `src`.
///
/// Menus come back in declaration order. A handler whose list is never
/// declared yields an empty menu.
pub fn parse(src: &str) -> Result<Vec<Menu>, NavError> {
    let mut parser = Parser {
        lexer: Lexer::new(src),
    };
    let mut menus: Vec<Menu> = Vec::new();
    let mut handlers: Vec<MenuName> = Vec::new();

    while let Some((token, _)) = parser.next()? {
        let Token::Ident(keyword) = token else {
            continue;
        };

        match keyword.as_str() {
            "var" => {
                let Some((ident, line)) = parser.ident()? else {
                    continue;
                };
                let Some(id) = ident.strip_prefix(LIST_PREFIX) else {
                    continue;
                };
                let name = menu_name(id, line)?;
                if menus.iter().any(|m| m.name() == name) {
                    return Err(NavError::Script {
                        line,
                        message: format!("{ident} declared twice"),
                    });
                }
                parser.expect_punct('=', &format!("after {ident}"))?;
                let destinations = parser.string_array(&ident)?;
                debug!(menu = %name, entries = destinations.len(), "read list");
                menus.push(Menu::new(name, destinations));
            }
            "function" => {
                let Some((ident, line)) = parser.ident()? else {
                    continue;
                };
                if let Some(id) = ident.strip_prefix(HANDLER_PREFIX) {
                    handlers.push(menu_name(id, line)?);
                }
            }
            _ => {}
        }
    }

    for name in handlers {
        if !menus.iter().any(|m| m.name() == name) {
            debug!(menu = %name, "handler without list");
            menus.push(Menu::new(name, Vec::<String>::new()));
        }
    }

    Ok(menus)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"var list_across0 = [
'_contents.htm',
'_reference.htm'
];
var list_current0 = [
'atomic_norm_sq.cpp.htm#Theory',
"atomic_norm_sq.cpp.htm#Start Class Definition",
];
function choose_across0(item)
{	var index          = item.selectedIndex;
	item.selectedIndex = 0;
	if(index > 0)
		document.location = list_across0[index-1];
}
function choose_down0(item)
{	var index          = item.selectedIndex;
	item.selectedIndex = 0;
	if(index > 0)
		document.location = list_down0[index-1];
}
"#;

    #[test]
    fn reads_lists_and_handler_only_menus() {
        let menus = parse(PAGE).unwrap();
        let names: Vec<_> = menus.iter().map(Menu::name).collect();
        assert_eq!(
            names,
            vec![MenuName::Across, MenuName::Current, MenuName::Down(0)]
        );
        assert_eq!(menus[0].destinations(), ["_contents.htm", "_reference.htm"]);
        assert_eq!(
            menus[1].destinations()[1],
            "atomic_norm_sq.cpp.htm#Start Class Definition"
        );
        assert!(menus[2].is_empty());
    }

    #[test]
    fn skips_comments_and_unrelated_vars() {
        let src = "// generated\nvar other = 3; /* var list_up0 = ['x']; */\nvar list_up0 = ['a\\'b.htm'];";
        let menus = parse(src).unwrap();
        assert_eq!(menus.len(), 1);
        assert_eq!(menus[0].destinations(), ["a'b.htm"]);
    }

    #[test]
    fn reports_line_of_bad_entry() {
        let src = "var list_up0 = [\n'a.htm',\n42\n];";
        let err = parse(src).unwrap_err();
        assert!(matches!(err, NavError::Script { line: 3, .. }), "{err}");
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = parse("var list_up0 = ['a.htm\n];").unwrap_err();
        assert!(err.to_string().contains("unterminated string"));
    }

    #[test]
    fn unknown_list_name_is_an_error() {
        let err = parse("var list_sideways0 = [];").unwrap_err();
        assert!(err.to_string().contains("sideways0"));
    }

    #[test]
    fn duplicate_list_is_an_error() {
        let err = parse("var list_up0 = [];\nvar list_up0 = [];").unwrap_err();
        assert!(matches!(err, NavError::Script { line: 2, .. }));
    }
}
