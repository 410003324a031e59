use super::*;

/// Advance the character iterator and update line/column tracking
pub(super) fn bump(lexer: &mut Lexer) -> Option<char> {
    let curr = lexer.peek;
    if let Some(c) = curr {
        if c == '\n' {
            lexer.line += 1;
            lexer.column = 1;
        } else {
            lexer.column += 1;
        }
    }
    lexer.peek = lexer.input.next();
    curr
}

/// The character after the current one, without consuming anything.
pub(super) fn peek_second(lexer: &Lexer) -> Option<char> {
    lexer.input.clone().next()
}

/// Skip whitespace and `#` / `//` comments. Newlines carry no meaning.
pub(super) fn skip_whitespace_and_comments(lexer: &mut Lexer) {
    while let Some(c) = lexer.peek {
        match c {
            ' ' | '\t' | '\r' | '\n' => {
                bump(lexer);
            }
            '#' => skip_to_line_end(lexer),
            '/' if peek_second(lexer) == Some('/') => skip_to_line_end(lexer),
            _ => break,
        }
    }
}

// Leaves the newline in place; the whitespace loop eats it.
fn skip_to_line_end(lexer: &mut Lexer) {
    while let Some(c) = lexer.peek {
        if c == '\n' {
            break;
        }
        bump(lexer);
    }
}
