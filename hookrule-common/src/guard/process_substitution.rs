//! Detection of shell process substitution (`<(...)` / `>(...)`).

/// Whether `command` contains live `<(` or `>(` syntax.
///
/// Sequences inside single- or double-quoted spans are ignored. Outside
/// quotes a backslash escapes the next character, except that it does not
/// neutralise the substitution: `\<(` still counts.
pub fn has_process_substitution(command: &str) -> bool {
    let chars: Vec<char> = command.chars().collect();
    let mut quote: Option<char> = None;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match quote {
            Some('\'') => {
                if c == '\'' {
                    quote = None;
                }
            }
            Some(_) => {
                if c == '\\' {
                    // Skip the escaped character inside double quotes
                    i += 1;
                } else if c == '"' {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' => quote = Some(c),
                '\\' if !matches!(chars.get(i + 1), None | Some('<') | Some('>')) => i += 1,
                '<' | '>' if chars.get(i + 1) == Some(&'(') => return true,
                _ => {}
            },
        }
        i += 1;
    }

    false
}
