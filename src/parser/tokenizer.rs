//! Line tokenizer for the PostScript subset.
//!
//! Tokens are whitespace-delimited. A parenthesized string that spans several
//! whitespace groups is reassembled into a single token; the iterator pulls
//! ahead only as far as the word that closes the string.

/// Pull-based token iterator over one input line.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    rest: &'a str,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer for one line of input.
    pub fn new(line: &'a str) -> Self {
        Self { rest: line }
    }

    fn next_word(&mut self) -> Option<&'a str> {
        self.rest = self.rest.trim_start();
        if self.rest.is_empty() {
            return None;
        }
        let end = self
            .rest
            .find(char::is_whitespace)
            .unwrap_or(self.rest.len());
        let (word, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(word)
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let word = self.next_word()?;

        // A string token that is not closed within this word swallows
        // following words up to the one ending with ')'.
        if word.starts_with('(') && !word.ends_with(')') {
            let mut token = word.to_string();
            while let Some(part) = self.next_word() {
                token.push(' ');
                token.push_str(part);
                if part.ends_with(')') {
                    break;
                }
            }
            return Some(token);
        }

        Some(word.to_string())
    }
}

/// Tokenize a whole line into a vector.
pub fn tokenize(line: &str) -> Vec<String> {
    Tokenizer::new(line).collect()
}
