//! Column declarations: `name`, `name[4]`, `name[3][2]`.

use rowan::TextRange;
use stogen_core::MAX_DIMENSION;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    /// Target-language type, substituted verbatim.
    pub scalar_type: String,
    /// Array dimensions in declaration order. Empty for a scalar.
    pub arity: Vec<usize>,
    pub range: TextRange,
}

impl Column {
    /// Number of column slots this column occupies.
    pub fn flat_width(&self) -> usize {
        self.arity.iter().product()
    }

    pub fn is_array(&self) -> bool {
        !self.arity.is_empty()
    }
}

/// Split `key` into its name and array dimensions.
///
/// Suffixes are stripped right to left, so `f[3][2]` yields `("f", [3, 2])`.
/// On failure the error is a human-readable reason.
pub(crate) fn parse_declaration(key: &str) -> Result<(&str, Vec<usize>), String> {
    let mut rest = key.trim_end();
    let mut dims = Vec::new();

    while let Some(head) = rest.strip_suffix(']') {
        let Some(open) = head.rfind('[') else {
            return Err("`]` without matching `[`".to_string());
        };
        dims.push(parse_dimension(&head[open + 1..])?);
        rest = head[..open].trim_end();
    }

    if rest.contains(['[', ']']) {
        return Err("unbalanced brackets".to_string());
    }

    dims.reverse();
    Ok((rest, dims))
}

fn parse_dimension(body: &str) -> Result<usize, String> {
    let body = body.trim();
    if body.is_empty() {
        return Err("empty `[]`".to_string());
    }
    if !body.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("`{body}` is not a positive integer"));
    }
    match body.parse::<usize>() {
        Ok(0) => Err("dimension must be at least 1".to_string()),
        Ok(n) if n <= MAX_DIMENSION => Ok(n),
        _ => Err(format!("dimension `{body}` exceeds the limit of {MAX_DIMENSION}")),
    }
}
